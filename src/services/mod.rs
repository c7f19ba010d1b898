pub mod analytics;
pub mod cart;
pub mod notifications;

pub use analytics::{CategoryCount, DashboardStats, dashboard_stats};
pub use cart::{Cart, CartItem, Enrollment, Enrollments};
pub use notifications::{Notification, NotificationCenter, NotificationKind};
