pub mod course;
pub mod lead;
pub mod user;

pub use course::{
    Category, Course, CourseSortKey, Level, NewCourseRequest, SortOrder, UpdateCourseRequest,
    sort_courses,
};
pub use lead::{Lead, LeadSource, LeadStatus, NewLeadRequest, UpdateLeadRequest};
pub use user::{NewUserRequest, UpdateUserRequest, User, UserRole, UserStatus};
