//! Local collection store for a learning-platform client: validated CRUD
//! over courses, users, and leads, persisted whole-collection as JSON in an
//! on-device key-value table, plus the session services (cart, enrollments,
//! notifications, dashboard analytics) built on top.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::StoreError;
pub use state::AppState;
pub use storage::{MemoryStorage, SqliteStorage, Storage};
pub use store::{CollectionStore, Entity};

/// Installs the default subscriber. Filter with `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "edustore=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
