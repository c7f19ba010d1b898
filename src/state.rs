use std::sync::Arc;

use crate::error::StoreError;
use crate::models::{Course, Lead, User};
use crate::storage::Storage;
use crate::store::CollectionStore;

/// One store per entity type, hydrated once at application start and shared
/// from there. Screens read through these instead of re-reading persistence
/// independently.
pub struct AppState {
    pub courses: CollectionStore<Course>,
    pub users: CollectionStore<User>,
    pub leads: CollectionStore<Lead>,
}

impl AppState {
    pub async fn init(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Ok(Self {
            courses: CollectionStore::open(storage.clone()).await?,
            users: CollectionStore::open(storage.clone()).await?,
            leads: CollectionStore::open(storage).await?,
        })
    }
}
