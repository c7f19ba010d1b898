use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::storage::Storage;

/// Version written into every persisted envelope. Bare arrays (the layout of
/// earlier app builds) are accepted on load and rewritten at this version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(serde::Serialize, serde::Deserialize)]
struct Envelope<E> {
    version: u32,
    records: Vec<E>,
}

/// One record kind held by a [`CollectionStore`].
///
/// `build` and `merge` own the required-field validation for their entity:
/// both return `StoreError::Validation` with the entity's required-field
/// message and must leave nothing half-constructed on failure.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Fields a create form may leave unset.
    type Draft: Send;
    /// Partial edit where every field is optional and set fields win.
    type Patch: Send;

    /// Well-known storage key for the whole collection.
    const KEY: &'static str;
    /// Human-readable record kind, used in not-found errors.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Validates the draft, fills type-specific defaults, and assigns a
    /// fresh id.
    fn build(draft: Self::Draft) -> Result<Self, StoreError>;

    /// Merges the patch onto `self` (patch fields win, id preserved) and
    /// re-validates the merged record.
    fn merge(&self, patch: Self::Patch) -> Result<Self, StoreError>;

    /// Case-insensitive substring match over the entity's searchable fields.
    fn matches(&self, query: &str) -> bool;

    /// Collection written on first use when the storage key is absent.
    fn seed() -> Vec<Self>;
}

/// Ordered collection of one entity type, kept synchronized with its
/// persisted copy.
///
/// Every mutation writes the candidate collection through the storage
/// adapter first and only commits the in-memory replacement once the write
/// succeeded, so a storage failure leaves memory and disk identical to the
/// pre-operation state.
pub struct CollectionStore<E: Entity> {
    storage: Arc<dyn Storage>,
    records: RwLock<Vec<E>>,
}

impl<E: Entity> std::fmt::Debug for CollectionStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("key", &E::KEY)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> CollectionStore<E> {
    /// Hydrates the collection from storage. An absent key means the
    /// collection was never initialized: the seed collection is persisted
    /// immediately and used from there.
    pub async fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        let records = match storage.get(E::KEY).await? {
            Some(raw) => Self::decode(&storage, &raw).await?,
            None => {
                let seed = E::seed();
                info!(key = E::KEY, count = seed.len(), "seeding collection");
                storage.put(E::KEY, &encode(&seed)?).await?;
                seed
            }
        };

        debug!(key = E::KEY, count = records.len(), "collection loaded");

        Ok(Self {
            storage,
            records: RwLock::new(records),
        })
    }

    async fn decode(storage: &Arc<dyn Storage>, raw: &str) -> Result<Vec<E>, StoreError> {
        match serde_json::from_str::<Envelope<E>>(raw) {
            Ok(envelope) if envelope.version == SCHEMA_VERSION => Ok(envelope.records),
            Ok(envelope) => Err(StoreError::UnsupportedSchema(envelope.version)),
            // Earlier builds persisted the bare array. Treat it as version 0
            // and rewrite the envelope in place.
            Err(_) => {
                let records = serde_json::from_str::<Vec<E>>(raw)?;
                info!(key = E::KEY, "migrating unversioned payload");
                storage.put(E::KEY, &encode(&records)?).await?;
                Ok(records)
            }
        }
    }

    /// Snapshot of the collection in insertion order.
    pub async fn load(&self) -> Vec<E> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<E> {
        let records = self.records.read().await;
        records.iter().find(|r| r.id() == id).cloned()
    }

    /// Validates the draft and appends the materialized record. On a
    /// validation or storage failure neither the collection nor the
    /// persisted copy changes.
    pub async fn add(&self, draft: E::Draft) -> Result<E, StoreError> {
        let record = E::build(draft)?;

        let mut records = self.records.write().await;
        let mut next = records.clone();
        next.push(record.clone());
        self.persist(&next).await?;
        *records = next;

        info!(key = E::KEY, id = record.id(), "record added");
        Ok(record)
    }

    /// Merges the patch onto the record with `id`, keeping list order.
    /// A missing id is surfaced, not skipped.
    pub async fn update(&self, id: &str, patch: E::Patch) -> Result<E, StoreError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;

        let merged = records[position].merge(patch)?;
        let mut next = records.clone();
        next[position] = merged.clone();
        self.persist(&next).await?;
        *records = next;

        info!(key = E::KEY, id, "record updated");
        Ok(merged)
    }

    /// Removes the record with `id`. A missing id is surfaced, not skipped.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;

        let mut next = records.clone();
        next.remove(position);
        self.persist(&next).await?;
        *records = next;

        info!(key = E::KEY, id, "record removed");
        Ok(())
    }

    /// Removes every record whose id is in `ids` with a single persisted
    /// write. Ids that are not present are ignored; returns the number of
    /// records actually removed.
    pub async fn remove_many(&self, ids: &HashSet<String>) -> Result<usize, StoreError> {
        let mut records = self.records.write().await;
        let next: Vec<E> = records
            .iter()
            .filter(|r| !ids.contains(r.id()))
            .cloned()
            .collect();

        let removed = records.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        self.persist(&next).await?;
        *records = next;

        info!(key = E::KEY, removed, "records removed");
        Ok(removed)
    }

    /// Case-insensitive search over the entity's text fields. Read-only,
    /// computed fresh on every call.
    pub async fn search(&self, query: &str) -> Vec<E> {
        let records = self.records.read().await;
        records.iter().filter(|r| r.matches(query)).cloned().collect()
    }

    /// Read-only filter over a snapshot of the collection.
    pub async fn filter<F>(&self, predicate: F) -> Vec<E>
    where
        F: Fn(&E) -> bool,
    {
        let records = self.records.read().await;
        records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn persist(&self, records: &[E]) -> Result<(), StoreError> {
        self.storage.put(E::KEY, &encode(records)?).await
    }
}

fn encode<E: Serialize + Clone>(records: &[E]) -> Result<String, StoreError> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        records: records.to_vec(),
    };
    Ok(serde_json::to_string(&envelope)?)
}
