use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use edustore::models::{Category, Course, Level, NewCourseRequest, NewLeadRequest, NewUserRequest};
use edustore::{AppState, CollectionStore, Entity, MemoryStorage, SqliteStorage, Storage, StoreError};

/// Storage wrapper that can be switched into a failure mode, for checking
/// that a failed write commits nothing.
struct FlakyStorage {
    inner: MemoryStorage,
    fail_puts: AtomicBool,
}

impl FlakyStorage {
    fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            fail_puts: AtomicBool::new(false),
        }
    }

    fn fail_next_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }
}

/// Storage wrapper counting writes, for checking batch operations persist
/// exactly once.
struct CountingStorage {
    inner: MemoryStorage,
    puts: AtomicUsize,
}

impl CountingStorage {
    fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            puts: AtomicUsize::new(0),
        }
    }

    fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }
}

fn course_draft(title: &str) -> NewCourseRequest {
    NewCourseRequest {
        title: title.to_string(),
        instructor: "Jane".to_string(),
        price: 49.0,
        level: Some(Level::Beginner),
        category: Some(Category::Web),
        ..Default::default()
    }
}

#[tokio::test]
async fn sqlite_round_trip_preserves_collections() {
    edustore::init_tracing();

    let storage: Arc<dyn Storage> = Arc::new(
        SqliteStorage::connect("sqlite::memory:")
            .await
            .expect("Failed to open database"),
    );

    let store = CollectionStore::<Course>::open(storage.clone())
        .await
        .expect("Failed to open store");

    let created = store
        .add(course_draft("Rust for Mobile Engineers"))
        .await
        .expect("Failed to add course");

    // A second store over the same database must materialize the identical
    // collection, content and order.
    let reopened = CollectionStore::<Course>::open(storage)
        .await
        .expect("Failed to reopen store");

    let first = store.load().await;
    let second = reopened.load().await;
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
    }
    assert_eq!(second.last().map(|c| c.id.as_str()), Some(created.id.as_str()));
}

#[tokio::test]
async fn app_state_hydrates_all_three_collections() {
    let storage: Arc<dyn Storage> = Arc::new(
        SqliteStorage::connect("sqlite::memory:")
            .await
            .expect("Failed to open database"),
    );

    let state = AppState::init(storage.clone())
        .await
        .expect("Failed to init app state");

    assert_eq!(state.courses.len().await, 3);
    assert_eq!(state.users.len().await, 3);
    assert_eq!(state.leads.len().await, 2);

    for key in ["courses", "users", "leads"] {
        let raw = storage
            .get(key)
            .await
            .expect("Failed to read storage")
            .unwrap_or_else(|| panic!("{key} was not persisted"));
        assert!(raw.contains("\"version\":1"));
    }
}

#[tokio::test]
async fn failed_write_commits_nothing() {
    let flaky = Arc::new(FlakyStorage::new());
    let storage: Arc<dyn Storage> = flaky.clone();

    let store = CollectionStore::<Course>::open(storage.clone())
        .await
        .expect("Failed to open store");
    let before = store.load().await;
    let persisted_before = storage
        .get(Course::KEY)
        .await
        .expect("Failed to read storage");

    flaky.fail_next_puts(true);
    let err = store
        .add(course_draft("Never Lands"))
        .await
        .expect_err("add must fail when the write fails");
    assert!(matches!(err, StoreError::Database(_)));

    // Neither side moved: memory still matches the persisted copy.
    let after = store.load().await;
    assert_eq!(after.len(), before.len());
    assert!(!after.iter().any(|c| c.title == "Never Lands"));

    flaky.fail_next_puts(false);
    let persisted_after = storage
        .get(Course::KEY)
        .await
        .expect("Failed to read storage");
    assert_eq!(persisted_before, persisted_after);
}

#[tokio::test]
async fn bulk_delete_writes_exactly_once() {
    let counting = Arc::new(CountingStorage::new());
    let storage: Arc<dyn Storage> = counting.clone();

    let store = CollectionStore::<Course>::open(storage)
        .await
        .expect("Failed to open store");
    let seed_writes = counting.put_count();

    let ids: HashSet<String> = store
        .load()
        .await
        .iter()
        .take(2)
        .map(|c| c.id.clone())
        .collect();
    let removed = store.remove_many(&ids).await.expect("Failed to bulk remove");

    assert_eq!(removed, 2);
    assert_eq!(counting.put_count(), seed_writes + 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn bulk_delete_matches_sequential_removes() {
    let storage_a: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let storage_b: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    let bulk = CollectionStore::<Course>::open(storage_a)
        .await
        .expect("Failed to open store");
    let sequential = CollectionStore::<Course>::open(storage_b)
        .await
        .expect("Failed to open store");

    let ids: Vec<String> = bulk.load().await.iter().take(2).map(|c| c.id.clone()).collect();

    let id_set: HashSet<String> = ids.iter().cloned().collect();
    bulk.remove_many(&id_set).await.expect("Failed to bulk remove");
    for id in &ids {
        sequential.remove(id).await.expect("Failed to remove");
    }

    let bulk_ids: Vec<String> = bulk.load().await.iter().map(|c| c.id.clone()).collect();
    let sequential_ids: Vec<String> = sequential.load().await.iter().map(|c| c.id.clone()).collect();
    assert_eq!(bulk_ids, sequential_ids);
}

#[tokio::test]
async fn collections_are_isolated_per_key() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let state = AppState::init(storage)
        .await
        .expect("Failed to init app state");

    state
        .users
        .add(NewUserRequest {
            name: "Dana Cruz".to_string(),
            email: "dana@example.com".to_string(),
            role: Some(edustore::models::UserRole::Student),
            status: None,
        })
        .await
        .expect("Failed to add user");

    state
        .leads
        .add(NewLeadRequest {
            name: "Grace Field".to_string(),
            email: "grace@example.com".to_string(),
            status: Some(edustore::models::LeadStatus::New),
            source: Some(edustore::models::LeadSource::Referral),
            ..Default::default()
        })
        .await
        .expect("Failed to add lead");

    assert_eq!(state.courses.len().await, 3);
    assert_eq!(state.users.len().await, 4);
    assert_eq!(state.leads.len().await, 3);
}
