//! In-memory implementation of ServiceStore for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{NewServiceEntry, StoredEntry, Therapist};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::storage::traits::{ServiceStore, StoreError};

/// In-memory store
///
/// Names live in a `BTreeSet`, which gives the ascending order the real
/// store's `ORDER BY name` provides. Writes can be made to fail on demand and
/// every write attempt is counted, so tests can assert that validation stops
/// before any I/O.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    therapists: Arc<RwLock<BTreeSet<String>>>,
    entries: Arc<RwLock<Vec<StoredEntry>>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
    write_calls: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with roster names
    pub fn with_therapists<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut therapists) = store.therapists.write() {
            therapists.extend(names.into_iter().map(Into::into));
        }
        store
    }

    /// Insert an entry with an explicit creation time, bypassing write accounting
    pub fn seed_entry(&self, entry: NewServiceEntry, created_at: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push(StoredEntry {
                id: Uuid::new_v4().to_string(),
                entry,
                created_at,
            });
        }
    }

    /// Make every following write fail with `StoreError::Other`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every following read fail with `StoreError::Other`
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of write operations attempted so far
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored entry
    pub fn entries(&self) -> Vec<StoredEntry> {
        self.entries.read().map(|e| e.clone()).unwrap_or_default()
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Other("Simulated write failure".to_string()));
        }
        Ok(())
    }

    fn begin_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Other("Simulated read failure".to_string()));
        }
        Ok(())
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Other(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl ServiceStore for InMemoryStore {
    async fn list_therapists(&self) -> Result<Vec<Therapist>, StoreError> {
        self.begin_read()?;
        let therapists = self.therapists.read().map_err(lock_error)?;
        Ok(therapists.iter().cloned().map(Therapist::new).collect())
    }

    async fn insert_therapist(&self, therapist: &Therapist) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut therapists = self.therapists.write().map_err(lock_error)?;
        if !therapists.insert(therapist.name.clone()) {
            return Err(StoreError::Duplicate(format!(
                "therapists.name already contains {}",
                therapist.name
            )));
        }
        Ok(())
    }

    async fn delete_therapist(&self, name: &str) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut therapists = self.therapists.write().map_err(lock_error)?;
        therapists.remove(name);
        Ok(())
    }

    async fn list_entries_since(&self, since: DateTime<Utc>) -> Result<Vec<StoredEntry>, StoreError> {
        self.begin_read()?;
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries
            .iter()
            .filter(|e| e.created_at >= since)
            .cloned()
            .collect())
    }

    async fn insert_entry(&self, entry: &NewServiceEntry) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.push(StoredEntry {
            id: Uuid::new_v4().to_string(),
            entry: entry.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = InMemoryStore::with_therapists(["Meera"]);
        let err = store
            .insert_therapist(&Therapist::new("Meera"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.write_calls(), 1);
    }

    #[tokio::test]
    async fn test_simulated_failures() {
        let store = InMemoryStore::new();
        store.set_fail_writes(true);
        assert!(matches!(
            store.insert_therapist(&Therapist::new("Asha")).await,
            Err(StoreError::Other(_))
        ));

        store.set_fail_reads(true);
        assert!(store.list_therapists().await.is_err());

        store.set_fail_writes(false);
        store.set_fail_reads(false);
        store.insert_therapist(&Therapist::new("Asha")).await.unwrap();
        assert_eq!(store.list_therapists().await.unwrap().len(), 1);
    }
}
