//! # SQLite Storage Module
//!
//! The production [`ServiceStore`] backed by a SQLite file through SQLx.
//!
//! ## Components
//!
//! - **connection.rs** - pool creation and schema setup
//! - **therapist_repository.rs** - the `therapists` table
//! - **entry_repository.rs** - the `service_entries` table
//!
//! Driver errors are translated into [`StoreError`] here and nowhere else.

pub mod connection;
pub mod entry_repository;
pub mod therapist_repository;

pub use connection::DbConnection;
pub use entry_repository::EntryRepository;
pub use therapist_repository::TherapistRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use shared::{NewServiceEntry, StoredEntry, Therapist};

use crate::storage::traits::{ServiceStore, StoreError};

/// SQLite error codes for PRIMARY KEY and UNIQUE constraint failures,
/// plus the Postgres unique_violation code for hosted deployments
const UNIQUE_VIOLATION_CODES: [&str; 3] = ["1555", "2067", "23505"];

/// Translate a raw SQLx error into the store's tagged error
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code_matches = db_err
            .code()
            .map(|code| UNIQUE_VIOLATION_CODES.iter().any(|known| *known == code))
            .unwrap_or(false);
        if db_err.is_unique_violation() || code_matches {
            return StoreError::Duplicate(db_err.message().to_string());
        }
    }
    StoreError::Other(err.to_string())
}

/// SQLite-backed implementation of [`ServiceStore`]
#[derive(Clone)]
pub struct SqliteStore {
    therapists: TherapistRepository,
    entries: EntryRepository,
}

impl SqliteStore {
    pub fn new(db: DbConnection) -> Self {
        Self {
            therapists: TherapistRepository::new(db.clone()),
            entries: EntryRepository::new(db),
        }
    }

    /// Open (creating if needed) the database at `url`
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        info!("Opening SQLite store at {}", url);
        let db = DbConnection::new(url).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl ServiceStore for SqliteStore {
    async fn list_therapists(&self) -> Result<Vec<Therapist>, StoreError> {
        let therapists = self.therapists.list_therapists().await?;
        debug!("Loaded {} therapists", therapists.len());
        Ok(therapists)
    }

    async fn insert_therapist(&self, therapist: &Therapist) -> Result<(), StoreError> {
        self.therapists.store_therapist(therapist).await
    }

    async fn delete_therapist(&self, name: &str) -> Result<(), StoreError> {
        let removed = self.therapists.delete_therapist(name).await?;
        debug!("Deleted {} therapist row(s) named {}", removed, name);
        Ok(())
    }

    async fn list_entries_since(&self, since: DateTime<Utc>) -> Result<Vec<StoredEntry>, StoreError> {
        self.entries.list_entries_since(since).await
    }

    async fn insert_entry(&self, entry: &NewServiceEntry) -> Result<(), StoreError> {
        let id = self.entries.store_entry(entry, Utc::now()).await?;
        debug!("Stored entry {} for bill {}", id, entry.bill_no);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::PaymentBreakdown;
    use tempfile::TempDir;

    async fn setup_test() -> (TempDir, SqliteStore, DbConnection) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = DbConnection::init_test(temp_dir.path())
            .await
            .expect("Failed to create test database");
        (temp_dir, SqliteStore::new(db.clone()), db)
    }

    fn sample_entry(bill_no: &str, cash: f64) -> NewServiceEntry {
        NewServiceEntry {
            bill_no: bill_no.to_string(),
            customer_name: "Ravi".to_string(),
            phone_no: "9876543210".to_string(),
            staff_name: "Meera".to_string(),
            in_time: "10:00".to_string(),
            out_time: "11:00".to_string(),
            payment: PaymentBreakdown {
                cash,
                ..Default::default()
            },
            remarks: String::new(),
        }
    }

    #[tokio::test]
    async fn test_therapists_listed_in_name_order() {
        let (_dir, store, _db) = setup_test().await;

        for name in ["Zara", "Anita", "Meera"] {
            store.insert_therapist(&Therapist::new(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_therapists()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Anita", "Meera", "Zara"]);
    }

    #[tokio::test]
    async fn test_duplicate_therapist_maps_to_duplicate_error() {
        let (_dir, store, _db) = setup_test().await;

        store.insert_therapist(&Therapist::new("Anita")).await.unwrap();
        let err = store
            .insert_therapist(&Therapist::new("Anita"))
            .await
            .expect_err("second insert must fail");

        assert!(err.is_duplicate(), "expected duplicate, got {:?}", err);
        assert_eq!(store.list_therapists().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_therapist_by_exact_name() {
        let (_dir, store, _db) = setup_test().await;

        store.insert_therapist(&Therapist::new("Anita")).await.unwrap();
        store.insert_therapist(&Therapist::new("Anitha")).await.unwrap();
        store.delete_therapist("Anita").await.unwrap();

        let remaining = store.list_therapists().await.unwrap();
        assert_eq!(remaining, vec![Therapist::new("Anitha")]);

        // Unknown names are a no-op
        store.delete_therapist("Nobody").await.unwrap();
    }

    #[tokio::test]
    async fn test_entries_round_trip_with_payment() {
        let (_dir, store, _db) = setup_test().await;
        let before = Utc::now() - Duration::seconds(1);

        let mut entry = sample_entry("B-1", 0.0);
        entry.payment = PaymentBreakdown {
            cash: 100.0,
            card: 50.0,
            gpay: 25.0,
            upi: 25.0,
        };
        entry.remarks = "Regular customer".to_string();
        store.insert_entry(&entry).await.unwrap();

        let entries = store.list_entries_since(before).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry, entry);
        assert!(!entries[0].id.is_empty());
        assert_eq!(entries[0].entry.remarks, "Regular customer");
        assert!(entries[0].created_at >= before);
    }

    #[tokio::test]
    async fn test_stored_columns_keep_their_values() {
        let (_dir, _store, db) = setup_test().await;
        let repo = EntryRepository::new(db);
        let created_at = DateTime::parse_from_rfc3339("2026-10-19T08:35:12.250Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut entry = sample_entry("B-9", 75.5);
        entry.remarks = "Hot stone, extra 15 min".to_string();
        let id = repo.store_entry(&entry, created_at).await.unwrap();

        let stored = repo.list_entries_since(created_at).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].entry, entry);
        assert_eq!(stored[0].created_at, created_at);
    }

    #[tokio::test]
    async fn test_list_entries_since_excludes_older_rows() {
        let (_dir, _store, db) = setup_test().await;
        let repo = EntryRepository::new(db);
        let cutoff = Utc::now() - Duration::hours(2);

        repo.store_entry(&sample_entry("OLD", 10.0), cutoff - Duration::minutes(1))
            .await
            .unwrap();
        repo.store_entry(&sample_entry("EDGE", 20.0), cutoff).await.unwrap();
        repo.store_entry(&sample_entry("NEW", 30.0), cutoff + Duration::minutes(5))
            .await
            .unwrap();

        let bills: Vec<String> = repo
            .list_entries_since(cutoff)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.entry.bill_no)
            .collect();
        assert_eq!(bills, vec!["EDGE", "NEW"]);
    }
}
