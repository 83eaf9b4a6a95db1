//! # Storage Traits
//!
//! This module defines the storage abstraction the domain layer talks to.
//! Every backend (SQLite, in-memory) implements [`ServiceStore`] and maps its
//! own raw errors into [`StoreError`] exactly once, so nothing above this
//! layer ever inspects driver error codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{NewServiceEntry, StoredEntry, Therapist};
use thiserror::Error;

/// Errors surfaced by a store adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    /// Any other backend failure
    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

/// Trait defining the tabular store used by the tracker
///
/// These are the only operations the domain layer performs against the
/// backend. Implementations must be cheap to share behind an `Arc`.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// List every therapist ordered by name ascending
    async fn list_therapists(&self) -> Result<Vec<Therapist>, StoreError>;

    /// Insert a therapist; a name that already exists yields `StoreError::Duplicate`
    async fn insert_therapist(&self, therapist: &Therapist) -> Result<(), StoreError>;

    /// Delete the therapist whose name matches exactly
    async fn delete_therapist(&self, name: &str) -> Result<(), StoreError>;

    /// List entries created at or after `since`
    async fn list_entries_since(&self, since: DateTime<Utc>) -> Result<Vec<StoredEntry>, StoreError>;

    /// Persist a new service entry
    async fn insert_entry(&self, entry: &NewServiceEntry) -> Result<(), StoreError>;
}
