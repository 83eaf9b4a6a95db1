//! # Storage Module
//!
//! Handles all data persistence for the spa service tracker.
//!
//! The domain layer only ever sees the [`ServiceStore`] trait, injected as an
//! `Arc<dyn ServiceStore>`. Two implementations ship:
//!
//! - **SqliteStore**: SQLite through SQLx, used by the desktop app
//! - **InMemoryStore**: process-local, used in tests and for quick demos
//!
//! Raw backend errors are mapped to [`StoreError`] inside each adapter.

pub mod in_memory;
pub mod sqlite;
pub mod traits;

pub use in_memory::InMemoryStore;
pub use sqlite::{DbConnection, SqliteStore};
pub use traits::{ServiceStore, StoreError};
