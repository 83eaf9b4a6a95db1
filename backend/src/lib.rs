//! # Spa Tracker Backend
//!
//! Contains all non-UI logic for the spa service tracker.
//!
//! - **Domain**: entry form, roster, dashboard stats and the service that
//!   sequences them
//! - **Storage**: the [`ServiceStore`](storage::ServiceStore) trait and its
//!   SQLite and in-memory implementations
//! - **Config**: deployment settings
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (egui frontend)
//!     ↓
//! Domain Layer (TrackerService and components)
//!     ↓
//! Storage Layer (ServiceStore)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::config::{sqlite_parent_dir, TrackerConfig};
use crate::domain::{SystemClock, TrackerService};
use crate::storage::{InMemoryStore, ServiceStore, SqliteStore};

pub use config::ThemeVariant;

/// Open the configured store
pub async fn connect_store(config: &TrackerConfig) -> Result<Arc<dyn ServiceStore>> {
    if config.uses_memory_store() {
        info!("Using in-memory store; nothing will be persisted");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    if let Some(dir) = sqlite_parent_dir(&config.database_url) {
        std::fs::create_dir_all(&dir)?;
    }
    let store = SqliteStore::connect(&config.database_url).await?;
    Ok(Arc::new(store))
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &TrackerConfig) -> Result<TrackerService> {
    info!("Setting up store");
    let store = connect_store(config).await?;

    info!("Setting up domain model");
    Ok(TrackerService::new(
        store,
        Arc::new(SystemClock),
        config.form_policy(),
        config.active_staff_metric,
    ))
}
