//! Therapist roster held in memory.
//!
//! The list is always exactly what the store last returned, in the store's
//! name order. Mutations never patch the list locally: a successful add or
//! remove is followed by a full reload, and a failed one leaves the list as it
//! was until the next load.

use log::{error, info, warn};
use shared::Therapist;
use std::sync::Arc;

use crate::domain::errors::{FetchError, RosterError};
use crate::storage::{ServiceStore, StoreError};

/// Result of an add request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The trimmed name was stored
    Added(String),
    /// Blank input; nothing was sent
    Ignored,
}

/// Result of a remove request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(String),
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

/// The user's answer to the destructive-action prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Denied,
}

/// Roster names plus the admin's draft input
pub struct RosterStore {
    store: Arc<dyn ServiceStore>,
    names: Vec<String>,
    loading: bool,
    draft: String,
}

impl RosterStore {
    pub fn new(store: Arc<dyn ServiceStore>) -> Self {
        Self {
            store,
            names: Vec::new(),
            loading: false,
            draft: String::new(),
        }
    }

    /// Names in store order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True while a load is in progress; for display only
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Text in the "new therapist" input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the list with a fetch result; on failure keep the stale list
    pub fn apply_load(&mut self, result: Result<Vec<Therapist>, StoreError>) -> Result<(), FetchError> {
        self.loading = false;
        match result {
            Ok(therapists) => {
                self.names = therapists.into_iter().map(|t| t.name).collect();
                info!("Roster loaded with {} therapists", self.names.len());
                Ok(())
            }
            Err(err) => {
                warn!("Error fetching therapists, keeping {} cached names: {}", self.names.len(), err);
                Err(FetchError::Roster(err))
            }
        }
    }

    /// Fetch every name and replace the list wholesale
    pub async fn load(&mut self) -> Result<(), FetchError> {
        self.begin_load();
        let store = Arc::clone(&self.store);
        let result = store.list_therapists().await;
        self.apply_load(result)
    }

    /// Trim the input; `None` means there is nothing to add
    pub fn prepare_add(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Apply an insert result; success clears the draft
    pub fn finish_add(&mut self, name: &str, result: Result<(), StoreError>) -> Result<(), RosterError> {
        match result {
            Ok(()) => {
                info!("Therapist \"{}\" saved", name);
                self.draft.clear();
                Ok(())
            }
            Err(StoreError::Duplicate(detail)) => {
                warn!("Therapist \"{}\" already exists ({})", name, detail);
                Err(RosterError::Duplicate(name.to_string()))
            }
            Err(source) => {
                error!("Failed to add therapist \"{}\": {}", name, source);
                Err(RosterError::Add {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Add a therapist and reload the roster
    pub async fn add(&mut self, raw: &str) -> Result<AddOutcome, RosterError> {
        let Some(name) = Self::prepare_add(raw) else {
            return Ok(AddOutcome::Ignored);
        };

        let store = Arc::clone(&self.store);
        let result = store.insert_therapist(&Therapist::new(name.clone())).await;
        self.finish_add(&name, result)?;

        // The insert already succeeded; a failed reload only leaves the list stale
        if let Err(err) = self.load().await {
            warn!("Reload after adding \"{}\" failed: {}", name, err);
        }
        Ok(AddOutcome::Added(name))
    }

    /// Prompt shown before removing a therapist
    pub fn confirmation_prompt(name: &str) -> String {
        format!("Are you sure you want to remove {}?", name)
    }

    /// Apply a delete result
    pub fn finish_remove(&mut self, name: &str, result: Result<(), StoreError>) -> Result<(), RosterError> {
        match result {
            Ok(()) => {
                info!("Therapist \"{}\" removed", name);
                Ok(())
            }
            Err(source) => {
                error!("Failed to remove therapist \"{}\": {}", name, source);
                Err(RosterError::Remove {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Remove a therapist once the user has confirmed, then reload
    pub async fn remove(&mut self, name: &str, confirmation: Confirmation) -> Result<RemoveOutcome, RosterError> {
        if confirmation == Confirmation::Denied {
            info!("Removal of \"{}\" cancelled", name);
            return Ok(RemoveOutcome::Cancelled);
        }

        let store = Arc::clone(&self.store);
        let result = store.delete_therapist(name).await;
        self.finish_remove(name, result)?;

        if let Err(err) = self.load().await {
            warn!("Reload after removing \"{}\" failed: {}", name, err);
        }
        Ok(RemoveOutcome::Removed(name.to_string()))
    }
}
