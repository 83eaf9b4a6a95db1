//! # Tracker Service
//!
//! Wires the entry form, the roster and the dashboard to one injected store.
//!
//! ## Refresh policy
//!
//! Every successful write (entry saved, therapist added or removed) is
//! followed by a full re-fetch of the roster and then of today's entries.
//! Nothing is merged locally, so what the screen shows is always what the
//! store returned last. A refresh always loads the roster first because the
//! stats and the form's staff check both depend on it.
//!
//! ## Driving the service
//!
//! Operations are split into a synchronous `start_*` call that returns a
//! [`StoreRequest`], the store call itself ([`execute`]), and
//! [`TrackerService::handle`], which applies the resulting [`StoreEvent`] and
//! says what to run next. A UI loop spawns each request and feeds completions
//! back on its own thread. The `async` methods (`refresh`, `submit_entry`,
//! `add_therapist`, `remove_therapist`) run the same chain inline.

use chrono::{DateTime, Utc};
use log::{debug, info};
use shared::{DashboardStats, NewServiceEntry, StoredEntry, Therapist};
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::dashboard_stats::{ActiveStaffMetric, DashboardStatsAggregator};
use crate::domain::entry_form::{FormPolicy, ServiceEntryForm};
use crate::domain::errors::{EntryError, FetchError, RosterError};
use crate::domain::roster_store::{AddOutcome, Confirmation, RemoveOutcome, RosterStore};
use crate::storage::{ServiceStore, StoreError};

/// A store call the service wants performed
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    LoadRoster,
    LoadEntries { since: DateTime<Utc> },
    InsertEntry(NewServiceEntry),
    InsertTherapist(String),
    DeleteTherapist(String),
}

/// The outcome of a [`StoreRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    RosterLoaded(Result<Vec<Therapist>, StoreError>),
    EntriesLoaded(Result<Vec<StoredEntry>, StoreError>),
    EntryInserted(Result<(), StoreError>),
    TherapistInserted { name: String, result: Result<(), StoreError> },
    TherapistDeleted { name: String, result: Result<(), StoreError> },
}

/// Something the user should be told about
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    EntrySaved,
    EntryFailed(EntryError),
    TherapistSaved(String),
    TherapistRemoved(String),
    RosterFailed(RosterError),
    FetchFailed(FetchError),
}

impl Notice {
    /// Text for the notification dialog
    pub fn message(&self) -> String {
        match self {
            Notice::EntrySaved => "Entry saved successfully!".to_string(),
            Notice::EntryFailed(err) => err.user_message(),
            Notice::TherapistSaved(name) => format!("Therapist \"{}\" saved.", name),
            Notice::TherapistRemoved(name) => format!("Therapist \"{}\" removed.", name),
            Notice::RosterFailed(err) => err.user_message(),
            Notice::FetchFailed(err) => format!("Could not refresh data: {}", err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::EntryFailed(_) | Notice::RosterFailed(_) | Notice::FetchFailed(_)
        )
    }

    /// Load failures are logged and shown inline, never as a blocking dialog
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Notice::FetchFailed(_))
    }
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Step {
    pub next: Option<StoreRequest>,
    pub notice: Option<Notice>,
}

/// Perform one store call
pub async fn execute(store: &dyn ServiceStore, request: StoreRequest) -> StoreEvent {
    debug!("Executing store request {:?}", request);
    match request {
        StoreRequest::LoadRoster => StoreEvent::RosterLoaded(store.list_therapists().await),
        StoreRequest::LoadEntries { since } => {
            StoreEvent::EntriesLoaded(store.list_entries_since(since).await)
        }
        StoreRequest::InsertEntry(entry) => StoreEvent::EntryInserted(store.insert_entry(&entry).await),
        StoreRequest::InsertTherapist(name) => {
            let result = store.insert_therapist(&Therapist::new(name.clone())).await;
            StoreEvent::TherapistInserted { name, result }
        }
        StoreRequest::DeleteTherapist(name) => {
            let result = store.delete_therapist(&name).await;
            StoreEvent::TherapistDeleted { name, result }
        }
    }
}

/// Main service holding the form, the roster and the stats
pub struct TrackerService {
    store: Arc<dyn ServiceStore>,
    form: ServiceEntryForm,
    roster: RosterStore,
    stats: DashboardStatsAggregator,
}

impl TrackerService {
    pub fn new(
        store: Arc<dyn ServiceStore>,
        clock: Arc<dyn Clock>,
        policy: FormPolicy,
        metric: ActiveStaffMetric,
    ) -> Self {
        info!(
            "Tracker service ready (phone required: {}, active staff metric: {:?})",
            policy.phone_required, metric
        );
        Self {
            form: ServiceEntryForm::new(Arc::clone(&store), Arc::clone(&clock), policy),
            roster: RosterStore::new(Arc::clone(&store)),
            stats: DashboardStatsAggregator::new(Arc::clone(&store), clock, metric),
            store,
        }
    }

    /// The injected store, for callers that run requests themselves
    pub fn store(&self) -> Arc<dyn ServiceStore> {
        Arc::clone(&self.store)
    }

    pub fn form(&self) -> &ServiceEntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ServiceEntryForm {
        &mut self.form
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterStore {
        &mut self.roster
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats.stats()
    }

    /// Whether any load is in flight
    pub fn is_loading(&self) -> bool {
        self.roster.is_loading() || self.stats.is_loading()
    }

    pub fn start_refresh(&mut self) -> StoreRequest {
        self.roster.begin_load();
        StoreRequest::LoadRoster
    }

    pub fn start_submit(&mut self) -> Result<StoreRequest, EntryError> {
        let payload = self.form.begin_submit(self.roster.names())?;
        Ok(StoreRequest::InsertEntry(payload))
    }

    /// `None` when the draft is blank
    pub fn start_add_therapist(&mut self) -> Option<StoreRequest> {
        RosterStore::prepare_add(self.roster.draft()).map(StoreRequest::InsertTherapist)
    }

    /// `None` when the user declined
    pub fn start_remove_therapist(&mut self, name: &str, confirmation: Confirmation) -> Option<StoreRequest> {
        match confirmation {
            Confirmation::Granted => Some(StoreRequest::DeleteTherapist(name.to_string())),
            Confirmation::Denied => {
                info!("Removal of \"{}\" cancelled", name);
                None
            }
        }
    }

    /// Apply a completed store call and decide what comes next
    pub fn handle(&mut self, event: StoreEvent) -> Step {
        match event {
            StoreEvent::RosterLoaded(result) => {
                let notice = self.roster.apply_load(result).err().map(Notice::FetchFailed);
                let since = self.stats.begin_load();
                Step {
                    next: Some(StoreRequest::LoadEntries { since }),
                    notice,
                }
            }
            StoreEvent::EntriesLoaded(result) => {
                let notice = self
                    .stats
                    .apply_load(result, self.roster.names())
                    .err()
                    .map(Notice::FetchFailed);
                Step { next: None, notice }
            }
            StoreEvent::EntryInserted(result) => match self.form.finish_submit(result) {
                Ok(()) => Step {
                    next: Some(self.start_refresh()),
                    notice: Some(Notice::EntrySaved),
                },
                Err(err) => Step {
                    next: None,
                    notice: Some(Notice::EntryFailed(err)),
                },
            },
            StoreEvent::TherapistInserted { name, result } => match self.roster.finish_add(&name, result) {
                Ok(()) => Step {
                    next: Some(self.start_refresh()),
                    notice: Some(Notice::TherapistSaved(name)),
                },
                Err(err) => Step {
                    next: None,
                    notice: Some(Notice::RosterFailed(err)),
                },
            },
            StoreEvent::TherapistDeleted { name, result } => match self.roster.finish_remove(&name, result) {
                Ok(()) => Step {
                    next: Some(self.start_refresh()),
                    notice: Some(Notice::TherapistRemoved(name)),
                },
                Err(err) => Step {
                    next: None,
                    notice: Some(Notice::RosterFailed(err)),
                },
            },
        }
    }

    /// Run a request and every follow-up it triggers
    pub async fn run(&mut self, request: StoreRequest) -> Vec<Notice> {
        let store = Arc::clone(&self.store);
        let mut notices = Vec::new();
        let mut next = Some(request);
        while let Some(request) = next.take() {
            let event = execute(store.as_ref(), request).await;
            let step = self.handle(event);
            notices.extend(step.notice);
            next = step.next;
        }
        notices
    }

    /// Load the roster, then today's stats
    pub async fn refresh(&mut self) -> Result<(), FetchError> {
        let request = self.start_refresh();
        first_fetch_error(self.run(request).await)
    }

    /// Submit the form; on success the form resets and everything reloads
    pub async fn submit_entry(&mut self) -> Result<(), EntryError> {
        let request = self.start_submit()?;
        for notice in self.run(request).await {
            if let Notice::EntryFailed(err) = notice {
                return Err(err);
            }
        }
        Ok(())
    }

    /// Add the roster draft as a new therapist
    pub async fn add_therapist(&mut self) -> Result<AddOutcome, RosterError> {
        let Some(request) = self.start_add_therapist() else {
            return Ok(AddOutcome::Ignored);
        };
        for notice in self.run(request).await {
            match notice {
                Notice::TherapistSaved(name) => return Ok(AddOutcome::Added(name)),
                Notice::RosterFailed(err) => return Err(err),
                _ => {}
            }
        }
        Ok(AddOutcome::Ignored)
    }

    pub async fn remove_therapist(
        &mut self,
        name: &str,
        confirmation: Confirmation,
    ) -> Result<RemoveOutcome, RosterError> {
        let Some(request) = self.start_remove_therapist(name, confirmation) else {
            return Ok(RemoveOutcome::Cancelled);
        };
        for notice in self.run(request).await {
            if let Notice::RosterFailed(err) = notice {
                return Err(err);
            }
        }
        Ok(RemoveOutcome::Removed(name.to_string()))
    }
}

fn first_fetch_error(notices: Vec<Notice>) -> Result<(), FetchError> {
    match notices.into_iter().find_map(|notice| match notice {
        Notice::FetchFailed(err) => Some(err),
        _ => None,
    }) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
