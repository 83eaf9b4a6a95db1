//! # Domain Module
//!
//! Contains all business logic for the spa service tracker.
//!
//! Nothing here draws anything or knows which database is behind the
//! [`ServiceStore`](crate::storage::ServiceStore); every component receives
//! the store (and, where it needs the time, a [`Clock`]) through its
//! constructor.
//!
//! ## Module Organization
//!
//! - **payment**: tender text parsing and the non-negative rule
//! - **time_field**: HH:MM inputs with "now" stamping
//! - **entry_form**: the service entry form and its submission workflow
//! - **roster_store**: the therapist roster with reload-after-write
//! - **dashboard_stats**: today's totals
//! - **tracker_service**: ties the above together and sequences refreshes
//! - **clock**: injectable wall clock
//! - **errors**: validation, submission, roster and fetch errors

pub mod clock;
pub mod dashboard_stats;
pub mod entry_form;
pub mod errors;
pub mod payment;
pub mod roster_store;
pub mod time_field;
pub mod tracker_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard_stats::{ActiveStaffMetric, DashboardStatsAggregator};
pub use entry_form::{EntryField, FormPolicy, ServiceEntryForm};
pub use errors::{EntryError, FetchError, RosterError, ValidationError};
pub use roster_store::{AddOutcome, Confirmation, RemoveOutcome, RosterStore};
pub use time_field::{TimeField, TimeSlot};
pub use tracker_service::{execute, Notice, Step, StoreEvent, StoreRequest, TrackerService};
