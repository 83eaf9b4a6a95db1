//! Error types for the entry form, the roster and the dashboard loaders.

use shared::PaymentMethod;
use thiserror::Error;

use crate::domain::entry_form::EntryField;
use crate::domain::time_field::TimeSlot;
use crate::storage::StoreError;

/// A problem with the form's contents, detected before any I/O
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} required")]
    Required(EntryField),

    #[error("staff {0} is not on the roster")]
    UnknownStaff(String),

    #[error("{slot} must be HH:MM, got {value:?}")]
    InvalidTime { slot: TimeSlot, value: String },

    #[error("{0} amount cannot be negative")]
    NegativeTender(PaymentMethod),
}

/// Failure of an entry submission
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("failed to save entry: {0}")]
    Submission(#[source] StoreError),
}

impl EntryError {
    /// Text for the blocking notification shown to staff
    pub fn user_message(&self) -> String {
        match self {
            EntryError::Validation(ValidationError::Required(EntryField::StaffName)) => {
                "Please select a therapist.".to_string()
            }
            EntryError::Validation(err) => format!("Please check the form: {}.", err),
            EntryError::SubmissionInFlight => "Still saving the previous entry.".to_string(),
            EntryError::Submission(_) => "Failed to save entry.".to_string(),
        }
    }
}

/// Failure of a roster mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("therapist {0} already exists")]
    Duplicate(String),

    #[error("failed to add therapist {name}: {source}")]
    Add { name: String, source: StoreError },

    #[error("failed to remove therapist {name}: {source}")]
    Remove { name: String, source: StoreError },
}

impl RosterError {
    /// Text for the blocking notification shown to the admin
    pub fn user_message(&self) -> String {
        match self {
            RosterError::Duplicate(_) => "This therapist already exists.".to_string(),
            RosterError::Add { name, .. } => format!("Could not save \"{}\". Check the log.", name),
            RosterError::Remove { name, .. } => format!("Could not remove {}. Check the log.", name),
        }
    }
}

/// Failure while loading the roster or today's entries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("failed to load therapists: {0}")]
    Roster(#[source] StoreError),

    #[error("failed to load today's entries: {0}")]
    Entries(#[source] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_required_message() {
        let err = ValidationError::Required(EntryField::StaffName);
        assert_eq!(err.to_string(), "staff required");
        assert_eq!(
            EntryError::from(err).user_message(),
            "Please select a therapist."
        );
    }

    #[test]
    fn test_duplicate_roster_message() {
        let err = RosterError::Duplicate("Meera".to_string());
        assert_eq!(err.user_message(), "This therapist already exists.");
    }
}
