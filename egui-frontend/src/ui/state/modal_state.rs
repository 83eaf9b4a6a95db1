//! # Modal State Module
//!
//! At most one notification dialog is open at a time; a newer notice replaces
//! the older one. The removal confirmation is tracked separately so that a
//! notice arriving while the user is deciding does not cancel the prompt.

use spa_tracker_backend::domain::Notice;

/// A notice waiting for the user to dismiss it
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeDialog {
    pub message: String,
    pub is_error: bool,
}

impl From<&Notice> for NoticeDialog {
    fn from(notice: &Notice) -> Self {
        Self {
            message: notice.message(),
            is_error: notice.is_error(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalState {
    pub notice: Option<NoticeDialog>,
    /// Therapist the user asked to remove, awaiting confirmation
    pub pending_removal: Option<String>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_notice(&mut self, notice: &Notice) {
        self.notice = Some(NoticeDialog::from(notice));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn request_removal(&mut self, name: impl Into<String>) {
        self.pending_removal = Some(name.into());
    }

    pub fn take_pending_removal(&mut self) -> Option<String> {
        self.pending_removal.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_notice_replaces_older() {
        let mut state = ModalState::new();
        state.show_notice(&Notice::TherapistSaved("Asha".to_string()));
        state.show_notice(&Notice::EntrySaved);

        let dialog = state.notice.clone().unwrap();
        assert_eq!(dialog.message, "Entry saved successfully!");
        assert!(!dialog.is_error);

        state.dismiss_notice();
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_pending_removal_is_taken_once() {
        let mut state = ModalState::new();
        state.request_removal("Meera");
        state.show_notice(&Notice::EntrySaved);

        assert_eq!(state.take_pending_removal().as_deref(), Some("Meera"));
        assert_eq!(state.take_pending_removal(), None);
    }
}
