//! # State Module
//!
//! Frontend-only state. Everything that describes the business data lives in
//! the backend's `TrackerService`; these structs only track what the window
//! is showing.
//!
//! - `ui_state` - current view and in-flight store calls
//! - `modal_state` - notification dialog and the removal confirmation

pub mod modal_state;
pub mod ui_state;

pub use modal_state::*;
pub use ui_state::*;
