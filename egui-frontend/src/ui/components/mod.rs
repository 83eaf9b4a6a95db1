//! # UI Components Module
//!
//! - `header` - title bar with the live date and time
//! - `navigation` - side panel switching between views
//! - `entry_view` - the service entry form
//! - `stats_cards` - today's totals above the form
//! - `setup_view` - therapist roster management
//! - `modals` - notification and confirmation dialogs
//! - `theme` - colours per configured theme

pub mod entry_view;
pub mod header;
pub mod modals;
pub mod navigation;
pub mod setup_view;
pub mod stats_cards;
pub mod theme;

pub use theme::*;
