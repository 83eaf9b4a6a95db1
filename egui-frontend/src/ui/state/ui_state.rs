//! # UI State Module
//!
//! Which view is on screen, plus bookkeeping for store calls that have been
//! spawned but have not reported back yet.

/// Views reachable from the side navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainView {
    /// Service entry form with today's stats
    #[default]
    Entry,
    /// Therapist roster management
    Setup,
}

impl MainView {
    pub const ALL: [MainView; 2] = [MainView::Entry, MainView::Setup];

    pub fn label(&self) -> &'static str {
        match self {
            MainView::Entry => "Service Entry",
            MainView::Setup => "Setup",
        }
    }
}

#[derive(Debug, Default)]
pub struct UIState {
    pub current_view: MainView,
    /// Store calls of any kind still running
    pub in_flight: usize,
    /// Roster writes still running; the add and remove buttons stay disabled
    pub roster_writes: usize,
    /// Last load failure, shown inline until the next refresh starts
    pub fetch_error: Option<String>,
}

impl UIState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn roster_busy(&self) -> bool {
        self.roster_writes > 0
    }
}
