//! # App State Module
//!
//! The central application struct and the plumbing that moves store calls
//! off the UI thread.
//!
//! ## Request flow
//!
//! 1. A view asks the [`TrackerService`] for a [`StoreRequest`] (`start_*`)
//! 2. [`SpaTrackerApp::dispatch`] runs it on the tokio runtime
//! 3. The resulting [`StoreEvent`] comes back over a channel and asks egui
//!    for a repaint
//! 4. [`SpaTrackerApp::process_events`] hands it to the service, shows any
//!    notice and dispatches whatever the service wants next
//!
//! The service itself is only ever touched from the UI thread.

use eframe::egui;
use log::{info, warn};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use spa_tracker_backend::config::TrackerConfig;
use spa_tracker_backend::domain::{execute, Clock, Notice, StoreEvent, StoreRequest, SystemClock, TrackerService};

use crate::ui::components::theme::{apply_theme, Palette};
use crate::ui::state::{ModalState, UIState};

/// Main application struct for the egui spa tracker
pub struct SpaTrackerApp {
    pub service: TrackerService,
    pub config: TrackerConfig,
    pub clock: Arc<dyn Clock>,
    pub palette: Palette,

    pub ui_state: UIState,
    pub modal_state: ModalState,

    runtime: Runtime,
    event_tx: UnboundedSender<StoreEvent>,
    event_rx: UnboundedReceiver<StoreEvent>,
}

impl SpaTrackerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        service: TrackerService,
        runtime: Runtime,
        config: TrackerConfig,
    ) -> Self {
        let palette = Palette::for_variant(config.theme);
        apply_theme(&cc.egui_ctx, &palette);

        let (event_tx, event_rx) = unbounded_channel();
        let mut app = Self {
            service,
            config,
            clock: Arc::new(SystemClock),
            palette,
            ui_state: UIState::new(),
            modal_state: ModalState::new(),
            runtime,
            event_tx,
            event_rx,
        };

        info!("Loading roster and today's entries");
        let request = app.service.start_refresh();
        app.dispatch(&cc.egui_ctx, request);
        app
    }

    /// Run a store request in the background
    pub fn dispatch(&mut self, ctx: &egui::Context, request: StoreRequest) {
        if matches!(
            request,
            StoreRequest::InsertTherapist(_) | StoreRequest::DeleteTherapist(_)
        ) {
            self.ui_state.roster_writes += 1;
        }
        if request == StoreRequest::LoadRoster {
            self.ui_state.fetch_error = None;
        }
        self.ui_state.in_flight += 1;

        let store = self.service.store();
        let sender = self.event_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let event = execute(store.as_ref(), request).await;
            if sender.send(event).is_err() {
                warn!("UI closed before a store call completed");
            }
            ctx.request_repaint();
        });
    }

    /// Apply every completed store call
    pub fn process_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.ui_state.in_flight = self.ui_state.in_flight.saturating_sub(1);
            if matches!(
                event,
                StoreEvent::TherapistInserted { .. } | StoreEvent::TherapistDeleted { .. }
            ) {
                self.ui_state.roster_writes = self.ui_state.roster_writes.saturating_sub(1);
            }

            let step = self.service.handle(event);
            if let Some(notice) = step.notice {
                self.show_notice(notice);
            }
            if let Some(next) = step.next {
                self.dispatch(ctx, next);
            }
        }
    }

    /// Blocking notices open the dialog; load failures are shown inline
    pub fn show_notice(&mut self, notice: Notice) {
        if notice.is_blocking() {
            self.modal_state.show_notice(&notice);
        } else {
            self.ui_state.fetch_error = Some(notice.message());
        }
    }
}
