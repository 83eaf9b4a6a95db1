//! # App Coordinator Module
//!
//! The main update loop.
//!
//! ## Application Flow:
//! 1. Apply finished store calls
//! 2. Render the header, navigation and the current view
//! 3. Render any open dialogs on top
//! 4. Schedule the next repaint so the header clock keeps ticking

use eframe::egui;
use std::time::Duration;

use crate::ui::app_state::SpaTrackerApp;
use crate::ui::state::MainView;

const CLOCK_TICK: Duration = Duration::from_secs(1);

impl eframe::App for SpaTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events(ctx);

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.palette.card_background)
                    .inner_margin(egui::Margin::symmetric(16.0, 12.0)),
            )
            .show(ctx, |ui| self.render_header(ui));

        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(170.0)
            .show(ctx, |ui| self.render_navigation(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.ui_state.current_view {
                MainView::Entry => self.render_entry_view(ui),
                MainView::Setup => self.render_setup_view(ui),
            });
        });

        self.render_modals(ctx);

        ctx.request_repaint_after(CLOCK_TICK);
    }
}
