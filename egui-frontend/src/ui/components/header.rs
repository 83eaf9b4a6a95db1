//! # Header Module
//!
//! Title bar with the current date and time. The time is re-read from the
//! clock on every frame; the coordinator schedules a repaint each second so
//! it keeps ticking while the window is idle.

use eframe::egui;
use spa_tracker_backend::domain::clock::{format_header_date, format_header_time};

use crate::ui::app_state::SpaTrackerApp;

impl SpaTrackerApp {
    pub fn render_header(&mut self, ui: &mut egui::Ui) {
        let now = self.clock.now();

        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Spa Service Tracker")
                        .size(24.0)
                        .strong()
                        .color(self.palette.accent),
                )
                .selectable(false),
            );

            if self.ui_state.is_busy() {
                ui.spinner();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format_header_time(&now))
                        .size(20.0)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new(format_header_date(&now))
                        .size(16.0)
                        .color(self.palette.text_secondary),
                );
            });
        });

        if let Some(error) = &self.ui_state.fetch_error {
            ui.colored_label(self.palette.error, error);
        }
    }
}
