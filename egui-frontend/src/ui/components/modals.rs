//! # Modals Module
//!
//! The notification dialog and the removal confirmation. Both are centred
//! windows; the notification only closes through its OK button.

use eframe::egui;
use spa_tracker_backend::domain::{Confirmation, RosterStore};

use crate::ui::app_state::SpaTrackerApp;

impl SpaTrackerApp {
    pub fn render_modals(&mut self, ctx: &egui::Context) {
        self.render_removal_confirmation(ctx);
        self.render_notice_dialog(ctx);
    }

    fn render_notice_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.modal_state.notice else {
            return;
        };

        let title = if dialog.is_error { "Error" } else { "Success" };
        let color = if dialog.is_error {
            self.palette.error
        } else {
            self.palette.success
        };
        let mut dismissed = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.label(egui::RichText::new(&dialog.message).size(16.0).color(color));
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    dismissed = ui.button("OK").clicked();
                });
            });

        if dismissed {
            self.modal_state.dismiss_notice();
        }
    }

    fn render_removal_confirmation(&mut self, ctx: &egui::Context) {
        let Some(name) = self.modal_state.pending_removal.clone() else {
            return;
        };

        let mut decision = None;
        egui::Window::new("Remove Therapist")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RosterStore::confirmation_prompt(&name));
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Remove").clicked() {
                        decision = Some(Confirmation::Granted);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(Confirmation::Denied);
                    }
                });
            });

        let Some(confirmation) = decision else {
            return;
        };
        self.modal_state.take_pending_removal();
        if let Some(request) = self.service.start_remove_therapist(&name, confirmation) {
            self.dispatch(ctx, request);
        }
    }
}
