//! # Setup View Module
//!
//! Roster management: add a therapist by name, remove one after
//! confirmation. The list always shows the roster as last loaded from the
//! store; every add or remove is followed by a reload.

use eframe::egui;

use crate::ui::app_state::SpaTrackerApp;

impl SpaTrackerApp {
    pub fn render_setup_view(&mut self, ui: &mut egui::Ui) {
        let busy = self.ui_state.roster_busy();
        let mut add_clicked = false;

        ui.heading("Therapists");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(self.service.roster_mut().draft_mut())
                    .hint_text("Therapist name")
                    .desired_width(260.0),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let button_clicked = ui
                .add_enabled(!busy, egui::Button::new("Add Therapist"))
                .clicked();
            add_clicked = button_clicked || (enter_pressed && !busy);
        });

        if add_clicked {
            self.add_therapist(ui.ctx());
        }

        ui.add_space(12.0);
        ui.separator();

        if self.service.roster().is_empty() {
            let text = if self.service.roster().is_loading() {
                "Loading roster..."
            } else {
                "No therapists yet."
            };
            ui.label(egui::RichText::new(text).color(self.palette.text_secondary));
            return;
        }

        let mut remove_requested = None;
        for name in self.service.roster().names() {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(name).size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add_enabled(!busy, egui::Button::new("Remove")).clicked() {
                        remove_requested = Some(name.clone());
                    }
                });
            });
            ui.separator();
        }

        if let Some(name) = remove_requested {
            self.modal_state.request_removal(name);
        }
    }

    fn add_therapist(&mut self, ctx: &egui::Context) {
        match self.service.start_add_therapist() {
            Some(request) => self.dispatch(ctx, request),
            None => log::debug!("Ignoring blank therapist name"),
        }
    }
}
