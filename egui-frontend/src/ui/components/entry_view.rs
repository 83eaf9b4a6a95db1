//! # Entry View Module
//!
//! The service entry form. All values live in the backend's
//! `ServiceEntryForm`; this module only draws them and forwards edits.
//!
//! The "Now" buttons sit next to their time inputs as separate widgets, so
//! stamping the time never focuses or edits the text field itself.

use eframe::egui;
use shared::PaymentMethod;
use spa_tracker_backend::domain::{EntryField, Notice, ServiceEntryForm, TimeSlot};

use crate::ui::app_state::SpaTrackerApp;

const INPUT_WIDTH: f32 = 280.0;

impl SpaTrackerApp {
    pub fn render_entry_view(&mut self, ui: &mut egui::Ui) {
        self.render_stats_cards(ui);
        ui.add_space(16.0);

        let roster = self.service.roster().names().to_vec();
        let decimals = self.config.currency_decimals;
        let phone_required = self.service.form().policy().phone_required;
        let submitting = self.service.form().is_submitting();

        let mut submit_clicked = false;
        let mut reset_clicked = false;

        egui::Frame::none()
            .fill(self.palette.card_background)
            .stroke(egui::Stroke::new(1.0, self.palette.card_border))
            .rounding(10.0)
            .inner_margin(egui::Margin::same(18.0))
            .show(ui, |ui| {
                ui.heading("New Service Entry");
                ui.add_space(8.0);

                let form = self.service.form_mut();
                egui::Grid::new("entry_form_grid")
                    .num_columns(2)
                    .spacing([16.0, 10.0])
                    .show(ui, |ui| {
                        text_row(ui, form, "Bill No *", EntryField::BillNo, "e.g. 1042");
                        text_row(ui, form, "Customer Name *", EntryField::CustomerName, "Full name");
                        let phone_label = if phone_required { "Phone No *" } else { "Phone No" };
                        text_row(ui, form, phone_label, EntryField::PhoneNo, "10-digit mobile");
                        staff_row(ui, form, &roster);
                        time_row(ui, form, "In Time *", TimeSlot::In);
                        time_row(ui, form, "Out Time", TimeSlot::Out);

                        for method in PaymentMethod::ALL {
                            payment_row(ui, form, method);
                        }

                        ui.label(egui::RichText::new("Total Received").strong());
                        ui.label(egui::RichText::new(form.formatted_total(decimals)).size(18.0).strong());
                        ui.end_row();

                        ui.label("Remarks");
                        let mut remarks = form.field(EntryField::Remarks).to_string();
                        if ui
                            .add(
                                egui::TextEdit::multiline(&mut remarks)
                                    .desired_rows(3)
                                    .desired_width(INPUT_WIDTH),
                            )
                            .changed()
                        {
                            form.update_field(EntryField::Remarks, remarks);
                        }
                        ui.end_row();
                    });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    let label = if submitting { "Saving..." } else { "Save Entry" };
                    submit_clicked = ui
                        .add_enabled(!submitting, egui::Button::new(label))
                        .clicked();
                    reset_clicked = ui
                        .add_enabled(!submitting, egui::Button::new("Clear"))
                        .clicked();
                });
            });

        if reset_clicked {
            self.service.form_mut().reset();
        }
        if submit_clicked {
            self.submit_entry(ui.ctx());
        }
    }

    fn submit_entry(&mut self, ctx: &egui::Context) {
        match self.service.start_submit() {
            Ok(request) => self.dispatch(ctx, request),
            Err(err) => self.show_notice(Notice::EntryFailed(err)),
        }
    }
}

fn text_row(ui: &mut egui::Ui, form: &mut ServiceEntryForm, label: &str, field: EntryField, hint: &str) {
    ui.label(label);
    let mut value = form.field(field).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut value)
            .hint_text(hint)
            .desired_width(INPUT_WIDTH),
    );
    if response.changed() {
        form.update_field(field, value);
    }
    ui.end_row();
}

fn staff_row(ui: &mut egui::Ui, form: &mut ServiceEntryForm, roster: &[String]) {
    ui.label("Therapist *");
    let mut selected = form.field(EntryField::StaffName).to_string();
    let shown = if selected.is_empty() {
        "Select therapist".to_string()
    } else {
        selected.clone()
    };

    egui::ComboBox::from_id_source("staff_select")
        .selected_text(shown)
        .width(INPUT_WIDTH)
        .show_ui(ui, |ui| {
            if roster.is_empty() {
                ui.label("No therapists yet. Add some under Setup.");
            }
            for name in roster {
                ui.selectable_value(&mut selected, name.clone(), name.as_str());
            }
        });

    if selected != form.field(EntryField::StaffName) {
        form.update_field(EntryField::StaffName, selected);
    }
    ui.end_row();
}

fn time_row(ui: &mut egui::Ui, form: &mut ServiceEntryForm, label: &str, slot: TimeSlot) {
    ui.label(label);
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(form.time_field_mut(slot).value_mut())
                .hint_text("HH:MM")
                .desired_width(90.0),
        );
        if ui.button("Now").clicked() {
            form.set_time_now(slot);
        }
    });
    ui.end_row();
}

fn payment_row(ui: &mut egui::Ui, form: &mut ServiceEntryForm, method: PaymentMethod) {
    ui.label(method.label());
    let mut raw = form.payment_input(method).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut raw)
            .hint_text("0")
            .desired_width(140.0),
    );
    if response.changed() {
        form.update_payment(method, &raw);
    }
    ui.end_row();
}
