//! # Stats Cards Module
//!
//! Four cards summarising today: entries logged, cash taken, digital
//! payments taken and active staff.

use eframe::egui;
use shared::format_inr;

use crate::ui::app_state::SpaTrackerApp;
use crate::ui::components::theme::Palette;

impl SpaTrackerApp {
    pub fn render_stats_cards(&mut self, ui: &mut egui::Ui) {
        let stats = self.service.stats();
        let decimals = self.config.currency_decimals;

        let cards = [
            ("Today's Entries", stats.today_entries.to_string()),
            ("Cash", format_inr(stats.cash_total, decimals)),
            ("Digital", format_inr(stats.digital_total, decimals)),
            ("Active Staff", stats.active_staff.to_string()),
        ];

        ui.columns(cards.len(), |columns| {
            for (column, (title, value)) in columns.iter_mut().zip(cards) {
                draw_card(column, &self.palette, title, &value);
            }
        });
    }
}

fn draw_card(ui: &mut egui::Ui, palette: &Palette, title: &str, value: &str) {
    egui::Frame::none()
        .fill(palette.card_background)
        .stroke(egui::Stroke::new(1.0, palette.card_border))
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(14.0, 12.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(egui::RichText::new(title).size(13.0).color(palette.text_secondary));
            ui.label(egui::RichText::new(value).size(22.0).strong());
        });
}
