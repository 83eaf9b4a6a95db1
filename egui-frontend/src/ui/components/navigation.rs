//! # Navigation Module
//!
//! Side panel with one button per [`MainView`].

use eframe::egui;

use crate::ui::app_state::SpaTrackerApp;
use crate::ui::state::MainView;

impl SpaTrackerApp {
    pub fn render_navigation(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        for view in MainView::ALL {
            let selected = self.ui_state.current_view == view;
            let button = egui::Button::new(egui::RichText::new(view.label()).size(16.0))
                .selected(selected)
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add(button).clicked() && !selected {
                log::info!("Switching to {:?} view", view);
                self.ui_state.current_view = view;
            }
        }
    }
}
