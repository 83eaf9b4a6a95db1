//! # Theme Configuration
//!
//! Colours for each [`ThemeVariant`]. Views read colours from the
//! [`Palette`] held by the app rather than hard-coding them, so switching the
//! `theme` setting restyles the whole window.

use eframe::egui::{self, Color32};
use spa_tracker_backend::ThemeVariant;

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub dark: bool,
    /// Buttons, selection and the header title
    pub accent: Color32,
    pub panel_background: Color32,
    pub card_background: Color32,
    pub card_border: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub success: Color32,
    pub error: Color32,
}

impl Palette {
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Classic => Self {
                dark: false,
                accent: Color32::from_rgb(46, 125, 110),
                panel_background: Color32::from_rgb(246, 248, 247),
                card_background: Color32::WHITE,
                card_border: Color32::from_rgb(214, 224, 220),
                text_primary: Color32::from_rgb(40, 44, 42),
                text_secondary: Color32::from_rgb(110, 118, 114),
                success: Color32::from_rgb(34, 139, 84),
                error: Color32::from_rgb(196, 52, 52),
            },
            ThemeVariant::Midnight => Self {
                dark: true,
                accent: Color32::from_rgb(120, 170, 255),
                panel_background: Color32::from_rgb(22, 26, 34),
                card_background: Color32::from_rgb(32, 38, 50),
                card_border: Color32::from_rgb(58, 66, 84),
                text_primary: Color32::from_rgb(228, 232, 240),
                text_secondary: Color32::from_rgb(150, 158, 176),
                success: Color32::from_rgb(96, 200, 140),
                error: Color32::from_rgb(240, 110, 110),
            },
            ThemeVariant::Sand => Self {
                dark: false,
                accent: Color32::from_rgb(176, 112, 56),
                panel_background: Color32::from_rgb(250, 244, 234),
                card_background: Color32::from_rgb(255, 251, 244),
                card_border: Color32::from_rgb(228, 212, 188),
                text_primary: Color32::from_rgb(64, 48, 32),
                text_secondary: Color32::from_rgb(134, 112, 90),
                success: Color32::from_rgb(70, 130, 60),
                error: Color32::from_rgb(180, 60, 40),
            },
        }
    }
}

/// Install the palette into egui's visuals; called once at startup
pub fn apply_theme(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = if palette.dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.panel_fill = palette.panel_background;
    visuals.window_fill = palette.card_background;
    visuals.selection.bg_fill = palette.accent;
    visuals.hyperlink_color = palette.accent;
    visuals.override_text_color = Some(palette.text_primary);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_midnight_is_dark() {
        assert!(!Palette::for_variant(ThemeVariant::Classic).dark);
        assert!(Palette::for_variant(ThemeVariant::Midnight).dark);
        assert!(!Palette::for_variant(ThemeVariant::Sand).dark);
    }
}
