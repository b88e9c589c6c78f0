//! Feature card component for the home view

use egui::{RichText, Rounding};

use crate::dashboard::theme::{color_with_alpha, ThemeColors};

/// A card describing one product feature
pub struct FeatureCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl FeatureCard {
    pub const fn new(icon: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            icon,
            title,
            description,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                // Icon badge
                egui::Frame::none()
                    .fill(color_with_alpha(ThemeColors::ACCENT_PRIMARY, 51))
                    .rounding(Rounding::same(6.0))
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(self.icon)
                                .size(18.0)
                                .color(ThemeColors::ACCENT_PRIMARY),
                        );
                    });

                ui.add_space(8.0);

                ui.label(
                    RichText::new(self.title)
                        .size(16.0)
                        .color(ThemeColors::TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(4.0);
                ui.label(
                    RichText::new(self.description)
                        .size(13.0)
                        .color(ThemeColors::TEXT_SECONDARY),
                );
            });
    }
}
