//! Home view - hero section, feature grid and call-to-action

use egui::RichText;

use crate::dashboard::components::FeatureCard;
use crate::dashboard::state::DashboardView;
use crate::dashboard::theme::ThemeColors;

const FEATURES: [FeatureCard; 6] = [
    FeatureCard::new(
        "◉",
        "Real-Time Recognition",
        "Instantly capture and recognize hand gestures using your camera",
    ),
    FeatureCard::new(
        "A",
        "Letter by Letter",
        "See each recognized letter appear in real-time as you sign",
    ),
    FeatureCard::new(
        "♪",
        "Text-to-Speech",
        "Convert recognized text to speech for immediate communication",
    ),
    FeatureCard::new(
        "⊕",
        "Multilingual Support",
        "Translate recognized text into multiple languages",
    ),
    FeatureCard::new(
        "↯",
        "High Accuracy",
        "Advanced AI ensures maximum matching and recognition accuracy",
    ),
    FeatureCard::new(
        "✋",
        "ASL Support",
        "Full support for American Sign Language fingerspelling",
    ),
];

/// Render the home view
pub fn render_home_view(ui: &mut egui::Ui, current_view: &mut DashboardView) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(24.0);

        // Hero section
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Speak Without a Voice")
                    .size(34.0)
                    .color(ThemeColors::TEXT_PRIMARY)
                    .strong(),
            );
            ui.add_space(12.0);
            ui.label(
                RichText::new(
                    "SilentTalk bridges communication gaps by converting sign language \
                     gestures into text and speech in real-time",
                )
                .size(16.0)
                .color(ThemeColors::TEXT_SECONDARY),
            );

            ui.add_space(20.0);

            if ui
                .add(
                    egui::Button::new(
                        RichText::new("Start Recognition")
                            .size(16.0)
                            .color(egui::Color32::WHITE),
                    )
                    .fill(ThemeColors::ACCENT_PRIMARY)
                    .min_size(egui::vec2(180.0, 40.0)),
                )
                .clicked()
            {
                *current_view = DashboardView::Recognize;
            }
        });

        ui.add_space(36.0);

        // Features section
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Powerful Features").size(22.0));
            ui.add_space(4.0);
            ui.label(
                RichText::new("Everything you need for seamless sign language communication")
                    .size(14.0)
                    .color(ThemeColors::TEXT_SECONDARY),
            );
        });

        ui.add_space(16.0);

        // Three cards per row
        for row in FEATURES.chunks(3) {
            ui.columns(3, |columns| {
                for (card, column) in row.iter().zip(columns.iter_mut()) {
                    card.show(column);
                }
            });
            ui.add_space(12.0);
        }

        ui.add_space(24.0);

        // Call-to-action
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Ready to Break Communication Barriers?")
                            .size(20.0)
                            .color(ThemeColors::TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(
                            "Start using SilentTalk today and experience the power of \
                             real-time sign language recognition",
                        )
                        .size(14.0)
                        .color(ThemeColors::TEXT_SECONDARY),
                    );
                    ui.add_space(12.0);
                    if ui.button("Get Started Now").clicked() {
                        *current_view = DashboardView::Recognize;
                    }
                });
            });

        ui.add_space(24.0);

        // Footer
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("© 2024 SilentTalk - Empowering Communication Through Technology")
                    .size(12.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });
        ui.add_space(12.0);
    });
}
