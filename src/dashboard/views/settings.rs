//! Settings view - camera, recognition and speech configuration

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::config;
use crate::dashboard::state::SettingsViewState;
use crate::dashboard::theme::ThemeColors;
use crate::shared::{NoticeLevel, SharedAppState};

/// Render the settings view
pub fn render_settings_view(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
) {
    ui.heading(RichText::new("Settings").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Camera, recognition and speech configuration")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );

    ui.add_space(24.0);

    let mut state = shared_state.write();
    let mut changed = false;

    egui::ScrollArea::vertical().show(ui, |ui| {
        section_frame(ui, "Camera", |ui| {
            egui::Grid::new("camera_settings")
                .num_columns(2)
                .spacing([40.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Device index");
                    changed |= ui
                        .add(egui::DragValue::new(&mut state.config.camera.device_index).range(0..=16))
                        .changed();
                    ui.end_row();

                    ui.label("Preferred width");
                    changed |= ui
                        .add(egui::DragValue::new(&mut state.config.camera.width).range(320..=3840))
                        .changed();
                    ui.end_row();

                    ui.label("Preferred height");
                    changed |= ui
                        .add(egui::DragValue::new(&mut state.config.camera.height).range(240..=2160))
                        .changed();
                    ui.end_row();

                    ui.label("Frame rate");
                    changed |= ui
                        .add(egui::DragValue::new(&mut state.config.camera.frame_rate).range(5..=60))
                        .changed();
                    ui.end_row();

                    ui.label("Mirror preview");
                    changed |= ui
                        .checkbox(&mut state.config.camera.mirror_preview, "")
                        .changed();
                    ui.end_row();
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new("Camera changes take effect the next time recognition starts")
                    .size(12.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });

        section_frame(ui, "Recognition", |ui| {
            egui::Grid::new("recognition_settings")
                .num_columns(2)
                .spacing([40.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Tick interval (ms)");
                    changed |= ui
                        .add(egui::Slider::new(
                            &mut state.config.recognition.interval_ms,
                            500..=10_000,
                        ))
                        .changed();
                    ui.end_row();

                    ui.label("Accept threshold (%)");
                    changed |= ui
                        .add(egui::Slider::new(
                            &mut state.config.recognition.accept_threshold,
                            50..=100,
                        ))
                        .changed();
                    ui.end_row();

                    ui.label("Accepted display (ms)");
                    changed |= ui
                        .add(egui::Slider::new(
                            &mut state.config.recognition.accept_display_ms,
                            200..=3000,
                        ))
                        .changed();
                    ui.end_row();

                    ui.label("Rejected display (ms)");
                    changed |= ui
                        .add(egui::Slider::new(
                            &mut state.config.recognition.reject_display_ms,
                            200..=3000,
                        ))
                        .changed();
                    ui.end_row();
                });
        });

        section_frame(ui, "Speech", |ui| {
            egui::Grid::new("speech_settings")
                .num_columns(2)
                .spacing([40.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Rate (relative)");
                    changed |= ui
                        .add(egui::Slider::new(&mut state.config.speech.rate_scale, 0.5..=1.5))
                        .changed();
                    ui.end_row();

                    ui.label("Pitch (relative)");
                    changed |= ui
                        .add(egui::Slider::new(&mut state.config.speech.pitch_scale, 0.5..=1.5))
                        .changed();
                    ui.end_row();
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new("Speech changes take effect after restarting the app")
                    .size(12.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });

        section_frame(ui, "General", |ui| {
            changed |= ui
                .checkbox(
                    &mut state.config.general.start_on_recognize,
                    "Open the Recognize view on startup",
                )
                .changed();
            changed |= ui
                .checkbox(&mut state.config.general.show_tips, "Show signing tips")
                .changed();
        });

        ui.add_space(8.0);

        // Save
        ui.horizontal(|ui| {
            if ui
                .add(
                    egui::Button::new(RichText::new("Save Settings").color(egui::Color32::WHITE))
                        .fill(ThemeColors::ACCENT_PRIMARY)
                        .min_size(egui::vec2(140.0, 32.0)),
                )
                .clicked()
            {
                match save_settings(&state.config) {
                    Ok(()) => {
                        view_state.has_unsaved_changes = false;
                        state.runtime.push_notice(NoticeLevel::Success, "Settings saved");
                    }
                    Err(e) => {
                        state
                            .runtime
                            .push_notice(NoticeLevel::Error, format!("Failed to save settings: {e}"));
                    }
                }
            }

            if view_state.has_unsaved_changes {
                ui.label(
                    RichText::new("Unsaved changes")
                        .size(12.0)
                        .color(ThemeColors::ACCENT_WARNING),
                );
            }
        });
    });

    if changed {
        view_state.has_unsaved_changes = true;
    }
}

fn section_frame(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(16.0).strong());
            ui.add_space(10.0);
            add_contents(ui);
        });
    ui.add_space(16.0);
}

fn save_settings(config: &config::AppConfig) -> anyhow::Result<()> {
    let path = config::get_config_dir()?.join("config.toml");
    config::save_config(config, &path)?;
    tracing::info!("Saved configuration to {:?}", path);
    Ok(())
}
