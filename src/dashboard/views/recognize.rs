//! Recognize view - camera preview, detection area and text output

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

use crate::capture::frame::CameraFrame;
use crate::dashboard::components::{CardStatus, StatusCard};
use crate::dashboard::state::RecognizeViewState;
use crate::dashboard::theme::{color_with_alpha, ThemeColors};
use crate::shared::{CameraCommand, CameraPhase, OutputCommand, SharedAppState};

/// Render the recognize view
pub fn render_recognize_view(
    ui: &mut egui::Ui,
    view_state: &mut RecognizeViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    preview_frame: Option<CameraFrame>,
) {
    ui.heading(RichText::new("Sign Language Recognition").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Start signing and watch your gestures transform into text")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );

    ui.add_space(16.0);

    // Status cards row
    {
        let state = shared_state.read();
        ui.horizontal(|ui| {
            let (camera_status, camera_value) = match &state.runtime.camera_phase {
                CameraPhase::Idle => (CardStatus::Inactive, "Stopped".to_string()),
                CameraPhase::Starting => (CardStatus::Warning, "Starting...".to_string()),
                CameraPhase::Active => (CardStatus::Active, "Recognizing".to_string()),
                CameraPhase::Error(_) => (CardStatus::Error, "Unavailable".to_string()),
            };
            StatusCard::new("Camera", camera_value, camera_status).show(ui);

            ui.add_space(16.0);

            let letters = state.runtime.letters_accepted;
            let letters_status = if letters > 0 {
                CardStatus::Active
            } else {
                CardStatus::Inactive
            };
            StatusCard::new("Letters Recognized", letters.to_string(), letters_status).show(ui);
        });
    }

    ui.add_space(16.0);

    let available_width = ui.available_width();
    if available_width > 700.0 {
        ui.columns(2, |columns| {
            render_camera_column(&mut columns[0], view_state, shared_state, preview_frame);
            render_output_column(&mut columns[1], shared_state);
        });
    } else {
        render_camera_column(ui, view_state, shared_state, preview_frame);
        ui.add_space(16.0);
        render_output_column(ui, shared_state);
    }
}

/// Render the camera preview and start/stop controls
fn render_camera_column(
    ui: &mut egui::Ui,
    view_state: &mut RecognizeViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    preview_frame: Option<CameraFrame>,
) {
    let (phase, candidate, accept_threshold, mirror) = {
        let state = shared_state.read();
        (
            state.runtime.camera_phase.clone(),
            state.runtime.current_candidate,
            state.config.recognition.accept_threshold,
            state.config.camera.mirror_preview,
        )
    };

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(12.0)
        .show(ui, |ui| {
            let preview_size = egui::vec2(ui.available_width(), ui.available_width() * 9.0 / 16.0);

            egui::Frame::none()
                .fill(ThemeColors::BG_DARK)
                .rounding(egui::Rounding::same(6.0))
                .show(ui, |ui| {
                    ui.set_min_size(preview_size);

                    // Update texture if we have a new frame
                    if let Some(frame) = preview_frame {
                        let needs_new_texture = view_state
                            .preview_frame_size
                            .map(|(w, h)| w != frame.width || h != frame.height)
                            .unwrap_or(true)
                            || view_state.preview_texture.is_none();

                        let color_image = egui::ColorImage::from_rgb(
                            [frame.width as usize, frame.height as usize],
                            &frame.data,
                        );

                        if needs_new_texture {
                            let texture = ui.ctx().load_texture(
                                "camera_preview",
                                color_image,
                                egui::TextureOptions::LINEAR,
                            );
                            view_state.preview_texture = Some(texture);
                            view_state.preview_frame_size = Some((frame.width, frame.height));
                        } else if let Some(ref mut texture) = view_state.preview_texture {
                            texture.set(color_image, egui::TextureOptions::LINEAR);
                        }
                    }

                    if phase.is_active() {
                        if let Some(ref texture) = view_state.preview_texture {
                            let tex_size = texture.size_vec2();
                            let scale =
                                (preview_size.x / tex_size.x).min(preview_size.y / tex_size.y);
                            let scaled_size = tex_size * scale;

                            let image_rect = ui
                                .centered_and_justified(|ui| {
                                    let mut image =
                                        egui::Image::new((texture.id(), scaled_size));
                                    if mirror {
                                        // Selfie view
                                        image = image.uv(egui::Rect::from_min_max(
                                            egui::pos2(1.0, 0.0),
                                            egui::pos2(0.0, 1.0),
                                        ));
                                    }
                                    ui.add(image).rect
                                })
                                .inner;

                            paint_detection_area(ui, image_rect, candidate, accept_threshold);
                        } else {
                            ui.centered_and_justified(|ui| {
                                ui.label(
                                    RichText::new("Waiting for first frame...")
                                        .color(ThemeColors::TEXT_MUTED),
                                );
                            });
                        }
                    } else {
                        render_preview_placeholder(ui, &phase);
                        view_state.preview_texture = None;
                        view_state.preview_frame_size = None;
                    }
                });

            ui.add_space(12.0);

            // Start/Stop button
            let has_session = phase.has_session();
            let (btn_text, btn_color) = if has_session {
                ("Stop Recognition", ThemeColors::ACCENT_ERROR)
            } else {
                ("Start Recognition", ThemeColors::ACCENT_SUCCESS)
            };

            if ui
                .add(
                    egui::Button::new(RichText::new(btn_text).color(egui::Color32::WHITE))
                        .fill(btn_color)
                        .min_size(egui::vec2(ui.available_width(), 36.0)),
                )
                .clicked()
            {
                let mut state = shared_state.write();
                state.runtime.camera_command = Some(if has_session {
                    CameraCommand::Stop
                } else {
                    CameraCommand::Start
                });
            }
        });
}

/// Placeholder shown instead of video when not recognizing
fn render_preview_placeholder(ui: &mut egui::Ui, phase: &CameraPhase) {
    let (title, hint) = match phase.error() {
        Some(_) => (
            "Camera access denied",
            "Please check camera permissions and that no other app is using it",
        ),
        None => ("Camera not started", "Click 'Start Recognition' to begin"),
    };

    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("◉").size(48.0).color(ThemeColors::TEXT_MUTED));
            ui.add_space(8.0);
            ui.label(
                RichText::new(title)
                    .size(16.0)
                    .color(ThemeColors::TEXT_SECONDARY),
            );
            ui.add_space(4.0);
            ui.label(RichText::new(hint).size(12.0).color(ThemeColors::TEXT_MUTED));
        });
    });
}

/// Paint the hand detection frame and current candidate over the preview
fn paint_detection_area(
    ui: &egui::Ui,
    image_rect: egui::Rect,
    candidate: Option<crate::recognition::Candidate>,
    accept_threshold: u8,
) {
    let painter = ui.painter();

    let side = image_rect.height().min(image_rect.width()) * 0.6;
    let detection_rect = egui::Rect::from_center_size(image_rect.center(), egui::Vec2::splat(side));

    painter.rect_stroke(
        detection_rect,
        egui::Rounding::same(12.0),
        egui::Stroke::new(3.0, color_with_alpha(ThemeColors::ACCENT_PRIMARY, 102)),
    );

    painter.text(
        detection_rect.center_top() + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_CENTER,
        "Detection Area",
        egui::FontId::proportional(12.0),
        color_with_alpha(ThemeColors::ACCENT_PRIMARY, 153),
    );

    match candidate {
        Some(candidate) if candidate.confidence >= accept_threshold => {
            painter.text(
                detection_rect.center(),
                egui::Align2::CENTER_CENTER,
                candidate.letter.to_string(),
                egui::FontId::proportional(64.0),
                ThemeColors::ACCENT_PRIMARY,
            );
            painter.text(
                detection_rect.center() + egui::vec2(0.0, 48.0),
                egui::Align2::CENTER_CENTER,
                format!("{}% Match", candidate.confidence),
                egui::FontId::proportional(16.0),
                ThemeColors::ACCENT_SUCCESS,
            );
        }
        Some(candidate) => {
            painter.text(
                detection_rect.center(),
                egui::Align2::CENTER_CENTER,
                candidate.letter.to_string(),
                egui::FontId::proportional(44.0),
                ThemeColors::TEXT_MUTED,
            );
            painter.text(
                detection_rect.center() + egui::vec2(0.0, 40.0),
                egui::Align2::CENTER_CENTER,
                format!("{}% - Too Low", candidate.confidence),
                egui::FontId::proportional(13.0),
                ThemeColors::ACCENT_ERROR,
            );
        }
        None => {
            painter.text(
                detection_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Sign a letter",
                egui::FontId::proportional(14.0),
                ThemeColors::TEXT_MUTED,
            );
        }
    }
}

/// Render the recognized text panel and output actions
fn render_output_column(ui: &mut egui::Ui, shared_state: &Arc<RwLock<SharedAppState>>) {
    let (recognized_text, is_recognizing, copied, show_tips) = {
        let state = shared_state.read();
        (
            state.runtime.recognized_text.clone(),
            state.runtime.is_recognizing(),
            state.runtime.copy_feedback.is_copied(Instant::now()),
            state.config.general.show_tips,
        )
    };

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let dot_color = if is_recognizing {
                    ThemeColors::ACCENT_SUCCESS
                } else {
                    ThemeColors::TEXT_MUTED
                };
                let (rect, _) =
                    ui.allocate_exact_size(egui::Vec2::splat(10.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 4.0, dot_color);
                ui.label(RichText::new("Recognized Text").size(18.0).strong());
            });

            ui.add_space(12.0);

            // Text area
            egui::Frame::none()
                .fill(ThemeColors::BG_DARK)
                .rounding(egui::Rounding::same(6.0))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_min_height(160.0);
                    ui.set_width(ui.available_width());
                    if recognized_text.is_empty() {
                        ui.label(
                            RichText::new("Start signing to see text appear here...")
                                .italics()
                                .color(ThemeColors::TEXT_MUTED),
                        );
                    } else {
                        ui.label(
                            RichText::new(&recognized_text)
                                .monospace()
                                .size(18.0)
                                .color(ThemeColors::TEXT_PRIMARY),
                        );
                    }
                });

            ui.add_space(12.0);

            // Output actions; all are no-ops while the buffer is empty
            let has_text = !recognized_text.is_empty();
            ui.add_enabled_ui(has_text, |ui| {
                let button_size = egui::vec2(ui.available_width(), 32.0);

                if ui
                    .add(egui::Button::new("Speak Text").min_size(button_size))
                    .clicked()
                {
                    shared_state.write().runtime.output_command = Some(OutputCommand::Speak);
                }

                let copy_label = if copied { "Copied!" } else { "Copy Text" };
                if ui
                    .add(egui::Button::new(copy_label).min_size(button_size))
                    .clicked()
                {
                    shared_state.write().runtime.output_command = Some(OutputCommand::Copy);
                }

                if ui
                    .add(egui::Button::new("Clear Text").min_size(button_size))
                    .clicked()
                {
                    shared_state.write().runtime.output_command = Some(OutputCommand::Clear);
                }
            });
        });

    if show_tips {
        ui.add_space(16.0);
        egui::Frame::none()
            .fill(color_with_alpha(ThemeColors::ACCENT_PRIMARY, 31))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Tips for Best Results")
                        .size(15.0)
                        .color(ThemeColors::TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(6.0);
                for tip in [
                    "Ensure good lighting",
                    "Keep hand in frame",
                    "Sign clearly and slowly",
                    "Face the camera",
                ] {
                    ui.label(
                        RichText::new(format!("• {tip}"))
                            .size(13.0)
                            .color(ThemeColors::TEXT_SECONDARY),
                    );
                }
            });
    }
}
