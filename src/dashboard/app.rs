//! Dashboard application entry point

use eframe::egui;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::capture::{CameraCapture, CameraConfig};
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardState, DashboardView};
use crate::dashboard::theme::{self, ThemeColors};
use crate::dashboard::views::{render_home_view, render_recognize_view, render_settings_view};
use crate::output::SpeechEngine;
use crate::recognition::{RecognitionSession, SessionEvent, SessionSettings, SimulatedSource};
use crate::shared::{
    CameraCommand, CameraPhase, CopyFeedback, NoticeLevel, OutputCommand, SharedAppState,
};

/// How long the "Copied!" indicator stays up
const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// The main dashboard application
pub struct DashboardApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
    /// Camera capture manager; Some exactly while a camera session exists
    capture: Option<CameraCapture>,
    /// Recognition session; Some exactly while the camera phase is Active
    session: Option<RecognitionSession>,
    /// Speech synthesizer
    speech: SpeechEngine,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(shared_state: Arc<RwLock<SharedAppState>>) -> Self {
        let (speech_settings, start_on_recognize) = {
            let state = shared_state.read();
            (state.config.speech.clone(), state.config.general.start_on_recognize)
        };

        let mut dashboard_state = DashboardState::default();
        if start_on_recognize {
            dashboard_state.current_view = DashboardView::Recognize;
        }

        Self {
            shared_state,
            dashboard_state,
            theme_applied: false,
            capture: None,
            session: None,
            speech: SpeechEngine::new(speech_settings),
        }
    }

    /// Start the camera; recognition begins once the stream reports ready
    pub fn start_camera(&mut self) {
        if self.capture.is_some() {
            return; // Already starting or running
        }

        let config = {
            let mut state = self.shared_state.write();
            state.runtime.camera_phase = CameraPhase::Starting;
            state.runtime.clear_notice();
            CameraConfig::from(&state.config.camera)
        };

        info!("Starting camera {}", config.device_index);
        self.capture = Some(CameraCapture::start(config));
    }

    /// Stop the camera and recognition
    ///
    /// Idempotent teardown: cancels the recognition timer (and any pending
    /// delayed append), releases the capture device and clears the candidate
    /// display. Safe to call when nothing is running.
    pub fn stop_camera(&mut self) {
        let had_session = self.capture.is_some() || self.session.is_some();

        self.session = None;
        if let Some(mut capture) = self.capture.take() {
            capture.stop();
        }

        let mut state = self.shared_state.write();
        state.runtime.camera_phase = CameraPhase::Idle;
        state.runtime.current_candidate = None;

        if had_session {
            info!("Recognition stopped");
            state.runtime.push_notice(NoticeLevel::Info, "Recognition stopped");
        }
    }

    /// Whether a camera session (starting or active) exists
    pub fn has_camera_session(&self) -> bool {
        self.capture.is_some()
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 720.0])
                .with_min_inner_size([800.0, 540.0])
                .with_title("SilentTalk"),
            ..Default::default()
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        let now = Instant::now();

        // Process commands from the views
        self.process_camera_commands();
        self.process_output_commands(now);

        // Drive the camera/recognition lifecycle
        self.check_camera_startup(now);
        self.check_camera_health();
        self.poll_session(now);
        self.shared_state.write().runtime.copy_feedback.expire(now);

        // Pull the newest frame for the preview
        let preview_frame = self.capture.as_ref().and_then(|c| c.try_next_frame());

        // Repaint continuously while a session is live so ticks and delayed
        // appends fire without user input
        if self.has_camera_session() {
            ctx.request_repaint();
        } else if matches!(
            self.shared_state.read().runtime.copy_feedback,
            CopyFeedback::Copied { .. }
        ) {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        // Sidebar panel
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state.current_view);
            });

        // Main content panel
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                render_notice_banner(ui, &self.shared_state);

                match self.dashboard_state.current_view {
                    DashboardView::Home => {
                        render_home_view(ui, &mut self.dashboard_state.current_view);
                    }
                    DashboardView::Recognize => {
                        render_recognize_view(
                            ui,
                            &mut self.dashboard_state.recognize,
                            &self.shared_state,
                            preview_frame,
                        );
                    }
                    DashboardView::Settings => {
                        render_settings_view(
                            ui,
                            &mut self.dashboard_state.settings,
                            &self.shared_state,
                        );
                    }
                }
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Same teardown as an explicit stop: no timer or capture device may
        // outlive the window
        self.session = None;
        if let Some(mut capture) = self.capture.take() {
            capture.stop();
        }
    }
}

impl DashboardApp {
    /// Process camera commands from the UI
    fn process_camera_commands(&mut self) {
        let command = {
            let mut state = self.shared_state.write();
            state.runtime.camera_command.take()
        };

        if let Some(cmd) = command {
            match cmd {
                CameraCommand::Start => self.start_camera(),
                CameraCommand::Stop => self.stop_camera(),
            }
        }
    }

    /// Check the open handshake while the camera is starting
    fn check_camera_startup(&mut self, now: Instant) {
        if !matches!(
            self.shared_state.read().runtime.camera_phase,
            CameraPhase::Starting
        ) {
            return;
        }

        let Some(capture) = &self.capture else { return };
        let Some(result) = capture.try_open_result() else {
            return;
        };

        match result {
            Ok((width, height)) => {
                info!("Camera ready at {}x{}, starting recognition", width, height);
                let mut state = self.shared_state.write();
                let settings = SessionSettings::from(&state.config.recognition);
                state.runtime.camera_phase = CameraPhase::Active;
                state
                    .runtime
                    .push_notice(NoticeLevel::Success, "Camera started successfully");
                drop(state);

                self.session = Some(RecognitionSession::new(
                    Box::new(SimulatedSource::new()),
                    settings,
                    now,
                ));
            }
            Err(e) => {
                warn!("Camera start failed: {}", e);
                if let Some(mut capture) = self.capture.take() {
                    capture.stop();
                }
                let mut state = self.shared_state.write();
                state.runtime.camera_phase = CameraPhase::Error(e.to_string());
                state.runtime.push_notice(
                    NoticeLevel::Error,
                    "Failed to access camera. Please allow camera permissions.",
                );
            }
        }
    }

    /// Detect a capture thread that died while recognition was active
    fn check_camera_health(&mut self) {
        let is_active = self.shared_state.read().runtime.camera_phase.is_active();
        if !is_active {
            return;
        }

        let thread_alive = self.capture.as_ref().map(|c| c.is_running()).unwrap_or(false);
        if !thread_alive {
            warn!("Camera stream ended unexpectedly");
            self.stop_camera();
            let mut state = self.shared_state.write();
            state.runtime.camera_phase = CameraPhase::Error("camera stream ended".to_string());
            state
                .runtime
                .push_notice(NoticeLevel::Error, "Camera stream ended unexpectedly");
        }
    }

    /// Poll the recognition session and apply its events
    fn poll_session(&mut self, now: Instant) {
        let Some(session) = &mut self.session else { return };

        let events = session.poll(now);
        if events.is_empty() {
            return;
        }

        let mut state = self.shared_state.write();
        for event in events {
            match event {
                SessionEvent::CandidateShown(candidate) => {
                    state.runtime.current_candidate = Some(candidate);
                }
                SessionEvent::LetterAccepted(letter) => {
                    state.runtime.recognized_text.push(letter);
                    state.runtime.letters_accepted += 1;
                    state.runtime.current_candidate = None;
                }
                SessionEvent::CandidateDiscarded => {
                    state.runtime.current_candidate = None;
                }
            }
        }
    }

    /// Process output commands from the UI
    fn process_output_commands(&mut self, now: Instant) {
        let command = {
            let mut state = self.shared_state.write();
            state.runtime.output_command.take()
        };

        let Some(cmd) = command else { return };

        match cmd {
            OutputCommand::Speak => {
                let text = self.shared_state.read().runtime.recognized_text.clone();
                let mut state = self.shared_state.write();
                if text.is_empty() {
                    state.runtime.push_notice(NoticeLevel::Error, "No text to speak");
                    return;
                }
                drop(state);

                let result = self.speech.speak(&text);
                let mut state = self.shared_state.write();
                match result {
                    Ok(()) => state
                        .runtime
                        .push_notice(NoticeLevel::Success, "Speaking text..."),
                    Err(e) => {
                        warn!("Speech failed: {:#}", e);
                        state.runtime.push_notice(NoticeLevel::Error, format!("{e}"));
                    }
                }
            }
            OutputCommand::Copy => {
                let text = self.shared_state.read().runtime.recognized_text.clone();
                let mut state = self.shared_state.write();
                if text.is_empty() {
                    state.runtime.push_notice(NoticeLevel::Error, "No text to copy");
                    return;
                }
                drop(state);

                let result = crate::output::copy_text(&text);
                let mut state = self.shared_state.write();
                match result {
                    Ok(()) => {
                        state.runtime.copy_feedback = CopyFeedback::Copied {
                            until: now + COPY_FEEDBACK_DURATION,
                        };
                        state
                            .runtime
                            .push_notice(NoticeLevel::Success, "Text copied to clipboard");
                    }
                    Err(e) => {
                        warn!("Copy failed: {:#}", e);
                        state
                            .runtime
                            .push_notice(NoticeLevel::Error, "Failed to copy text");
                    }
                }
            }
            OutputCommand::Clear => {
                let mut state = self.shared_state.write();
                state.runtime.recognized_text.clear();
                state.runtime.push_notice(NoticeLevel::Info, "Text cleared");
            }
        }
    }
}

/// Render the dismissable notice banner, if a notice is up
fn render_notice_banner(ui: &mut egui::Ui, shared_state: &Arc<RwLock<SharedAppState>>) {
    let notice = shared_state.read().runtime.notice.clone();
    let Some(notice) = notice else { return };

    let accent = match notice.level {
        NoticeLevel::Info => ThemeColors::ACCENT_PRIMARY,
        NoticeLevel::Success => ThemeColors::ACCENT_SUCCESS,
        NoticeLevel::Error => ThemeColors::ACCENT_ERROR,
    };

    egui::Frame::none()
        .fill(theme::color_with_alpha(accent, 38))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&notice.message).color(ThemeColors::TEXT_PRIMARY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        shared_state.write().runtime.clear_notice();
                    }
                });
            });
        });
    ui.add_space(12.0);
}

/// Run the dashboard application
pub fn run_dashboard(shared_state: Arc<RwLock<SharedAppState>>) -> Result<(), eframe::Error> {
    let app = DashboardApp::new(shared_state);
    eframe::run_native(
        "SilentTalk",
        DashboardApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_app() -> DashboardApp {
        let shared = Arc::new(RwLock::new(SharedAppState::new(AppConfig::default())));
        DashboardApp::new(shared)
    }

    #[test]
    fn test_stop_before_start_leaves_idle_state() {
        let mut app = test_app();

        // Stopping with nothing running must not panic and must leave the
        // initial idle state untouched, even when called twice.
        app.stop_camera();
        app.stop_camera();

        assert!(!app.has_camera_session());
        assert!(app.session.is_none());

        let state = app.shared_state.read();
        assert_eq!(state.runtime.camera_phase, CameraPhase::Idle);
        assert!(state.runtime.current_candidate.is_none());
        assert!(state.runtime.recognized_text.is_empty());
    }

    #[test]
    fn test_stop_cancels_pending_append() {
        let mut app = test_app();
        let now = Instant::now();

        // Arm a session manually and drive it to a pending high-confidence
        // candidate.
        struct AlwaysQ;
        impl crate::recognition::RecognitionSource for AlwaysQ {
            fn next_candidate(&mut self) -> crate::recognition::Candidate {
                crate::recognition::Candidate { letter: 'Q', confidence: 99 }
            }
        }
        app.session = Some(RecognitionSession::new(
            Box::new(AlwaysQ),
            SessionSettings::default(),
            now,
        ));
        app.shared_state.write().runtime.camera_phase = CameraPhase::Active;

        app.poll_session(now + Duration::from_millis(2500));
        assert!(app.shared_state.read().runtime.current_candidate.is_some());
        assert!(app.shared_state.read().runtime.recognized_text.is_empty());

        // Stop while the 1.5s display delay is pending.
        app.stop_camera();

        // Polling past the would-be append deadline must not append.
        app.poll_session(now + Duration::from_secs(30));
        let state = app.shared_state.read();
        assert!(state.runtime.recognized_text.is_empty());
        assert!(state.runtime.current_candidate.is_none());
        assert_eq!(state.runtime.camera_phase, CameraPhase::Idle);
    }

    #[test]
    fn test_session_exists_iff_active() {
        let mut app = test_app();
        assert!(app.session.is_none());

        app.session = Some(RecognitionSession::new(
            Box::new(SimulatedSource::new()),
            SessionSettings::default(),
            Instant::now(),
        ));
        app.shared_state.write().runtime.camera_phase = CameraPhase::Active;

        app.stop_camera();
        assert!(app.session.is_none());
        assert!(!app.shared_state.read().runtime.camera_phase.is_active());
    }

    #[test]
    fn test_denied_camera_reaches_error_phase() {
        let mut app = test_app();
        app.shared_state.write().config.camera.device_index = u32::MAX;

        app.start_camera();
        assert_eq!(
            app.shared_state.read().runtime.camera_phase,
            CameraPhase::Starting
        );

        // The open handshake resolves on the capture thread; poll until it
        // reports the failure.
        let deadline = Instant::now() + Duration::from_secs(10);
        while matches!(
            app.shared_state.read().runtime.camera_phase,
            CameraPhase::Starting
        ) {
            assert!(Instant::now() < deadline, "camera open did not resolve");
            app.check_camera_startup(Instant::now());
            std::thread::sleep(Duration::from_millis(20));
        }

        let state = app.shared_state.read();
        assert!(state.runtime.camera_phase.error().is_some());
        assert!(!state.runtime.is_recognizing());
        assert_eq!(
            state.runtime.notice.as_ref().unwrap().level,
            NoticeLevel::Error
        );
        drop(state);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_clear_command_empties_buffer() {
        let mut app = test_app();
        {
            let mut state = app.shared_state.write();
            state.runtime.recognized_text = "AB".to_string();
            state.runtime.output_command = Some(OutputCommand::Clear);
        }

        app.process_output_commands(Instant::now());

        let state = app.shared_state.read();
        assert!(state.runtime.recognized_text.is_empty());
        assert!(state.runtime.notice.is_some());
    }

    #[test]
    fn test_speak_and_copy_are_noops_on_empty_buffer() {
        let mut app = test_app();

        // Speak with an empty buffer: no platform call is made, only an
        // error notice.
        app.shared_state.write().runtime.output_command = Some(OutputCommand::Speak);
        app.process_output_commands(Instant::now());
        {
            let state = app.shared_state.read();
            let notice = state.runtime.notice.as_ref().unwrap();
            assert_eq!(notice.level, NoticeLevel::Error);
            assert_eq!(notice.message, "No text to speak");
        }

        app.shared_state.write().runtime.output_command = Some(OutputCommand::Copy);
        app.process_output_commands(Instant::now());
        let state = app.shared_state.read();
        let notice = state.runtime.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "No text to copy");
        assert_eq!(state.runtime.copy_feedback, CopyFeedback::Idle);
    }

    #[test]
    fn test_high_confidence_tick_appends_exactly_one_letter() {
        let mut app = test_app();
        let now = Instant::now();

        struct AlwaysA;
        impl crate::recognition::RecognitionSource for AlwaysA {
            fn next_candidate(&mut self) -> crate::recognition::Candidate {
                crate::recognition::Candidate { letter: 'A', confidence: 90 }
            }
        }
        app.session = Some(RecognitionSession::new(
            Box::new(AlwaysA),
            SessionSettings::default(),
            now,
        ));

        let tick = now + Duration::from_millis(2500);
        app.poll_session(tick);
        assert_eq!(
            app.shared_state.read().runtime.current_candidate,
            Some(crate::recognition::Candidate { letter: 'A', confidence: 90 })
        );

        app.poll_session(tick + Duration::from_millis(1500));
        let state = app.shared_state.read();
        assert_eq!(state.runtime.recognized_text, "A");
        assert_eq!(state.runtime.letters_accepted, 1);
        assert!(state.runtime.current_candidate.is_none());
    }
}
