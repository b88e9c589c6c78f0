//! Shared application state between the views and the app loop

use std::time::Instant;

use crate::config::AppConfig;
use crate::recognition::Candidate;

/// Central shared state
#[derive(Debug, Clone)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    /// Create a new shared state with the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            runtime: RuntimeState::default(),
        }
    }
}

/// Command to control the camera from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommand {
    /// Start the camera and recognition
    Start,
    /// Stop the camera and recognition
    Stop,
}

/// Command to act on the recognized text from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCommand {
    /// Speak the recognized text
    Speak,
    /// Copy the recognized text to the clipboard
    Copy,
    /// Clear the recognized text
    Clear,
}

/// Camera/recognition lifecycle phase
///
/// One enum rather than separate booleans so that "recognizing" and "camera
/// error" cannot coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraPhase {
    /// No camera session
    #[default]
    Idle,
    /// Capture thread spawned, waiting for the device to open
    Starting,
    /// Stream open, recognition running
    Active,
    /// Last start attempt failed
    Error(String),
}

impl CameraPhase {
    /// Whether recognition is running
    pub fn is_active(&self) -> bool {
        matches!(self, CameraPhase::Active)
    }

    /// Whether a camera session exists (starting or active)
    pub fn has_session(&self) -> bool {
        matches!(self, CameraPhase::Starting | CameraPhase::Active)
    }

    /// The error message, if the phase is an error
    pub fn error(&self) -> Option<&str> {
        match self {
            CameraPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Transient feedback state for the copy action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFeedback {
    #[default]
    Idle,
    /// "Copied!" is shown until the deadline passes
    Copied { until: Instant },
}

impl CopyFeedback {
    /// Whether the copied indicator should currently be shown
    pub fn is_copied(&self, now: Instant) -> bool {
        matches!(self, CopyFeedback::Copied { until } if now < *until)
    }

    /// Revert to idle once the deadline has passed
    pub fn expire(&mut self, now: Instant) {
        if let CopyFeedback::Copied { until } = self {
            if now >= *until {
                *self = CopyFeedback::Idle;
            }
        }
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A dismissable user-facing notice (the toast analog)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Camera/recognition lifecycle phase
    pub camera_phase: CameraPhase,
    /// Accumulated recognized text
    pub recognized_text: String,
    /// Candidate currently displayed in the detection area
    pub current_candidate: Option<Candidate>,
    /// Total letters appended this run
    pub letters_accepted: usize,
    /// Copy action feedback
    pub copy_feedback: CopyFeedback,
    /// Latest user-facing notice
    pub notice: Option<Notice>,
    /// Pending camera command from the UI
    pub camera_command: Option<CameraCommand>,
    /// Pending output command from the UI
    pub output_command: Option<OutputCommand>,
}

impl RuntimeState {
    /// Post a user-facing notice, replacing any existing one
    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }

    /// Dismiss the current notice
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Whether recognition is currently running
    pub fn is_recognizing(&self) -> bool {
        self.camera_phase.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_runtime_is_idle() {
        let runtime = RuntimeState::default();
        assert_eq!(runtime.camera_phase, CameraPhase::Idle);
        assert!(!runtime.is_recognizing());
        assert!(runtime.recognized_text.is_empty());
        assert!(runtime.current_candidate.is_none());
        assert_eq!(runtime.copy_feedback, CopyFeedback::Idle);
        assert!(runtime.notice.is_none());
    }

    #[test]
    fn test_phase_error_excludes_recognizing() {
        let phase = CameraPhase::Error("denied".to_string());
        assert!(!phase.is_active());
        assert!(!phase.has_session());
        assert_eq!(phase.error(), Some("denied"));
    }

    #[test]
    fn test_notice_replace_and_clear() {
        let mut runtime = RuntimeState::default();
        runtime.push_notice(NoticeLevel::Info, "first");
        runtime.push_notice(NoticeLevel::Error, "second");

        let notice = runtime.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "second");

        runtime.clear_notice();
        assert!(runtime.notice.is_none());
    }

    #[test]
    fn test_copy_feedback_reverts_after_deadline() {
        let now = Instant::now();
        let mut feedback = CopyFeedback::Copied {
            until: now + Duration::from_secs(2),
        };
        assert!(feedback.is_copied(now));

        feedback.expire(now + Duration::from_secs(1));
        assert!(feedback.is_copied(now + Duration::from_secs(1)));

        feedback.expire(now + Duration::from_secs(2));
        assert_eq!(feedback, CopyFeedback::Idle);
    }
}
