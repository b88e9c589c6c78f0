//! Shared application state
//!
//! Thread-safe state shared between the dashboard views and the app loop.
//! Views record commands and the app loop drains and executes them.

pub mod state;

pub use state::{
    CameraCommand, CameraPhase, CopyFeedback, Notice, NoticeLevel, OutputCommand, RuntimeState,
    SharedAppState,
};
