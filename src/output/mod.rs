//! Output Layer
//!
//! Speech synthesis and clipboard delivery for the recognized text buffer.
//! Both are soft-failure paths: unavailability surfaces as a notice, never a
//! crash.

pub mod clipboard;
pub mod speech;

pub use clipboard::copy_text;
pub use speech::SpeechEngine;
