//! Recognition Layer
//!
//! Produces letter candidates from an active camera session. The generator
//! sits behind the [`RecognitionSource`] trait so the session and UI never
//! depend on which backend is active; the shipped backend is a randomized
//! stand-in until a real gesture model lands.

pub mod session;
pub mod simulated;

pub use session::{RecognitionSession, SessionEvent, SessionSettings};
pub use simulated::SimulatedSource;

/// A single letter candidate with its confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Recognized letter (A-Z)
    pub letter: char,
    /// Confidence in percent (0-100)
    pub confidence: u8,
}

/// Source of letter candidates
///
/// Implementations produce one candidate per recognition tick. A future
/// model-backed source will consume camera frames; the simulated source
/// ignores them entirely.
pub trait RecognitionSource: Send {
    /// Produce the next candidate
    fn next_candidate(&mut self) -> Candidate;
}
