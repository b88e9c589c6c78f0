//! Simulated recognition source
//!
//! Draws uniform random letters and confidence scores for UI demonstration.
//! No relation to actual camera frame content.

use rand::Rng;

use super::{Candidate, RecognitionSource};

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowest confidence the simulator will produce (inclusive)
const MIN_CONFIDENCE: u8 = 70;
/// Highest confidence the simulator will produce (exclusive)
const MAX_CONFIDENCE: u8 = 100;

/// Randomized stand-in for a real gesture recognizer
#[derive(Debug, Default)]
pub struct SimulatedSource;

impl SimulatedSource {
    pub fn new() -> Self {
        Self
    }
}

impl RecognitionSource for SimulatedSource {
    fn next_candidate(&mut self) -> Candidate {
        let mut rng = rand::thread_rng();
        let letter = LETTERS
            .as_bytes()[rng.gen_range(0..LETTERS.len())] as char;
        let confidence = rng.gen_range(MIN_CONFIDENCE..MAX_CONFIDENCE);
        Candidate { letter, confidence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_stay_in_range() {
        let mut source = SimulatedSource::new();
        for _ in 0..1000 {
            let candidate = source.next_candidate();
            assert!(candidate.letter.is_ascii_uppercase());
            assert!((MIN_CONFIDENCE..MAX_CONFIDENCE).contains(&candidate.confidence));
        }
    }

    #[test]
    fn test_candidates_vary() {
        let mut source = SimulatedSource::new();
        let first = source.next_candidate();
        let varied = (0..200).any(|_| source.next_candidate() != first);
        assert!(varied);
    }
}
