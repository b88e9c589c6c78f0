//! Recognition session
//!
//! Drives the tick schedule while a camera session is active. The session is
//! poll-driven: the UI calls [`RecognitionSession::poll`] every repaint and
//! applies the returned events. Dropping the session cancels the armed tick
//! and any pending delayed append, so a stopped camera can never produce a
//! late letter.

use std::time::{Duration, Instant};

use super::{Candidate, RecognitionSource};

/// Timing and threshold settings for a session
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Period between recognition ticks
    pub interval: Duration,
    /// Minimum confidence (percent) for a candidate to be accepted
    pub accept_threshold: u8,
    /// Display delay before an accepted candidate is appended
    pub accept_delay: Duration,
    /// Display delay before a rejected candidate is discarded
    pub reject_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2500),
            accept_threshold: 85,
            accept_delay: Duration::from_millis(1500),
            reject_delay: Duration::from_millis(800),
        }
    }
}

impl From<&crate::config::RecognitionSettings> for SessionSettings {
    fn from(settings: &crate::config::RecognitionSettings) -> Self {
        Self {
            interval: Duration::from_millis(settings.interval_ms),
            accept_threshold: settings.accept_threshold,
            accept_delay: Duration::from_millis(settings.accept_display_ms),
            reject_delay: Duration::from_millis(settings.reject_display_ms),
        }
    }
}

/// Events produced by polling a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new candidate was drawn and should be displayed
    CandidateShown(Candidate),
    /// The displayed candidate met the threshold; append its letter
    LetterAccepted(char),
    /// The displayed candidate fell below the threshold; clear the display
    CandidateDiscarded,
}

#[derive(Debug)]
struct PendingCandidate {
    candidate: Candidate,
    resolve_at: Instant,
    accepted: bool,
}

impl PendingCandidate {
    fn resolve(self) -> SessionEvent {
        if self.accepted {
            SessionEvent::LetterAccepted(self.candidate.letter)
        } else {
            SessionEvent::CandidateDiscarded
        }
    }
}

/// One recognition timer over one camera session
///
/// At most one candidate is pending at any time; a tick that fires while one
/// is still displayed settles it first, so an accepted letter is never lost.
pub struct RecognitionSession {
    source: Box<dyn RecognitionSource>,
    settings: SessionSettings,
    next_tick: Instant,
    pending: Option<PendingCandidate>,
}

impl RecognitionSession {
    /// Create a session whose first tick fires one interval from `now`
    pub fn new(source: Box<dyn RecognitionSource>, settings: SessionSettings, now: Instant) -> Self {
        Self {
            source,
            settings,
            next_tick: now + settings.interval,
            pending: None,
        }
    }

    /// Advance the session to `now`, returning the events that fired
    pub fn poll(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        // Resolve the displayed candidate once its delay has elapsed
        if let Some(pending) = self.pending.take() {
            if now >= pending.resolve_at {
                events.push(pending.resolve());
            } else {
                self.pending = Some(pending);
            }
        }

        if now >= self.next_tick {
            self.next_tick = now + self.settings.interval;
            // A configured interval shorter than the display delay can tick
            // while the previous candidate is still shown; settle it now
            // rather than drop it.
            if let Some(pending) = self.pending.take() {
                events.push(pending.resolve());
            }
            let candidate = self.source.next_candidate();
            let accepted = candidate.confidence >= self.settings.accept_threshold;
            let delay = if accepted {
                self.settings.accept_delay
            } else {
                self.settings.reject_delay
            };
            self.pending = Some(PendingCandidate {
                candidate,
                resolve_at: now + delay,
                accepted,
            });
            events.push(SessionEvent::CandidateShown(candidate));
        }

        events
    }

    /// Whether a candidate is currently displayed and awaiting resolution
    pub fn has_pending_candidate(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::Candidate;

    /// Source that replays a fixed script of candidates
    struct ScriptedSource {
        script: Vec<Candidate>,
        position: usize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Candidate>) -> Self {
            Self { script, position: 0 }
        }
    }

    impl RecognitionSource for ScriptedSource {
        fn next_candidate(&mut self) -> Candidate {
            let candidate = self.script[self.position % self.script.len()];
            self.position += 1;
            candidate
        }
    }

    fn session_with(script: Vec<Candidate>, now: Instant) -> RecognitionSession {
        RecognitionSession::new(
            Box::new(ScriptedSource::new(script)),
            SessionSettings::default(),
            now,
        )
    }

    #[test]
    fn test_no_tick_before_interval() {
        let t0 = Instant::now();
        let mut session = session_with(vec![Candidate { letter: 'A', confidence: 90 }], t0);

        assert!(session.poll(t0).is_empty());
        assert!(session.poll(t0 + Duration::from_millis(2499)).is_empty());
        assert!(!session.has_pending_candidate());
    }

    #[test]
    fn test_tick_shows_candidate() {
        let t0 = Instant::now();
        let mut session = session_with(vec![Candidate { letter: 'A', confidence: 90 }], t0);

        let events = session.poll(t0 + Duration::from_millis(2500));
        assert_eq!(
            events,
            vec![SessionEvent::CandidateShown(Candidate { letter: 'A', confidence: 90 })]
        );
        assert!(session.has_pending_candidate());
    }

    #[test]
    fn test_high_confidence_appends_after_delay() {
        let t0 = Instant::now();
        let mut session = session_with(vec![Candidate { letter: 'Q', confidence: 85 }], t0);

        let tick = t0 + Duration::from_millis(2500);
        session.poll(tick);

        // Not yet due
        assert!(session.poll(tick + Duration::from_millis(1499)).is_empty());

        let events = session.poll(tick + Duration::from_millis(1500));
        assert_eq!(events, vec![SessionEvent::LetterAccepted('Q')]);
        assert!(!session.has_pending_candidate());
    }

    #[test]
    fn test_low_confidence_discards_without_append() {
        let t0 = Instant::now();
        let mut session = session_with(vec![Candidate { letter: 'Z', confidence: 84 }], t0);

        let tick = t0 + Duration::from_millis(2500);
        session.poll(tick);

        let events = session.poll(tick + Duration::from_millis(800));
        assert_eq!(events, vec![SessionEvent::CandidateDiscarded]);
    }

    #[test]
    fn test_rejected_candidate_clears_faster_than_accepted() {
        let t0 = Instant::now();
        let mut session = session_with(vec![Candidate { letter: 'B', confidence: 70 }], t0);

        let tick = t0 + Duration::from_millis(2500);
        session.poll(tick);

        // The 800ms reject delay has passed; the 1500ms accept delay has not.
        let events = session.poll(tick + Duration::from_millis(900));
        assert_eq!(events, vec![SessionEvent::CandidateDiscarded]);
    }

    #[test]
    fn test_at_most_one_pending_candidate() {
        let t0 = Instant::now();
        let mut session = session_with(
            vec![
                Candidate { letter: 'A', confidence: 90 },
                Candidate { letter: 'B', confidence: 90 },
            ],
            t0,
        );

        session.poll(t0 + Duration::from_millis(2500));
        assert!(session.has_pending_candidate());

        // A long stall: the first candidate resolves, then exactly one new
        // tick fires.
        let events = session.poll(t0 + Duration::from_millis(7500));
        assert_eq!(
            events,
            vec![
                SessionEvent::LetterAccepted('A'),
                SessionEvent::CandidateShown(Candidate { letter: 'B', confidence: 90 }),
            ]
        );
        assert!(session.has_pending_candidate());
    }

    #[test]
    fn test_consecutive_ticks_alternate_accept_and_reject() {
        let t0 = Instant::now();
        let mut session = session_with(
            vec![
                Candidate { letter: 'H', confidence: 95 },
                Candidate { letter: 'I', confidence: 71 },
            ],
            t0,
        );

        let mut accepted = Vec::new();
        let mut discarded = 0;
        let mut now = t0;
        for _ in 0..40 {
            now += Duration::from_millis(500);
            for event in session.poll(now) {
                match event {
                    SessionEvent::LetterAccepted(letter) => accepted.push(letter),
                    SessionEvent::CandidateDiscarded => discarded += 1,
                    SessionEvent::CandidateShown(_) => {}
                }
            }
        }

        // 20 seconds of polling at the default 2.5s interval: 8 ticks, of
        // which the last may still be pending.
        assert_eq!(accepted, vec!['H', 'H', 'H', 'H']);
        assert_eq!(discarded, 3);
        assert!(session.has_pending_candidate());
    }

    #[test]
    fn test_short_interval_never_drops_accepted_letters() {
        let t0 = Instant::now();
        let settings = SessionSettings {
            interval: Duration::from_millis(500),
            accept_delay: Duration::from_millis(1500),
            ..SessionSettings::default()
        };
        let mut session = RecognitionSession::new(
            Box::new(ScriptedSource::new(vec![Candidate { letter: 'K', confidence: 90 }])),
            settings,
            t0,
        );

        let mut appended = 0;
        let mut now = t0;
        for _ in 0..40 {
            now += Duration::from_millis(250);
            for event in session.poll(now) {
                if let SessionEvent::LetterAccepted(_) = event {
                    appended += 1;
                }
            }
        }

        // 10 seconds at a 500ms interval: 20 ticks. Each tick displaces the
        // previous candidate before its 1500ms delay elapses, but the
        // displaced letter still appends.
        assert_eq!(appended, 19);
        assert!(session.has_pending_candidate());
    }

    #[test]
    fn test_settings_from_config() {
        let config = crate::config::RecognitionSettings::default();
        let settings = SessionSettings::from(&config);
        assert_eq!(settings.interval, Duration::from_millis(2500));
        assert_eq!(settings.accept_threshold, 85);
        assert_eq!(settings.accept_delay, Duration::from_millis(1500));
        assert_eq!(settings.reject_delay, Duration::from_millis(800));
    }
}
