//! Platform text-to-speech

use anyhow::{Context, Result};
use tracing::{debug, info};
use tts::Tts;

use crate::config::SpeechSettings;

/// Wrapper around the platform speech synthesizer
///
/// The synthesizer is created lazily on first use so that machines without a
/// speech backend still run the rest of the app; the failure is reported to
/// the caller per attempt.
pub struct SpeechEngine {
    settings: SpeechSettings,
    tts: Option<Tts>,
}

impl SpeechEngine {
    pub fn new(settings: SpeechSettings) -> Self {
        Self { settings, tts: None }
    }

    /// Speak the given text, interrupting any utterance in progress
    pub fn speak(&mut self, text: &str) -> Result<()> {
        let tts = self.synthesizer()?;
        let _utterance = tts.speak(text, true).context("speech synthesis failed")?;
        debug!("Speaking {} characters", text.len());
        Ok(())
    }

    fn synthesizer(&mut self) -> Result<&mut Tts> {
        if self.tts.is_none() {
            let mut tts =
                Tts::default().context("text-to-speech is not available on this system")?;

            let features = tts.supported_features();
            if features.rate {
                let rate = tts.normal_rate() * self.settings.rate_scale;
                tts.set_rate(rate).context("failed to set speech rate")?;
            }
            if features.pitch {
                let pitch = tts.normal_pitch() * self.settings.pitch_scale;
                tts.set_pitch(pitch).context("failed to set speech pitch")?;
            }

            info!("Speech synthesizer initialized");
            self.tts = Some(tts);
        }

        self.tts
            .as_mut()
            .context("text-to-speech is not available on this system")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_is_not_created_until_first_use() {
        let engine = SpeechEngine::new(SpeechSettings::default());
        assert!(engine.tts.is_none());
    }
}
