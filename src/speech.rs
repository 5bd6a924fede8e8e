use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AppError;

/// espeak-ng's default speaking rate in words per minute.
const DEFAULT_WPM: u32 = 175;

/// Speech synthesizer settings, fixed once at startup.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub command: String,
    pub language: String,
    /// Relative to the engine default, 0.5 = half speed.
    pub rate: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: "espeak-ng".to_string(),
            language: "es-ES".to_string(),
            rate: 0.5,
        }
    }
}

pub fn words_per_minute(rate: f64) -> u32 {
    (DEFAULT_WPM as f64 * rate).round() as u32
}

#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), AppError>;
}

/// Hands the utterance to an espeak-style command in a single invocation.
/// Synthesis failures are logged, never surfaced to the user.
pub struct CommandSpeaker {
    config: SpeechConfig,
}

impl CommandSpeaker {
    pub fn new(config: SpeechConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<(), AppError> {
        let wpm = words_per_minute(self.config.rate);
        debug!("speaking {} chars at {} wpm", text.len(), wpm);
        let result = tokio::process::Command::new(&self.config.command)
            .arg("-v")
            .arg(self.config.language.to_lowercase())
            .arg("-s")
            .arg(wpm.to_string())
            .arg(text)
            .status()
            .await;
        match result {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("speech command exited with {status}"),
            Err(e) => warn!("could not run speech command {}: {e}", self.config.command),
        }
        Ok(())
    }
}

/// Used with `--no-speech`.
pub struct SilentSpeaker;

#[async_trait]
impl Speaker for SilentSpeaker {
    async fn speak(&self, _text: &str) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_rate_halves_the_default_wpm() {
        assert_eq!(words_per_minute(0.5), 88);
        assert_eq!(words_per_minute(1.0), 175);
    }

    #[test]
    fn defaults_are_spanish_at_half_speed() {
        let config = SpeechConfig::default();
        assert_eq!(config.language, "es-ES");
        assert_eq!(config.rate, 0.5);
    }
}
