//! Spoken output via the platform speech synthesizer.
//!
//! Shells out to `say` on macOS and `espeak-ng` elsewhere, awaiting the
//! command so playback completes before the next turn.

use crate::{Result, ValetError};
use tokio::process::Command;
use tracing::debug;

#[cfg(target_os = "macos")]
const DEFAULT_VOICE: &str = "Daniel";
#[cfg(not(target_os = "macos"))]
const DEFAULT_VOICE: &str = "en-gb";

/// Highest pitch value `espeak-ng -p` accepts.
pub const MAX_PITCH: u8 = 99;

/// Configuration for spoken replies.
#[derive(Clone, Debug)]
pub struct VoiceConfig {
    /// Whether spoken output is available at all.
    pub enabled: bool,

    /// Voice name: an `espeak-ng` voice like `en-gb`, or a macOS `say`
    /// voice like `Daniel`.
    pub voice: String,

    /// Pitch, 0..=99 (`espeak-ng -p`; ignored by `say`).
    pub pitch: u8,

    /// Speaking rate in words per minute.
    pub rate_wpm: u32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            voice: DEFAULT_VOICE.to_string(),
            pitch: 50,
            rate_wpm: 170,
        }
    }
}

impl VoiceConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_pitch(mut self, pitch: u8) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_rate(mut self, rate_wpm: u32) -> Self {
        self.rate_wpm = rate_wpm;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.pitch > MAX_PITCH {
            return Err(format!("voice pitch {} out of range 0..={MAX_PITCH}", self.pitch));
        }
        if self.voice.trim().is_empty() {
            return Err("voice name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Renders text as speech through the system synthesizer.
pub struct Speaker {
    config: VoiceConfig,
}

impl Speaker {
    pub fn new(config: VoiceConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Speak `text`, blocking this turn until playback finishes.
    /// Empty or whitespace-only text is a no-op, as is a disabled speaker.
    pub async fn speak(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() || !self.config.enabled {
            return Ok(());
        }

        let (program, args) = self.command_line(text);
        debug!(%program, voice = %self.config.voice, chars = text.len(), "speaking reply");

        let status = Command::new(&program)
            .args(&args)
            .status()
            .await
            .map_err(|e| ValetError::SpeechError(format!("failed to run {program}: {e}")))?;

        if !status.success() {
            return Err(ValetError::SpeechError(format!(
                "{program} exited with {status}"
            )));
        }

        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn command_line(&self, text: &str) -> (String, Vec<String>) {
        (
            "say".to_string(),
            vec![
                "-v".to_string(),
                self.config.voice.clone(),
                "-r".to_string(),
                self.config.rate_wpm.to_string(),
                text.to_string(),
            ],
        )
    }

    #[cfg(not(target_os = "macos"))]
    fn command_line(&self, text: &str) -> (String, Vec<String>) {
        (
            "espeak-ng".to_string(),
            vec![
                "-v".to_string(),
                self.config.voice.clone(),
                "-p".to_string(),
                self.config.pitch.to_string(),
                "-s".to_string(),
                self.config.rate_wpm.to_string(),
                text.to_string(),
            ],
        )
    }
}
