//! Application configuration.
//!
//! Everything is environment-driven with builder-style overrides; `validate`
//! runs once at startup before any component is constructed.

use crate::llm::LlmConfig;
use crate::speech::VoiceConfig;
use std::path::PathBuf;
use tracing::warn;

/// Configuration for the complete application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Address the web front-end binds to.
    pub bind_addr: String,

    /// Flat file holding the persisted transcript.
    pub history_path: PathBuf,

    /// LLM client configuration.
    pub llm: LlmConfig,

    /// Spoken output configuration.
    pub voice: VoiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3900".to_string(),
            history_path: PathBuf::from("history.txt"),
            llm: LlmConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("VALET_BIND") {
            config.bind_addr = addr;
        }
        if let Ok(path) = std::env::var("VALET_HISTORY") {
            config.history_path = PathBuf::from(path);
        }
        if let Ok(model) = std::env::var("VALET_MODEL") {
            config.llm.model = model;
        }
        if let Ok(prompt) = std::env::var("VALET_SYSTEM_PROMPT") {
            config.llm.system_prompt = prompt;
        }
        if let Ok(voice) = std::env::var("VALET_VOICE") {
            config.voice.voice = voice;
        }
        if let Ok(enabled) = std::env::var("VALET_VOICE_ENABLED") {
            config.voice.enabled = matches!(enabled.as_str(), "1" | "true" | "yes");
        }
        if let Ok(pitch) = std::env::var("VALET_VOICE_PITCH") {
            match pitch.parse::<u8>() {
                Ok(p) => config.voice.pitch = p,
                Err(_) => warn!(value = %pitch, "VALET_VOICE_PITCH is not a number, keeping default"),
            }
        }

        config
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_voice(mut self, voice: VoiceConfig) -> Self {
        self.voice = voice;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.llm.resolve_api_key().is_none() {
            return Err(
                "Gemini API key not found. Set GEMINI_API_KEY or GOOGLE_API_KEY.".to_string(),
            );
        }
        self.voice.validate()?;
        if self.bind_addr.trim().is_empty() {
            return Err("bind address must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3900");
        assert_eq!(config.history_path, PathBuf::from("history.txt"));
        assert!(!config.voice.enabled);
    }

    #[test]
    fn test_validate_accepts_explicit_key() {
        let config = AppConfig::default().with_llm(LlmConfig::default().with_api_key("k"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_pitch() {
        let config = AppConfig::default()
            .with_llm(LlmConfig::default().with_api_key("k"))
            .with_voice(VoiceConfig::default().with_pitch(200));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_history_path("/tmp/h.json")
            .with_voice(VoiceConfig::default().with_enabled(true));
        assert_eq!(config.history_path, PathBuf::from("/tmp/h.json"));
        assert!(config.voice.enabled);
    }
}
