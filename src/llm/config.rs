use crate::llm::persona::DEFAULT_PERSONA;

/// Configuration for the Gemini chat client.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// Explicit API key; when absent the environment is consulted
    /// (`GEMINI_API_KEY`, then `GOOGLE_API_KEY`).
    pub api_key: Option<String>,

    /// Model name, e.g. `gemini-2.0-flash-exp`.
    pub model: String,

    /// Endpoint base URL; tests point this at a local mock.
    pub api_base: String,

    /// System instruction sent with every request.
    pub system_prompt: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Nucleus sampling top-p.
    pub top_p: f64,

    /// Top-k sampling cutoff.
    pub top_k: u32,

    /// Maximum output length in tokens.
    pub max_output_tokens: u32,

    /// Response format requested from the API.
    pub response_mime_type: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash-exp".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            system_prompt: DEFAULT_PERSONA.to_string(),
            temperature: 1.1,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

impl LlmConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Resolve the effective API key: explicit config first, then
    /// `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_generation_settings() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash-exp");
        assert!((config.temperature - 1.1).abs() < f64::EPSILON);
        assert!((config.top_p - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 8192);
        assert_eq!(config.response_mime_type, "text/plain");
    }

    #[test]
    fn test_builder_overrides() {
        let config = LlmConfig::default()
            .with_api_key("k")
            .with_model("gemini-1.5-pro")
            .with_api_base("http://localhost:9999/v1beta")
            .with_system_prompt("Be terse.")
            .with_temperature(0.2);

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.api_base, "http://localhost:9999/v1beta");
        assert_eq!(config.system_prompt, "Be terse.");
        assert!((config.temperature - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = LlmConfig::default().with_api_key("explicit");
        assert_eq!(config.resolve_api_key().as_deref(), Some("explicit"));
    }
}
