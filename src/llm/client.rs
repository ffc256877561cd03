//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! The remote service is treated as opaque: one request carrying the full
//! transcript plus generation settings, one assistant turn back.

use crate::llm::config::LlmConfig;
use crate::transcript::{Role, Turn};
use crate::{Result, ValetError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wire role for a turn. The API spells the assistant side `model`.
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

pub struct GeminiClient {
    config: LlmConfig,
    api_key: Option<String>,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        let api_key = config.resolve_api_key();
        Self {
            config,
            api_key,
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send the full transcript and return the assistant's reply.
    pub async fn generate(&self, turns: &[Turn]) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ValetError::ConfigError(
                "Gemini API key not found. Set GEMINI_API_KEY or GOOGLE_API_KEY.".to_string(),
            )
        })?;

        let request = self.build_request(turns);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, api_key
        );

        debug!(model = %self.config.model, turns = turns.len(), "sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ValetError::ApiError(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ValetError::ApiError(format!("HTTP {status}: {body}")));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ValetError::ApiError(format!("invalid response body: {e}")))?;

        if let Some(err) = result.error {
            return Err(ValetError::ApiError(err.message));
        }

        result
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| ValetError::ApiError("empty response".to_string()))
    }

    fn build_request(&self, turns: &[Turn]) -> GenerateContentRequest {
        let contents = turns
            .iter()
            .map(|turn| Content {
                role: Some(wire_role(turn.role).to_string()),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        let system_instruction = if self.config.system_prompt.is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: vec![Part {
                    text: self.config.system_prompt.clone(),
                }],
            })
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: self.config.response_mime_type.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(LlmConfig::default().with_api_key("test-key"))
    }

    #[test]
    fn test_request_carries_full_history_in_order() {
        let turns = vec![
            Turn::user("2+2?"),
            Turn::assistant("4"),
            Turn::user("and twice that?"),
        ];
        let request = client().build_request(&turns);

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
        assert_eq!(request.contents[2].role.as_deref(), Some("user"));
        assert_eq!(request.contents[2].parts[0].text, "and twice that?");
    }

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let request = client().build_request(&[Turn::user("Hello")]);
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"temperature\":1.1"));
        assert!(json.contains("\"topP\":0.95"));
        assert!(json.contains("\"topK\":40"));
        assert!(json.contains("\"maxOutputTokens\":8192"));
        assert!(json.contains("\"responseMimeType\":\"text/plain\""));
        assert!(json.contains("\"system_instruction\""));
    }

    #[test]
    fn test_empty_system_prompt_is_omitted() {
        let client = GeminiClient::new(
            LlmConfig::default()
                .with_api_key("test-key")
                .with_system_prompt(""),
        );
        let request = client.build_request(&[Turn::user("Hello")]);

        assert!(request.system_instruction.is_none());
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("system_instruction"));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Good evening."}]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let text = response
            .candidates
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
            .content
            .parts
            .into_iter()
            .next()
            .unwrap()
            .text;
        assert_eq!(text.as_deref(), Some("Good evening."));
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"error": {"message": "Invalid API key"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.unwrap().message, "Invalid API key");
    }

    #[tokio::test]
    async fn test_generate_without_key_is_a_config_error() {
        let client = GeminiClient::new(LlmConfig {
            api_key: None,
            ..LlmConfig::default()
        });
        if client.has_api_key() {
            // Environment provides a key; nothing to assert here.
            return;
        }
        match client.generate(&[Turn::user("hello")]).await {
            Err(ValetError::ConfigError(_)) => {}
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }
}
