//! Generative backend client: boundary trait plus the Gemini HTTP adapter.
//!
//! The protocol is stateless from the caller's perspective: conversational
//! calls resubmit the full history each time. Responses are best-effort text;
//! callers validate structure independently.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use oceanmind_core::config::GenAiConfig;
use oceanmind_core::types::Role;

use crate::error::GenAiError;
use crate::schema::SchemaDescriptor;

/// System instruction sent with every conversational call.
pub const SYSTEM_INSTRUCTION: &str =
    "You are OceanMind AI, a modern marine data assistant. Be concise, professional, and data-driven.";

/// One prior turn of a conversation, in wire form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub text: String,
}

/// Boundary trait for the generative backend.
///
/// `generate` may return syntactically invalid JSON even on success; the
/// schema improves conformance but does not guarantee it.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generate text for a prompt, optionally constrained to a JSON schema.
    async fn generate(
        &self,
        prompt: &str,
        schema: Option<&SchemaDescriptor>,
    ) -> Result<String, GenAiError>;

    /// Produce the next conversational turn given the full prior history.
    async fn converse(&self, history: &[HistoryTurn], message: &str)
        -> Result<String, GenAiError>;
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn generate_body(prompt: &str, schema: Option<&SchemaDescriptor>) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
    });
    if let Some(schema) = schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema.to_value(),
        });
    }
    body
}

fn converse_body(history: &[HistoryTurn], message: &str) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|turn| {
            json!({ "role": role_name(turn.role), "parts": [{ "text": turn.text }] })
        })
        .collect();
    contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));

    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": contents,
    })
}

fn extract_text(response: &Value) -> Option<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// HTTP client for the Gemini generateContent API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// Fails with `MissingCredential` when no API key is resolvable; callers
    /// must then never attempt a backend call.
    pub fn new(config: &GenAiConfig) -> Result<Self, GenAiError> {
        let api_key = config
            .resolve_api_key()
            .ok_or(GenAiError::MissingCredential)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn post(&self, body: &Value) -> Result<Value, GenAiError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GenAiError::Backend(format!("HTTP {}: {}", status, text)));
        }

        debug!(model = %self.model, bytes = text.len(), "generation response received");
        serde_json::from_str(&text)
            .map_err(|e| GenAiError::Validation(format!("malformed response envelope: {}", e)))
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        schema: Option<&SchemaDescriptor>,
    ) -> Result<String, GenAiError> {
        let response = self.post(&generate_body(prompt, schema)).await?;
        extract_text(&response)
            .ok_or_else(|| GenAiError::Validation("response contained no text".to_string()))
    }

    async fn converse(
        &self,
        history: &[HistoryTurn],
        message: &str,
    ) -> Result<String, GenAiError> {
        let response = self.post(&converse_body(history, message)).await?;
        // A well-formed envelope with no text still yields a displayable turn.
        Ok(extract_text(&response).unwrap_or_else(|| "No response.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::dashboard_schema;

    // ---- Request body construction ----

    #[test]
    fn test_generate_body_without_schema() {
        let body = generate_body("describe the sea", None);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "describe the sea");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_generate_body_with_schema() {
        let schema = dashboard_schema();
        let body = generate_body("snapshot please", Some(&schema));
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"], schema.to_value());
    }

    #[test]
    fn test_converse_body_preserves_history_order() {
        let history = vec![
            HistoryTurn {
                role: Role::User,
                text: "u1".to_string(),
            },
            HistoryTurn {
                role: Role::Model,
                text: "m1".to_string(),
            },
            HistoryTurn {
                role: Role::User,
                text: "u2".to_string(),
            },
        ];
        let body = converse_body(&history, "u3");
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 4);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "u1");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "m1");
        assert_eq!(contents[2]["parts"][0]["text"], "u2");
        assert_eq!(contents[3]["role"], "user");
        assert_eq!(contents[3]["parts"][0]["text"], "u3");
    }

    #[test]
    fn test_converse_body_carries_system_instruction() {
        let body = converse_body(&[], "hello");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
    }

    // ---- Response text extraction ----

    #[test]
    fn test_extract_text_from_candidate() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"summary\":\"calm\"}" }] }
            }]
        });
        assert_eq!(
            extract_text(&response),
            Some("{\"summary\":\"calm\"}".to_string())
        );
    }

    #[test]
    fn test_extract_text_missing_candidates() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
    }

    #[test]
    fn test_extract_text_non_string_part() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": 42 }] } }]
        });
        assert_eq!(extract_text(&response), None);
    }

    // ---- Client construction ----

    #[test]
    fn test_new_requires_credential_from_config() {
        let config = GenAiConfig {
            api_key: "k".to_string(),
            ..GenAiConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GenAiConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:9999/".to_string(),
            model: "test-model".to_string(),
            ..GenAiConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn test_role_names() {
        assert_eq!(role_name(Role::User), "user");
        assert_eq!(role_name(Role::Model), "model");
    }
}
