//! Gemini Provider - Implementation of AIProvider for Google's Generative Language API.
//!
//! Calls `models/{model}:generateContent`. When a JSON reply is requested the
//! course schema is passed as `responseSchema`, so the model is constrained
//! server-side and the validator mostly confirms what was enforced.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key).with_model("gemini-2.5-flash");
//! let provider = GeminiProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::http::{map_send_error, parse_retry_after};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let mut system_parts = Vec::new();
        if let Some(ref prompt) = request.system_prompt {
            system_parts.push(GeminiPart { text: prompt.clone() });
        }

        let mut contents = Vec::new();
        for msg in &request.messages {
            match msg.role {
                // Gemini has no system role inside `contents`.
                MessageRole::System => system_parts.push(GeminiPart {
                    text: msg.content.clone(),
                }),
                MessageRole::User => contents.push(GeminiContent::new("user", &msg.content)),
                MessageRole::Assistant => {
                    contents.push(GeminiContent::new("model", &msg.content))
                }
            }
        }

        let (response_mime_type, response_schema) = match &request.response_format {
            ResponseFormat::Json { schema } => {
                (Some("application/json".to_string()), schema.clone())
            }
            ResponseFormat::Text => (None, None),
        };

        GeminiRequest {
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(GeminiSystemInstruction { parts: system_parts })
            },
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                response_mime_type,
                response_schema,
            },
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(parse_retry_after(&error_body))),
            400 if error_body.contains("API_KEY_INVALID") => Err(AIError::AuthenticationFailed),
            400 => Err(AIError::InvalidRequest(Self::error_message(&error_body))),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status,
                Self::error_message(&error_body)
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Pulls `error.message` out of a Google API error body.
    fn error_message(error_body: &str) -> String {
        serde_json::from_str::<Value>(error_body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| error_body.to_string())
    }

    fn parse_body(&self, body: GeminiResponse) -> Result<CompletionResponse, AIError> {
        if let Some(reason) = body
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(AIError::content_filtered(format!("prompt blocked: {}", reason)));
        }

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No candidates in response"))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                return Err(AIError::content_filtered(format!(
                    "response blocked: {}",
                    candidate.finish_reason.clone().unwrap_or_default()
                )))
            }
            _ => FinishReason::Stop,
        };

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(AIError::parse("Empty response from model"));
        }

        let usage = body
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: body.model_version.unwrap_or_else(|| self.config.model.clone()),
            finish_reason,
        })
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        self.parse_body(body)
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gemini-1.0") => 32768,
            _ => 1_048_576,
        };

        ProviderInfo::new("gemini", &self.config.model, max_context).with_response_schema(true)
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn new(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![GeminiPart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{RequestMetadata, RequestPurpose};
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("test-key")).unwrap()
    }

    fn parse(body: Value) -> Result<CompletionResponse, AIError> {
        provider().parse_body(serde_json::from_value(body).unwrap())
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("k")
            .with_model("gemini-2.5-pro")
            .with_base_url("http://localhost:8080/v1beta/")
            .with_timeout(Duration::from_secs(10));
        let provider = GeminiProvider::new(config).unwrap();

        assert_eq!(
            provider.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-pro:generateContent"
        );
        assert_eq!(provider.config.api_key(), "k");
    }

    #[test]
    fn request_carries_schema_and_system_instruction() {
        let request = CompletionRequest::new(RequestMetadata::new(RequestPurpose::PromptCourse))
            .with_system_prompt("You write language courses.")
            .with_message(MessageRole::User, "Beginner Spanish")
            .with_temperature(0.5)
            .with_max_tokens(8192)
            .with_json_response(Some(json!({"type": "OBJECT"})));

        let body = serde_json::to_value(provider().to_gemini_request(&request)).unwrap();

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You write language courses."
        );
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Beginner Spanish");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[test]
    fn text_request_has_no_mime_type() {
        let request = CompletionRequest::new(RequestMetadata::new(RequestPurpose::WordLookup))
            .with_message(MessageRole::User, "hola");
        let body = serde_json::to_value(provider().to_gemini_request(&request)).unwrap();
        assert!(body.get("systemInstruction").is_none());
        assert!(body["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn parses_candidate_text_and_usage() {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"title\":"}, {"text": "\"x\"}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 800, "totalTokenCount": 920},
            "modelVersion": "gemini-2.5-flash-001"
        }))
        .unwrap();

        assert_eq!(response.content, "{\"title\":\"x\"}");
        assert_eq!(response.usage.total_tokens, 920);
        assert_eq!(response.model, "gemini-2.5-flash-001");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn max_tokens_maps_to_length() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "{}"}]}, "finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();
        assert_eq!(response.finish_reason, FinishReason::Length);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let err = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { .. }));
    }

    #[test]
    fn safety_finish_is_content_filtered() {
        let err = parse(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { .. }));
    }

    #[test]
    fn no_candidates_is_parse_error() {
        let err = parse(json!({"candidates": []})).unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn error_message_extracts_google_error() {
        let body = r#"{"error":{"code":400,"message":"Invalid JSON payload","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(GeminiProvider::error_message(body), "Invalid JSON payload");
        assert_eq!(GeminiProvider::error_message("plain"), "plain");
    }

    #[test]
    fn provider_info_supports_schema() {
        let info = provider().provider_info();
        assert_eq!(info.name, "gemini");
        assert!(info.supports_response_schema);
        assert_eq!(info.max_context_tokens, 1_048_576);
    }
}
