//! Gemini backend - Generative Language REST API client
//!
//! One `generateContent` call per prompt, no streaming and no retries.
//! The request timeout comes from `model.timeout_secs`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{LlmBackend, LlmError};
use crate::config::ModelConfig;

/// Longest upstream error body kept in [`LlmError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Finish reasons that mean the candidate was withheld rather than empty.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT"];

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub(crate) fn into_text(self) -> Result<String, LlmError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Err(LlmError::Blocked(reason)),
                None => Err(LlmError::EmptyResponse),
            };
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_default();
            return if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) {
                Err(LlmError::Blocked(reason))
            } else {
                Err(LlmError::EmptyResponse)
            };
        }

        Ok(text)
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiBackend {
    /// Build a client, resolving the API key from config then environment.
    pub fn from_config(config: &ModelConfig) -> Result<Self, LlmError> {
        let api_key = config.resolve_api_key().ok_or(LlmError::MissingApiKey)?;
        Self::new(config, api_key)
    }

    /// Build a client with an explicit API key.
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        tracing::info!(model = %config.model, endpoint = %endpoint, "Gemini backend initialized");

        Ok(Self {
            http,
            endpoint,
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = resp.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        parsed.into_text()
    }

    fn backend_name(&self) -> &str {
        &self.model
    }
}
