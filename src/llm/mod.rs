//! LLM Backend Module
//!
//! Provides a unified interface for the answer model and the pieces around it.
//!
//! ## Architecture
//!
//! - **LlmBackend**: capability trait, `generate(prompt) -> text`
//! - **GeminiBackend**: Generative Language REST client (`reqwest`)
//! - **ResponseGenerator**: wraps a backend, trims output, folds every failure
//!   into a fixed fallback message
//! - **prompt**: builds the grounded prompt from ranked knowledge entries

use async_trait::async_trait;

pub mod gemini;
pub mod prompt;
pub mod responder;

pub use gemini::GeminiBackend;
pub use prompt::{assemble_prompt, ANSWER_CUE};
pub use responder::{ResponseGenerator, FALLBACK_MESSAGE};

/// Errors from a model backend.
///
/// Callers of [`ResponseGenerator`] never see these; they are logged and
/// replaced by [`FALLBACK_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("no API key configured (set model.api_key, GEMINI_API_KEY or GOOGLE_API_KEY)")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed model response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("prompt blocked by model: {0}")]
    Blocked(String),
    #[error("model returned no text")]
    EmptyResponse,
}

/// Unified trait for LLM backends
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response from the LLM given a prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &str;
}
