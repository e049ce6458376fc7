//! Question answering endpoint

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::envelope::ApiError;
use crate::config::defaults::ANSWER_LOG_PREVIEW_CHARS;

use super::ApiState;

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Successful answer.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The question after trimming
    pub question: String,
    /// Model answer, or the fallback message when the model failed
    pub answer: String,
    pub status: &'static str,
}

/// POST /api/chat - Answer a bee question grounded on the knowledge base
pub async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;

    let question = request
        .question
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if question.is_empty() {
        return Err(ApiError::bad_request("No question provided"));
    }

    info!(question = %question, "Received question");

    let answer = state.pipeline.answer(question).await;

    info!(
        context_entries = answer.context_entries,
        preview = %preview(&answer.text),
        "Generated response"
    );

    Ok(Json(ChatResponse {
        question: question.to_string(),
        answer: answer.text,
        status: "success",
    }))
}

/// First characters of an answer for the log line.
fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(ANSWER_LOG_PREVIEW_CHARS).collect();
    if text.chars().nth(ANSWER_LOG_PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("Bees dance."), "Bees dance.");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let p = preview(&long);
        assert_eq!(p.chars().count(), ANSWER_LOG_PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_missing_question_deserializes() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.question.is_none());
        let req: ChatRequest = serde_json::from_str(r#"{"question": null}"#).unwrap();
        assert!(req.question.is_none());
    }
}
