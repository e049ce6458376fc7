//! Service state endpoints: health, knowledge

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::envelope::ApiError;

use super::ApiState;

// ============================================================================
// Health Endpoint
// ============================================================================

/// Liveness and readiness summary
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// A model backend is wired into the pipeline
    pub gemini_loaded: bool,
    /// Backend name (the model id for Gemini)
    pub model: String,
    pub knowledge_base_loaded: bool,
    pub knowledge_entries: usize,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/health - Service health
pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let store = state.pipeline.store();

    Json(HealthResponse {
        status: "healthy",
        gemini_loaded: true,
        model: state.pipeline.backend_name().to_string(),
        knowledge_base_loaded: !store.is_empty(),
        knowledge_entries: store.len(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Knowledge Endpoint
// ============================================================================

/// Knowledge base summary
#[derive(Debug, Serialize)]
pub struct KnowledgeResponse {
    pub total_entries: usize,
    pub status: &'static str,
}

/// GET /api/knowledge - Knowledge base size
pub async fn get_knowledge(
    State(state): State<ApiState>,
) -> Result<Json<KnowledgeResponse>, ApiError> {
    let store = state.pipeline.store();
    if store.is_empty() {
        return Err(ApiError::internal("Knowledge base not loaded"));
    }

    Ok(Json(KnowledgeResponse {
        total_entries: store.len(),
        status: "loaded",
    }))
}
