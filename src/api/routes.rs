//! API route definitions
//!
//! - POST /api/chat - answer a question
//! - GET /api/health - service health
//! - GET /api/knowledge - knowledge base size

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, ApiState};

/// Routes mounted under `/api`.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::get_health))
        .route("/knowledge", get(handlers::get_knowledge))
        .with_state(state)
}
