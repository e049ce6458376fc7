//! API route handlers
//!
//! - `chat`: question answering
//! - `status`: health and knowledge-base summary

mod chat;
mod status;

pub use chat::*;
pub use status::*;

use std::sync::Arc;

use crate::pipeline::PipelineCoordinator;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
///
/// Everything behind it is read-only after startup, so handlers never lock.
#[derive(Clone)]
pub struct ApiState {
    /// Ranking, prompt assembly and model access
    pub pipeline: Arc<PipelineCoordinator>,
}

impl ApiState {
    pub fn new(pipeline: PipelineCoordinator) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
