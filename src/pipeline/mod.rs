//! Processing Pipeline Module
//!
//! ```text
//! question ─▶ RelevanceRanker ─▶ assemble_prompt ─▶ ResponseGenerator ─▶ answer
//! ```
//!
//! The coordinator owns no mutable state; every HTTP handler shares one instance.

mod coordinator;

pub use coordinator::{Answer, PipelineCoordinator};
