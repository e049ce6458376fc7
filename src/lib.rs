//! Bee AI: grounded question answering about bees, plants and honey
//!
//! ## Architecture
//!
//! - **Context**: JSONL knowledge corpus and lexical relevance ranking
//! - **LLM Module**: prompt assembly, Gemini client, fallback-on-failure generator
//! - **Pipeline**: rank, assemble, generate for one question
//! - **API**: axum router exposing chat, health and knowledge endpoints

pub mod api;
pub mod config;
pub mod context;
pub mod llm;
pub mod pipeline;

pub use config::AppConfig;
pub use context::{KnowledgeEntry, KnowledgeStore, RelevanceRanker};
pub use llm::{GeminiBackend, LlmBackend, LlmError, ResponseGenerator};
pub use pipeline::{Answer, PipelineCoordinator};
