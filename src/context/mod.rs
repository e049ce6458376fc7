//! Context module - Knowledge base and relevance search
//!
//! Holds the question/answer corpus that grounds model answers and the
//! lexical ranker that picks the entries injected into each prompt.
//!
//! ## Pieces
//!
//! - `KnowledgeStore`: immutable corpus loaded once at startup
//! - `expansion`: static synonym table applied to query tokens
//! - `RelevanceRanker`: keyword scoring, top-K selection

pub mod expansion;
pub mod knowledge_store;
pub mod ranker;

pub use expansion::{expand_query, KEYWORD_EXPANSIONS};
pub use knowledge_store::{KnowledgeEntry, KnowledgeError, KnowledgeStore};
pub use ranker::{score_entry, RelevanceRanker, ScoredEntry};
