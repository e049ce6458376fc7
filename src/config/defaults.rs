//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:5000";

/// Largest accepted request body (bytes). Questions are short plain text.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Number of answer characters echoed into the request log.
pub const ANSWER_LOG_PREVIEW_CHARS: usize = 100;

// ============================================================================
// Knowledge Base
// ============================================================================

/// Corpus file read at startup when no path is configured.
pub const KNOWLEDGE_PATH: &str = "bee_ai_training_data.jsonl";

/// Maximum number of knowledge entries injected into one prompt.
pub const MAX_RESULTS: usize = 5;

// ============================================================================
// Model
// ============================================================================

/// Generative model used for answers.
pub const MODEL_NAME: &str = "gemini-2.0-flash";

/// Base URL of the Generative Language REST API.
pub const MODEL_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP timeout for a single generation request (seconds).
pub const MODEL_TIMEOUT_SECS: u64 = 60;

/// Environment variables consulted for the API key, in order, after the config file.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "BEE_AI_CONFIG";

/// Config file picked up from the working directory when nothing else is named.
pub const LOCAL_CONFIG_FILE: &str = "bee_ai.toml";
