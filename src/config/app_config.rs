//! Application configuration - operator-tunable TOML values
//!
//! Each section implements `Default` so an empty or missing file yields a
//! runnable configuration (apart from the model credential, which may come
//! from the environment).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a Bee AI deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Knowledge corpus settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Generative model settings
    #[serde(default)]
    pub model: ModelConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order.
    ///
    /// A file named explicitly (CLI flag or `BEE_AI_CONFIG`) must load cleanly.
    /// The implicit `./bee_ai.toml` falls back to defaults with a warning.
    /// The result is not validated; call [`AppConfig::validate`] once any
    /// command-line overrides have been applied.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded config from --config");
            return Ok(config);
        }

        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            let config = Self::load_from_file(&p)?;
            info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_ENV_VAR);
            return Ok(config);
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Replace the bind address and corpus path when given.
    #[must_use]
    pub fn with_overrides(mut self, addr: Option<&str>, knowledge: Option<&Path>) -> Self {
        if let Some(addr) = addr {
            addr.clone_into(&mut self.server.addr);
        }
        if let Some(path) = knowledge {
            self.knowledge.path = path.to_path_buf();
        }
        self
    }

    /// Check the config for values that cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.server.addr.parse::<SocketAddr>().is_err() {
            errors.push(format!(
                "server.addr ({:?}) is not a valid socket address",
                self.server.addr
            ));
        }
        if self.server.max_body_bytes == 0 {
            errors.push("server.max_body_bytes must be > 0".to_string());
        }
        if self.knowledge.path.as_os_str().is_empty() {
            errors.push("knowledge.path must not be empty".to_string());
        }
        if self.knowledge.max_results == 0 {
            errors.push("knowledge.max_results must be > 0".to_string());
        }
        if self.model.model.trim().is_empty() {
            errors.push("model.model must not be empty".to_string());
        }
        if self.model.base_url.trim().is_empty() {
            errors.push("model.base_url must not be empty".to_string());
        }
        if self.model.timeout_secs == 0 {
            errors.push("model.timeout_secs must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address. Can be overridden by the `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Directory served for non-API paths (the chat frontend). Disabled when unset.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

const fn default_max_body_bytes() -> usize {
    defaults::MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            static_dir: None,
            cors_origins: Vec::new(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============================================================================
// Knowledge Config
// ============================================================================

/// Knowledge corpus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Newline-delimited JSON corpus. Can be overridden by `--knowledge`.
    #[serde(default = "default_knowledge_path")]
    pub path: PathBuf,

    /// Maximum entries injected into a prompt.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from(defaults::KNOWLEDGE_PATH)
}

const fn default_max_results() -> usize {
    defaults::MAX_RESULTS
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            max_results: default_max_results(),
        }
    }
}

// ============================================================================
// Model Config
// ============================================================================

/// Generative model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API key. Takes precedence over `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier, e.g. `gemini-2.0-flash`.
    #[serde(default = "default_model_name")]
    pub model: String,

    /// REST API base URL.
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model_name() -> String {
    defaults::MODEL_NAME.to_string()
}

fn default_model_base_url() -> String {
    defaults::MODEL_BASE_URL.to_string()
}

const fn default_model_timeout_secs() -> u64 {
    defaults::MODEL_TIMEOUT_SECS
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model_name(),
            base_url: default_model_base_url(),
            timeout_secs: default_model_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// Resolve the API key: config value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with an injectable
    /// environment lookup. Blank values count as absent.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |v: String| {
            let trimmed = v.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        self.api_key.clone().and_then(non_blank).or_else(|| {
            defaults::API_KEY_ENV_VARS
                .iter()
                .find_map(|name| lookup(name).and_then(non_blank))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
