//! Application Configuration Module
//!
//! Server, knowledge base and model settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` CLI flag
//! 2. `BEE_AI_CONFIG` environment variable (path to TOML file)
//! 3. `bee_ai.toml` in the current working directory
//! 4. Built-in defaults
//!
//! The loaded config is handed to the components that need it at startup;
//! nothing reads it through a global.

mod app_config;
pub mod defaults;

pub use app_config::*;
