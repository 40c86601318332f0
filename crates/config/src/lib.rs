//! Configuration management for the dialogue engine
//!
//! Supports loading configuration from:
//! - TOML/YAML files (`config/default`, then `config/{env}`)
//! - Environment variables (`DIALOGO__` prefix, `__` separator)
//!
//! Every field has a serde default so an empty deployment boots with sane
//! values; secrets (synthesis, telephony, LLM keys) stay `Option` and gate
//! their feature when absent.

pub mod settings;

pub use settings::{
    load_settings, DialogConfig, LlmConfig, ObservabilityConfig, ServerConfig, Settings,
    SynthesisConfig, TelephonyConfig, VoiceConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
