//! Configuration management for the report filter engine
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, `config/{env}.*`)
//! - Environment variables (REPORT_FILTER_ prefix)
//! - A synonym override file for the status and risk level tables

pub mod settings;
pub mod synonyms;

pub use settings::{load_settings, load_settings_from, ObservabilityConfig, ParserConfig, Settings};
pub use synonyms::{OverrideMode, SynonymEntry, SynonymsConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

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
