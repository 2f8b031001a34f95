//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Parser behaviour
    #[serde(default)]
    pub parser: ParserConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// First year of the open-ended range; also its label (`"2024+"`)
    #[serde(default = "default_open_range_start_year")]
    pub open_range_start_year: u16,

    /// Merge the previous turn's filters when the request refers back to them
    #[serde(default = "default_true")]
    pub carry_over_context: bool,

    /// Accept responsible candidates that partially match an e-mail local part
    #[serde(default = "default_true")]
    pub partial_email_match: bool,

    /// Optional YAML file overriding the built-in synonym tables
    #[serde(default)]
    pub synonyms_path: Option<String>,
}

fn default_open_range_start_year() -> u16 {
    2024
}

fn default_true() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            open_range_start_year: default_open_range_start_year(),
            carry_over_context: true,
            partial_email_match: true,
            synonyms_path: None,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_parser()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_parser(&self) -> Result<(), ConfigError> {
        let year = self.parser.open_range_start_year;
        if !(2000..=2099).contains(&year) {
            return Err(ConfigError::InvalidValue {
                field: "parser.open_range_start_year".to_string(),
                message: format!("Must be between 2000 and 2099, got {}", year),
            });
        }

        if let Some(path) = &self.parser.synonyms_path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "parser.synonyms_path".to_string(),
                    message: "Path must not be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "observability.log_level".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults.
/// Environment variables use the `REPORT_FILTER` prefix and `__` as the
/// section separator, e.g. `REPORT_FILTER_PARSER__OPEN_RANGE_START_YEAR=2025`.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Same as [`load_settings`] with an explicit configuration directory
pub fn load_settings_from(dir: &str, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name(&format!("{}/default", dir)).required(false));

    if let Some(env_name) = env {
        builder = builder
            .add_source(File::with_name(&format!("{}/{}", dir, env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("REPORT_FILTER")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        open_range_start_year = settings.parser.open_range_start_year,
        carry_over_context = settings.parser.carry_over_context,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.parser.open_range_start_year, 2024);
        assert!(settings.parser.carry_over_context);
        assert!(settings.parser.partial_email_match);
        assert_eq!(settings.observability.log_level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.parser.open_range_start_year = 1999;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut settings = Settings::default();
        settings.observability.log_level = " ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "parser:\n  open_range_start_year: 2025\n  carry_over_context: false\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.yaml"),
            "observability:\n  log_json: true\n",
        )
        .unwrap();

        let settings =
            load_settings_from(dir.path().to_str().unwrap(), Some("staging")).unwrap();
        assert_eq!(settings.parser.open_range_start_year, 2025);
        assert!(!settings.parser.carry_over_context);
        assert!(settings.parser.partial_email_match);
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(dir.path().to_str().unwrap(), None).unwrap();
        assert_eq!(settings.parser.open_range_start_year, 2024);
    }
}
