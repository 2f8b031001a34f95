//! Synonym table overrides
//!
//! Loads additional (or replacement) surface forms for the `status` and
//! `riskLevel` tables from a YAML file. Entries are ordered: the first phrase
//! found in a request wins, so list specific phrases before generic ones.
//!
//! ```yaml
//! mode: prepend
//! status:
//!   - phrase: "waiting"
//!     canonical: "Open"
//! risk_level:
//!   - phrase: "showstopper"
//!     canonical: "Critical"
//! ```

use report_filter_core::{RiskLevel, Status};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// How configured entries combine with the built-in tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverrideMode {
    /// Configured entries are checked before the built-in ones
    #[default]
    Prepend,
    /// Configured entries replace the built-in table entirely
    Replace,
}

/// A surface form and the canonical value it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry<T> {
    pub phrase: String,
    pub canonical: T,
}

/// Synonym overrides loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SynonymsConfig {
    #[serde(default)]
    pub mode: OverrideMode,
    #[serde(default)]
    pub status: Vec<SynonymEntry<Status>>,
    #[serde(default)]
    pub risk_level: Vec<SynonymEntry<RiskLevel>>,
}

impl SynonymsConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.display(), e))
        })?;

        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            status_entries = config.status.len(),
            risk_level_entries = config.risk_level.len(),
            "Loaded synonym overrides"
        );
        Ok(config)
    }

    /// Parse from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let blank_status = self.status.iter().position(|e| e.phrase.trim().is_empty());
        if let Some(index) = blank_status {
            return Err(ConfigError::InvalidValue {
                field: format!("status[{}].phrase", index),
                message: "Phrase must not be empty".to_string(),
            });
        }

        let blank_risk = self
            .risk_level
            .iter()
            .position(|e| e.phrase.trim().is_empty());
        if let Some(index) = blank_risk {
            return Err(ConfigError::InvalidValue {
                field: format!("risk_level[{}].phrase", index),
                message: "Phrase must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.risk_level.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_deserialization() {
        let yaml = r#"
mode: replace
status:
  - phrase: "waiting"
    canonical: "Open"
  - phrase: "accepted"
    canonical: "Risk Accepted"
risk_level:
  - phrase: "showstopper"
    canonical: "Critical"
"#;
        let config = SynonymsConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.mode, OverrideMode::Replace);
        assert_eq!(config.status.len(), 2);
        assert_eq!(config.status[1].canonical, Status::RiskAccepted);
        assert_eq!(config.risk_level[0].canonical, RiskLevel::Critical);
    }

    #[test]
    fn test_default_mode_is_prepend() {
        let config = SynonymsConfig::from_yaml("status: []").unwrap();
        assert_eq!(config.mode, OverrideMode::Prepend);
        assert!(config.is_empty());
    }

    #[test]
    fn test_unknown_canonical_is_rejected() {
        let yaml = "status:\n  - phrase: \"pending\"\n    canonical: \"Pending\"\n";
        assert!(matches!(
            SynonymsConfig::from_yaml(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_blank_phrase_is_rejected() {
        let yaml = "risk_level:\n  - phrase: \"  \"\n    canonical: \"Low\"\n";
        assert!(matches!(
            SynonymsConfig::from_yaml(yaml),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SynonymsConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
