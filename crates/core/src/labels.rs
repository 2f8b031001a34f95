//! Canonical filter values
//!
//! `Status` and `RiskLevel` are closed sets; every synonym the extractors
//! recognize resolves to one of these variants. `AuditYear` covers the three
//! shapes the year field can take.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Action status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    Overdue,
    Completed,
    #[serde(rename = "Risk Accepted")]
    RiskAccepted,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::Overdue,
        Status::Completed,
        Status::RiskAccepted,
    ];

    /// Canonical label as the reporting backend expects it
    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Overdue => "Overdue",
            Status::Completed => "Completed",
            Status::RiskAccepted => "Risk Accepted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownLabel {
                field: "status",
                value: s.to_string(),
            })
    }
}

/// Risk level of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
    Unassigned,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::Critical,
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
        RiskLevel::Unassigned,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
            RiskLevel::Unassigned => "Unassigned",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownLabel {
                field: "riskLevel",
                value: s.to_string(),
            })
    }
}

/// Resolved audit year filter
///
/// Rendered as `"2024+"` for an open range, `"all"` for every year, or the
/// four-digit year itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuditYear {
    /// The given year and every later one
    From(u16),
    /// No year restriction
    All,
    /// Exactly one year
    Exact(u16),
}

impl AuditYear {
    pub const ALL_TOKEN: &'static str = "all";

    /// Human-readable form used in filter summaries
    pub fn describe(&self) -> String {
        match self {
            AuditYear::From(year) => format!("{} and later", year),
            AuditYear::All => "all years".to_string(),
            AuditYear::Exact(year) => year.to_string(),
        }
    }
}

impl fmt::Display for AuditYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditYear::From(year) => write!(f, "{}+", year),
            AuditYear::All => f.write_str(Self::ALL_TOKEN),
            AuditYear::Exact(year) => write!(f, "{}", year),
        }
    }
}

fn parse_year(digits: &str, original: &str) -> Result<u16> {
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidYear(original.to_string()));
    }
    digits
        .parse()
        .map_err(|_| Error::InvalidYear(original.to_string()))
}

impl FromStr for AuditYear {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL_TOKEN) {
            return Ok(AuditYear::All);
        }
        match trimmed.strip_suffix('+') {
            Some(start) => parse_year(start, s).map(AuditYear::From),
            None => parse_year(trimmed, s).map(AuditYear::Exact),
        }
    }
}

impl TryFrom<String> for AuditYear {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AuditYear> for String {
    fn from(value: AuditYear) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_roundtrip() {
        for status in Status::ALL {
            assert_eq!(status.label().parse::<Status>().unwrap(), status);
        }
        assert_eq!("risk accepted".parse::<Status>().unwrap(), Status::RiskAccepted);
    }

    #[test]
    fn test_unknown_label() {
        let err = "pending".parse::<Status>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownLabel {
                field: "status",
                value: "pending".to_string()
            }
        );
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_audit_year_tokens() {
        assert_eq!(AuditYear::From(2024).to_string(), "2024+");
        assert_eq!(AuditYear::All.to_string(), "all");
        assert_eq!(AuditYear::Exact(2023).to_string(), "2023");

        assert_eq!("2024+".parse::<AuditYear>().unwrap(), AuditYear::From(2024));
        assert_eq!("ALL".parse::<AuditYear>().unwrap(), AuditYear::All);
        assert_eq!(" 2019 ".parse::<AuditYear>().unwrap(), AuditYear::Exact(2019));
        assert!("24".parse::<AuditYear>().is_err());
        assert!("20x4".parse::<AuditYear>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Status::RiskAccepted).unwrap();
        assert_eq!(json, "\"Risk Accepted\"");

        let year: AuditYear = serde_json::from_str("\"2024+\"").unwrap();
        assert_eq!(year, AuditYear::From(2024));
        assert_eq!(serde_json::to_string(&AuditYear::Exact(2022)).unwrap(), "\"2022\"");
    }
}
