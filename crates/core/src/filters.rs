//! Filter set types shared between the parser and its callers

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven filterable fields of an action report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Status,
    RiskLevel,
    AuditName,
    AuditLead,
    ResponsibleEmail,
    CLevel,
    AuditYear,
}

impl FilterField {
    /// Fields in the order they are extracted and summarized
    pub const ALL: [FilterField; 7] = [
        FilterField::Status,
        FilterField::RiskLevel,
        FilterField::AuditName,
        FilterField::AuditLead,
        FilterField::ResponsibleEmail,
        FilterField::CLevel,
        FilterField::AuditYear,
    ];

    /// Wire key (camelCase, as used in JSON payloads)
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Status => "status",
            FilterField::RiskLevel => "riskLevel",
            FilterField::AuditName => "auditName",
            FilterField::AuditLead => "auditLead",
            FilterField::ResponsibleEmail => "responsibleEmail",
            FilterField::CLevel => "cLevel",
            FilterField::AuditYear => "auditYear",
        }
    }

    /// Label shown to users in summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterField::Status => "Status",
            FilterField::RiskLevel => "Risk level",
            FilterField::AuditName => "Audit",
            FilterField::AuditLead => "Audit lead",
            FilterField::ResponsibleEmail => "Responsible",
            FilterField::CLevel => "C-level",
            FilterField::AuditYear => "Audit year",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Structured filter set driving a report or export query
///
/// Every present field holds a non-empty, trimmed string. Use [`ParsedFilters::set`]
/// to keep that invariant; it trims the value and ignores blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_lead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_year: Option<String>,
}

impl ParsedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: FilterField) -> &Option<String> {
        match field {
            FilterField::Status => &self.status,
            FilterField::RiskLevel => &self.risk_level,
            FilterField::AuditName => &self.audit_name,
            FilterField::AuditLead => &self.audit_lead,
            FilterField::ResponsibleEmail => &self.responsible_email,
            FilterField::CLevel => &self.c_level,
            FilterField::AuditYear => &self.audit_year,
        }
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Status => &mut self.status,
            FilterField::RiskLevel => &mut self.risk_level,
            FilterField::AuditName => &mut self.audit_name,
            FilterField::AuditLead => &mut self.audit_lead,
            FilterField::ResponsibleEmail => &mut self.responsible_email,
            FilterField::CLevel => &mut self.c_level,
            FilterField::AuditYear => &mut self.audit_year,
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field, trimming the value
    ///
    /// Returns `false` (and leaves the field untouched) when the value is blank.
    pub fn set(&mut self, field: FilterField, value: impl AsRef<str>) -> bool {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return false;
        }
        *self.slot_mut(field) = Some(trimmed.to_string());
        true
    }

    pub fn remove(&mut self, field: FilterField) -> Option<String> {
        self.slot_mut(field).take()
    }

    pub fn contains(&self, field: FilterField) -> bool {
        self.get(field).is_some()
    }

    /// Present fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy every valid field of `other` over this set
    ///
    /// Blank values in `other` are skipped, so merging never breaks the
    /// non-empty invariant even when `other` came from untrusted JSON.
    pub fn merge_from(&mut self, other: &ParsedFilters) {
        for (field, value) in other.iter() {
            self.set(field, value);
        }
    }

    /// One-line summary such as `Status: Overdue · Audit year: 2024 and later`
    pub fn describe(&self) -> String {
        self.iter()
            .map(|(field, value)| {
                let shown = match field {
                    FilterField::AuditYear => value
                        .parse::<crate::AuditYear>()
                        .map(|year| year.describe())
                        .unwrap_or_else(|_| value.to_string()),
                    _ => value.to_string(),
                };
                format!("{}: {}", field.display_name(), shown)
            })
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// Currently valid option values per field, supplied by the vocabulary source
///
/// A missing or empty list means "not loaded": candidates for that field are
/// accepted unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableOptions {
    /// Valid statuses; `Some(vec![])` is treated like `None` and accepts every status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_leads: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_levels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_levels: Option<Vec<String>>,
}

impl AvailableOptions {
    /// Option list for a field, `None` when absent or empty
    ///
    /// `auditYear` has no vocabulary and always returns `None`.
    pub fn for_field(&self, field: FilterField) -> Option<&[String]> {
        let list = match field {
            FilterField::Status => self.statuses.as_deref(),
            FilterField::RiskLevel => self.risk_levels.as_deref(),
            FilterField::AuditName => self.audit_names.as_deref(),
            FilterField::AuditLead => self.audit_leads.as_deref(),
            FilterField::ResponsibleEmail => self.responsible_emails.as_deref(),
            FilterField::CLevel => self.c_levels.as_deref(),
            FilterField::AuditYear => None,
        };
        list.filter(|values| !values.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_trims_and_rejects_blank() {
        let mut filters = ParsedFilters::new();
        assert!(filters.set(FilterField::AuditName, "  Payroll Review "));
        assert_eq!(filters.get(FilterField::AuditName), Some("Payroll Review"));

        assert!(!filters.set(FilterField::AuditName, "   "));
        assert_eq!(filters.get(FilterField::AuditName), Some("Payroll Review"));
        assert!(!filters.set(FilterField::Status, ""));
        assert!(!filters.contains(FilterField::Status));
    }

    #[test]
    fn test_merge_skips_blank_values() {
        let previous = ParsedFilters {
            status: Some("Open".to_string()),
            audit_lead: Some("".to_string()),
            ..Default::default()
        };

        let mut filters = ParsedFilters::new();
        filters.merge_from(&previous);
        assert_eq!(filters.status.as_deref(), Some("Open"));
        assert!(filters.audit_lead.is_none());
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_absent() {
        let mut filters = ParsedFilters::new();
        filters.set(FilterField::RiskLevel, "Critical");
        filters.set(FilterField::CLevel, "CFO");

        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json, serde_json::json!({"riskLevel": "Critical", "cLevel": "CFO"}));

        let back: ParsedFilters = serde_json::from_value(json).unwrap();
        assert_eq!(back, filters);
    }

    #[test]
    fn test_describe() {
        let mut filters = ParsedFilters::new();
        filters.set(FilterField::Status, "Overdue");
        filters.set(FilterField::AuditYear, "2024+");
        assert_eq!(
            filters.describe(),
            "Status: Overdue · Audit year: 2024 and later"
        );
        assert_eq!(ParsedFilters::new().describe(), "");
    }

    #[test]
    fn test_empty_option_list_counts_as_missing() {
        let options = AvailableOptions {
            statuses: Some(vec![]),
            audit_leads: Some(vec!["Jane Doe".to_string()]),
            ..Default::default()
        };
        assert!(options.for_field(FilterField::Status).is_none());
        assert_eq!(
            options.for_field(FilterField::AuditLead),
            Some(&["Jane Doe".to_string()][..])
        );
        assert!(options.for_field(FilterField::AuditYear).is_none());
    }
}
