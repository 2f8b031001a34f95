//! Bilingual synonym tables for status and risk level
//!
//! Tables are ordered: the first entry whose normalized phrase occurs in the
//! normalized request wins. Specific phrases come before generic ones, and
//! statuses are listed so that "risk accepted" and "overdue" beat "open" when
//! a request mentions several.
//!
//! Phrases are plain substrings, so short words that occur inside common
//! English words ("late" in "related", "low" in "follow") are deliberately
//! absent.

use once_cell::sync::Lazy;
use report_filter_config::{OverrideMode, SynonymsConfig};
use report_filter_core::{RiskLevel, Status};

use crate::normalize::normalize;

static STATUS_SYNONYMS: &[(&str, Status)] = &[
    // Risk Accepted
    ("risk accepted", Status::RiskAccepted),
    ("risk-accepted", Status::RiskAccepted),
    ("accepted risk", Status::RiskAccepted),
    ("risk acceptance", Status::RiskAccepted),
    ("risk kabul", Status::RiskAccepted),
    ("riski kabul", Status::RiskAccepted),
    ("kabul edilen risk", Status::RiskAccepted),
    ("kabul edilmiş risk", Status::RiskAccepted),
    // Overdue
    ("overdue", Status::Overdue),
    ("past due", Status::Overdue),
    ("past-due", Status::Overdue),
    ("delayed", Status::Overdue),
    ("expired", Status::Overdue),
    ("gecikmiş", Status::Overdue),
    ("geciken", Status::Overdue),
    ("gecikmede", Status::Overdue),
    ("süresi geçmiş", Status::Overdue),
    ("vadesi geçmiş", Status::Overdue),
    // Completed
    ("completed", Status::Completed),
    ("complete", Status::Completed),
    ("closed", Status::Completed),
    ("finished", Status::Completed),
    ("resolved", Status::Completed),
    ("tamamlanmış", Status::Completed),
    ("tamamlanan", Status::Completed),
    ("tamamlandı", Status::Completed),
    ("kapanmış", Status::Completed),
    ("kapatılmış", Status::Completed),
    ("kapalı", Status::Completed),
    // Open
    ("open", Status::Open),
    ("ongoing", Status::Open),
    ("in progress", Status::Open),
    ("in-progress", Status::Open),
    ("pending", Status::Open),
    ("açık", Status::Open),
    ("devam eden", Status::Open),
    ("beklemede", Status::Open),
];

static RISK_LEVEL_SYNONYMS: &[(&str, RiskLevel)] = &[
    // Unassigned
    ("unassigned", RiskLevel::Unassigned),
    ("not assigned", RiskLevel::Unassigned),
    ("no risk level", RiskLevel::Unassigned),
    ("atanmamış", RiskLevel::Unassigned),
    ("belirlenmemiş", RiskLevel::Unassigned),
    // Critical
    ("critical", RiskLevel::Critical),
    ("kritik", RiskLevel::Critical),
    // High
    ("high risk", RiskLevel::High),
    ("high-risk", RiskLevel::High),
    ("high level risk", RiskLevel::High),
    ("risk high", RiskLevel::High),
    ("risk: high", RiskLevel::High),
    ("risk level high", RiskLevel::High),
    ("risk level: high", RiskLevel::High),
    ("risk level is high", RiskLevel::High),
    ("risk is high", RiskLevel::High),
    ("yüksek", RiskLevel::High),
    // Medium
    ("medium", RiskLevel::Medium),
    ("moderate", RiskLevel::Medium),
    ("orta risk", RiskLevel::Medium),
    ("orta seviye", RiskLevel::Medium),
    ("orta düzey", RiskLevel::Medium),
    // Low
    ("low risk", RiskLevel::Low),
    ("low-risk", RiskLevel::Low),
    ("low level risk", RiskLevel::Low),
    ("risk low", RiskLevel::Low),
    ("risk: low", RiskLevel::Low),
    ("risk level low", RiskLevel::Low),
    ("risk level: low", RiskLevel::Low),
    ("risk level is low", RiskLevel::Low),
    ("risk is low", RiskLevel::Low),
    ("düşük", RiskLevel::Low),
];

static BUILTIN_TABLES: Lazy<SynonymTables> = Lazy::new(|| SynonymTables {
    status: SynonymTable::new(STATUS_SYNONYMS.iter().copied()),
    risk_level: SynonymTable::new(RISK_LEVEL_SYNONYMS.iter().copied()),
});

/// Ordered phrase -> canonical value mapping
#[derive(Debug, Clone)]
pub struct SynonymTable<T> {
    /// (normalized phrase, canonical value)
    entries: Vec<(String, T)>,
}

impl<T: Copy> SynonymTable<T> {
    /// Build a table, normalizing every phrase; blank phrases are dropped
    pub fn new<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, T)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(phrase, value)| (normalize(phrase.as_ref()), value))
            .filter(|(phrase, _)| !phrase.is_empty())
            .collect();
        Self { entries }
    }

    /// Look up raw text
    pub fn lookup(&self, text: &str) -> Option<T> {
        self.lookup_normalized(&normalize(text))
    }

    /// Look up text that has already been through [`normalize`]
    pub fn lookup_normalized(&self, normalized: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(phrase, _)| normalized.contains(phrase.as_str()))
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_overrides(&self, overrides: SynonymTable<T>, mode: OverrideMode) -> Self {
        match mode {
            OverrideMode::Replace => overrides,
            OverrideMode::Prepend => {
                let mut entries = overrides.entries;
                entries.extend(self.entries.iter().cloned());
                Self { entries }
            },
        }
    }
}

/// Status and risk level tables used by the field extractors
#[derive(Debug, Clone)]
pub struct SynonymTables {
    pub status: SynonymTable<Status>,
    pub risk_level: SynonymTable<RiskLevel>,
}

impl SynonymTables {
    /// Built-in English/Turkish tables
    pub fn builtin() -> Self {
        BUILTIN_TABLES.clone()
    }

    /// Built-in tables combined with configured overrides
    pub fn from_config(config: &SynonymsConfig) -> Self {
        let builtin = Self::builtin();
        let status = SynonymTable::new(
            config
                .status
                .iter()
                .map(|entry| (entry.phrase.as_str(), entry.canonical)),
        );
        let risk_level = SynonymTable::new(
            config
                .risk_level
                .iter()
                .map(|entry| (entry.phrase.as_str(), entry.canonical)),
        );

        Self {
            status: builtin.status.with_overrides(status, config.mode),
            risk_level: builtin.risk_level.with_overrides(risk_level, config.mode),
        }
    }
}

impl Default for SynonymTables {
    fn default() -> Self {
        Self::builtin()
    }
}
