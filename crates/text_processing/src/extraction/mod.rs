//! Field Extraction for Report Requests
//!
//! One extractor per filter field. Each runs independently over the raw
//! request and returns a candidate value or `None`; a missing field is not an
//! error, the request may still succeed on other fields.
//!
//! - `status` / `riskLevel`: ordered synonym tables (see [`crate::synonyms`])
//! - `auditName`, `auditLead`, `responsibleEmail`, `cLevel`: phrase-anchored
//!   regex patterns, tried in order; the first accepted capture wins
//! - `auditYear`: the precedence rules in [`year`]
//!
//! ## Static Regex Patterns
//!
//! Patterns are compiled once at program start using `once_cell::sync::Lazy`.

pub mod year;

use once_cell::sync::Lazy;
use regex::Regex;
use report_filter_core::FilterField;
use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::{is_acronym, is_shouted, normalize};
use crate::synonyms::SynonymTables;
pub use year::{YearResolver, DEFAULT_RANGE_START};

// =============================================================================
// STATIC REGEX PATTERNS - Compiled once at program start
// =============================================================================

/// How much a capture can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    /// Quoted value; taken as-is
    Quoted,
    /// Unquoted value right after (or before) the field keyword
    Anchored,
    /// Capitalized words with weak context; most likely to misfire
    Loose,
}

/// Compiled field pattern with its trust level
struct FieldPattern {
    regex: Regex,
    kind: CaptureKind,
}

impl FieldPattern {
    fn new(pattern: &str, kind: CaptureKind) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            kind,
        }
    }
}

/// Where an unquoted value stops: a connective or filter keyword, or punctuation
const VALUE_END: &str = r"(?:\s+(?i:with|and|for|in|from|since|during|where|whose|which|that|status|risk|year|lead|led|responsible|ile|ve|icin|için)\b|\s*[,;?!()]|\.(?:\s|$)|$)";

const OPEN_QUOTE: &str = r#"["“'‘]"#;
const QUOTED_VALUE: &str = r#"([^"“”'‘’]+)["”'’]"#;

const EMAIL: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

static AUDIT_NAME_PATTERNS: Lazy<Vec<FieldPattern>> = Lazy::new(|| {
    vec![
        // audit "Payroll Review", audit name: 'Payroll Review'
        FieldPattern::new(
            &format!(r"(?i)\baudit(?:\s+name)?\s*(?:is\b|:|=|named\b|called\b)?\s*{}{}", OPEN_QUOTE, QUOTED_VALUE),
            CaptureKind::Quoted,
        ),
        // "Payroll Review" audit
        FieldPattern::new(
            &format!(r"(?i){}{}\s+audit\b", OPEN_QUOTE, QUOTED_VALUE),
            CaptureKind::Quoted,
        ),
        // audit name is Payroll Review, audit called Payroll Review
        FieldPattern::new(
            &format!(r"(?i)\baudit\s+(?:name\s*(?:is\b|:|=)?|named\b|called\b|titled\b)\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        // denetim adı: Bordro İncelemesi
        FieldPattern::new(
            &format!(r"(?i)\bdenetim\s+ad[iı]\s*(?::|=)?\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        // audit Payroll Review / Payroll Review audit
        FieldPattern::new(
            r"\b[Aa]udit\s+(\p{Lu}[\w&-]*(?:\s+[\p{Lu}0-9][\w&-]*)*)",
            CaptureKind::Loose,
        ),
        FieldPattern::new(
            r"\b(\p{Lu}[\w&-]*(?:\s+[\p{Lu}0-9][\w&-]*)*)\s+[Aa]udit\b",
            CaptureKind::Loose,
        ),
    ]
});

static AUDIT_LEAD_PATTERNS: Lazy<Vec<FieldPattern>> = Lazy::new(|| {
    vec![
        // audit lead "Jane Doe"
        FieldPattern::new(
            &format!(r"(?i)\b(?:audit\s+)?lead(?:er)?\s*(?:is\b|:|=)?\s*{}{}", OPEN_QUOTE, QUOTED_VALUE),
            CaptureKind::Quoted,
        ),
        // audit lead Jane Doe, audit lead is Jane Doe, lead: Jane Doe
        FieldPattern::new(
            &format!(r"(?i)\baudit\s+lead(?:er)?\s*(?:is\b|:|=)?\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        FieldPattern::new(
            &format!(r"(?i)\blead(?:er)?\s*(?:is\b|:|=)\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        // denetim lideri Ayşe Yılmaz
        FieldPattern::new(
            &format!(r"(?i)\bdenetim\s+lider[iı]\s*(?::|=)?\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        // led by Jane Doe
        FieldPattern::new(
            r"\b(?:[Ll]ed|[Ll]ead)\s+by\s+(\p{Lu}[\w.'-]*(?:\s+\p{Lu}[\w.'-]*)*)",
            CaptureKind::Loose,
        ),
    ]
});

static RESPONSIBLE_PATTERNS: Lazy<Vec<FieldPattern>> = Lazy::new(|| {
    vec![
        // responsible is jane.doe@example.com
        FieldPattern::new(
            &format!(
                r"(?i)\b(?:responsible(?:\s+(?:person|email|e-mail))?|assigned\s+to|owned\s+by|owner|sorumlu(?:su)?)\s*(?:is\b|:|=)?\s*({})",
                EMAIL
            ),
            CaptureKind::Anchored,
        ),
        // responsible person is Jane Doe, assigned to Jane Doe
        FieldPattern::new(
            &format!(
                r"(?i)\b(?:responsible(?:\s+person)?|assigned\s+to|owned\s+by|sorumlu(?:su)?)\s*(?:is\b|:|=)?\s*(.+?){}",
                VALUE_END
            ),
            CaptureKind::Anchored,
        ),
        // bare e-mail anywhere
        FieldPattern::new(&format!(r"({})", EMAIL), CaptureKind::Anchored),
        // last resort: "for Jane Doe", unless the name belongs to an audit or lead phrase
        FieldPattern::new(
            r"\b(?:for|of)\s+(\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+)?)\b((?i:\s+(?:audit|denetim|c-?\s?level|lead)\b))?",
            CaptureKind::Loose,
        ),
    ]
});

static C_LEVEL_PATTERNS: Lazy<Vec<FieldPattern>> = Lazy::new(|| {
    vec![
        // c-level "Chief Financial Officer"
        FieldPattern::new(
            &format!(r"(?i)\bc[\s-]?level\s*(?:is\b|:|=)?\s*{}{}", OPEN_QUOTE, QUOTED_VALUE),
            CaptureKind::Quoted,
        ),
        // c-level CFO, c level is CFO
        FieldPattern::new(
            &format!(r"(?i)\bc[\s-]?level\s*(?:is\b|:|=|of\b)?\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        // c seviyesi: CFO
        FieldPattern::new(
            &format!(r"(?i)\bc[\s-]?seviye(?:si)?\s*(?::|=)?\s*(.+?){}", VALUE_END),
            CaptureKind::Anchored,
        ),
        // CFO c-level
        FieldPattern::new(
            r"\b([A-Z][A-Za-z&/-]*)\s+[Cc][\s-]?[Ll]evel\b",
            CaptureKind::Loose,
        ),
        // bare chief-officer acronym: CEO, CFO, CISO
        FieldPattern::new(r"\b(C[A-Z]{1,2}O)\b", CaptureKind::Loose),
    ]
});

/// A preposition directly followed by a year ("from 2024") is a date phrase, not a name
static PREPOSITION_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:from|in|for|since|during|of)\s+\d{4}\b").unwrap());

static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}\+?$").unwrap());

/// Words that are never a name, audit, lead or officer on their own
const GENERIC_WORDS: &[&str] = &[
    // request verbs and fillers
    "show", "export", "list", "get", "give", "find", "download", "display", "send", "please",
    "pls", "me", "us", "the", "a", "an", "all", "any", "every", "only", "just", "with", "and",
    "or", "for", "of", "by", "in", "from", "is", "are", "it", "them", "those", "these", "this",
    "that",
    // report vocabulary
    "actions", "action", "items", "item", "results", "result", "records", "report", "reports",
    "status", "statuses", "risk", "risks", "year", "years", "audit", "audits", "lead", "leader",
    "name", "level", "responsible", "owner", "data",
    // canonical values
    "open", "overdue", "completed", "closed", "critical", "high", "medium", "low", "unassigned",
    "accepted",
    // calendar words
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday", "sunday", "today", "yesterday", "tomorrow", "q1", "q2", "q3", "q4",
    // Turkish
    "tum", "hepsi", "aksiyonlar", "aksiyon", "durum", "yil", "denetim",
];

/// Determiners and pronouns that may open an anchored value ("owned by the CEO")
const LEADING_FILLERS: &[&str] = &[
    "the", "a", "an", "me", "us", "my", "our", "this", "that", "these", "those", "all", "any",
    "every", "bu", "su", "tum",
];

fn is_generic_word(word: &str) -> bool {
    GENERIC_WORDS.contains(&word)
}

/// Raw word check; capitals mark an acronym ("IT") unless the whole request is shouted
fn is_generic_token(word: &str, acronyms: bool) -> bool {
    if acronyms && is_acronym(word) {
        return false;
    }
    is_generic_word(&normalize(word))
}

/// Strip surrounding quotes and trailing punctuation
fn clean_candidate(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’'))
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
        .trim()
        .to_string()
}

/// Drop leading determiners from an anchored value: "the CEO" -> "CEO"
fn strip_leading_fillers(candidate: &str, acronyms: bool) -> &str {
    let mut rest = candidate.trim();
    while let Some((idx, word)) = rest.unicode_word_indices().next() {
        if (acronyms && is_acronym(word)) || !LEADING_FILLERS.contains(&normalize(word).as_str()) {
            break;
        }
        rest = rest[idx + word.len()..].trim_start();
    }
    rest
}

/// Plausibility check shared by the free-form extractors
fn is_plausible(candidate: &str, kind: CaptureKind, acronyms: bool) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if kind == CaptureKind::Quoted {
        return true;
    }

    if BARE_YEAR.is_match(candidate) || PREPOSITION_YEAR.is_match(candidate) {
        return false;
    }

    let tokens: Vec<&str> = candidate.unicode_words().collect();
    match kind {
        CaptureKind::Anchored => !tokens.iter().all(|t| is_generic_token(t, acronyms)),
        _ => tokens
            .first()
            .map(|t| !is_generic_token(t, acronyms))
            .unwrap_or(false),
    }
}

/// Try each pattern in order, every match of a pattern before moving on
fn first_plausible(patterns: &[FieldPattern], text: &str, field: FilterField) -> Option<String> {
    let acronyms = !is_shouted(text);
    for pattern in patterns {
        for caps in pattern.regex.captures_iter(text) {
            // Optional group 2 marks a capture that belongs to another field
            if caps.get(2).is_some() {
                continue;
            }
            let Some(m) = caps.get(1) else { continue };
            let mut candidate = clean_candidate(m.as_str());
            if pattern.kind == CaptureKind::Anchored {
                candidate = strip_leading_fillers(&candidate, acronyms).to_string();
            }
            if is_plausible(&candidate, pattern.kind, acronyms) {
                return Some(candidate);
            }
            tracing::debug!(
                field = %field,
                candidate = %candidate,
                "Skipping implausible capture"
            );
        }
    }
    None
}

// =============================================================================
// FIELD EXTRACTOR
// =============================================================================

/// Extracts filter field candidates from request text
///
/// Holds the synonym tables and year resolver; all regex patterns are
/// module-level statics, so construction is cheap.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    synonyms: SynonymTables,
    years: YearResolver,
}

impl FieldExtractor {
    /// Extractor with the built-in synonym tables and the default range start
    pub fn new() -> Self {
        Self::with_parts(SynonymTables::builtin(), YearResolver::default())
    }

    pub fn with_parts(synonyms: SynonymTables, years: YearResolver) -> Self {
        Self { synonyms, years }
    }

    /// Extract status (canonical label)
    pub fn extract_status(&self, text: &str) -> Option<String> {
        self.synonyms
            .status
            .lookup(text)
            .map(|status| status.label().to_string())
    }

    /// Extract risk level (canonical label)
    pub fn extract_risk_level(&self, text: &str) -> Option<String> {
        self.synonyms
            .risk_level
            .lookup(text)
            .map(|level| level.label().to_string())
    }

    pub fn extract_audit_name(&self, text: &str) -> Option<String> {
        first_plausible(&AUDIT_NAME_PATTERNS, text, FilterField::AuditName)
    }

    pub fn extract_audit_lead(&self, text: &str) -> Option<String> {
        first_plausible(&AUDIT_LEAD_PATTERNS, text, FilterField::AuditLead)
    }

    /// Extract the responsible person (e-mail or name)
    ///
    /// The capitalized-name fallback is best-effort and can pick up ordinary
    /// capitalized words; vocabulary validation is what makes it reliable.
    pub fn extract_responsible(&self, text: &str) -> Option<String> {
        first_plausible(&RESPONSIBLE_PATTERNS, text, FilterField::ResponsibleEmail)
    }

    pub fn extract_c_level(&self, text: &str) -> Option<String> {
        first_plausible(&C_LEVEL_PATTERNS, text, FilterField::CLevel)
    }

    /// Extract the audit year token (`"2024+"`, `"all"` or a year)
    pub fn extract_audit_year(&self, text: &str) -> Option<String> {
        self.years.resolve(text).map(|year| year.to_string())
    }

    pub fn extract_field(&self, field: FilterField, text: &str) -> Option<String> {
        match field {
            FilterField::Status => self.extract_status(text),
            FilterField::RiskLevel => self.extract_risk_level(text),
            FilterField::AuditName => self.extract_audit_name(text),
            FilterField::AuditLead => self.extract_audit_lead(text),
            FilterField::ResponsibleEmail => self.extract_responsible(text),
            FilterField::CLevel => self.extract_c_level(text),
            FilterField::AuditYear => self.extract_audit_year(text),
        }
    }

    /// Run every extractor; fields without a candidate are left out
    pub fn extract_all(&self, text: &str) -> Vec<(FilterField, String)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| {
                let candidate = self.extract_field(field, text);
                tracing::trace!(field = %field, candidate = ?candidate, "Extracted field");
                candidate.map(|value| (field, value))
            })
            .collect()
    }

    pub fn year_resolver(&self) -> &YearResolver {
        &self.years
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_risk() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_status("AÇIK").as_deref(), Some("Open"));
        assert_eq!(extractor.extract_status("open").as_deref(), Some("Open"));
        assert_eq!(
            extractor.extract_status("risk accepted findings").as_deref(),
            Some("Risk Accepted")
        );
        assert_eq!(
            extractor.extract_risk_level("with Critical risk").as_deref(),
            Some("Critical")
        );
        assert_eq!(extractor.extract_risk_level("anything else"), None);
    }

    #[test]
    fn test_audit_name_extraction() {
        let extractor = FieldExtractor::new();
        assert_eq!(
            extractor.extract_audit_name("actions for audit \"Payroll Review\"").as_deref(),
            Some("Payroll Review")
        );
        assert_eq!(
            extractor.extract_audit_name("open items in 'IT General Controls' audit").as_deref(),
            Some("IT General Controls")
        );
        assert_eq!(
            extractor
                .extract_audit_name("audit name is Vendor Management with Open status")
                .as_deref(),
            Some("Vendor Management")
        );
        assert_eq!(
            extractor.extract_audit_name("Show actions for audit Payroll Review").as_deref(),
            Some("Payroll Review")
        );
        assert_eq!(
            extractor.extract_audit_name("Denetim adı: Bordro Süreci, gecikmiş").as_deref(),
            Some("Bordro Süreci")
        );
    }

    #[test]
    fn test_audit_name_keeps_leading_acronym() {
        let extractor = FieldExtractor::new();
        assert_eq!(
            extractor.extract_audit_name("Show actions for audit IT General Controls").as_deref(),
            Some("IT General Controls")
        );
        assert_eq!(
            extractor.extract_audit_name("Overdue actions in the IT Security audit").as_deref(),
            Some("IT Security")
        );
        // capitalized "It" is still a pronoun
        assert_eq!(extractor.extract_audit_name("Audit It please"), None);
    }

    #[test]
    fn test_shouted_request_has_no_acronyms() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_c_level("SHOW ALL C-LEVEL ACTIONS"), None);
        assert_eq!(extractor.extract_audit_lead("SHOW ACTIONS WHERE LEAD IS ALL"), None);
        assert_eq!(extractor.extract_audit_lead("lead is ALL").as_deref(), Some("ALL"));
    }

    #[test]
    fn test_audit_name_ignores_year_phrases() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_audit_name("audit year 2024"), None);
        assert_eq!(extractor.extract_audit_name("Audit Year 2024"), None);
        assert_eq!(extractor.extract_audit_name("all audits"), None);
    }

    #[test]
    fn test_audit_lead_extraction() {
        let extractor = FieldExtractor::new();
        assert_eq!(
            extractor.extract_audit_lead("audit lead Jane Doe with Critical risk").as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(
            extractor.extract_audit_lead("lead is Ali Veli").as_deref(),
            Some("Ali Veli")
        );
        assert_eq!(
            extractor.extract_audit_lead("audit lead \"Mary Major\"").as_deref(),
            Some("Mary Major")
        );
        assert_eq!(
            extractor.extract_audit_lead("audits led by John Smith").as_deref(),
            Some("John Smith")
        );
        assert_eq!(extractor.extract_audit_lead("overdue actions"), None);
    }

    #[test]
    fn test_responsible_extraction() {
        let extractor = FieldExtractor::new();
        assert_eq!(
            extractor
                .extract_responsible("responsible is jane.doe@example.com")
                .as_deref(),
            Some("jane.doe@example.com")
        );
        assert_eq!(
            extractor
                .extract_responsible("send me actions of john.smith@corp.io.")
                .as_deref(),
            Some("john.smith@corp.io")
        );
        assert_eq!(
            extractor
                .extract_responsible("actions assigned to Mehmet Kaya, overdue")
                .as_deref(),
            Some("Mehmet Kaya")
        );
        assert_eq!(
            extractor.extract_responsible("open actions for Jane Doe").as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(
            extractor.extract_responsible("Show Open actions for Ayşe Yılmaz").as_deref(),
            Some("Ayşe Yılmaz")
        );
    }

    #[test]
    fn test_anchored_value_drops_leading_determiner() {
        let extractor = FieldExtractor::new();
        assert_eq!(
            extractor.extract_responsible("actions owned by the CEO").as_deref(),
            Some("CEO")
        );
        assert_eq!(
            extractor.extract_responsible("actions assigned to the Jane Doe").as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(extractor.extract_responsible("actions assigned to me"), None);
        assert_eq!(extractor.extract_c_level("c-level is the CFO").as_deref(), Some("CFO"));
        // determiner then a year is still a date phrase
        assert_eq!(extractor.extract_audit_name("audit name is the 2024"), None);
        // generic words inside a real name survive
        assert_eq!(
            extractor.extract_audit_name("audit name is Data Privacy with Open status").as_deref(),
            Some("Data Privacy")
        );
    }

    #[test]
    fn test_responsible_exclusions() {
        let extractor = FieldExtractor::new();
        // date phrases and generic words are not names
        assert_eq!(extractor.extract_responsible("responsible for 2024"), None);
        assert_eq!(extractor.extract_responsible("Overdue actions for 2024"), None);
        assert_eq!(extractor.extract_responsible("actions for January"), None);
        assert_eq!(extractor.extract_responsible("all actions for Open status"), None);
        assert_eq!(
            extractor.extract_responsible("How many actions with Critical risk and Overdue status?"),
            None
        );
        // a capitalized name owned by the audit phrase is not a person
        assert_eq!(extractor.extract_responsible("actions for Payroll Review audit"), None);
    }

    #[test]
    fn test_c_level_extraction() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_c_level("c-level CFO").as_deref(), Some("CFO"));
        assert_eq!(
            extractor.extract_c_level("c level is Chief Financial Officer").as_deref(),
            Some("Chief Financial Officer")
        );
        assert_eq!(
            extractor.extract_c_level("Show c-level actions for CISO").as_deref(),
            Some("CISO")
        );
        assert_eq!(extractor.extract_c_level("actions owned by the CEO").as_deref(), Some("CEO"));
        assert_eq!(extractor.extract_c_level("overdue actions"), None);
    }

    #[test]
    fn test_extract_all() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract_all("Show overdue actions for 2024 with Critical risk");
        assert_eq!(
            fields,
            vec![
                (FilterField::Status, "Overdue".to_string()),
                (FilterField::RiskLevel, "Critical".to_string()),
                (FilterField::AuditYear, "2024".to_string()),
            ]
        );
    }
}
