//! Audit year resolution
//!
//! Year phrases are the most ambiguous part of a request: the reporting
//! dashboard defaults to "2024 and later", so a bare year may mean the open
//! range while "from 2024" pins one year. Rules run in a fixed order and the
//! first hit wins:
//!
//! 1. preposition + year ("in 2024", "for year 2023", "2024'te") -> exact
//! 2. qualifier + year ("just 2025", "only year 2025") -> exact
//! 3. "all" in a year context ("all years", "tüm yıllar") -> all
//! 4. "year [is] <YEAR>" -> exact if a qualifier precedes it, else range rule
//! 5. literal range token ("2024+") -> open range
//! 6. any 20xx year next to a year/audit/qualifier keyword -> range rule
//!
//! The range rule maps years at or after the range start to the open range
//! and keeps earlier years exact. Moving rules 1-2 below rule 4 would turn
//! "from 2024" into "2024+".

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use report_filter_core::AuditYear;

use crate::normalize::{normalize, words};

/// Default first year of the open range
pub const DEFAULT_RANGE_START: u16 = 2024;

// All patterns run on normalized (lower-case, diacritic-free) text.

static PREPOSITIONAL_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:from|in|for|since|during)\s+(?:the\s+)?(?:(?:audit\s+)?years?\s+)?(20\d{2})\b").unwrap()
});

// Turkish postpositions follow the year: "2024'te", "2023 yılında", "2024 için"
static POSTPOSITIONAL_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(20\d{2})\s*'?\s*(?:yilindan|yilinda|yilina|yilinin|yili\s+icin|icin|[dt][ae]n|[dt][ae])\b").unwrap()
});

static QUALIFIED_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:just|only|sadece|yalnizca|yalniz)\s+(?:the\s+)?(?:(?:audit\s+)?(?:years?|yil)\s+)?(20\d{2})\b").unwrap()
});

static YEAR_QUALIFIED_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(20\d{2})\s+(?:only|sadece)\b").unwrap());

static YEAR_IS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:audit\s+)?(?:year|yil|yili)\s*(?:is\b|=|:|of\b)?\s*(20\d{2})\b").unwrap()
});

static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

static QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:just|only|sadece|yalnizca|yalniz)\b").unwrap());

static YEAR_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:years?|audits?|yil\w*|denetim\w*|just|only|sadece|yalnizca|yalniz|onwards|later|itibaren|sonra\w*)\b").unwrap()
});

/// Words that stand for "all"
const ALL_WORDS: &[&str] = &["all", "tum", "butun", "hepsi"];

/// Nouns after "all" that make it mean "all years"
const YEAR_NOUNS: &[&str] = &[
    "year", "years", "audit", "audits", "time", "yil", "yillar", "yillari", "denetim", "denetimler",
];

/// Year nouns proper; the only ones that count right after a result verb
const STRICT_YEAR_NOUNS: &[&str] = &["year", "years", "yil", "yillar", "yillari"];

/// Nouns after "all" that make it about something other than years
const NON_YEAR_NOUNS: &[&str] = &[
    "actions", "action", "results", "result", "records", "record", "items", "item", "data",
    "rows", "findings", "finding", "statuses", "status", "risks", "risk", "open", "overdue",
    "completed", "critical", "high", "medium", "low", "aksiyonlar", "aksiyonlari", "aksiyon",
    "sonuclar", "kayitlar", "bulgular",
];

/// Verbs before "all" that make it about the result set ("export all")
const RESULT_VERBS: &[&str] = &[
    "export", "show", "list", "get", "give", "download", "display", "fetch", "find", "see",
    "send", "goster", "listele", "getir", "indir",
];

/// Filler skipped when looking at the word after "all"
const FILLER: &[&str] = &["the", "of", "my", "our"];

/// Resolves the `auditYear` field from request text
#[derive(Debug, Clone, Copy)]
pub struct YearResolver {
    range_start: u16,
}

impl YearResolver {
    pub fn new(range_start: u16) -> Self {
        Self { range_start }
    }

    pub fn range_start(&self) -> u16 {
        self.range_start
    }

    /// Resolve the audit year of a raw request
    pub fn resolve(&self, text: &str) -> Option<AuditYear> {
        let normalized = normalize(text);
        self.resolve_normalized(&normalized)
    }

    /// Resolve the audit year of already-normalized text
    pub fn resolve_normalized(&self, text: &str) -> Option<AuditYear> {
        let resolved = self
            .prepositional(text)
            .map(|year| ("prepositional", AuditYear::Exact(year)))
            .or_else(|| {
                self.qualified(text)
                    .map(|year| ("qualified", AuditYear::Exact(year)))
            })
            .or_else(|| self.all_years(text).then_some(("all_years", AuditYear::All)))
            .or_else(|| self.year_is(text).map(|year| ("year_is", year)))
            .or_else(|| self.range_token(text).map(|year| ("range_token", year)))
            .or_else(|| self.standalone(text).map(|year| ("standalone", year)));

        match resolved {
            Some((rule, year)) => {
                tracing::debug!(rule, year = %year, "Resolved audit year");
                Some(year)
            },
            None => None,
        }
    }

    /// Rule 1: a preposition pins the exact year, even inside the open range
    fn prepositional(&self, text: &str) -> Option<u16> {
        first_year(&PREPOSITIONAL_YEAR, text).or_else(|| first_year(&POSTPOSITIONAL_YEAR, text))
    }

    /// Rule 2: "just"/"only" pins the exact year
    fn qualified(&self, text: &str) -> Option<u16> {
        first_year(&QUALIFIED_YEAR, text).or_else(|| first_year(&YEAR_QUALIFIED_AFTER, text))
    }

    /// Rule 3: "all" that refers to years rather than to the result set
    fn all_years(&self, text: &str) -> bool {
        let tokens = words(text);
        let has_year_keyword = tokens.iter().any(|t| YEAR_NOUNS.contains(t));

        tokens.iter().enumerate().any(|(i, token)| {
            if !ALL_WORDS.contains(token) {
                return false;
            }

            let follows_result_verb = i > 0 && RESULT_VERBS.contains(&tokens[i - 1]);
            let next = tokens[i + 1..]
                .iter()
                .find(|t| !FILLER.contains(*t))
                .copied();
            if let Some(next) = next {
                // "export all audits" is about the result set
                if follows_result_verb {
                    return STRICT_YEAR_NOUNS.contains(&next);
                }
                if YEAR_NOUNS.contains(&next) {
                    return true;
                }
                if NON_YEAR_NOUNS.contains(&next) {
                    return false;
                }
            }

            !follows_result_verb && has_year_keyword
        })
    }

    /// Rule 4: "year is 2025", "audit year: 2023"
    fn year_is(&self, text: &str) -> Option<AuditYear> {
        let caps = YEAR_IS
            .captures_iter(text)
            .find(|caps| !followed_by_plus(text, caps))?;
        let m = caps.get(1)?;
        let year = m.as_str().parse().ok()?;
        Some(self.apply_range_rule(text, year, m.start()))
    }

    /// Rule 5: the literal open-range token
    fn range_token(&self, text: &str) -> Option<AuditYear> {
        let token = AuditYear::From(self.range_start).to_string();
        text.contains(&token).then_some(AuditYear::From(self.range_start))
    }

    /// Rule 6: a bare year, trusted only next to a year-ish keyword
    fn standalone(&self, text: &str) -> Option<AuditYear> {
        if !YEAR_CONTEXT.is_match(text) {
            return None;
        }
        let m = BARE_YEAR.find(text)?;
        let year = m.as_str().parse().ok()?;
        Some(self.apply_range_rule(text, year, m.start()))
    }

    /// Exact when a qualifier precedes the year, otherwise collapse years in
    /// the open range to the range token
    fn apply_range_rule(&self, text: &str, year: u16, year_start: usize) -> AuditYear {
        if QUALIFIER.is_match(&text[..year_start]) {
            AuditYear::Exact(year)
        } else if year >= self.range_start {
            AuditYear::From(self.range_start)
        } else {
            AuditYear::Exact(year)
        }
    }
}

impl Default for YearResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_START)
    }
}

/// "2024+" is a range, so a year directly followed by '+' never counts as exact
fn followed_by_plus(text: &str, caps: &Captures<'_>) -> bool {
    caps.get(1)
        .map(|m| text[m.end()..].starts_with('+'))
        .unwrap_or(false)
}

fn first_year(pattern: &Regex, text: &str) -> Option<u16> {
    pattern
        .captures_iter(text)
        .filter(|caps| !followed_by_plus(text, caps))
        .find_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
}
