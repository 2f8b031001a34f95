//! Report request parsing pipeline
//!
//! Casual detection runs first and may answer on its own. Otherwise the
//! previous turn's filters are carried over when the request refers back to
//! them, every field extractor runs over the raw text, candidates are checked
//! against the caller's vocabulary and the survivors are assembled into a
//! [`ParseResult`].

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use report_filter_config::{ConfigError, ParserConfig, SynonymsConfig};
use report_filter_core::{AvailableOptions, ParseResult, ParsedFilters};

use crate::extraction::{FieldExtractor, YearResolver};
use crate::intent::classify_casual_with_rng;
use crate::normalize::normalize;
use crate::reference::should_carry_over;
use crate::synonyms::SynonymTables;
use crate::validation::VocabularyValidator;

/// Returned as `error` when nothing could be extracted
pub const USAGE_HINT: &str = "I couldn't find any report filters in that request. Try something like:\n\
    • \"Show overdue actions with Critical risk\"\n\
    • \"How many open actions for audit Payroll Review?\"\n\
    • \"Export completed actions for year 2023\"\n\
    • \"Actions assigned to jane.doe@example.com from 2024\"\n\
    • \"Gecikmiş aksiyonları 2024 yılı için göster\"";

static COUNT_REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:how\s+many|count|number|kac|sayisi|sayi|adet)\b").unwrap()
});

static DEFAULT_PARSER: Lazy<ReportRequestParser> = Lazy::new(ReportRequestParser::new);

/// The text asks "how many" rather than for an export
pub fn is_count_request(text: &str) -> bool {
    COUNT_REQUEST.is_match(&normalize(text))
}

/// Parse with the default configuration
///
/// Pure apart from the casual reply pick: the result depends only on the
/// request, the options and the previous filters.
pub fn parse_report_request(
    request: &str,
    available_options: Option<&AvailableOptions>,
    previous_filters: Option<&ParsedFilters>,
) -> ParseResult {
    DEFAULT_PARSER.parse(request, available_options, previous_filters)
}

/// Configurable report request parser
///
/// Holds only immutable tables, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReportRequestParser {
    extractor: FieldExtractor,
    validator: VocabularyValidator,
    carry_over_context: bool,
}

impl ReportRequestParser {
    /// Parser with built-in tables and default settings
    pub fn new() -> Self {
        Self::with_synonyms(&ParserConfig::default(), SynonymTables::builtin())
    }

    /// Build from configuration, loading the synonym override file if one is set
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let synonyms = match &config.synonyms_path {
            Some(path) => SynonymTables::from_config(&SynonymsConfig::load(path)?),
            None => SynonymTables::builtin(),
        };
        Ok(Self::with_synonyms(config, synonyms))
    }

    pub fn with_synonyms(config: &ParserConfig, synonyms: SynonymTables) -> Self {
        tracing::debug!(
            range_start = config.open_range_start_year,
            carry_over = config.carry_over_context,
            partial_email = config.partial_email_match,
            status_phrases = synonyms.status.len(),
            risk_phrases = synonyms.risk_level.len(),
            "Building report request parser"
        );
        Self {
            extractor: FieldExtractor::with_parts(
                synonyms,
                YearResolver::new(config.open_range_start_year),
            ),
            validator: VocabularyValidator::new(config.partial_email_match),
            carry_over_context: config.carry_over_context,
        }
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Parse one user turn
    pub fn parse(
        &self,
        request: &str,
        available_options: Option<&AvailableOptions>,
        previous_filters: Option<&ParsedFilters>,
    ) -> ParseResult {
        self.parse_with_rng(
            request,
            available_options,
            previous_filters,
            &mut rand::thread_rng(),
        )
    }

    /// [`parse`](Self::parse) with a caller-supplied RNG for the casual reply
    pub fn parse_with_rng<R: Rng + ?Sized>(
        &self,
        request: &str,
        available_options: Option<&AvailableOptions>,
        previous_filters: Option<&ParsedFilters>,
        rng: &mut R,
    ) -> ParseResult {
        if request.trim().is_empty() {
            return ParseResult::failure(USAGE_HINT);
        }

        let casual = classify_casual_with_rng(request, rng);
        if casual.is_casual {
            if let Some(response) = casual.response {
                return ParseResult::casual(response);
            }
        }

        let mut filters = ParsedFilters::new();
        if self.carry_over_context && should_carry_over(request, previous_filters) {
            if let Some(previous) = previous_filters {
                filters.merge_from(previous);
            }
        }

        for (field, candidate) in self.extractor.extract_all(request) {
            if let Some(value) = self.validator.validate(field, &candidate, available_options) {
                filters.set(field, value);
            }
        }

        if filters.is_empty() {
            tracing::debug!(request, "No filters extracted");
            return ParseResult::failure(USAGE_HINT);
        }

        let count = is_count_request(request);
        tracing::debug!(
            fields = filters.len(),
            count,
            summary = %filters.describe(),
            "Parsed report request"
        );
        ParseResult::extracted(filters, count)
    }
}

impl Default for ReportRequestParser {
    fn default() -> Self {
        Self::new()
    }
}
