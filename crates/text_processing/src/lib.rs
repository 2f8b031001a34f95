//! Report Filter Extraction
//!
//! Turns a free-text report request (English or Turkish) into a structured
//! filter set:
//! - **Normalization**: case- and diacritic-insensitive comparison
//! - **Casual Detection**: greetings, thanks, farewells and compliments get a canned reply
//! - **Field Extraction**: status, risk level, audit, lead, responsible, C-level and audit year
//! - **Follow-ups**: "export them" reuses the previous turn's filters
//! - **Validation**: candidates are checked against the caller's option lists
//!
//! # Example
//!
//! ```
//! use report_filter_text_processing::parse_report_request;
//!
//! let result = parse_report_request("How many overdue actions with Critical risk?", None, None);
//! assert!(result.success);
//! assert_eq!(result.filters.status.as_deref(), Some("Overdue"));
//! assert_eq!(result.filters.risk_level.as_deref(), Some("Critical"));
//! assert_eq!(result.is_count_request, Some(true));
//! ```

pub mod extraction;
pub mod intent;
pub mod normalize;
pub mod reference;
pub mod synonyms;
pub mod validation;

mod pipeline;

pub use pipeline::{is_count_request, parse_report_request, ReportRequestParser, USAGE_HINT};

// Re-export key types
pub use extraction::{FieldExtractor, YearResolver, DEFAULT_RANGE_START};
pub use intent::{classify_casual, classify_casual_with_rng, CasualCategory, CasualClassification};
pub use normalize::normalize;
pub use reference::{has_reference_words, is_simple_export_request};
pub use synonyms::{SynonymTable, SynonymTables};
pub use validation::VocabularyValidator;
