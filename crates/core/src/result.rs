//! Parse result returned for every user turn

use serde::{Deserialize, Serialize};

use crate::ParsedFilters;

/// What the caller should do with a [`ParseResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Display `message` directly, run no query
    Casual,
    /// Run the filters and report how many rows match
    Count,
    /// Run the filters and export the matching rows
    Export,
    /// Show `error` to the user verbatim
    Failed,
}

/// Outcome of parsing one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub success: bool,
    #[serde(default)]
    pub filters: ParsedFilters,
    /// Canned conversational reply; set only for casual utterances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// User-facing guidance when nothing could be extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_count_request: Option<bool>,
}

impl ParseResult {
    /// Casual utterance answered with a canned reply
    pub fn casual(message: impl Into<String>) -> Self {
        Self {
            success: true,
            filters: ParsedFilters::default(),
            message: Some(message.into()),
            error: None,
            is_count_request: None,
        }
    }

    /// Extraction failure with guidance for the user
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            filters: ParsedFilters::default(),
            message: None,
            error: Some(error.into()),
            is_count_request: None,
        }
    }

    /// Successful extraction; the caller composes the reply from live results
    pub fn extracted(filters: ParsedFilters, is_count_request: bool) -> Self {
        Self {
            success: true,
            filters,
            message: None,
            error: None,
            is_count_request: Some(is_count_request),
        }
    }

    pub fn kind(&self) -> RequestKind {
        if !self.success {
            RequestKind::Failed
        } else if self.message.is_some() {
            RequestKind::Casual
        } else if self.is_count_request.unwrap_or(false) {
            RequestKind::Count
        } else {
            RequestKind::Export
        }
    }

    pub fn is_casual(&self) -> bool {
        self.kind() == RequestKind::Casual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterField;

    #[test]
    fn test_kinds() {
        assert_eq!(ParseResult::casual("Hi!").kind(), RequestKind::Casual);
        assert_eq!(ParseResult::failure("nope").kind(), RequestKind::Failed);

        let mut filters = ParsedFilters::new();
        filters.set(FilterField::Status, "Open");
        assert_eq!(
            ParseResult::extracted(filters.clone(), true).kind(),
            RequestKind::Count
        );
        assert_eq!(
            ParseResult::extracted(filters, false).kind(),
            RequestKind::Export
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ParseResult::failure("Try again")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "filters": {}, "error": "Try again"})
        );

        let mut filters = ParsedFilters::new();
        filters.set(FilterField::Status, "Overdue");
        let json = serde_json::to_value(ParseResult::extracted(filters, true)).unwrap();
        assert_eq!(json["isCountRequest"], serde_json::json!(true));
        assert!(json.get("message").is_none());
    }
}
