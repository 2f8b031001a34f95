//! Vocabulary validation of extracted candidates
//!
//! When the caller supplies the current option lists, a candidate survives only
//! if it matches one of them, and it takes that option's spelling. Without a
//! list (or with an empty one) the candidate is accepted as extracted.

use report_filter_core::{AvailableOptions, FilterField};

use crate::normalize::normalize;

/// Checks candidates against caller-supplied vocabularies
#[derive(Debug, Clone, Copy)]
pub struct VocabularyValidator {
    partial_email_match: bool,
}

impl VocabularyValidator {
    pub fn new(partial_email_match: bool) -> Self {
        Self {
            partial_email_match,
        }
    }

    /// Validated value for `candidate`, or `None` when it must be dropped
    pub fn validate(
        &self,
        field: FilterField,
        candidate: &str,
        options: Option<&AvailableOptions>,
    ) -> Option<String> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }

        let Some(vocabulary) = options.and_then(|options| options.for_field(field)) else {
            return Some(candidate.to_string());
        };

        let normalized = normalize(candidate);
        if let Some(exact) = vocabulary.iter().find(|option| normalize(option) == normalized) {
            return Some(exact.clone());
        }

        if field == FilterField::ResponsibleEmail && self.partial_email_match {
            if let Some(partial) = match_email_local_part(&normalized, vocabulary) {
                tracing::debug!(candidate, matched = %partial, "Partial e-mail match");
                return Some(partial.clone());
            }
        }

        tracing::debug!(field = %field, candidate, "Candidate not in vocabulary, dropped");
        None
    }
}

impl Default for VocabularyValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

/// First e-mail whose local part contains the candidate, or is contained in it
///
/// Names are compared in e-mail form: "Jane Doe" is looked up as "jane.doe".
fn match_email_local_part<'a>(normalized: &str, emails: &'a [String]) -> Option<&'a String> {
    let local = normalized.split('@').next().unwrap_or(normalized);
    let needle = local.split_whitespace().collect::<Vec<_>>().join(".");
    if needle.is_empty() {
        return None;
    }

    emails.iter().find(|email| {
        let email = normalize(email);
        let known = email.split('@').next().unwrap_or(&email);
        !known.is_empty() && (known.contains(needle.as_str()) || needle.contains(known))
    })
}
