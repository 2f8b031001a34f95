//! Follow-up detection
//!
//! A request like "export them" or "also the critical ones" refers back to the
//! previous turn. When that happens the previous filter set seeds the result
//! and fresh extraction only overwrites what the new request mentions.

use once_cell::sync::Lazy;
use regex::Regex;
use report_filter_core::ParsedFilters;

use crate::normalize::{is_shouted, normalize};

/// Pronouns and continuation cues (normalized, so Turkish forms lose diacritics)
static REFERENCE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:them|those|these|same|also|too|as\s+well|again|onlari|bunlari|sunlari|bunu|onu|sunu|ayni|ayrica|yine|tekrar|de\s+ekle)\b",
    )
    .unwrap()
});

/// "it" as a pronoun; checked on the raw text so the acronym "IT" does not count
static PRONOUN_IT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:it|It|iT)\b").unwrap());

/// Export-only utterances: "export", "export pls", "please export them", "onları dışa aktar"
static SIMPLE_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:please|pls|plz|lutfen|onlari|bunlari|hepsini|tekrar)\s+)*(?:export|download|send|disa\s+aktar|indir|gonder)(?:\s+(?:it|them|those|these|that|all|again|too|now|please|pls|plz|me|to\s+me|the\s+(?:same|list|report|file|results?)|lutfen|onlari|bunlari|hepsini|tekrar))*[\s!.?]*$",
    )
    .unwrap()
});

/// The text contains a pronoun or continuation cue
pub fn has_reference_words(text: &str) -> bool {
    if REFERENCE_WORDS.is_match(&normalize(text)) {
        return true;
    }
    if is_shouted(text) {
        return PRONOUN_IT.is_match(&text.to_lowercase());
    }
    PRONOUN_IT.is_match(text)
}

/// The text is nothing more than an export command
pub fn is_simple_export_request(text: &str) -> bool {
    SIMPLE_EXPORT.is_match(&normalize(text))
}

/// Whether `previous` should seed the result for this request
pub fn should_carry_over(text: &str, previous: Option<&ParsedFilters>) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    if previous.is_empty() {
        return false;
    }

    let referenced = has_reference_words(text);
    let simple_export = !referenced && is_simple_export_request(text);
    if referenced || simple_export {
        tracing::debug!(
            referenced,
            simple_export,
            carried = previous.len(),
            "Carrying over previous filters"
        );
        return true;
    }
    false
}
