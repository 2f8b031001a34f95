//! Locale-insensitive text normalization
//!
//! Every matcher compares text through [`normalize`] so that case and
//! diacritics never decide a match: `"İşlem"`, `"ISLEM"` and `"islem"` all
//! normalize to `"islem"`.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Lower-case, strip combining diacritical marks, trim
///
/// The Turkish dotless `ı` has no combining decomposition, so it is folded to
/// `i` explicitly; otherwise `"AÇIK"` (lower-cased to `"açik"`) and `"açık"`
/// would normalize differently.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Words of an already-normalized text, in order
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.unicode_words().collect()
}

/// Raw word written in capitals with at least two letters ("IT", "CEO")
///
/// Only meaningful when the surrounding text is not shouted; see [`is_shouted`].
pub fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

/// Text with letters but no lower-case ones, where capitals carry no meaning
pub fn is_shouted(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_diacritics() {
        assert_eq!(normalize("İşlem"), "islem");
        assert_eq!(normalize("ISLEM"), "islem");
        assert_eq!(normalize("AÇIK"), "acik");
        assert_eq!(normalize("açık"), "acik");
        assert_eq!(normalize("Gecikmiş"), "gecikmis");
        assert_eq!(normalize("Düşük"), "dusuk");
        assert_eq!(normalize("Café Déjà Vu"), "cafe deja vu");
    }

    #[test]
    fn test_trims_but_keeps_punctuation() {
        assert_eq!(normalize("  Overdue, 2024+!  "), "overdue, 2024+!");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_words() {
        let normalized = normalize("Export ALL actions, for all years!");
        assert_eq!(
            words(&normalized),
            vec!["export", "all", "actions", "for", "all", "years"]
        );
    }

    #[test]
    fn test_acronyms_and_shouting() {
        assert!(is_acronym("IT"));
        assert!(is_acronym("CISO"));
        assert!(is_acronym("İK"));
        assert!(!is_acronym("It"));
        assert!(!is_acronym("it"));
        assert!(!is_acronym("A"));
        assert!(!is_acronym("2024"));

        assert!(is_shouted("EXPORT IT"));
        assert!(is_shouted("AÇIK 2024"));
        assert!(!is_shouted("Open actions for IT General Controls audit"));
        assert!(!is_shouted("2024"));
    }
}
