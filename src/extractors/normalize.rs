// src/extractors/normalize.rs
//! Canonical text forms used by the rest of the extraction pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE"));

static NON_KEY_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("Failed to compile NON_KEY_CHAR_RE"));

/// Collapses line breaks and whitespace runs to single spaces and maps
/// typographic punctuation to its ASCII form (curly quotes, ellipsis, en/em dash).
pub fn normalize_for_matching(text: &str) -> String {
    let collapsed = collapse_whitespace(text);

    collapsed
        .chars()
        .fold(String::with_capacity(collapsed.len()), |mut out, c| {
            match c {
                '\u{2018}' | '\u{2019}' => out.push('\''),
                '\u{201C}' | '\u{201D}' => out.push('"'),
                '\u{2026}' => out.push_str("..."),
                '\u{2013}' | '\u{2014}' => out.push('-'),
                other => out.push(other),
            }
            out
        })
}

/// Joins lines and squeezes every whitespace run into one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text.trim(), " ").into_owned()
}

/// Equality key for titles: lowercase, diacritics stripped, anything outside
/// `[a-z0-9]` turned into a space, whitespace collapsed and trimmed.
pub fn fold_key(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let spaced = NON_KEY_CHAR_RE.replace_all(&stripped, " ");
    WHITESPACE_RUN_RE.replace_all(&spaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace_and_punctuation() {
        let raw = "A \u{201C}deep\u{201D}\n\n  study \u{2013} part\u{2026}  it\u{2019}s";
        assert_eq!(normalize_for_matching(raw), "A \"deep\" study - part... it's");
    }

    #[test]
    fn test_fold_key_ignores_case_punctuation_and_spacing() {
        assert_eq!(fold_key("Machine Learning Methods"), "machine learning methods");
        assert_eq!(fold_key("MACHINE  LEARNING, methods!"), "machine learning methods");
    }

    #[test]
    fn test_fold_key_strips_diacritics() {
        assert_eq!(fold_key("Avaliação de Políticas Públicas"), "avaliacao de politicas publicas");
        assert_eq!(fold_key("Séries-temporais"), "series temporais");
    }

    #[test]
    fn test_fold_key_of_punctuation_only_is_empty() {
        assert_eq!(fold_key(" -- ?! "), "");
    }
}
