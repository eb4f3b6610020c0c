// src/extractors/entry.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::normalize::collapse_whitespace;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)(?:19|20)\d{2}(?-u:\b)").expect("Failed to compile YEAR_RE"));

static AUTHOR_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*;\s*").expect("Failed to compile AUTHOR_SPLIT_RE"));

static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("Failed to compile LEADING_NUMBER_RE"));

/// The last 4-digit year token (1900-2099) of an entry. Publication years close
/// the entry, so earlier tokens (volume numbers, event years) are ignored.
pub fn extract_year(entry: &str) -> Option<i32> {
    YEAR_RE
        .find_iter(entry)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}

/// Authors listed before the first `" . "` separator, `;`-delimited.
/// A token counts as an author only when it looks like "SURNAME, INITIALS".
pub fn extract_authors(entry: &str) -> Vec<String> {
    let line = collapse_whitespace(entry);
    let mut parts = line.split(" . ");
    let authors = match (parts.next(), parts.next()) {
        (Some(authors), Some(_)) => authors,
        _ => return Vec::new(),
    };

    AUTHOR_SPLIT_RE
        .split(authors)
        .map(|token| LEADING_NUMBER_RE.replace(token.trim(), "").trim().to_string())
        .filter(|author| author.chars().count() > 2 && author.contains(','))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year_takes_last_token() {
        assert_eq!(extract_year("ANAIS 1998, v. 12, p. 3, 2021."), Some(2021));
        assert_eq!(extract_year("v. 10, p. 1-15, 2021."), Some(2021));
    }

    #[test]
    fn test_extract_year_ignores_out_of_range_and_embedded_digits() {
        assert_eq!(extract_year("Volume 1850, page 2150"), None);
        assert_eq!(extract_year("DOI 10.1000/12021345"), None);
        assert_eq!(extract_year("no year at all"), None);
    }

    #[test]
    fn test_extract_year_after_accented_letter() {
        // Word boundaries are ASCII: an accented letter does not glue to the digits.
        assert_eq!(extract_year("Revista Ciência é2021."), Some(2021));
        assert_eq!(extract_year("Edição2019"), None);
    }

    #[test]
    fn test_extract_authors_from_spaced_entry() {
        let entry = "SMITH, J.; DOE, A. . Neural networks for time series forecasting . Journal of Data Science, v. 10, p. 1-15, 2021.";
        assert_eq!(extract_authors(entry), vec!["SMITH, J.", "DOE, A."]);
    }

    #[test]
    fn test_extract_authors_drops_tokens_without_comma() {
        let entry = "SMITH, J.; et al;  DOE,\nA. . Title here . V";
        assert_eq!(extract_authors(entry), vec!["SMITH, J.", "DOE, A."]);
    }

    #[test]
    fn test_extract_authors_strips_leading_list_number() {
        let entry = "1. SOUZA, M. . Some title of the work . V";
        assert_eq!(extract_authors(entry), vec!["SOUZA, M."]);
    }

    #[test]
    fn test_extract_authors_requires_separator() {
        assert!(extract_authors("SMITH, J.; DOE, A. Title. Venue, v. 1, 2020.").is_empty());
    }
}
