// src/extractors/entries.rs
use once_cell::sync::Lazy;
use regex::Regex;

// A list item starts at a line holding nothing but "<n>."
static ENTRY_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s*$").expect("Failed to compile ENTRY_MARKER_RE"));

/// Splits a numbered block into entries, in source order. Each entry is the
/// trimmed text between one marker line and the next; empty entries are dropped.
pub fn split_entries(block: &str) -> Vec<String> {
    let text = block.replace('\r', "");
    let markers: Vec<(usize, usize)> = ENTRY_MARKER_RE
        .find_iter(&text)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, content_start))| {
            let content_end = markers.get(i + 1).map(|&(next, _)| next).unwrap_or(text.len());
            let chunk = text[content_start..content_end].trim();
            (!chunk.is_empty()).then(|| chunk.to_string())
        })
        .collect()
}

/// Number of list markers in a block, used where only the size of a listing matters.
pub fn count_entries(block: &str) -> usize {
    ENTRY_MARKER_RE.find_iter(&block.replace('\r', "")).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entries_on_number_lines() {
        let block = "1.\nFIRST, A. . Title one . J, v. 1, 2020.\n2. \r\nSECOND, B. . Title two . K, v. 2, 2021.\n";
        let entries = split_entries(block);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], "FIRST, A. . Title one . J, v. 1, 2020.");
        assert_eq!(entries[1], "SECOND, B. . Title two . K, v. 2, 2021.");
    }

    #[test]
    fn test_inline_numbers_are_not_markers() {
        let block = "1.\nText mentioning 2. inside a line\nand v. 3. more";
        let entries = split_entries(block);
        assert_eq!(entries, vec!["Text mentioning 2. inside a line\nand v. 3. more"]);
    }

    #[test]
    fn test_empty_entries_are_dropped() {
        let block = "1.\n\n2.\nOnly this one\n3.\n   ";
        assert_eq!(split_entries(block), vec!["Only this one"]);
        assert!(split_entries("no markers at all").is_empty());
    }

    #[test]
    fn test_count_entries() {
        assert_eq!(count_entries("1.\nA\n2.\nB\n3.\nC"), 3);
        assert_eq!(count_entries("\n\n"), 0);
    }
}
