// src/utils/debug_dump.rs
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cv::{RawDocument, YearWindow};
use crate::extractors::{extract_authors, extract_year, publication_blocks, split_entries, TitleCascade};
use crate::utils::error::AppError;

/// Renders a plain-text trace of how one document's publications were read:
/// each located block, each tokenized entry, and the year/title/author decisions.
pub fn render_extraction_dump(document: &RawDocument, window: YearWindow) -> String {
    let cascade = TitleCascade::standard();
    let mut out = String::new();

    let _ = writeln!(out, "# {}", document.file_name);
    let _ = writeln!(out, "window: {}-{}", window.start(), window.end());
    let _ = writeln!(out, "title strategies: {}", cascade.strategy_names().join(" > "));

    let blocks = publication_blocks(&document.text);
    let _ = writeln!(out, "publication blocks: {}", blocks.len());

    for (block_index, block) in blocks.iter().enumerate() {
        let entries = split_entries(block);
        let _ = writeln!(
            out,
            "\n## block {} ({} chars, {} entries)",
            block_index + 1,
            block.chars().count(),
            entries.len()
        );

        for (entry_index, entry) in entries.iter().enumerate() {
            let _ = writeln!(out, "\n[{}] {}", entry_index + 1, entry.replace('\n', " "));
            match extract_year(entry) {
                Some(year) if window.contains(year) => {
                    let _ = writeln!(out, "    year: {} (in window)", year);
                }
                Some(year) => {
                    let _ = writeln!(out, "    year: {} (outside window)", year);
                }
                None => {
                    let _ = writeln!(out, "    year: none");
                }
            }
            match cascade.extract(entry) {
                Some(m) => {
                    let _ = writeln!(out, "    title [{}]: {}", m.strategy, m.title);
                }
                None => {
                    let _ = writeln!(out, "    title: none");
                }
            }
            let authors = extract_authors(entry);
            let _ = writeln!(out, "    authors ({}): {}", authors.len(), authors.join(" | "));
        }
    }

    out
}

/// Writes the dump for one document under `debug_dir`, named after the document.
pub fn save_extraction_dump(
    document: &RawDocument,
    window: YearWindow,
    debug_dir: &Path,
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(debug_dir)?;

    let stem = Path::new(&document.file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let path = debug_dir.join(format!("{}_extraction.txt", stem));

    fs::write(&path, render_extraction_dump(document, window))?;
    tracing::info!("Saved extraction dump to {}", path.display());
    Ok(path)
}
