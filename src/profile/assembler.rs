// src/profile/assembler.rs
use std::collections::HashSet;

use crate::cv::{RawDocument, YearWindow};
use crate::extractors::{
    extract_academic_degrees, extract_areas_of_activity, extract_authors, extract_committee_counts,
    extract_current_institution, extract_languages, extract_name, extract_nationality, extract_title,
    extract_year, fold_key, publication_blocks, split_entries,
};
use crate::profile::{CollaborationRecord, Profile};

// Shorter "titles" are almost always venue fragments.
const MIN_TITLE_CHARS: usize = 10;

/// Publications of one document that survived the year and title filters.
#[derive(Debug, Default)]
struct PublicationScan {
    titles: Vec<String>,
    collaborations: Vec<CollaborationRecord>,
}

fn scan_publications(text: &str, window: YearWindow) -> PublicationScan {
    let mut scan = PublicationScan::default();
    // Dedup is per document: the same article in two CVs counts for both.
    let mut seen_keys = HashSet::new();

    let entries: Vec<String> = publication_blocks(text)
        .into_iter()
        .flat_map(split_entries)
        .collect();
    tracing::debug!("Tokenized {} publication entries", entries.len());

    for entry in &entries {
        let Some(year) = extract_year(entry) else {
            tracing::trace!("Entry rejected, no year: {}", entry);
            continue;
        };
        if !window.contains(year) {
            tracing::trace!("Entry rejected, {} outside {}-{}", year, window.start(), window.end());
            continue;
        }
        let title = match extract_title(entry) {
            Some(title) if title.chars().count() >= MIN_TITLE_CHARS => title,
            _ => {
                tracing::trace!("Entry rejected, no usable title: {}", entry);
                continue;
            }
        };

        let authors = extract_authors(entry);
        if authors.len() >= 2 {
            scan.collaborations.push(CollaborationRecord {
                title: title.clone(),
                authors,
                year,
            });
        }

        let key = fold_key(&title);
        if key.is_empty() || !seen_keys.insert(key) {
            tracing::trace!("Entry not counted, duplicate title: {}", title);
            continue;
        }
        scan.titles.push(title);
    }

    scan
}

/// Builds the profile of one document. Each field is extracted independently,
/// so a missing section only blanks its own field.
pub fn assemble_profile(document: &RawDocument, window: YearWindow) -> Profile {
    let text = document.text.as_str();
    let scan = scan_publications(text, window);

    let profile = Profile {
        file_name: document.file_name.clone(),
        name: extract_name(text),
        article_count: scan.titles.len(),
        article_titles: scan.titles,
        current_institution: extract_current_institution(text),
        nationality: extract_nationality(text),
        degrees: extract_academic_degrees(text),
        areas_of_activity: extract_areas_of_activity(text),
        languages: extract_languages(text),
        committee_counts: extract_committee_counts(text),
        collaborations: scan.collaborations,
    };

    tracing::info!(
        "{}: '{}' with {} articles, {} collaborations, institution '{}'",
        document.file_name,
        profile.name,
        profile.article_count,
        profile.collaborations.len(),
        profile.current_institution
    );
    profile
}

/// Profiles for a batch, in input order.
pub fn analyze_batch(documents: &[RawDocument], window: YearWindow) -> Vec<Profile> {
    documents
        .iter()
        .map(|document| assemble_profile(document, window))
        .collect()
}
