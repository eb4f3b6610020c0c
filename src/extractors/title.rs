// src/extractors/title.rs
//! Title extraction for one publication entry.
//!
//! Entries follow the loose "AUTHORS . TITLE . VENUE, v. X, p. Y, YEAR." convention,
//! but exports drift: the separators lose their spaces, venues get glued to the
//! title, conference entries use "In:". Each variant is handled by one named
//! strategy; the cascade tries them in a fixed order and the first accepted
//! candidate wins. Reordering the strategies changes extraction results.

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::normalize::normalize_for_matching;

// --- Constants ---
const SEPARATOR: &str = " . ";
const MIN_CANDIDATE_CHARS: usize = 15;
// Two or more semicolons means an author list was picked up instead of a title.
const MAX_SEMICOLONS: usize = 1;

// --- Regex Patterns (Lazy Static) ---
// ". Venue Name (" or ". Venue Name, ... v." glued after the title
static VENUE_CLAUSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s+[A-Z][A-Za-zÀ-ÿ\s&]+\s*[(,][^.]*v\.").expect("Failed to compile VENUE_CLAUSE_RE")
});

// "J. S." style initials
static ABBREVIATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]\.\s*[A-Z]\.").expect("Failed to compile ABBREVIATION_RE"));

static TITLE_BEFORE_VENUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s+([^.]{15,}?)\.\s+[A-Z][A-Za-zÀ-ÿ\s&]+\s*[(,][^.]*v\.")
        .expect("Failed to compile TITLE_BEFORE_VENUE_RE")
});

static TITLE_BEFORE_LOOSE_VENUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s+([^.]{15,}?)\.\s+(?:In:|[A-Z][A-Z\s&]*[A-Z]\s*[(,]|v\.)")
        .expect("Failed to compile TITLE_BEFORE_LOOSE_VENUE_RE")
});

static CAPITALIZED_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s+([A-ZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ][^.]{14,}?)\.\s+[A-Z]")
        .expect("Failed to compile CAPITALIZED_RUN_RE")
});

// Venue still attached after acceptance: ". nome da revista, v. 7 ..."
static TRAILING_VENUE_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\.\s+[a-z][a-zA-ZÀ-ÿ\s&]+,\s*v\.\s*\d+.*$",
        r"\.\s+[A-Z][A-Z\s&]+,\s*v\.\s*\d+.*$",
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("Failed to compile TRAILING_VENUE_RE"))
    .collect()
});

// --- Strategy Trait ---
/// One way of pulling a title out of a normalized entry line.
pub trait TitleStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns an accepted candidate, or `None` to let the next strategy try.
    fn extract(&self, line: &str) -> Option<String>;
}

/// Walks the `" . "`-separated fields after the authors and takes the first
/// long enough field, after cutting off a venue clause glued to it.
pub struct SeparatorStrategy;

impl TitleStrategy for SeparatorStrategy {
    fn name(&self) -> &'static str {
        "separator"
    }

    fn extract(&self, line: &str) -> Option<String> {
        let parts: Vec<&str> = line.split(SEPARATOR).collect();
        if parts.len() < 2 {
            return None;
        }

        parts.iter().skip(1).find_map(|part| {
            let mut candidate = part.trim();
            if let Some(venue) = VENUE_CLAUSE_RE.find(candidate) {
                candidate = candidate[..venue.start()].trim();
            }

            let accepted = candidate.chars().count() >= MIN_CANDIDATE_CHARS
                && !ABBREVIATION_RE.is_match(candidate)
                && semicolons(candidate) <= MAX_SEMICOLONS;
            accepted.then(|| candidate.to_string())
        })
    }
}

/// A capture-group strategy: the title is group 1 of a single pattern.
pub struct PatternStrategy {
    name: &'static str,
    pattern: &'static Lazy<Regex>,
}

impl TitleStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, line: &str) -> Option<String> {
        let captures = self.pattern.captures(line)?;
        let title = captures.get(1)?.as_str().trim();
        let accepted = title.chars().count() >= MIN_CANDIDATE_CHARS && semicolons(title) <= MAX_SEMICOLONS;
        accepted.then(|| title.to_string())
    }
}

/// A title accepted by the cascade, with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    pub title: String,
    pub strategy: &'static str,
}

/// Ordered list of strategies, evaluated with short-circuit on the first acceptance.
pub struct TitleCascade {
    strategies: Vec<Box<dyn TitleStrategy>>,
}

impl TitleCascade {
    /// The fixed production order: separator split, title before a full venue
    /// clause, title before a loose venue ("In:", caps header, "v."), capitalized run.
    pub fn standard() -> Self {
        Self {
            strategies: vec![
                Box::new(SeparatorStrategy),
                Box::new(PatternStrategy {
                    name: "venue-lookahead",
                    pattern: &TITLE_BEFORE_VENUE_RE,
                }),
                Box::new(PatternStrategy {
                    name: "loose-venue",
                    pattern: &TITLE_BEFORE_LOOSE_VENUE_RE,
                }),
                Box::new(PatternStrategy {
                    name: "capitalized-run",
                    pattern: &CAPITALIZED_RUN_RE,
                }),
            ],
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, entry: &str) -> Option<TitleMatch> {
        let line = normalize_for_matching(entry);
        if line.is_empty() {
            return None;
        }

        for strategy in &self.strategies {
            if let Some(candidate) = strategy.extract(&line) {
                let title = strip_trailing_venue(&candidate);
                tracing::trace!("Title accepted by '{}' strategy: {}", strategy.name(), title);
                return Some(TitleMatch {
                    title,
                    strategy: strategy.name(),
                });
            }
        }

        tracing::trace!("No title strategy accepted entry: {}", line);
        None
    }
}

static STANDARD_CASCADE: Lazy<TitleCascade> = Lazy::new(TitleCascade::standard);

/// Title of one publication entry using the standard cascade.
pub fn extract_title(entry: &str) -> Option<String> {
    STANDARD_CASCADE.extract(entry).map(|m| m.title)
}

/// Cuts a venue clause (", v. <digits>") still glued to the end of an accepted title.
pub fn strip_trailing_venue(title: &str) -> String {
    for re in TRAILING_VENUE_RE.iter() {
        if let Some(m) = re.find(title) {
            return title[..m.start()].trim().to_string();
        }
    }
    title.to_string()
}

fn semicolons(text: &str) -> usize {
    text.matches(';').count()
}
