// src/profile/mod.rs
//! Structured researcher profile extracted from one CV document.

pub mod assembler;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use assembler::analyze_batch;

/// Sentinel for document fields that could not be located.
pub const NOT_INFORMED: &str = "Not informed";
/// Sentinel for a document whose researcher name could not be located.
pub const NAME_NOT_FOUND: &str = "Name not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DegreeType {
    Postdoc,
    Doctorate,
    Masters,
    Specialization,
    Bachelors,
    Habilitation,
}

impl fmt::Display for DegreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DegreeType::Postdoc => "Postdoc",
            DegreeType::Doctorate => "Doctorate",
            DegreeType::Masters => "Master's",
            DegreeType::Specialization => "Specialization",
            DegreeType::Bachelors => "Bachelor's",
            DegreeType::Habilitation => "Habilitation",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    #[serde(rename = "type")]
    pub degree_type: DegreeType,
    /// Field of study; empty for degrees the CV lists without one.
    pub area: String,
    pub in_progress: bool,
}

/// The three tiers of the "areas of activity" listing, each insertion-ordered and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreasOfActivity {
    pub broad: Vec<String>,
    pub area: Vec<String>,
    pub sub: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeCounts {
    pub total: usize,
    pub undergrad: usize,
    pub masters: usize,
    pub doctorate: usize,
    pub qualification: usize,
}

/// A multi-author publication inside the year window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub file_name: String,
    pub name: String,
    /// First literal title seen for each fold key, in entry order.
    pub article_titles: Vec<String>,
    pub article_count: usize,
    pub current_institution: String,
    pub nationality: String,
    pub degrees: Vec<Degree>,
    pub areas_of_activity: AreasOfActivity,
    pub languages: Vec<String>,
    pub committee_counts: CommitteeCounts,
    pub collaborations: Vec<CollaborationRecord>,
}

/// Pushes `value` unless it is already present, keeping first-insertion order.
pub(crate) fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
