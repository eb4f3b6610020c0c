// src/report/summary.rs
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::extractors::fold_key;
use crate::graph::CollaborationGraph;
use crate::profile::{DegreeType, Profile, NOT_INFORMED};

// Degree types shown in the batch breakdown, in display order.
const REPORTED_DEGREES: [DegreeType; 5] = [
    DegreeType::Postdoc,
    DegreeType::Doctorate,
    DegreeType::Masters,
    DegreeType::Specialization,
    DegreeType::Bachelors,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaFrequencies {
    pub broad: Vec<FrequencyEntry>,
    pub area: Vec<FrequencyEntry>,
    pub sub: Vec<FrequencyEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLegend {
    pub authors: usize,
    pub connections: usize,
    pub collaborative_records: usize,
}

/// Aggregates over every profile of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub document_count: usize,
    pub unique_article_count: usize,
    /// First literal title for each fold key across the batch, sorted.
    pub unique_titles: Vec<String>,
    pub unique_institution_count: usize,
    pub committee_total: usize,
    pub institutions: Vec<FrequencyEntry>,
    pub nationalities: Vec<FrequencyEntry>,
    pub degree_types: Vec<FrequencyEntry>,
    pub languages: Vec<FrequencyEntry>,
    pub areas: AreaFrequencies,
    pub network: NetworkLegend,
}

impl BatchSummary {
    pub fn build(profiles: &[Profile], graph: &CollaborationGraph) -> Self {
        let unique_titles = unique_titles(profiles);

        let institutions = tally(
            profiles
                .iter()
                .map(|p| p.current_institution.as_str())
                .filter(|institution| *institution != NOT_INFORMED),
        );

        let mut languages = tally(profiles.iter().flat_map(|p| p.languages.iter()));
        // Stable: ties keep first-seen order.
        languages.sort_by(|a, b| b.count.cmp(&a.count));

        let summary = Self {
            document_count: profiles.len(),
            unique_article_count: unique_titles.len(),
            unique_titles,
            unique_institution_count: institutions.len(),
            committee_total: profiles.iter().map(|p| p.committee_counts.total).sum(),
            institutions,
            nationalities: tally(profiles.iter().map(|p| p.nationality.as_str())),
            degree_types: degree_breakdown(profiles),
            languages,
            areas: AreaFrequencies {
                broad: tally(profiles.iter().flat_map(|p| p.areas_of_activity.broad.iter())),
                area: tally(profiles.iter().flat_map(|p| p.areas_of_activity.area.iter())),
                sub: tally(profiles.iter().flat_map(|p| p.areas_of_activity.sub.iter())),
            },
            network: NetworkLegend {
                authors: graph.nodes.len(),
                connections: graph.edges.len(),
                collaborative_records: graph.record_count,
            },
        };

        tracing::info!(
            "Batch summary: {} documents, {} unique articles, {} institutions, {} committees",
            summary.document_count,
            summary.unique_article_count,
            summary.unique_institution_count,
            summary.committee_total
        );
        summary
    }
}

/// Counts occurrences, keeping the order in which labels were first seen.
pub fn tally<I, S>(values: I) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: Vec<FrequencyEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in values {
        let label = value.as_ref();
        match index.get(label) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(label.to_string(), entries.len());
                entries.push(FrequencyEntry {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    entries
}

fn unique_titles(profiles: &[Profile]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut titles: Vec<String> = profiles
        .iter()
        .flat_map(|p| p.article_titles.iter())
        .filter(|title| {
            let key = fold_key(title);
            !key.is_empty() && seen.insert(key)
        })
        .cloned()
        .collect();
    titles.sort();
    titles
}

fn degree_breakdown(profiles: &[Profile]) -> Vec<FrequencyEntry> {
    REPORTED_DEGREES
        .iter()
        .map(|degree_type| FrequencyEntry {
            label: degree_type.to_string(),
            count: profiles
                .iter()
                .flat_map(|p| p.degrees.iter())
                .filter(|d| d.degree_type == *degree_type)
                .count(),
        })
        .filter(|entry| entry.count > 0)
        .collect()
}
