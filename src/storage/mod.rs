// src/storage/mod.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::graph::{CollaborationGraph, NodePosition};
use crate::profile::Profile;
use crate::report::{BatchSummary, NetworkDrawing, WordCloudItem};
use crate::utils::error::StorageError;

const UTF8_BOM: &str = "\u{feff}";
const CSV_HEADER: &str = "Researcher,Articles in Period,Committees,Current Institution,Nationality,Languages";

/// Word clouds for the three areas-of-activity tiers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WordClouds {
    pub broad: Vec<WordCloudItem>,
    pub area: Vec<WordCloudItem>,
    pub sub: Vec<WordCloudItem>,
}

/// A document that could not be read, kept for the run metadata.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub file: String,
    pub error: String,
}

/// Parameters and outcome of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub start_year: i32,
    pub end_year: i32,
    pub documents_requested: usize,
    pub documents_analyzed: usize,
    pub failures: Vec<LoadFailure>,
    pub seed: u64,
    pub ticks: usize,
    pub width: f64,
    pub height: f64,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory for per-document extraction dumps.
    pub fn debug_dir(&self) -> PathBuf {
        self.base_dir.join("debug")
    }

    /// Saves the full profiles as JSON
    pub fn save_profiles(&self, profiles: &[Profile]) -> Result<PathBuf, StorageError> {
        self.write_json("profiles.json", &profiles)
    }

    /// Saves the tabular profile export (UTF-8 with BOM, comma-delimited)
    pub fn save_profiles_csv(&self, profiles: &[Profile]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join("profiles.csv");

        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(UTF8_BOM.as_bytes()).map_err(StorageError::IoError)?;
        file.write_all(profiles_to_csv(profiles).as_bytes())
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved CSV export to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the batch aggregates together with the area word clouds
    pub fn save_summary(&self, summary: &BatchSummary, clouds: &WordClouds) -> Result<PathBuf, StorageError> {
        let document = serde_json::json!({
            "summary": summary,
            "word_clouds": clouds,
        });
        self.write_json("summary.json", &document)
    }

    /// Saves the collaboration network: nodes with their frozen positions, edges
    /// and the draw primitives derived from them
    pub fn save_network(
        &self,
        graph: &CollaborationGraph,
        positions: &[NodePosition],
        drawing: &NetworkDrawing,
    ) -> Result<PathBuf, StorageError> {
        let nodes: Vec<serde_json::Value> = graph
            .nodes
            .iter()
            .map(|node| {
                let position = positions.iter().find(|p| p.id == node.id);
                serde_json::json!({
                    "id": node.id,
                    "weight": node.weight,
                    "x": position.map(|p| p.x),
                    "y": position.map(|p| p.y),
                })
            })
            .collect();

        let document = serde_json::json!({
            "nodes": nodes,
            "edges": graph.edges,
            "record_count": graph.record_count,
            "drawing": drawing,
        });
        self.write_json("network.json", &document)
    }

    /// Saves run parameters, counts and failures, stamped with the current UTC time
    pub fn save_run_metadata(&self, meta: &RunMetadata) -> Result<PathBuf, StorageError> {
        let document = serde_json::json!({
            "run": meta,
            "generated_at": chrono::Utc::now().to_rfc3339(),
        });
        self.write_json("run_meta.json", &document)
    }

    fn write_json<T: Serialize + ?Sized>(&self, filename: &str, value: &T) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);

        let contents = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, contents).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} to {}", filename, file_path.display());
        Ok(file_path)
    }
}

/// CSV body (header plus one row per profile), without the byte-order mark.
pub fn profiles_to_csv(profiles: &[Profile]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for profile in profiles {
        let row = [
            quote(&profile.name),
            profile.article_count.to_string(),
            profile.committee_counts.total.to_string(),
            quote(&profile.current_institution),
            quote(&profile.nationality),
            quote(&profile.languages.join("; ")),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{AreasOfActivity, CommitteeCounts, NOT_INFORMED};

    fn profile(name: &str, languages: &[&str]) -> Profile {
        Profile {
            file_name: "cv.txt".to_string(),
            name: name.to_string(),
            article_titles: vec!["A first article title".to_string()],
            article_count: 1,
            current_institution: "Universidade Federal de Goiás".to_string(),
            nationality: NOT_INFORMED.to_string(),
            degrees: vec![],
            areas_of_activity: AreasOfActivity::default(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            committee_counts: CommitteeCounts {
                total: 3,
                ..CommitteeCounts::default()
            },
            collaborations: vec![],
        }
    }

    #[test]
    fn test_csv_rows_are_quoted_and_joined() {
        let csv = profiles_to_csv(&[profile("Ana \"Bia\" Souza", &["Português", "Inglês"])]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "\"Ana \"\"Bia\"\" Souza\",1,3,\"Universidade Federal de Goiás\",\"Not informed\",\"Português; Inglês\""
        );
    }

    #[test]
    fn test_csv_file_starts_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let path = storage.save_profiles_csv(&[profile("Ana Souza", &[])]).unwrap();
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.ends_with("\"Not informed\",\"\"\n"), "Empty language list is an empty quoted field");
    }

    #[test]
    fn test_json_outputs_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let profiles = vec![profile("Ana Souza", &["Português"])];

        storage.save_profiles(&profiles).unwrap();
        let graph = CollaborationGraph::default();
        storage
            .save_summary(&BatchSummary::build(&profiles, &graph), &WordClouds::default())
            .unwrap();
        storage.save_network(&graph, &[], &NetworkDrawing::default()).unwrap();
        let meta_path = storage
            .save_run_metadata(&RunMetadata {
                start_year: 2020,
                end_year: 2022,
                documents_requested: 2,
                documents_analyzed: 1,
                failures: vec![LoadFailure {
                    file: "missing.txt".into(),
                    error: "not found".into(),
                }],
                seed: 7,
                ticks: 300,
                width: 800.0,
                height: 600.0,
            })
            .unwrap();

        let saved: Vec<Profile> =
            serde_json::from_str(&fs::read_to_string(dir.path().join("profiles.json")).unwrap()).unwrap();
        assert_eq!(saved, profiles);

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["summary"]["document_count"], 1);

        let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(meta_path).unwrap()).unwrap();
        assert_eq!(meta["run"]["failures"][0]["file"], "missing.txt");
        assert!(meta["generated_at"].is_string());
        assert!(dir.path().join("network.json").exists());
    }
}
