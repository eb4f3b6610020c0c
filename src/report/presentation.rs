// src/report/presentation.rs
//! Pure mappings from analysis results to drawable elements. Rendering them
//! (HTML, SVG, a plotting library) is left to whoever consumes the output.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{CollaborationGraph, NodePosition};
use crate::report::summary::FrequencyEntry;

pub const BROAD_AREA_PALETTE: [&str; 6] = ["#07449c", "#08459c", "#3368b7", "#4a8ccd", "#91c4ec", "#444c54"];
pub const AREA_PALETTE: [&str; 6] = ["#08459c", "#3368b7", "#4a8ccd", "#91c4ec", "#07449c", "#444c54"];
pub const SUB_AREA_PALETTE: [&str; 6] = ["#3368b7", "#4a8ccd", "#91c4ec", "#07449c", "#08459c", "#444c54"];

// Zero is listed three times so most words stay level.
const ROTATIONS: [i32; 9] = [-15, -10, -5, 0, 0, 0, 5, 10, 15];
const MIN_SIZE_EM: f64 = 1.0;
const SIZE_RANGE_EM: f64 = 1.8;

const EDGE_COLOR: &str = "#4a8ccd";
const NODE_COLOR: &str = "#07449c";
const MAX_STROKE_WIDTH: f64 = 5.0;
const MIN_NODE_RADIUS: f64 = 6.0;
const NODE_RADIUS_RANGE: f64 = 14.0;
const LABEL_OFFSET: f64 = 12.0;
const LABEL_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudItem {
    pub text: String,
    pub count: usize,
    pub size_em: f64,
    pub color: String,
    pub bold: bool,
    pub rotation: i32,
}

/// Word cloud items ordered by descending frequency (ties keep input order).
/// Rotations are drawn from `rng`; everything else is deterministic.
pub fn word_cloud<R: Rng + ?Sized>(
    frequencies: &[FrequencyEntry],
    palette: &[&str],
    rng: &mut R,
) -> Vec<WordCloudItem> {
    let mut sorted: Vec<&FrequencyEntry> = frequencies.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    let max = first.count as f64;
    let min = last.count as f64;
    let range = if max > min { max - min } else { 1.0 };

    sorted
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let normalized = (entry.count as f64 - min) / range;
            WordCloudItem {
                text: entry.label.clone(),
                count: entry.count,
                size_em: MIN_SIZE_EM + normalized * SIZE_RANGE_EM,
                color: palette
                    .get(index % palette.len().max(1))
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                bold: normalized > 0.5,
                rotation: ROTATIONS[rng.gen_range(0..ROTATIONS.len())],
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleElement {
    pub id: String,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDrawing {
    pub lines: Vec<LineElement>,
    pub circles: Vec<CircleElement>,
    pub labels: Vec<LabelElement>,
}

/// Lines for edges, then circles and labels for nodes. Nodes or edges without
/// a position are skipped.
pub fn network_primitives(graph: &CollaborationGraph, positions: &[NodePosition]) -> NetworkDrawing {
    let position = |id: &str| positions.iter().find(|p| p.id == id);
    let mut drawing = NetworkDrawing::default();

    for edge in &graph.edges {
        let (Some(source), Some(target)) = (position(edge.source.as_str()), position(edge.target.as_str())) else {
            continue;
        };
        drawing.lines.push(LineElement {
            x1: source.x,
            y1: source.y,
            x2: target.x,
            y2: target.y,
            stroke_width: stroke_width(edge.weight),
            color: EDGE_COLOR.to_string(),
        });
    }

    let max_weight = graph.max_node_weight();
    for node in &graph.nodes {
        let Some(p) = position(node.id.as_str()) else {
            continue;
        };
        let radius = node_radius(node.weight, max_weight);
        drawing.circles.push(CircleElement {
            id: node.id.clone(),
            cx: p.x,
            cy: p.y,
            radius,
            color: NODE_COLOR.to_string(),
        });
        if shows_label(node.weight, max_weight) {
            drawing.labels.push(LabelElement {
                text: short_label(&node.id).to_string(),
                x: p.x,
                y: p.y + radius + LABEL_OFFSET,
            });
        }
    }

    drawing
}

pub fn stroke_width(weight: usize) -> f64 {
    (weight as f64 * 1.5).min(MAX_STROKE_WIDTH)
}

pub fn node_radius(weight: usize, max_weight: usize) -> f64 {
    if max_weight == 0 {
        return MIN_NODE_RADIUS;
    }
    MIN_NODE_RADIUS + (weight as f64 / max_weight as f64) * NODE_RADIUS_RANGE
}

pub fn shows_label(weight: usize, max_weight: usize) -> bool {
    weight as f64 >= (max_weight as f64 * LABEL_THRESHOLD).max(1.0)
}

/// Surname part of a citation-style author string ("SMITH, J." -> "SMITH").
pub fn short_label(author: &str) -> &str {
    author.split(',').next().unwrap_or(author)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CollaborationRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(label: &str, count: usize) -> FrequencyEntry {
        FrequencyEntry {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_word_cloud_sizes_and_colors() {
        let frequencies = vec![entry("Física", 1), entry("Química", 5), entry("Biologia", 3)];
        let mut rng = StdRng::seed_from_u64(3);
        let items = word_cloud(&frequencies, &BROAD_AREA_PALETTE, &mut rng);

        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Química", "Biologia", "Física"]);
        assert!((items[0].size_em - 2.8).abs() < 1e-9);
        assert!((items[1].size_em - 1.9).abs() < 1e-9);
        assert!((items[2].size_em - 1.0).abs() < 1e-9);
        assert!(items[0].bold);
        assert!(!items[1].bold, "Exactly half is not bold");
        assert_eq!(items[2].color, BROAD_AREA_PALETTE[2]);
        assert!(items.iter().all(|i| ROTATIONS.contains(&i.rotation)));
    }

    #[test]
    fn test_word_cloud_equal_counts_and_empty_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let items = word_cloud(&[entry("A", 2), entry("B", 2)], &AREA_PALETTE, &mut rng);
        assert!(items.iter().all(|i| i.size_em == 1.0 && !i.bold));
        assert!(word_cloud(&[], &AREA_PALETTE, &mut rng).is_empty());
    }

    #[test]
    fn test_word_cloud_palette_wraps() {
        let frequencies: Vec<FrequencyEntry> = (0..8).map(|i| entry(&format!("w{}", i), 8 - i)).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let items = word_cloud(&frequencies, &SUB_AREA_PALETTE, &mut rng);
        assert_eq!(items[6].color, SUB_AREA_PALETTE[0]);
        assert_eq!(items[7].color, SUB_AREA_PALETTE[1]);
    }

    #[test]
    fn test_visual_weights() {
        assert_eq!(stroke_width(1), 1.5);
        assert_eq!(stroke_width(3), 4.5);
        assert_eq!(stroke_width(4), 5.0);
        assert_eq!(node_radius(5, 10), 13.0);
        assert_eq!(node_radius(10, 10), 20.0);
        assert!(shows_label(1, 1));
        assert!(shows_label(4, 10));
        assert!(!shows_label(2, 10));
        assert_eq!(short_label("SMITH, J."), "SMITH");
        assert_eq!(short_label("Plato"), "Plato");
    }

    #[test]
    fn test_network_primitives_follow_positions() {
        let records = [CollaborationRecord {
            title: "Joint paper title".into(),
            authors: vec!["SMITH, J.".into(), "DOE, A.".into()],
            year: 2021,
        }];
        let graph = CollaborationGraph::from_records(&records);
        let positions = vec![
            NodePosition { id: "SMITH, J.".into(), x: 100.0, y: 200.0 },
            NodePosition { id: "DOE, A.".into(), x: 300.0, y: 400.0 },
        ];
        let drawing = network_primitives(&graph, &positions);

        assert_eq!(drawing.lines.len(), 1);
        let line = &drawing.lines[0];
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (100.0, 200.0, 300.0, 400.0));
        assert_eq!(line.stroke_width, 1.5);

        assert_eq!(drawing.circles.len(), 2);
        assert!(drawing.circles.iter().all(|c| c.radius == 20.0));
        let labels: Vec<&str> = drawing.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(labels, vec!["SMITH", "DOE"]);
        assert_eq!(drawing.labels[0].y, 232.0);
    }

    #[test]
    fn test_missing_positions_are_skipped() {
        let records = [CollaborationRecord {
            title: "Joint paper title".into(),
            authors: vec!["A, X.".into(), "B, Y.".into()],
            year: 2021,
        }];
        let graph = CollaborationGraph::from_records(&records);
        let drawing = network_primitives(&graph, &[NodePosition { id: "A, X.".into(), x: 1.0, y: 1.0 }]);
        assert!(drawing.lines.is_empty());
        assert_eq!(drawing.circles.len(), 1);
    }
}
