// src/graph/layout.rs
//! Force-directed layout of the collaboration graph.
//!
//! The simulation always runs exactly `ticks` steps with a linear cooling
//! factor; there is no convergence test. Positions can only be read once the
//! last tick has run.

// --- Imports ---
use std::collections::HashMap;
use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::graph::CollaborationGraph;
use crate::utils::error::LayoutError;

// --- Constants ---
pub const DEFAULT_TICKS: usize = 300;
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;
pub const DEFAULT_JITTER: f64 = 50.0;

const INITIAL_RADIUS_FRACTION: f64 = 0.35;
// Below this distance nodes are pushed apart linearly, ignoring cooling.
const MIN_SEPARATION: f64 = 60.0;
const OVERLAP_PUSH: f64 = 0.5;
const REPULSION: f64 = 2000.0;
const IDEAL_EDGE_LENGTH: f64 = 100.0;
const SPRING: f64 = 0.02;
const GRAVITY: f64 = 0.002;
const DAMPING: f64 = 0.85;
const MARGIN: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub ticks: usize,
    pub seed: u64,
    /// Full width of the uniform jitter added to the initial circle; 0 disables it.
    pub jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ticks: DEFAULT_TICKS,
            seed: 0,
            jitter: DEFAULT_JITTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutState {
    Created,
    Running,
    Frozen,
}

/// Final position of one author node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
    weight: f64,
}

pub struct ForceLayout {
    config: LayoutConfig,
    ids: Vec<String>,
    bodies: Vec<Body>,
    springs: Vec<Spring>,
    ticks_run: usize,
    state: LayoutState,
}

impl ForceLayout {
    /// Places the nodes evenly on a circle around the canvas center (plus jitter), at rest.
    pub fn new(graph: &CollaborationGraph, config: LayoutConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let center_x = config.width / 2.0;
        let center_y = config.height / 2.0;
        let radius = config.width.min(config.height) * INITIAL_RADIUS_FRACTION;
        let count = graph.nodes.len().max(1) as f64;

        let jitter = |rng: &mut StdRng| {
            if config.jitter > 0.0 {
                (rng.gen::<f64>() - 0.5) * config.jitter
            } else {
                0.0
            }
        };

        let bodies: Vec<Body> = (0..graph.nodes.len())
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / count;
                Body {
                    x: center_x + radius * angle.cos() + jitter(&mut rng),
                    y: center_y + radius * angle.sin() + jitter(&mut rng),
                    vx: 0.0,
                    vy: 0.0,
                }
            })
            .collect();

        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();
        let springs = graph
            .edges
            .iter()
            .filter_map(|edge| {
                Some(Spring {
                    source: *index.get(edge.source.as_str())?,
                    target: *index.get(edge.target.as_str())?,
                    weight: edge.weight as f64,
                })
            })
            .collect();

        Self {
            ids: graph.nodes.iter().map(|n| n.id.clone()).collect(),
            bodies,
            springs,
            ticks_run: 0,
            state: LayoutState::Created,
            config,
        }
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn ticks_run(&self) -> usize {
        self.ticks_run
    }

    /// Runs one tick. Returns `false` once the layout is frozen.
    pub fn step(&mut self) -> bool {
        if self.ticks_run >= self.config.ticks {
            self.state = LayoutState::Frozen;
            return false;
        }

        let alpha = 1.0 - self.ticks_run as f64 / self.config.ticks as f64;
        self.tick(alpha);
        self.ticks_run += 1;
        self.state = if self.ticks_run >= self.config.ticks {
            LayoutState::Frozen
        } else {
            LayoutState::Running
        };
        true
    }

    /// Runs the remaining ticks, checking `should_stop` between ticks.
    /// Returns `true` when the layout reached its full tick budget.
    pub fn run_until<F>(&mut self, mut should_stop: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        while self.state != LayoutState::Frozen {
            if should_stop(self.ticks_run) {
                tracing::warn!("Layout interrupted after {} of {} ticks", self.ticks_run, self.config.ticks);
                return false;
            }
            self.step();
        }
        true
    }

    pub fn run(&mut self) {
        self.run_until(|_| false);
    }

    /// Final positions, in graph node order.
    pub fn positions(&self) -> Result<Vec<NodePosition>, LayoutError> {
        if self.state != LayoutState::Frozen {
            return Err(LayoutError::NotFrozen {
                ticks_run: self.ticks_run,
                ticks_total: self.config.ticks,
            });
        }

        Ok(self
            .ids
            .iter()
            .zip(&self.bodies)
            .map(|(id, body)| NodePosition {
                id: id.clone(),
                x: body.x,
                y: body.y,
            })
            .collect())
    }

    fn tick(&mut self, alpha: f64) {
        let n = self.bodies.len();

        // Pairwise repulsion
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.bodies[i], self.bodies[j]);
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let dist = distance(dx, dy);

                let (fx, fy) = if dist < MIN_SEPARATION {
                    let push = (MIN_SEPARATION - dist) * OVERLAP_PUSH;
                    (dx / dist * push, dy / dist * push)
                } else {
                    let push = REPULSION / (dist * dist) * alpha;
                    (dx / dist * push, dy / dist * push)
                };

                self.bodies[i].vx -= fx;
                self.bodies[i].vy -= fy;
                self.bodies[j].vx += fx;
                self.bodies[j].vy += fy;
            }
        }

        // Edge springs toward the ideal length; they push when closer than it.
        for spring in &self.springs {
            let (s, t) = (self.bodies[spring.source], self.bodies[spring.target]);
            let dx = t.x - s.x;
            let dy = t.y - s.y;
            let dist = distance(dx, dy);
            let pull = (dist - IDEAL_EDGE_LENGTH) * SPRING * spring.weight * alpha;

            self.bodies[spring.source].vx += dx / dist * pull;
            self.bodies[spring.source].vy += dy / dist * pull;
            self.bodies[spring.target].vx -= dx / dist * pull;
            self.bodies[spring.target].vy -= dy / dist * pull;
        }

        let center_x = self.config.width / 2.0;
        let center_y = self.config.height / 2.0;
        let max_x = self.config.width - MARGIN;
        let max_y = self.config.height - MARGIN;

        for body in &mut self.bodies {
            // Central gravity
            body.vx += (center_x - body.x) * GRAVITY * alpha;
            body.vy += (center_y - body.y) * GRAVITY * alpha;

            // Damping applies before the position update.
            body.vx *= DAMPING;
            body.vy *= DAMPING;
            body.x += body.vx;
            body.y += body.vy;

            // Clamp position only; velocity keeps pressing against the wall.
            body.x = MARGIN.max(max_x.min(body.x));
            body.y = MARGIN.max(max_y.min(body.y));
        }
    }
}

// Coincident nodes are treated as one unit apart.
fn distance(dx: f64, dy: f64) -> f64 {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        1.0
    } else {
        dist
    }
}
