//! Fruchterman–Reingold force-directed placement.
//!
//! Repulsion is evaluated for every node pair, so a step costs O(n²). That is
//! comfortable for a few hundred nodes and the practical ceiling is around a
//! thousand.

mod config;
mod forces;
mod roots;
mod timer;

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Link, Node};
use config::ResolvedLayout;
use forces::{RepulsionParams, accumulate_attraction, accumulate_centering, accumulate_repulsion};

pub use config::LayoutConfig;
pub use roots::NodeRole;
pub use timer::{DEFAULT_TICK_INTERVAL, PlaybackTimer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutPhase {
    Uninitialized,
    Initialized,
    Running,
    /// Temperature fell below the settle floor. Stepping is still allowed.
    Settled,
}

#[derive(Default)]
struct LayoutScratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
}

pub struct LayoutEngine {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    roles: Vec<NodeRole>,
    settings: ResolvedLayout,
    temperature: f32,
    steps: usize,
    initialized: bool,
    rng: StdRng,
    scratch: LayoutScratch,
}

impl LayoutEngine {
    pub fn new(nodes: Vec<Node>, links: &[Link], config: &LayoutConfig) -> Self {
        let settings = config.resolve(nodes.len());

        let index_by_id = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect::<HashMap<_, _>>();

        let edges = links
            .iter()
            .filter_map(|link| {
                let endpoints = (
                    index_by_id.get(&link.source).copied(),
                    index_by_id.get(&link.target).copied(),
                );
                if let (Some(source), Some(target)) = endpoints {
                    Some((source, target))
                } else {
                    debug!(
                        "layout ignores link {} -> {}: unknown endpoint",
                        link.source, link.target
                    );
                    None
                }
            })
            .collect::<Vec<_>>();

        let roles = roots::classify_roles(&nodes, links);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            nodes,
            index_by_id,
            edges,
            roles,
            temperature: settings.temperature,
            settings,
            steps: 0,
            initialized: false,
            rng,
            scratch: LayoutScratch::default(),
        }
    }

    /// Seeds every unplaced node uniformly inside the viewport. Runs once;
    /// `step()` calls it implicitly.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        let (width, height) = (self.settings.width, self.settings.height);
        let mut seeded = 0usize;
        for node in &mut self.nodes {
            let finite = node.position.x.is_finite() && node.position.y.is_finite();
            if !node.placed || !finite {
                node.position = vec2(
                    self.rng.gen_range(0.0..width),
                    self.rng.gen_range(0.0..height),
                );
                node.placed = true;
                seeded += 1;
            }
            if let Some(x) = node.pinned_x {
                node.position.x = x;
            }
            if let Some(y) = node.pinned_y {
                node.position.y = y;
            }
        }

        debug!("seeded {seeded} of {} nodes", self.nodes.len());
        self.initialized = true;
    }

    pub fn step(&mut self) {
        self.initialize();
        let node_count = self.nodes.len();
        if node_count == 0 {
            return;
        }

        let scratch = &mut self.scratch;
        scratch.forces.clear();
        scratch.forces.resize(node_count, Vec2::ZERO);
        scratch.positions.clear();
        scratch
            .positions
            .extend(self.nodes.iter().map(|node| node.position));

        let settings = self.settings;
        accumulate_repulsion(
            &scratch.positions,
            &self.roles,
            RepulsionParams {
                k: settings.k,
                root_repulsion: settings.root_repulsion,
                isolated_root_repulsion: settings.isolated_root_repulsion,
            },
            &mut scratch.forces,
        );
        accumulate_attraction(
            &scratch.positions,
            &self.edges,
            settings.k,
            &mut scratch.forces,
        );
        accumulate_centering(
            &scratch.positions,
            vec2(settings.width, settings.height) * 0.5,
            settings.centering_strength,
            &mut scratch.forces,
        );

        let temperature = self.temperature;
        for (node, force) in self.nodes.iter_mut().zip(&scratch.forces) {
            let magnitude = force.length();
            if magnitude <= 0.0 || !magnitude.is_finite() {
                continue;
            }

            let displacement = *force / magnitude * magnitude.min(temperature);
            if node.pinned_x.is_none() {
                node.position.x += displacement.x;
                if settings.clamp_to_viewport {
                    node.position.x = node.position.x.clamp(0.0, settings.width);
                }
            }
            if node.pinned_y.is_none() {
                node.position.y += displacement.y;
                if settings.clamp_to_viewport {
                    node.position.y = node.position.y.clamp(0.0, settings.height);
                }
            }
        }

        self.temperature *= settings.cooling_factor;
        self.steps += 1;
    }

    pub fn run(&mut self, iterations: usize) -> &[Node] {
        for _ in 0..iterations {
            self.step();
        }
        info!(
            "layout ran {iterations} iterations over {} nodes, temperature {:.3}",
            self.nodes.len(),
            self.temperature
        );
        &self.nodes
    }

    /// Runs the configured iteration count (50 by default).
    pub fn run_configured(&mut self) -> &[Node] {
        self.run(self.settings.iterations)
    }

    /// Pins both axes and moves the node there immediately.
    pub fn pin(&mut self, id: &str, x: f32, y: f32) {
        self.set_pins(id, Some(x), Some(y));
    }

    /// Sets or clears each axis pin independently.
    pub fn set_pins(&mut self, id: &str, pinned_x: Option<f32>, pinned_y: Option<f32>) {
        let Some(&index) = self.index_by_id.get(id) else {
            debug!("ignoring pin for unknown node {id}");
            return;
        };
        if pinned_x.is_some_and(|x| !x.is_finite()) || pinned_y.is_some_and(|y| !y.is_finite()) {
            warn!("ignoring non-finite pin for node {id}");
            return;
        }

        let node = &mut self.nodes[index];
        node.pinned_x = pinned_x;
        node.pinned_y = pinned_y;
        if let Some(x) = pinned_x {
            node.position.x = x;
        }
        if let Some(y) = pinned_y {
            node.position.y = y;
        }
        if pinned_x.is_some() && pinned_y.is_some() {
            node.placed = true;
        }
    }

    pub fn unpin(&mut self, id: &str) {
        self.set_pins(id, None, None);
    }

    /// Copies interest scores onto the nodes, in node order.
    pub fn apply_scores(&mut self, scores: &[f32]) {
        for (node, score) in self.nodes.iter_mut().zip(scores) {
            node.doi = if score.is_nan() {
                0.0
            } else {
                score.clamp(0.0, 1.0)
            };
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Links resolved to node indices.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn role(&self, id: &str) -> Option<NodeRole> {
        self.index_of(id).map(|index| self.roles[index])
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn k(&self) -> f32 {
        self.settings.k
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.settings.width, self.settings.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn phase(&self) -> LayoutPhase {
        if !self.initialized {
            LayoutPhase::Uninitialized
        } else if self.steps == 0 {
            LayoutPhase::Initialized
        } else if self.temperature < self.settings.settle_temperature {
            LayoutPhase::Settled
        } else {
            LayoutPhase::Running
        }
    }
}
