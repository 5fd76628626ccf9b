//! Degree-of-interest scoring: `DOI = α·A + β·U + γ·J`, clamped to [0, 1].
//!
//! `A` is normalised degree, `U` is how well a node matches the active filters
//! and `J` is hop proximity to the focus node. Each component is cached with
//! its own invalidation key so repeated scoring with unchanged parameters is
//! a lookup.

mod apriori;
mod distance;
mod user;
mod weights;

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

use crate::graph::{NeighborMap, Node, TimeSpan};

pub use apriori::importance;
pub use distance::{MAX_RELEVANT_HOPS, proximity};
pub use user::{
    NEUTRAL_SEARCH_RELEVANCE, UNDATED_SPAN, archetype_relevance, date_relevance, search_relevance,
};
pub use weights::{DoiWeights, InterestConfig, UserWeights, WeightSet};

use apriori::AprioriCache;
use distance::DistanceTable;
use user::UserInterestCache;

/// `J` when nothing is focused.
pub const NEUTRAL_FOCUS_RELEVANCE: f32 = 0.5;

/// Inclusive bounds in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub min: i64,
    pub max: i64,
}

impl DateRange {
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains_span(self, span: TimeSpan) -> bool {
        span.begin >= self.min && span.end <= self.max
    }
}

/// Filter and focus state, re-supplied on every scoring pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DoiParams {
    pub search_query: String,
    pub selected_archetypes: BTreeSet<u32>,
    pub date_range: DateRange,
    pub focus: Option<String>,
}

impl DoiParams {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            search_query: String::new(),
            selected_archetypes: BTreeSet::new(),
            date_range,
            focus: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterestComponents {
    pub apriori: f32,
    pub user: f32,
    pub joint: f32,
}

impl InterestComponents {
    /// Weighted sum clamped to [0, 1]; anything non-finite scores 0.
    pub fn combine(self, weights: DoiWeights) -> f32 {
        let doi =
            weights.alpha * self.apriori + weights.beta * self.user + weights.gamma * self.joint;
        if doi.is_finite() {
            doi.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Owns the caches for one loaded graph. Build a fresh engine, or call
/// [`InterestEngine::reset`], when the graph is reloaded.
pub struct InterestEngine {
    neighbors: Arc<NeighborMap>,
    weights: DoiWeights,
    user_weights: UserWeights,
    apriori: Option<AprioriCache>,
    user: Option<UserInterestCache>,
    distances: Option<DistanceTable>,
}

impl InterestEngine {
    pub fn new(neighbors: Arc<NeighborMap>, config: &InterestConfig) -> Self {
        Self {
            neighbors,
            weights: config.doi_weights(),
            user_weights: config.user_weights(),
            apriori: None,
            user: None,
            distances: None,
        }
    }

    pub fn weights(&self) -> DoiWeights {
        self.weights
    }

    pub fn user_weights(&self) -> UserWeights {
        self.user_weights
    }

    /// Swap the weight preset. Cached components stay valid, only the
    /// combination changes.
    pub fn set_weights(&mut self, weights: DoiWeights) {
        self.weights = weights;
    }

    pub fn set_weight_set(&mut self, set: WeightSet) {
        self.set_weights(set.weights());
    }

    /// Drop every cache and adopt the adjacency of a newly loaded graph.
    pub fn reset(&mut self, neighbors: Arc<NeighborMap>) {
        self.neighbors = neighbors;
        self.apriori = None;
        self.user = None;
        self.distances = None;
    }

    pub fn score(&mut self, node: &Node, nodes: &[Node], params: &DoiParams) -> f32 {
        self.components(node, nodes, params).combine(self.weights)
    }

    /// Score every node in order. The caller writes the results back.
    pub fn scores(&mut self, nodes: &[Node], params: &DoiParams) -> Vec<f32> {
        let scores: Vec<f32> = nodes
            .iter()
            .map(|node| self.score(node, nodes, params))
            .collect();
        debug!(
            "scored {} nodes (query {:?}, {} archetypes, focus {:?})",
            scores.len(),
            params.search_query,
            params.selected_archetypes.len(),
            params.focus
        );
        scores
    }

    pub fn components(
        &mut self,
        node: &Node,
        nodes: &[Node],
        params: &DoiParams,
    ) -> InterestComponents {
        InterestComponents {
            apriori: self.apriori(node, nodes),
            user: self.user_interest(node, params),
            joint: self.joint(node, params.focus.as_deref()),
        }
    }

    /// Hop distance from `focus` to `id`, `None` when unreachable.
    pub fn focus_distance(&mut self, focus: &str, id: &str) -> Option<usize> {
        let table = match self.distances.take() {
            Some(table) if table.focus() == focus => table,
            _ => DistanceTable::new(focus),
        };
        self.distances
            .insert(table)
            .distance_to(id, &self.neighbors)
    }

    fn apriori(&mut self, node: &Node, nodes: &[Node]) -> f32 {
        let cache = match self.apriori.take() {
            Some(cache) if cache.covers(node, nodes) => cache,
            _ => AprioriCache::build(nodes),
        };
        self.apriori.insert(cache).get(node)
    }

    fn user_interest(&mut self, node: &Node, params: &DoiParams) -> f32 {
        let cache = match self.user.take() {
            Some(cache) if cache.matches(params) => cache,
            _ => UserInterestCache::new(params),
        };
        let weights = self.user_weights;
        self.user
            .insert(cache)
            .get_or_compute(node, params, weights)
    }

    fn joint(&mut self, node: &Node, focus: Option<&str>) -> f32 {
        let Some(focus) = focus else {
            return NEUTRAL_FOCUS_RELEVANCE;
        };
        proximity(self.focus_distance(focus, &node.id))
    }
}
