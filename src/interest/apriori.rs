use std::collections::HashMap;

use crate::graph::Node;

/// Degree normalised into [0, 1]; 0.5 when every node has the same degree.
pub fn importance(degree: usize, min_degree: usize, max_degree: usize) -> f32 {
    if max_degree <= min_degree {
        return 0.5;
    }
    let span = (max_degree - min_degree) as f32;
    (degree.saturating_sub(min_degree) as f32 / span).clamp(0.0, 1.0)
}

pub(super) struct AprioriCache {
    node_count: usize,
    min_degree: usize,
    max_degree: usize,
    /// Degree each score was computed from, next to the score.
    by_id: HashMap<String, (usize, f32)>,
}

impl AprioriCache {
    pub(super) fn build(nodes: &[Node]) -> Self {
        let min_degree = nodes.iter().map(|node| node.degree).min().unwrap_or(0);
        let max_degree = nodes.iter().map(|node| node.degree).max().unwrap_or(0);
        let by_id = nodes
            .iter()
            .map(|node| {
                (
                    node.id.clone(),
                    (node.degree, importance(node.degree, min_degree, max_degree)),
                )
            })
            .collect();

        Self {
            node_count: nodes.len(),
            min_degree,
            max_degree,
            by_id,
        }
    }

    /// Valid while the node count matches and the node is known with the same
    /// degree. A graph reload must still go through `InterestEngine::reset`,
    /// since degree changes elsewhere shift the normalisation range.
    pub(super) fn covers(&self, node: &Node, nodes: &[Node]) -> bool {
        self.node_count == nodes.len()
            && self
                .by_id
                .get(&node.id)
                .is_some_and(|&(degree, _)| degree == node.degree)
    }

    pub(super) fn get(&self, node: &Node) -> f32 {
        match self.by_id.get(&node.id) {
            Some(&(degree, score)) if degree == node.degree => score,
            _ => importance(node.degree, self.min_degree, self.max_degree),
        }
    }
}
