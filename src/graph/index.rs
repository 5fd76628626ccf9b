use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::{Link, Node, RawLink};

/// Symmetric adjacency: every link `(a, b)` makes `b` a neighbour of `a` and
/// `a` a neighbour of `b`. Every indexed node has an entry, possibly empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborMap {
    adjacency: HashMap<String, HashSet<String>>,
}

impl NeighborMap {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(capacity),
        }
    }

    fn ensure(&mut self, id: &str) {
        if !self.adjacency.contains_key(id) {
            self.adjacency.insert(id.to_owned(), HashSet::new());
        }
    }

    fn connect(&mut self, a: &str, b: &str) {
        self.adjacency
            .entry(a.to_owned())
            .or_default()
            .insert(b.to_owned());
        self.adjacency
            .entry(b.to_owned())
            .or_default()
            .insert(a.to_owned());
    }

    pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
        self.adjacency.get(id)
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|adjacent| adjacent.contains(b))
    }

    pub fn degree(&self, id: &str) -> usize {
        self.adjacency.get(id).map_or(0, HashSet::len)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub neighbors: NeighborMap,
    pub dropped_links: usize,
}

impl GraphIndex {
    /// Validates links against the node set and derives the neighbour map and
    /// node degrees. Dangling links are dropped; duplicate node ids resolve to
    /// the last record, kept in the slot of the first.
    pub fn build(nodes: Vec<Node>, raw_links: Vec<RawLink>) -> Self {
        let mut slot_by_id: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
        let mut unique_nodes: Vec<Node> = Vec::with_capacity(nodes.len());
        let mut duplicate_count = 0usize;

        for node in nodes {
            if let Some(&slot) = slot_by_id.get(&node.id) {
                unique_nodes[slot] = node;
                duplicate_count += 1;
                continue;
            }
            slot_by_id.insert(node.id.clone(), unique_nodes.len());
            unique_nodes.push(node);
        }

        if duplicate_count > 0 {
            warn!("{duplicate_count} duplicate node ids replaced by their last record");
        }

        let mut neighbors = NeighborMap::with_capacity(unique_nodes.len());
        for node in &unique_nodes {
            neighbors.ensure(&node.id);
        }

        let mut links = Vec::with_capacity(raw_links.len());
        let mut dropped_links = 0usize;
        for raw in raw_links {
            if !slot_by_id.contains_key(&raw.source) || !slot_by_id.contains_key(&raw.target) {
                debug!(
                    "dropping link {} -> {}: unknown endpoint",
                    raw.source, raw.target
                );
                dropped_links += 1;
                continue;
            }

            if raw.source != raw.target {
                neighbors.connect(&raw.source, &raw.target);
            }

            links.push(Link {
                weight: sanitize_weight(raw.weight),
                source: raw.source,
                target: raw.target,
                label: raw.label,
            });
        }

        if dropped_links > 0 {
            warn!("dropped {dropped_links} links with unknown endpoints");
        }

        for node in &mut unique_nodes {
            node.degree = neighbors.degree(&node.id);
        }

        Self {
            nodes: unique_nodes,
            links,
            neighbors,
            dropped_links,
        }
    }
}

fn sanitize_weight(weight: Option<f32>) -> f32 {
    match weight {
        None => 1.0,
        Some(weight) if weight.is_finite() && weight >= 0.0 => weight,
        Some(weight) => {
            debug!("replacing invalid link weight {weight} with 0");
            0.0
        }
    }
}
