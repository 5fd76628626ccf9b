use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::graph::NeighborMap;

/// Hop count at which focus proximity reaches zero.
pub const MAX_RELEVANT_HOPS: usize = 5;

pub fn proximity(distance: Option<usize>) -> f32 {
    match distance {
        Some(hops) => (1.0 - hops as f32 / MAX_RELEVANT_HOPS as f32).max(0.0),
        None => 0.0,
    }
}

/// Breadth-first distances from one focus node, expanded lazily. A lookup
/// only advances the search until the target is discovered; every node seen
/// on the way is kept, and the frontier is resumed by the next lookup.
pub(super) struct DistanceTable {
    focus: String,
    distances: HashMap<String, usize>,
    frontier: VecDeque<(String, usize)>,
}

impl DistanceTable {
    pub(super) fn new(focus: &str) -> Self {
        Self {
            focus: focus.to_owned(),
            distances: HashMap::from([(focus.to_owned(), 0)]),
            frontier: VecDeque::from([(focus.to_owned(), 0)]),
        }
    }

    pub(super) fn focus(&self) -> &str {
        &self.focus
    }

    pub(super) fn distance_to(&mut self, target: &str, neighbors: &NeighborMap) -> Option<usize> {
        if let Some(&distance) = self.distances.get(target) {
            return Some(distance);
        }

        while let Some((current, depth)) = self.frontier.pop_front() {
            let Some(adjacent) = neighbors.neighbors(&current) else {
                continue;
            };

            let mut found = None;
            for next in adjacent {
                if self.distances.contains_key(next) {
                    continue;
                }
                self.distances.insert(next.clone(), depth + 1);
                self.frontier.push_back((next.clone(), depth + 1));
                if next == target {
                    found = Some(depth + 1);
                }
            }

            if found.is_some() {
                return found;
            }
        }

        debug!(
            "{target} unreachable from focus {} ({} nodes reached)",
            self.focus,
            self.distances.len()
        );
        None
    }

    #[cfg(test)]
    pub(super) fn discovered(&self) -> usize {
        self.distances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphIndex, Node, RawLink};

    fn chain() -> NeighborMap {
        let nodes = ["a", "b", "c", "d", "e", "f", "g", "island"]
            .iter()
            .map(|id| Node::new(*id, *id, 0))
            .collect();
        let links = ["a", "b", "c", "d", "e", "f", "g"]
            .windows(2)
            .map(|pair| RawLink::new(pair[0], pair[1]))
            .collect();
        GraphIndex::build(nodes, links).neighbors
    }

    #[test]
    fn distances_along_chain() {
        let neighbors = chain();
        let mut table = DistanceTable::new("a");

        assert_eq!(table.distance_to("a", &neighbors), Some(0));
        assert_eq!(table.distance_to("d", &neighbors), Some(3));
        assert_eq!(table.distance_to("b", &neighbors), Some(1));
        assert_eq!(table.distance_to("g", &neighbors), Some(6));
        assert_eq!(table.distance_to("island", &neighbors), None);
        assert_eq!(table.focus(), "a");
    }

    #[test]
    fn search_stops_once_target_is_found() {
        let neighbors = chain();
        let mut table = DistanceTable::new("a");
        assert_eq!(table.distance_to("b", &neighbors), Some(1));
        assert_eq!(table.discovered(), 2);

        assert_eq!(table.distance_to("c", &neighbors), Some(2));
        assert_eq!(table.discovered(), 3);
    }

    #[test]
    fn proximity_decays_to_zero() {
        assert_eq!(proximity(Some(0)), 1.0);
        assert!((proximity(Some(1)) - 0.8).abs() < 1.0e-6);
        assert!((proximity(Some(4)) - 0.2).abs() < 1.0e-6);
        assert_eq!(proximity(Some(5)), 0.0);
        assert_eq!(proximity(Some(9)), 0.0);
        assert_eq!(proximity(None), 0.0);
    }
}
