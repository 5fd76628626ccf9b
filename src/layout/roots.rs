use std::collections::HashSet;

use crate::graph::{Link, Node};

/// Hierarchy role inferred once from link direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    /// Never the target of a link.
    Root,
    /// A root without neighbours.
    IsolatedRoot,
    Member,
}

pub(super) fn classify_roles(nodes: &[Node], links: &[Link]) -> Vec<NodeRole> {
    let targets = links
        .iter()
        .map(|link| link.target.as_str())
        .collect::<HashSet<_>>();

    nodes
        .iter()
        .map(|node| {
            if targets.contains(node.id.as_str()) {
                NodeRole::Member
            } else if node.degree == 0 {
                NodeRole::IsolatedRoot
            } else {
                NodeRole::Root
            }
        })
        .collect()
}

pub(super) fn pair_multiplier(
    a: NodeRole,
    b: NodeRole,
    root_repulsion: f32,
    isolated_root_repulsion: f32,
) -> f32 {
    match (a, b) {
        (NodeRole::IsolatedRoot, _) | (_, NodeRole::IsolatedRoot) => isolated_root_repulsion,
        (NodeRole::Root, NodeRole::Root) => root_repulsion,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphIndex, RawLink};

    #[test]
    fn classifies_roots_members_and_isolated() {
        let nodes = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Node::new(*id, *id, 0))
            .collect();
        let index = GraphIndex::build(
            nodes,
            vec![RawLink::new("a", "b"), RawLink::new("c", "b")],
        );

        let roles = classify_roles(&index.nodes, &index.links);
        assert_eq!(
            roles,
            vec![
                NodeRole::Root,
                NodeRole::Member,
                NodeRole::Root,
                NodeRole::IsolatedRoot
            ]
        );
    }

    #[test]
    fn isolated_multiplier_wins() {
        assert_eq!(pair_multiplier(NodeRole::Root, NodeRole::Root, 4.0, 0.1), 4.0);
        assert_eq!(
            pair_multiplier(NodeRole::Root, NodeRole::IsolatedRoot, 4.0, 0.1),
            0.1
        );
        assert_eq!(pair_multiplier(NodeRole::Root, NodeRole::Member, 4.0, 0.1), 1.0);
        assert_eq!(
            pair_multiplier(NodeRole::Member, NodeRole::Member, 4.0, 0.1),
            1.0
        );
    }
}
