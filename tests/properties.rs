use std::sync::Arc;

use proptest::prelude::*;

use doi_explorer::graph::{GraphIndex, Node, RawLink};
use doi_explorer::highlight::active_set;
use doi_explorer::interest::{DateRange, DoiParams, InterestConfig, InterestEngine};
use doi_explorer::layout::{LayoutConfig, LayoutEngine};

fn graph(node_count: usize, edges: &[(usize, usize)], stacked: bool) -> GraphIndex {
    let nodes = (0..node_count)
        .map(|index| {
            let node = Node::new(format!("n{index}"), format!("Node {index}"), (index % 3) as u32);
            if stacked { node.at(50.0, 50.0) } else { node }
        })
        .collect();
    let links = edges
        .iter()
        .map(|&(source, target)| RawLink::new(format!("n{source}"), format!("n{target}")))
        .collect();
    GraphIndex::build(nodes, links)
}

proptest! {
    #[test]
    fn positions_and_scores_stay_bounded(
        node_count in 0usize..12,
        edges in proptest::collection::vec((0usize..14, 0usize..14), 0..20),
        stacked in any::<bool>(),
        seed in any::<u64>(),
        steps in 0usize..40,
        focus in 0usize..14,
    ) {
        let index = graph(node_count, &edges, stacked);
        let config = LayoutConfig {
            seed: Some(seed),
            ..LayoutConfig::new(100.0, 100.0)
        };
        let mut layout = LayoutEngine::new(index.nodes.clone(), &index.links, &config);
        layout.run(steps);
        for node in layout.nodes() {
            prop_assert!(node.x().is_finite() && node.y().is_finite());
        }

        let mut engine =
            InterestEngine::new(Arc::new(index.neighbors.clone()), &InterestConfig::default());
        let mut params = DoiParams::new(DateRange::new(0, 1));
        params.selected_archetypes.insert(1);
        params.search_query = "node 1".to_owned();
        params.focus = Some(format!("n{focus}"));
        for doi in engine.scores(layout.nodes(), &params) {
            prop_assert!((0.0..=1.0).contains(&doi));
        }
    }

    #[test]
    fn neighbor_map_is_symmetric(
        node_count in 1usize..10,
        edges in proptest::collection::vec((0usize..10, 0usize..10), 0..25),
    ) {
        let index = graph(node_count, &edges, false);
        for node in &index.nodes {
            let neighbours = index.neighbors.neighbors(&node.id).cloned().unwrap_or_default();
            prop_assert_eq!(node.degree, neighbours.len());
            for other in &neighbours {
                prop_assert!(index.neighbors.contains(other, &node.id));
            }

            let active = active_set([node.id.as_str()], &index.neighbors);
            prop_assert_eq!(active.len(), neighbours.len() + 1);
        }
    }
}
