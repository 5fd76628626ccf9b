use std::sync::Arc;

use doi_explorer::graph::{GraphIndex, Node, RawLink, TimeSpan};
use doi_explorer::highlight::active_set;
use doi_explorer::interest::{
    DateRange, DoiParams, InterestConfig, InterestEngine, NEUTRAL_FOCUS_RELEVANCE, UNDATED_SPAN,
    WeightSet, importance,
};

const EPSILON: f32 = 1.0e-6;

fn chain_with_island() -> GraphIndex {
    let nodes = vec![
        Node::new("a", "Ada", 0).with_timespan(Some(TimeSpan { begin: 10, end: 20 })),
        Node::new("b", "Babbage", 1).with_timespan(Some(TimeSpan { begin: 5, end: 20 })),
        Node::new("c", "Clement", 0),
        Node::new("d", "Difference Engine", 2).with_timespan(Some(TimeSpan { begin: 15, end: 15 })),
        Node::new("island", "Island", 0),
    ];
    let links = vec![
        RawLink::new("a", "b"),
        RawLink::new("b", "c"),
        RawLink::new("c", "d"),
    ];
    GraphIndex::build(nodes, links)
}

fn engine(index: &GraphIndex) -> InterestEngine {
    InterestEngine::new(Arc::new(index.neighbors.clone()), &InterestConfig::default())
}

fn params() -> DoiParams {
    let mut params = DoiParams::new(DateRange::new(0, 100));
    params.selected_archetypes = [0, 1].into_iter().collect();
    params
}

#[test]
fn focus_proximity_along_chain() {
    let index = chain_with_island();
    let mut engine = engine(&index);
    let mut params = params();
    params.focus = Some("a".to_owned());

    let expected = [("a", 1.0), ("b", 0.8), ("c", 0.6), ("d", 0.4), ("island", 0.0)];
    for (id, joint) in expected {
        let node = index.nodes.iter().find(|node| node.id == id);
        let Some(node) = node else {
            panic!("missing {id}");
        };
        let components = engine.components(node, &index.nodes, &params);
        assert!((components.joint - joint).abs() < EPSILON, "{id}: {}", components.joint);
    }
}

#[test]
fn empty_query_is_neutral() {
    let index = chain_with_island();
    let mut engine = engine(&index);
    let params = params();

    for node in &index.nodes {
        let components = engine.components(node, &index.nodes, &params);
        let archetype = if params.selected_archetypes.contains(&node.group) {
            1.0
        } else {
            0.0
        };
        let span = node.timespan.unwrap_or(UNDATED_SPAN);
        let date = if span.begin >= 0 && span.end <= 100 {
            1.0
        } else {
            0.0
        };
        let expected = 0.5 * 0.4 + archetype * 0.4 + date * 0.2;
        assert!((components.user - expected).abs() < EPSILON, "{}", node.id);
        assert_eq!(components.joint, NEUTRAL_FOCUS_RELEVANCE);
    }
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let index = chain_with_island();
    let mut engine = engine(&index);
    let mut params = params();
    params.search_query = "AB".to_owned();
    params.focus = Some("c".to_owned());

    let first = engine.scores(&index.nodes, &params);
    let second = engine.scores(&index.nodes, &params);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    assert!(first.iter().all(|doi| (0.0..=1.0).contains(doi)));
}

#[test]
fn filter_change_rescored_not_stale() {
    let index = chain_with_island();
    let mut engine = engine(&index);
    let mut params = params();
    let babbage = &index.nodes[1];

    let before = engine.score(babbage, &index.nodes, &params);
    params.selected_archetypes.remove(&1);
    let after = engine.score(babbage, &index.nodes, &params);

    let expected_drop = WeightSet::Balanced.weights().beta * 0.4;
    assert!((before - after - expected_drop).abs() < EPSILON);
}

#[test]
fn higher_degree_scores_higher_importance() {
    let index = chain_with_island();
    let mut engine = engine(&index);
    let params = params();

    let hub = engine.components(&index.nodes[1], &index.nodes, &params);
    let leaf = engine.components(&index.nodes[0], &index.nodes, &params);
    let island = engine.components(&index.nodes[4], &index.nodes, &params);
    assert!(hub.apriori >= leaf.apriori);
    assert!(leaf.apriori >= island.apriori);
    assert_eq!(hub.apriori, 1.0);
    assert_eq!(island.apriori, 0.0);
    assert_eq!(importance(3, 3, 3), 0.5);
}

#[test]
fn active_set_is_exactly_node_and_neighbors() {
    let index = chain_with_island();
    for node in &index.nodes {
        let active = active_set([node.id.as_str()], &index.neighbors);
        let mut expected = index
            .neighbors
            .neighbors(&node.id)
            .cloned()
            .unwrap_or_default();
        expected.insert(node.id.clone());
        assert_eq!(active, expected);
    }
}
