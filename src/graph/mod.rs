mod index;

use eframe::egui::Vec2;
use log::info;
use serde_json::Value;

use crate::dataset::{AttributeKeys, Dataset, attribute_text, parse_timestamp};

pub use index::{GraphIndex, NeighborMap};

/// Interval a vertex is associated with, in epoch milliseconds. A single
/// timestamp is stored as `begin == end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSpan {
    pub begin: i64,
    pub end: i64,
}

impl TimeSpan {
    pub fn from_bounds(begin: Option<i64>, end: Option<i64>) -> Option<Self> {
        match (begin, end) {
            (Some(begin), Some(end)) => Some(Self { begin, end }),
            (Some(at), None) | (None, Some(at)) => Some(Self { begin: at, end: at }),
            (None, None) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub group: u32,
    pub description: Option<String>,
    pub timespan: Option<TimeSpan>,
    pub position: Vec2,
    /// False until the node has a position; unplaced nodes are seeded by the
    /// layout engine.
    pub placed: bool,
    pub pinned_x: Option<f32>,
    pub pinned_y: Option<f32>,
    pub degree: usize,
    pub doi: f32,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, group: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group,
            description: None,
            timespan: None,
            position: Vec2::ZERO,
            placed: false,
            pinned_x: None,
            pinned_y: None,
            degree: 0,
            doi: 0.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self.placed = true;
        self
    }

    pub fn with_timespan(mut self, timespan: Option<TimeSpan>) -> Self {
        self.timespan = timespan;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_x.is_some() || self.pinned_y.is_some()
    }
}

/// Edge as it arrives from the dataset, before endpoint validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawLink {
    pub source: String,
    pub target: String,
    pub weight: Option<f32>,
    pub label: Option<String>,
}

impl RawLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub weight: f32,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archetype {
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub archetypes: Vec<Archetype>,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub neighbors: NeighborMap,
}

impl Graph {
    pub fn from_dataset(dataset: Dataset, keys: &AttributeKeys) -> Self {
        let archetypes = dataset
            .vertex_archetypes
            .into_iter()
            .map(|archetype| Archetype {
                name: archetype.name,
            })
            .collect::<Vec<_>>();

        let nodes = dataset
            .vertices
            .into_iter()
            .map(|vertex| {
                let timestamp = |key: &str| vertex.attributes.get(key).and_then(parse_timestamp);
                let timespan =
                    TimeSpan::from_bounds(timestamp(&keys.begin_key), timestamp(&keys.end_key));
                let description = attribute_text(&vertex.attributes, &keys.description_key);

                Node::new(vertex.id.into_string(), vertex.title, vertex.archetype)
                    .with_timespan(timespan)
                    .with_description(description)
            })
            .collect::<Vec<_>>();

        let raw_links = dataset
            .edges
            .into_iter()
            .map(|edge| RawLink {
                weight: edge
                    .attributes
                    .get(&keys.weight_key)
                    .and_then(Value::as_f64)
                    .map(|weight| weight as f32),
                label: attribute_text(&edge.attributes, &keys.relation_key),
                source: edge.from.into_string(),
                target: edge.to.into_string(),
            })
            .collect::<Vec<_>>();

        let index = GraphIndex::build(nodes, raw_links);
        info!(
            "indexed graph: {} nodes, {} links, {} dropped",
            index.nodes.len(),
            index.links.len(),
            index.dropped_links
        );

        Self {
            archetypes,
            nodes: index.nodes,
            links: index.links,
            neighbors: index.neighbors,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
