use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::graph::{Link, Node};
use crate::highlight::Highlight;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub name: String,
    pub group: u32,
    pub x: f32,
    pub y: f32,
    pub degree: usize,
    pub doi: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkSnapshot {
    pub source: String,
    pub target: String,
    pub weight: f32,
}

/// Positions, scores and highlight state at one moment, as handed to an
/// external renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub links: Vec<LinkSnapshot>,
    /// Sorted ids of the active set; absent when nothing is highlighted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Vec<String>>,
}

impl Snapshot {
    pub fn capture(nodes: &[Node], links: &[Link], highlight: &Highlight) -> Self {
        let nodes = nodes
            .iter()
            .map(|node| NodeSnapshot {
                id: node.id.clone(),
                name: node.name.clone(),
                group: node.group,
                x: node.x(),
                y: node.y(),
                degree: node.degree,
                doi: node.doi,
            })
            .collect();
        let links = links
            .iter()
            .map(|link| LinkSnapshot {
                source: link.source.clone(),
                target: link.target.clone(),
                weight: link.weight,
            })
            .collect();
        let active = highlight.active_ids().map(|ids| {
            let mut ids: Vec<String> = ids.iter().cloned().collect();
            ids.sort();
            ids
        });

        Self {
            nodes,
            links,
            active,
        }
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize snapshot")?;
        writeln!(writer).context("failed to write snapshot")?;
        writer.flush().context("failed to flush snapshot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphIndex, RawLink};
    use serde_json::Value;

    #[test]
    fn captures_positions_and_active_set() {
        let nodes = vec![
            Node::new("a", "Alpha", 0).at(1.0, 2.0),
            Node::new("b", "Beta", 1).at(3.0, 4.0),
            Node::new("c", "Gamma", 1).at(5.0, 6.0),
        ];
        let index = GraphIndex::build(nodes, vec![RawLink::new("a", "b")]);
        let highlight = Highlight::focused(["b"], &index.neighbors);

        let snapshot = Snapshot::capture(&index.nodes, &index.links, &highlight);
        assert_eq!(snapshot.nodes[1].x, 3.0);
        assert_eq!(snapshot.nodes[0].degree, 1);
        assert_eq!(snapshot.links[0].weight, 1.0);
        assert_eq!(
            snapshot.active,
            Some(vec!["a".to_owned(), "b".to_owned()])
        );

        let mut out = Vec::new();
        snapshot.write_json(&mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["nodes"][2]["name"], "Gamma");
        assert_eq!(value["links"][0]["source"], "a");
        assert_eq!(value["active"][1], "b");
    }

    #[test]
    fn omits_active_when_unhighlighted() {
        let nodes = vec![Node::new("a", "Alpha", 0)];
        let snapshot = Snapshot::capture(&nodes, &[], &Highlight::All);

        let mut out = Vec::new();
        snapshot.write_json(&mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert!(value.get("active").is_none());
    }
}
