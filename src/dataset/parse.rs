use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawArchetype {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawVertex {
    pub id: RawId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub archetype: u32,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
    pub from: RawId,
    pub to: RawId,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub vertex_archetypes: Vec<RawArchetype>,
    #[serde(default)]
    pub vertices: Vec<RawVertex>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

pub fn parse_dataset(raw: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(raw).context("invalid dataset JSON")?;

    if dataset.vertices.is_empty() {
        warn!("dataset contains no vertices");
    }
    debug!(
        "parsed dataset: {} vertices, {} edges, {} archetypes",
        dataset.vertices.len(),
        dataset.edges.len(),
        dataset.vertex_archetypes.len()
    );

    Ok(dataset)
}

/// Reads a textual attribute, accepting strings and numbers; blank values
/// count as absent.
pub fn attribute_text(attributes: &HashMap<String, Value>, key: &str) -> Option<String> {
    match attributes.get(key)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_string_ids() {
        let dataset = parse_dataset(
            r#"{
                "vertexArchetypes": [{ "name": "person", "color": "red" }],
                "vertices": [
                    { "id": 7, "title": "Ada", "archetype": 0 },
                    { "id": "x-1", "title": "Engine" }
                ],
                "edges": [{ "from": 7, "to": "x-1", "attributes": { "3": "built" } }]
            }"#,
        )
        .unwrap();

        assert_eq!(dataset.vertex_archetypes[0].name, "person");
        assert_eq!(dataset.vertices[0].id.clone().into_string(), "7");
        assert_eq!(dataset.vertices[1].id.clone().into_string(), "x-1");
        assert_eq!(dataset.vertices[1].archetype, 0);
        assert_eq!(
            attribute_text(&dataset.edges[0].attributes, "3").as_deref(),
            Some("built")
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dataset = parse_dataset("{}").unwrap();
        assert!(dataset.vertices.is_empty());
        assert!(dataset.edges.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        let error = parse_dataset("{ \"vertices\": [").unwrap_err();
        assert!(error.to_string().contains("invalid dataset JSON"));
    }

    #[test]
    fn blank_attributes_are_absent() {
        let mut attributes = HashMap::new();
        attributes.insert("0".to_owned(), Value::String("   ".to_owned()));
        attributes.insert("1".to_owned(), Value::Bool(true));
        assert_eq!(attribute_text(&attributes, "0"), None);
        assert_eq!(attribute_text(&attributes, "1"), None);
        assert_eq!(attribute_text(&attributes, "2"), None);
    }
}
