mod dates;
mod load;
mod parse;

use serde::Deserialize;

pub use dates::{format_date, parse_date_text, parse_timestamp, year_of, year_start_millis};
pub use load::load_dataset;
pub use parse::{Dataset, RawArchetype, RawEdge, RawId, RawVertex, attribute_text, parse_dataset};

/// Attribute keys used to pull typed fields out of the free-form vertex and
/// edge attribute maps.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttributeKeys {
    pub description_key: String,
    pub begin_key: String,
    pub end_key: String,
    pub relation_key: String,
    pub weight_key: String,
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            description_key: "0".to_owned(),
            begin_key: "1".to_owned(),
            end_key: "2".to_owned(),
            relation_key: "3".to_owned(),
            weight_key: "weight".to_owned(),
        }
    }
}
