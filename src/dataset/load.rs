use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::parse::{Dataset, parse_dataset};

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let dataset =
        parse_dataset(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))?;

    info!(
        "loaded dataset {} ({} vertices, {} edges)",
        path.display(),
        dataset.vertices.len(),
        dataset.edges.len()
    );
    Ok(dataset)
}
