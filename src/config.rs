use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::dataset::{AttributeKeys, parse_date_text};
use crate::interest::{DateRange, InterestConfig};
use crate::layout::{DEFAULT_TICK_INTERVAL, LayoutConfig};

const DEFAULT_DATE_MIN: &str = "1910-01-01";
const DEFAULT_DATE_MAX: &str = "2024-01-01";

/// Everything the explorer reads from its TOML file. Every section and field
/// is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub layout: LayoutConfig,
    pub interest: InterestConfig,
    pub dataset: AttributeKeys,
    pub playback: PlaybackConfig,
    pub filters: FilterConfig,
}

impl ExplorerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        info!("loaded config {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid config TOML")
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub interval_ms: u64,
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            autoplay: false,
        }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        if self.interval_ms == 0 {
            warn!("playback interval of 0 ms ignored, using {DEFAULT_TICK_INTERVAL:?}");
            return DEFAULT_TICK_INTERVAL;
        }
        Duration::from_millis(self.interval_ms)
    }
}

/// Initial filter state, dates as `YYYY[-MM[-DD]]` or RFC 3339.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub date_min: String,
    pub date_max: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            date_min: DEFAULT_DATE_MIN.to_owned(),
            date_max: DEFAULT_DATE_MAX.to_owned(),
        }
    }
}

impl FilterConfig {
    pub fn date_range(&self) -> DateRange {
        let min = filter_date(&self.date_min, DEFAULT_DATE_MIN, "date_min");
        let max = filter_date(&self.date_max, DEFAULT_DATE_MAX, "date_max");
        DateRange::new(min, max)
    }
}

fn filter_date(text: &str, fallback: &str, name: &str) -> i64 {
    if let Some(millis) = parse_date_text(text) {
        return millis;
    }
    warn!("ignoring unparseable filter {name} {text:?}, using {fallback}");
    parse_date_text(fallback).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::year_start_millis;
    use crate::interest::WeightSet;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ExplorerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.layout.width, 960.0);
        assert_eq!(config.playback.interval(), Duration::from_millis(50));
        assert_eq!(config.interest.weights, WeightSet::Balanced);
    }

    #[test]
    fn reads_sections() {
        let config = ExplorerConfig::from_toml_str(
            r#"
            [layout]
            width = 400.0
            height = 300.0
            seed = 7
            clamp_to_viewport = true

            [interest]
            weights = "filter-heavy"
            date_weight = 0.3

            [dataset]
            begin_key = "born"

            [playback]
            interval_ms = 20
            autoplay = true

            [filters]
            date_min = "1800"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.width, 400.0);
        assert_eq!(config.layout.seed, Some(7));
        assert!(config.layout.clamp_to_viewport);
        assert_eq!(config.interest.weights, WeightSet::FilterHeavy);
        assert_eq!(config.interest.date_weight, Some(0.3));
        assert_eq!(config.dataset.begin_key, "born");
        assert_eq!(config.dataset.end_key, "2");
        assert_eq!(config.playback.interval(), Duration::from_millis(20));
        assert_eq!(
            config.filters.date_range().min,
            year_start_millis(1800).unwrap()
        );
    }

    #[test]
    fn bad_values_fall_back() {
        let filters = FilterConfig {
            date_min: "not a date".to_owned(),
            ..FilterConfig::default()
        };
        assert_eq!(filters.date_range(), FilterConfig::default().date_range());

        let playback = PlaybackConfig {
            interval_ms: 0,
            autoplay: false,
        };
        assert_eq!(playback.interval(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn rejects_malformed_toml() {
        let error = ExplorerConfig::from_toml_str("[layout\nwidth = 1").unwrap_err();
        assert!(format!("{error:#}").contains("invalid config TOML"));
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        fs::write(&path, "[playback]\nautoplay = true\n").unwrap();
        assert!(ExplorerConfig::load(&path).unwrap().playback.autoplay);

        let missing = dir.path().join("missing.toml");
        let error = ExplorerConfig::load(&missing).unwrap_err();
        assert!(format!("{error:#}").contains("missing.toml"));
    }
}
