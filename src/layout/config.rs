use log::warn;
use serde::Deserialize;

pub const DEFAULT_WIDTH: f32 = 960.0;
pub const DEFAULT_HEIGHT: f32 = 720.0;
pub const DEFAULT_ITERATIONS: usize = 50;
pub const DEFAULT_COOLING_FACTOR: f32 = 0.95;
pub const DEFAULT_CENTERING_STRENGTH: f32 = 0.1;
pub const DEFAULT_ROOT_REPULSION: f32 = 4.0;
pub const DEFAULT_ISOLATED_ROOT_REPULSION: f32 = 1.0;
pub const DEFAULT_SETTLE_TEMPERATURE: f32 = 0.5;

/// Layout parameters. Everything except the viewport is optional; invalid
/// values fall back to the documented defaults instead of failing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub iterations: Option<usize>,
    /// Optimal pairwise distance, `sqrt(width * height / n)` when unset.
    pub k: Option<f32>,
    /// Initial temperature, `width / 4` when unset.
    pub temperature: Option<f32>,
    pub cooling_factor: Option<f32>,
    pub root_repulsion_multiplier: Option<f32>,
    pub isolated_root_repulsion_multiplier: Option<f32>,
    pub centering_strength: Option<f32>,
    pub clamp_to_viewport: bool,
    pub settle_temperature: Option<f32>,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            iterations: None,
            k: None,
            temperature: None,
            cooling_factor: None,
            root_repulsion_multiplier: None,
            isolated_root_repulsion_multiplier: None,
            centering_strength: None,
            clamp_to_viewport: false,
            settle_temperature: None,
            seed: None,
        }
    }
}

impl LayoutConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub(super) fn resolve(&self, node_count: usize) -> ResolvedLayout {
        let width = dimension(self.width, DEFAULT_WIDTH, "width");
        let height = dimension(self.height, DEFAULT_HEIGHT, "height");
        let natural_k = ((width * height) / node_count.max(1) as f32).sqrt();

        let k = match self.k {
            Some(k) if k.is_finite() && k > 0.0 => k,
            Some(k) => {
                warn!("ignoring invalid layout k {k}, using {natural_k}");
                natural_k
            }
            None => natural_k,
        };

        let cooling_factor = match self.cooling_factor {
            Some(factor) if factor.is_finite() && factor > 0.0 && factor <= 1.0 => factor,
            Some(factor) => {
                warn!("ignoring invalid cooling factor {factor}, using {DEFAULT_COOLING_FACTOR}");
                DEFAULT_COOLING_FACTOR
            }
            None => DEFAULT_COOLING_FACTOR,
        };

        ResolvedLayout {
            width,
            height,
            k,
            temperature: non_negative(self.temperature, width / 4.0, "temperature"),
            cooling_factor,
            root_repulsion: non_negative(
                self.root_repulsion_multiplier,
                DEFAULT_ROOT_REPULSION,
                "root repulsion multiplier",
            ),
            isolated_root_repulsion: non_negative(
                self.isolated_root_repulsion_multiplier,
                DEFAULT_ISOLATED_ROOT_REPULSION,
                "isolated root repulsion multiplier",
            ),
            centering_strength: non_negative(
                self.centering_strength,
                DEFAULT_CENTERING_STRENGTH,
                "centering strength",
            ),
            settle_temperature: non_negative(
                self.settle_temperature,
                DEFAULT_SETTLE_TEMPERATURE,
                "settle temperature",
            ),
            clamp_to_viewport: self.clamp_to_viewport,
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct ResolvedLayout {
    pub(super) width: f32,
    pub(super) height: f32,
    pub(super) k: f32,
    pub(super) temperature: f32,
    pub(super) cooling_factor: f32,
    pub(super) root_repulsion: f32,
    pub(super) isolated_root_repulsion: f32,
    pub(super) centering_strength: f32,
    pub(super) settle_temperature: f32,
    pub(super) clamp_to_viewport: bool,
    pub(super) iterations: usize,
}

fn dimension(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("ignoring invalid layout {name} {value}, using {fallback}");
        fallback
    }
}

fn non_negative(value: Option<f32>, fallback: f32, name: &str) -> f32 {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            warn!("ignoring invalid {name} {value}, using {fallback}");
            fallback
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_viewport() {
        let resolved = LayoutConfig::new(400.0, 400.0).resolve(4);
        assert_eq!(resolved.k, 200.0);
        assert_eq!(resolved.temperature, 100.0);
        assert_eq!(resolved.cooling_factor, 0.95);
        assert_eq!(resolved.centering_strength, 0.1);
        assert_eq!(resolved.iterations, 50);
    }

    #[test]
    fn empty_graph_k_is_finite() {
        let resolved = LayoutConfig::new(400.0, 100.0).resolve(0);
        assert_eq!(resolved.k, 200.0);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = LayoutConfig {
            width: -10.0,
            height: f32::NAN,
            k: Some(0.0),
            temperature: Some(-1.0),
            cooling_factor: Some(1.5),
            root_repulsion_multiplier: Some(f32::INFINITY),
            ..LayoutConfig::default()
        };
        let resolved = config.resolve(10);

        assert_eq!(resolved.width, DEFAULT_WIDTH);
        assert_eq!(resolved.height, DEFAULT_HEIGHT);
        assert!(resolved.k.is_finite() && resolved.k > 0.0);
        assert_eq!(resolved.temperature, DEFAULT_WIDTH / 4.0);
        assert_eq!(resolved.cooling_factor, DEFAULT_COOLING_FACTOR);
        assert_eq!(resolved.root_repulsion, DEFAULT_ROOT_REPULSION);
    }

    #[test]
    fn overrides_are_kept() {
        let config = LayoutConfig {
            k: Some(100.0),
            temperature: Some(12.0),
            cooling_factor: Some(0.9),
            isolated_root_repulsion_multiplier: Some(0.0),
            iterations: Some(3),
            ..LayoutConfig::new(400.0, 400.0)
        };
        let resolved = config.resolve(4);

        assert_eq!(resolved.k, 100.0);
        assert_eq!(resolved.temperature, 12.0);
        assert_eq!(resolved.cooling_factor, 0.9);
        assert_eq!(resolved.isolated_root_repulsion, 0.0);
        assert_eq!(resolved.iterations, 3);
    }
}
