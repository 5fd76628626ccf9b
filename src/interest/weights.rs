use log::warn;
use serde::Deserialize;

/// Coefficients of `DOI = α·A + β·U + γ·J`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoiWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

/// Coefficients of the user-interest term `U = search·s + archetype·a + date·d`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserWeights {
    pub search: f32,
    pub archetype: f32,
    pub date: f32,
}

impl Default for UserWeights {
    fn default() -> Self {
        Self {
            search: 0.4,
            archetype: 0.4,
            date: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WeightSet {
    /// α 0.3, β 0.3, γ 0.4: focus proximity dominates.
    #[default]
    Balanced,
    /// α 0.3, β 0.5, γ 0.2: filters dominate.
    FilterHeavy,
}

impl WeightSet {
    pub const ALL: [Self; 2] = [Self::Balanced, Self::FilterHeavy];

    pub fn weights(self) -> DoiWeights {
        match self {
            Self::Balanced => DoiWeights {
                alpha: 0.3,
                beta: 0.3,
                gamma: 0.4,
            },
            Self::FilterHeavy => DoiWeights {
                alpha: 0.3,
                beta: 0.5,
                gamma: 0.2,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::FilterHeavy => "Filter-heavy",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterestConfig {
    pub weights: WeightSet,
    pub alpha: Option<f32>,
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
    pub search_weight: Option<f32>,
    pub archetype_weight: Option<f32>,
    pub date_weight: Option<f32>,
}

impl InterestConfig {
    pub fn with_weights(weights: WeightSet) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Preset weights with any explicit overrides applied.
    pub fn doi_weights(&self) -> DoiWeights {
        let preset = self.weights.weights();
        DoiWeights {
            alpha: weight_or(self.alpha, preset.alpha, "alpha"),
            beta: weight_or(self.beta, preset.beta, "beta"),
            gamma: weight_or(self.gamma, preset.gamma, "gamma"),
        }
    }

    pub fn user_weights(&self) -> UserWeights {
        let defaults = UserWeights::default();
        UserWeights {
            search: weight_or(self.search_weight, defaults.search, "search weight"),
            archetype: weight_or(self.archetype_weight, defaults.archetype, "archetype weight"),
            date: weight_or(self.date_weight, defaults.date, "date weight"),
        }
    }
}

fn weight_or(value: Option<f32>, fallback: f32, name: &str) -> f32 {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            warn!("ignoring invalid interest {name} {value}, using {fallback}");
            fallback
        }
        None => fallback,
    }
}
