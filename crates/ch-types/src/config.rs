// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{ChError, ChResult};
use crate::shape::check_square;

/// Parameters of the semi-implicit spectral step.
///
/// Every field is optional in JSON and falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Grid cell size.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// Time step size.
    #[serde(default = "default_delta_t")]
    pub delta_t: f64,
    /// Interface energy coefficient.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Explicit weight of the linear Laplacian term (Chang & Rutenberg a1).
    #[serde(default = "default_param_a1")]
    pub param_a1: f64,
    /// Explicit weight of the biharmonic term (Chang & Rutenberg a2).
    #[serde(default = "default_param_a2")]
    pub param_a2: f64,
}

/// Description of one generated training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Field shape; the first entry is the number of samples.
    pub shape: Vec<usize>,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// Interface width between phases; gamma = width².
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_delta_t")]
    pub delta_t: f64,
    #[serde(default = "default_n_steps")]
    pub n_steps: usize,
    /// RNG seed for the initial fields. `None` draws from the thread RNG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_spacing() -> f64 {
    0.25
}
fn default_delta_t() -> f64 {
    0.001
}
fn default_gamma() -> f64 {
    4.0
}
fn default_param_a1() -> f64 {
    3.0
}
fn default_param_a2() -> f64 {
    0.0
}
fn default_width() -> f64 {
    1.0
}
fn default_n_steps() -> usize {
    1
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            spacing: default_spacing(),
            delta_t: default_delta_t(),
            gamma: default_gamma(),
            param_a1: default_param_a1(),
            param_a2: default_param_a2(),
        }
    }
}

fn check_positive(name: &str, value: f64) -> ChResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ChError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> ChResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ChError::ConfigError(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

impl SolverConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> ChResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChResult<()> {
        check_positive("spacing", self.spacing)?;
        check_positive("delta_t", self.delta_t)?;
        check_non_negative("gamma", self.gamma)?;
        if !self.param_a1.is_finite() || !self.param_a2.is_finite() {
            return Err(ChError::ConfigError(
                "param_a1 and param_a2 must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatasetConfig {
    /// Dataset with default numerics for the given field shape.
    pub fn new(shape: &[usize]) -> Self {
        DatasetConfig {
            shape: shape.to_vec(),
            spacing: default_spacing(),
            width: default_width(),
            delta_t: default_delta_t(),
            n_steps: default_n_steps(),
            seed: None,
        }
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> ChResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Cahn-Hilliard gamma implied by the interface width.
    pub fn gamma(&self) -> f64 {
        self.width * self.width
    }

    /// Solver parameters implied by this dataset, with the default split.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            spacing: self.spacing,
            delta_t: self.delta_t,
            gamma: self.gamma(),
            ..SolverConfig::default()
        }
    }

    /// Numeric checks, plus the square-domain check on `shape` when at
    /// least one step will run.
    pub fn validate(&self) -> ChResult<()> {
        check_positive("spacing", self.spacing)?;
        check_positive("delta_t", self.delta_t)?;
        check_non_negative("width", self.width)?;
        if self.n_steps > 0 {
            check_square(&self.shape)?;
        }
        Ok(())
    }
}
