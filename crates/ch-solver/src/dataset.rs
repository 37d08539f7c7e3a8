// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Dataset
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Random microstructures and their Cahn-Hilliard responses.
//!
//! Produces `(X, y)` pairs for fitting a localization regression model:
//! `X` is uniform noise in `[-1, 1)`, `y` is `X` evolved by `n_steps`.

use ch_types::config::DatasetConfig;
use ch_types::error::ChResult;
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::io::{read_dataset_npz, write_dataset_npz};
use crate::step::CahnHilliardSolver;

/// Concentration field of `shape` with values drawn from `2·U[0, 1) − 1`.
pub fn random_field<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(shape), |_| 2.0 * rng.gen::<f64>() - 1.0)
}

/// Generate microstructures and responses with the thread RNG.
///
/// `shape[0]` is the number of samples and `gamma = width²`.
pub fn generate_dataset(
    shape: &[usize],
    spacing: f64,
    width: f64,
    delta_t: f64,
    n_steps: usize,
) -> ChResult<(ArrayD<f64>, ArrayD<f64>)> {
    let config = DatasetConfig {
        spacing,
        width,
        delta_t,
        n_steps,
        ..DatasetConfig::new(shape)
    };
    generate_dataset_with_rng(&config, &mut rand::thread_rng())
}

/// Generate microstructures and responses from a caller-owned RNG.
///
/// Numerics are validated before anything is drawn. With `n_steps = 0`
/// no step runs and `(x, x)` is returned for any shape.
pub fn generate_dataset_with_rng<R: Rng + ?Sized>(
    config: &DatasetConfig,
    rng: &mut R,
) -> ChResult<(ArrayD<f64>, ArrayD<f64>)> {
    config.validate()?;
    let solver = CahnHilliardSolver::from_config(&config.solver_config());

    let x = random_field(&config.shape, rng);
    let y = solver.iterate(&x, config.n_steps)?;
    debug!(
        shape = ?config.shape,
        n_steps = config.n_steps,
        gamma = solver.gamma,
        "cahn-hilliard dataset generated"
    );
    Ok((x, y))
}

/// Paired microstructures `x` and evolved responses `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x: ArrayD<f64>,
    pub y: ArrayD<f64>,
}

impl Dataset {
    /// Generate from a configuration; `config.seed` makes the draw reproducible.
    pub fn generate(config: &DatasetConfig) -> ChResult<Self> {
        let (x, y) = match config.seed {
            Some(seed) => generate_dataset_with_rng(config, &mut StdRng::seed_from_u64(seed))?,
            None => generate_dataset_with_rng(config, &mut rand::thread_rng())?,
        };
        Ok(Dataset { x, y })
    }

    /// Load a configuration file and generate from it.
    pub fn from_config_file(path: &str) -> ChResult<Self> {
        Self::generate(&DatasetConfig::from_file(path)?)
    }

    pub fn n_samples(&self) -> usize {
        self.x.shape().first().copied().unwrap_or(0)
    }

    pub fn save_npz(&self, path: &str) -> ChResult<()> {
        write_dataset_npz(path, &self.x, &self.y)
    }

    pub fn load_npz(path: &str) -> ChResult<Self> {
        let (x, y) = read_dataset_npz(path)?;
        Ok(Dataset { x, y })
    }
}
