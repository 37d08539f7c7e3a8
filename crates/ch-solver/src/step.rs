// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Step Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Real-space time stepping on sample-indexed fields.
//!
//! `X` has shape `(n_samples, d, ..., d)`; samples are advanced
//! independently and the input is never modified.

use ch_math::fft::ifftn_spatial_real;
use ch_math::wavenumber::squared_wavenumber_field;
use ch_types::config::SolverConfig;
use ch_types::error::ChResult;
use ch_types::shape::check_square;
use ndarray::ArrayD;
use tracing::{debug, trace, warn};

use crate::spectral::{spectral_response, SplitCoefficients};

/// Cahn-Hilliard stepper with fixed numerical parameters.
///
/// Fixing `spacing`, `delta_t` and `gamma` once gives a reusable
/// single-argument step function for any number of fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CahnHilliardSolver {
    /// Grid cell size.
    pub spacing: f64,
    /// Time step size.
    pub delta_t: f64,
    /// Interface energy coefficient.
    pub gamma: f64,
    pub coefficients: SplitCoefficients,
}

impl Default for CahnHilliardSolver {
    fn default() -> Self {
        CahnHilliardSolver {
            spacing: 0.25,
            delta_t: 0.001,
            gamma: 4.0,
            coefficients: SplitCoefficients::default(),
        }
    }
}

impl CahnHilliardSolver {
    pub fn new(spacing: f64, delta_t: f64, gamma: f64) -> Self {
        CahnHilliardSolver {
            spacing,
            delta_t,
            gamma,
            coefficients: SplitCoefficients::default(),
        }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        CahnHilliardSolver {
            spacing: config.spacing,
            delta_t: config.delta_t,
            gamma: config.gamma,
            coefficients: SplitCoefficients {
                a1: config.param_a1,
                a2: config.param_a2,
            },
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_delta_t(mut self, delta_t: f64) -> Self {
        self.delta_t = delta_t;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_coefficients(mut self, coefficients: SplitCoefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    /// Advance every sample of `x` by one time step.
    pub fn step(&self, x: &ArrayD<f64>) -> ChResult<ArrayD<f64>> {
        self.iterate(x, 1)
    }

    /// Advance every sample of `x` by `n_steps` time steps.
    ///
    /// `n_steps = 0` returns a copy of `x` without stepping, so no shape
    /// check runs. Otherwise the square-domain check runs before any
    /// transform and the wavenumber field is shared by all steps.
    pub fn iterate(&self, x: &ArrayD<f64>, n_steps: usize) -> ChResult<ArrayD<f64>> {
        if n_steps == 0 {
            return Ok(x.clone());
        }
        let side = check_square(x.shape())?;

        let ksq = squared_wavenumber_field(side, x.ndim() - 1, self.spacing);
        debug!(
            shape = ?x.shape(),
            n_steps,
            spacing = self.spacing,
            delta_t = self.delta_t,
            gamma = self.gamma,
            "cahn-hilliard iteration starting"
        );

        let mut field = self.advance(x, &ksq)?;
        for step in 1..n_steps {
            trace!(step, "spectral step");
            field = self.advance(&field, &ksq)?;
        }

        if field.iter().any(|v| !v.is_finite()) {
            warn!(
                n_steps,
                delta_t = self.delta_t,
                "cahn-hilliard iteration produced non-finite values"
            );
        }
        Ok(field)
    }

    fn advance(&self, x: &ArrayD<f64>, ksq: &ArrayD<f64>) -> ChResult<ArrayD<f64>> {
        let response = spectral_response(x, self.delta_t, self.gamma, ksq, self.coefficients)?;
        Ok(ifftn_spatial_real(&response))
    }
}

/// Solve the Cahn-Hilliard equation for one step.
///
/// Fails with [`ChError::Domain`](ch_types::error::ChError::Domain) when
/// the spatial extents of `x` differ.
pub fn solve_one_step(
    x: &ArrayD<f64>,
    spacing: f64,
    delta_t: f64,
    gamma: f64,
) -> ChResult<ArrayD<f64>> {
    CahnHilliardSolver::new(spacing, delta_t, gamma).step(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch_types::error::ChError;
    use ndarray::{Axis, IxDyn};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Uniform noise in (-amplitude, amplitude).
    fn noise(shape: &[usize], amplitude: f64, seed: u64) -> ArrayD<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        ArrayD::from_shape_fn(IxDyn(shape), |_| amplitude * (2.0 * rng.gen::<f64>() - 1.0))
    }

    fn max_min(x: &ArrayD<f64>) -> (f64, f64) {
        x.iter().fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), &v| {
            (hi.max(v), lo.min(v))
        })
    }

    #[test]
    fn test_non_square_rejected() {
        let x = ArrayD::<f64>::zeros(IxDyn(&[1, 2, 3]));
        match solve_one_step(&x, 0.25, 0.001, 4.0) {
            Err(ChError::Domain(msg)) => assert!(msg.contains("square domain")),
            other => panic!("expected domain error, got {other:?}"),
        }
        let solver = CahnHilliardSolver::default();
        assert!(matches!(solver.iterate(&x, 3), Err(ChError::Domain(_))));
    }

    #[test]
    fn test_zero_steps_skips_shape_check() {
        let x = noise(&[1, 2, 3], 1.0, 6);
        let y = CahnHilliardSolver::default().iterate(&x, 0).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let x = noise(&[2, 7, 7], 1.0, 5);
        let y = CahnHilliardSolver::default().iterate(&x, 0).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_shape_preserved() {
        let solver = CahnHilliardSolver::default();
        for shape in [vec![3, 16], vec![2, 9, 9], vec![1, 5, 5, 5]] {
            let x = noise(&shape, 1.0, 11);
            let y = solver.step(&x).unwrap();
            assert_eq!(y.shape(), shape.as_slice());
        }
    }

    #[test]
    fn test_deterministic() {
        let x = noise(&[2, 12, 12], 1.0, 3);
        let a = solve_one_step(&x, 0.25, 0.001, 4.0).unwrap();
        let b = solve_one_step(&x, 0.25, 0.001, 4.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_input_not_mutated() {
        let x = noise(&[1, 10, 10], 1.0, 8);
        let copy = x.clone();
        let _ = CahnHilliardSolver::default().iterate(&x, 3).unwrap();
        assert_eq!(x, copy);
    }

    #[test]
    fn test_uniform_field_is_fixed_point() {
        let x = ArrayD::from_elem(IxDyn(&[2, 8, 8]), 0.4);
        let y = CahnHilliardSolver::default().iterate(&x, 5).unwrap();
        for &v in y.iter() {
            assert!((v - 0.4).abs() < 1e-12, "uniform field drifted to {v}");
        }
    }

    #[test]
    fn test_mean_concentration_conserved() {
        let x = noise(&[3, 16, 16], 0.8, 21);
        let y = CahnHilliardSolver::default().iterate(&x, 20).unwrap();
        for s in 0..3 {
            let before = x.index_axis(Axis(0), s).mean().unwrap();
            let after = y.index_axis(Axis(0), s).mean().unwrap();
            assert!((before - after).abs() < 1e-12, "sample {s}: {before} vs {after}");
        }
    }

    #[test]
    fn test_samples_evolve_independently() {
        let batch = noise(&[3, 10, 10], 1.0, 4);
        let stepped = CahnHilliardSolver::default().iterate(&batch, 4).unwrap();
        let single = batch.index_axis(Axis(0), 2).to_owned().insert_axis(Axis(0));
        let single_stepped = CahnHilliardSolver::default().iterate(&single, 4).unwrap();
        for (a, b) in stepped.index_axis(Axis(0), 2).iter().zip(single_stepped.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_small_mode_follows_linear_factor() {
        // At tiny amplitude the cubic term vanishes and each cosine mode is
        // scaled by (1 + Δt k² a1) / (1 − Δt k² ((1 − γk²) − a1)).
        let n = 32;
        let mode = 2;
        let eps = 1e-6;
        let solver = CahnHilliardSolver::new(0.5, 0.01, 1.0);
        let x = ArrayD::from_shape_fn(IxDyn(&[1, n]), |idx| {
            eps * (2.0 * std::f64::consts::PI * (mode * idx[1]) as f64 / n as f64).cos()
        });
        let y = solver.step(&x).unwrap();

        let k = 2.0 * std::f64::consts::PI * mode as f64 / (0.5 * n as f64);
        let ksq = k * k;
        let factor = (1.0 + 0.01 * ksq * 3.0) / (1.0 - 0.01 * ksq * ((1.0 - ksq) - 3.0));
        for (a, b) in x.iter().zip(y.iter()) {
            assert!((b - factor * a).abs() < 1e-9 * eps, "{b} vs {}", factor * a);
        }
    }

    #[test]
    fn test_config_round_trip_into_solver() {
        let config = SolverConfig {
            param_a2: 0.5,
            ..SolverConfig::default()
        };
        let solver = CahnHilliardSolver::from_config(&config);
        assert_eq!(solver.spacing, 0.25);
        assert_eq!(solver.coefficients, SplitCoefficients { a1: 3.0, a2: 0.5 });

        let built = CahnHilliardSolver::default()
            .with_spacing(0.5)
            .with_delta_t(0.01)
            .with_gamma(2.0)
            .with_coefficients(SplitCoefficients { a1: 2.0, a2: 0.0 });
        assert_eq!(built.spacing, 0.5);
        assert_eq!(built.delta_t, 0.01);
        assert_eq!(built.gamma, 2.0);
        assert_eq!(built.coefficients.a1, 2.0);
    }

    #[test]
    fn test_phase_separation_1d() {
        let x = noise(&[8, 100], 0.01, 99);
        let y = CahnHilliardSolver::default().iterate(&x, 10_000).unwrap();
        let (hi, lo) = max_min(&y);
        assert!(hi > 2e-3 && lo < -2e-3, "max {hi}, min {lo}");
    }

    #[test]
    fn test_phase_separation_2d() {
        let x = noise(&[4, 101, 101], 0.01, 99);
        let y = CahnHilliardSolver::default().iterate(&x, 100).unwrap();
        let (hi, lo) = max_min(&y);
        assert!(hi > 1e-3 && lo < -1e-3, "max {hi}, min {lo}");
    }

    #[test]
    #[ignore = "101³ grid; run with --ignored in release mode"]
    fn test_phase_separation_3d() {
        let x = noise(&[2, 101, 101, 101], 0.01, 99);
        let y = CahnHilliardSolver::default().iterate(&x, 10).unwrap();
        let (hi, lo) = max_min(&y);
        assert!(hi > 5e-4 && lo < -5e-4, "max {hi}, min {lo}");
    }
}
