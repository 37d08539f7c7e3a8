// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Spectral Step Operator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One semi-implicit step evaluated in Fourier space.
//!
//! ```text
//! φ' + (1 − a1) Δt ∇²φ' + (1 − a2) Δt γ ∇⁴φ'
//!     = φ − Δt ∇²(a1 φ + a2 γ ∇²φ − φ³)
//! ```
//!
//! With ∇² → −k² this becomes, per mode,
//! `F(φ') = [F(φ)(1 + Δt k² E) − Δt k² F(φ³)] / (1 − Δt k² I)`
//! where `E = a1 − γ a2 k²` is the explicit part and
//! `I = (1 − γ k²) − E` the implicit remainder.

use ch_math::fft::fftn_spatial;
use ch_types::error::{ChError, ChResult};
use ndarray::{ArrayD, Zip};
use num_complex::Complex64;

/// Explicit/implicit split weights of the linear operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCoefficients {
    pub a1: f64,
    pub a2: f64,
}

impl Default for SplitCoefficients {
    fn default() -> Self {
        SplitCoefficients { a1: 3.0, a2: 0.0 }
    }
}

impl SplitCoefficients {
    /// Linear terms stepped explicitly. Reduces to `a1` when `a2 = 0`.
    pub fn explicit(&self, gamma: f64, ksq: f64) -> f64 {
        self.a1 - gamma * self.a2 * ksq
    }

    /// Linear terms stepped implicitly.
    pub fn implicit(&self, gamma: f64, ksq: f64) -> f64 {
        (1.0 - gamma * ksq) - self.explicit(gamma, ksq)
    }
}

/// Fourier coefficients of the field after one step.
///
/// `ksq` has shape `(1, d, ..., d)` and is broadcast over the sample axis
/// of `x`. A vanishing denominator is not guarded; it yields inf/NaN.
pub fn spectral_response(
    x: &ArrayD<f64>,
    delta_t: f64,
    gamma: f64,
    ksq: &ArrayD<f64>,
    coefficients: SplitCoefficients,
) -> ChResult<ArrayD<Complex64>> {
    let broadcastable = ksq.ndim() == x.ndim()
        && ksq.shape().first() == Some(&1)
        && ksq.shape()[1..] == x.shape()[1..];
    if !broadcastable {
        return Err(ChError::Domain(format!(
            "wavenumber field {:?} does not broadcast against X {:?}",
            ksq.shape(),
            x.shape()
        )));
    }

    let fx_cubed = fftn_spatial(&x.mapv(|v| v * v * v));
    let mut response = fftn_spatial(x);

    Zip::from(&mut response)
        .and(&fx_cubed)
        .and_broadcast(ksq)
        .for_each(|fx, &fx3, &k| {
            let dt_ksq = delta_t * k;
            let numerator =
                *fx * (1.0 + dt_ksq * coefficients.explicit(gamma, k)) - fx3 * dt_ksq;
            let denominator = 1.0 - dt_ksq * coefficients.implicit(gamma, k);
            *fx = numerator / denominator;
        });

    Ok(response)
}
