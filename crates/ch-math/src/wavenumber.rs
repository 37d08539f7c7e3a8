// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Wavenumber Grids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Angular wavenumber grids in FFT order.
//!
//! `k_space(n, dx)` matches `2π · numpy.fft.fftfreq(n, dx)` index for
//! index, so it lines up with [`crate::fft::fftn_spatial`] output.

use ch_types::error::ChResult;
use ch_types::shape::{check_square, spatial_ndim};
use ndarray::{Array1, ArrayD, Dimension, IxDyn};
use std::f64::consts::PI;

/// Wavenumber axis for `size` grid points with cell size `spacing`.
///
/// Non-negative frequencies ascending, then negative frequencies
/// ascending toward zero.
pub fn k_space(size: usize, spacing: f64) -> Array1<f64> {
    let size1 = if size % 2 == 0 { size / 2 } else { (size - 1) / 2 };
    let size2 = if size % 2 == 0 { size1 } else { size1 + 1 };

    let positive = (0..size2).map(|i| i as f64);
    let negative = (0..size1).map(|i| i as f64 - size1 as f64);
    let scale = 2.0 * PI / (spacing * size as f64);

    positive.chain(negative).map(|k| k * scale).collect()
}

/// |k|² over a `ndim`-dimensional cube of side `side`, with a leading
/// singleton axis so it broadcasts over samples.
///
/// Shape `(1, side, ..., side)`. Every axis reuses the same 1-D axis,
/// which is only valid for square/cubic domains.
pub fn squared_wavenumber_field(side: usize, ndim: usize, spacing: f64) -> ArrayD<f64> {
    let k_sq = k_space(side, spacing).mapv(|k| k * k);

    let mut shape = Vec::with_capacity(ndim + 1);
    shape.push(1);
    shape.extend(std::iter::repeat(side).take(ndim));

    ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
        idx.slice()[1..].iter().map(|&i| k_sq[i]).sum::<f64>()
    })
}

/// [`squared_wavenumber_field`] for a full field shape `(n_samples, d, ..., d)`.
pub fn squared_wavenumber_field_for(shape: &[usize], spacing: f64) -> ChResult<ArrayD<f64>> {
    let side = check_square(shape)?;
    Ok(squared_wavenumber_field(side, spatial_ndim(shape), spacing))
}
