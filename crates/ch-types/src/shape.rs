// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Field Shape
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shape bookkeeping for sample-indexed concentration fields.
//!
//! A field has shape `(n_samples, d1, ..., dk)`: axis 0 indexes samples and
//! is never transformed, axes `1..=k` are spatial.

use crate::error::{ChError, ChResult};

/// Spatial extents of a field shape (everything after the sample axis).
pub fn spatial_shape(shape: &[usize]) -> &[usize] {
    shape.get(1..).unwrap_or(&[])
}

/// Number of spatial axes.
pub fn spatial_ndim(shape: &[usize]) -> usize {
    spatial_shape(shape).len()
}

/// Check that `shape` describes a square/cubic domain and return its side length.
///
/// Fails when the spatial extents differ, or when there is no spatial axis at all.
pub fn check_square(shape: &[usize]) -> ChResult<usize> {
    let spatial = spatial_shape(shape);
    let Some(&side) = spatial.first() else {
        return Err(ChError::Domain(format!(
            "X must have a sample axis and at least one spatial axis, got shape {shape:?}"
        )));
    };
    if spatial.iter().any(|&d| d != side) {
        return Err(ChError::Domain(format!(
            "X must represent a square domain, got spatial shape {spatial:?}"
        )));
    }
    Ok(side)
}
