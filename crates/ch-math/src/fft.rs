// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — FFT
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! N-dimensional FFT wrappers around rustfft.
//!
//! Fields carry a leading sample axis that is never transformed; every
//! other axis is spatial. Convention matches numpy with
//! `axes = range(1, ndim)`:
//! - Forward FFT (fftn_spatial): unnormalized
//! - Inverse FFT (ifftn_spatial_real): normalized by 1/(d1*...*dk)

use ndarray::{ArrayD, Axis};
use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};

/// Forward FFT over all spatial axes.
/// Matches `numpy.fft.fftn(x, axes=range(1, x.ndim))`.
pub fn fftn_spatial(input: &ArrayD<f64>) -> ArrayD<Complex64> {
    let mut data = input.mapv(|v| Complex64::new(v, 0.0));
    transform_spatial_axes(&mut data, FftDirection::Forward);
    data
}

/// Inverse FFT over all spatial axes keeping only the real part.
/// Matches `numpy.fft.ifftn(x, axes=range(1, x.ndim)).real`.
///
/// The imaginary residue of a real field's round trip is discarded.
pub fn ifftn_spatial_real(input: &ArrayD<Complex64>) -> ArrayD<f64> {
    let mut data = input.clone();
    transform_spatial_axes(&mut data, FftDirection::Inverse);
    let norm = inverse_norm(data.shape());
    data.mapv(|c| c.re * norm)
}

fn inverse_norm(shape: &[usize]) -> f64 {
    let points: usize = shape.iter().skip(1).product();
    if points == 0 {
        1.0
    } else {
        1.0 / points as f64
    }
}

fn transform_spatial_axes(data: &mut ArrayD<Complex64>, direction: FftDirection) {
    if data.is_empty() {
        return;
    }
    let mut planner = FftPlanner::new();
    for axis in 1..data.ndim() {
        let fft = planner.plan_fft(data.len_of(Axis(axis)), direction);
        transform_axis(data, Axis(axis), fft.as_ref());
    }
}

/// Apply `fft` to every 1-D lane along `axis`.
///
/// Only the last axis is contiguous in standard layout; other lanes are
/// gathered into a buffer, transformed and scattered back.
fn transform_axis(data: &mut ArrayD<Complex64>, axis: Axis, fft: &dyn Fft<f64>) {
    let zero = Complex64::new(0.0, 0.0);
    let mut buffer = vec![zero; data.len_of(axis)];
    let mut scratch = vec![zero; fft.get_inplace_scratch_len()];

    for mut lane in data.lanes_mut(axis) {
        if let Some(slice) = lane.as_slice_mut() {
            fft.process_with_scratch(slice, &mut scratch);
            continue;
        }
        for (b, v) in buffer.iter_mut().zip(lane.iter()) {
            *b = *v;
        }
        fft.process_with_scratch(&mut buffer, &mut scratch);
        for (v, b) in lane.iter_mut().zip(buffer.iter()) {
            *v = *b;
        }
    }
}
