// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Semi-implicit spectral Cahn-Hilliard solver and training-data generator.
//!
//! Solves
//!
//! ```text
//! dφ/dt = ∇²(φ³ − φ) − γ ∇⁴φ
//! ```
//!
//! for many samples at once in any number of spatial dimensions, using the
//! Chang & Rutenberg splitting (Phys. Rev. E 72, 055701) with a1 = 3, a2 = 0.

pub mod dataset;
pub mod io;
pub mod spectral;
pub mod step;
