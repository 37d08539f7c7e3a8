// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared types for the Cahn-Hilliard spectral generator.

pub mod config;
pub mod error;
pub mod shape;
