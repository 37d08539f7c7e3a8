// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChError {
    /// Field does not describe a square/cubic periodic domain.
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("NPZ error: {0}")]
    Npz(String),
}

pub type ChResult<T> = Result<T, ChError>;
