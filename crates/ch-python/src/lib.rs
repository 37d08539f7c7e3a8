// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Python Bindings
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PyO3 Python bindings for the Cahn-Hilliard generator.
//!
//! Exposes the one-step solver and the dataset generator to the Python
//! training pipeline via PyO3 + numpy.

use ch_solver::dataset::Dataset;
use ch_types::config::DatasetConfig;
use ch_types::error::ChError;
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArrayDyn};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

type PyField<'py> = Bound<'py, PyArrayDyn<f64>>;

fn to_py_err(err: ChError) -> PyErr {
    match err {
        ChError::Domain(msg) => PyRuntimeError::new_err(msg),
        ChError::ConfigError(msg) => PyValueError::new_err(msg),
        other => PyIOError::new_err(other.to_string()),
    }
}

// ─── Solver ───

/// Advance microstructures `x` (n_samples, d, ..., d) by one time step.
#[pyfunction]
#[pyo3(signature = (x, spacing=0.25, delta_t=0.001, gamma=4.0))]
fn solve_one_step<'py>(
    py: Python<'py>,
    x: PyReadonlyArrayDyn<'py, f64>,
    spacing: f64,
    delta_t: f64,
    gamma: f64,
) -> PyResult<PyField<'py>> {
    let field = x.as_array().to_owned();
    let stepped = py
        .allow_threads(|| ch_solver::step::solve_one_step(&field, spacing, delta_t, gamma))
        .map_err(to_py_err)?;
    Ok(stepped.into_pyarray(py))
}

// ─── Dataset ───

/// Generate microstructures and their responses. Returns `(X, y)`.
#[pyfunction]
#[pyo3(signature = (shape, spacing=0.25, width=1.0, delta_t=0.001, n_steps=1, seed=None))]
fn generate_dataset<'py>(
    py: Python<'py>,
    shape: Vec<usize>,
    spacing: f64,
    width: f64,
    delta_t: f64,
    n_steps: usize,
    seed: Option<u64>,
) -> PyResult<(PyField<'py>, PyField<'py>)> {
    let config = DatasetConfig {
        spacing,
        width,
        delta_t,
        n_steps,
        seed,
        ..DatasetConfig::new(&shape)
    };
    let Dataset { x, y } = py
        .allow_threads(|| Dataset::generate(&config))
        .map_err(to_py_err)?;
    Ok((x.into_pyarray(py), y.into_pyarray(py)))
}

/// Generate a dataset from a JSON config file and save it as `.npz`.
#[pyfunction]
fn generate_dataset_npz(config_path: &str, output_path: &str) -> PyResult<usize> {
    let data = Dataset::from_config_file(config_path).map_err(to_py_err)?;
    data.save_npz(output_path).map_err(to_py_err)?;
    Ok(data.n_samples())
}

#[pymodule]
fn ch_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve_one_step, m)?)?;
    m.add_function(wrap_pyfunction!(generate_dataset, m)?)?;
    m.add_function(wrap_pyfunction!(generate_dataset_npz, m)?)?;
    Ok(())
}
