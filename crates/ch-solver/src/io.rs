// ─────────────────────────────────────────────────────────────────────
// Cahn-Hilliard Generator — Dataset I/O
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `.npz` archives holding `x` (microstructures) and `y` (responses).
//!
//! Readable from Python with `numpy.load(path)["x"]`.

use ch_types::error::{ChError, ChResult};
use ndarray::{ArrayD, IxDyn, OwnedRepr};
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;

pub fn write_dataset_npz(path: &str, x: &ArrayD<f64>, y: &ArrayD<f64>) -> ChResult<()> {
    if x.shape() != y.shape() {
        return Err(ChError::Npz(format!(
            "x {:?} and y {:?} must have the same shape",
            x.shape(),
            y.shape()
        )));
    }
    let file = File::create(path)?;
    let mut npz = NpzWriter::new(file);
    npz.add_array("x", x)
        .map_err(|e| ChError::Npz(format!("Failed to write x to '{path}': {e}")))?;
    npz.add_array("y", y)
        .map_err(|e| ChError::Npz(format!("Failed to write y to '{path}': {e}")))?;
    npz.finish()
        .map_err(|e| ChError::Npz(format!("Failed to finish npz '{path}': {e}")))?;
    Ok(())
}

pub fn read_dataset_npz(path: &str) -> ChResult<(ArrayD<f64>, ArrayD<f64>)> {
    let file = File::open(path)?;
    let mut npz = NpzReader::new(file)
        .map_err(|e| ChError::Npz(format!("Failed to open npz '{path}': {e}")))?;

    let x = read_field(&mut npz, "x")?;
    let y = read_field(&mut npz, "y")?;
    if x.shape() != y.shape() {
        return Err(ChError::Npz(format!(
            "'{path}' holds x {:?} and y {:?} of different shapes",
            x.shape(),
            y.shape()
        )));
    }
    Ok((x, y))
}

fn read_field(npz: &mut NpzReader<File>, key: &str) -> ChResult<ArrayD<f64>> {
    npz.by_name::<OwnedRepr<f64>, IxDyn>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<OwnedRepr<f64>, IxDyn>(key))
        .map_err(|e| ChError::Npz(format!("Failed to read {key} from npz: {e}")))
}
