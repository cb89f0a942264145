//! HDF5 layout of a [`Document`].
//!
//! The scalars are stored as file attributes, sources and materials as 2D
//! `f64` datasets with one row per entry, and the field as a
//! `(n_columns, n_rows)` `u64` dataset.

use std::path::Path;

use super::{Document, MaterialRecord, SourceRecord};
use crate::Error;

const SCALARS: [&str; 4] = ["tau", "t_detect", "t_max", "dx"];
const SOURCE_COLUMNS: usize = 6;
const MATERIAL_COLUMNS: usize = 2;

pub(super) fn write(filename: &Path, document: &Document, overwrite: bool) -> Result<(), Error> {
    let (n_columns, n_rows) = document.field_shape()?;

    let sources = ndarray::Array2::from_shape_fn(
        (document.sources.len(), SOURCE_COLUMNS),
        |(i, j)| {
            let s = &document.sources[i];
            [s.x, s.y, s.t_start, s.t_cutoff, s.frequency, s.phase][j]
        },
    );
    let materials = ndarray::Array2::from_shape_fn(
        (document.materials.len(), MATERIAL_COLUMNS),
        |(i, j)| {
            let m = &document.materials[i];
            [m.relative_permeability, m.relative_permittivity][j]
        },
    );
    let field = ndarray::Array2::from_shape_fn((n_columns, n_rows), |(c, r)| {
        document.field[c][r] as u64
    });

    let file = if overwrite {
        hdf5::File::create(filename)?
    } else {
        hdf5::File::create_excl(filename)?
    };

    let scalars = [document.tau, document.t_detect, document.t_max, document.dx];
    for (name, value) in SCALARS.iter().zip(scalars.iter()) {
        file.new_attr::<f64>()
            .shape(hdf5::Extents::Scalar)
            .create(*name)?
            .write_scalar(value)?;
    }

    for (name, table) in [("sources", &sources), ("materials", &materials)] {
        let dataset = file.new_dataset::<f64>()
            .shape(table.dim())
            .create(name)?;
        if !table.is_empty() {
            dataset.write(table)?;
        }
    }
    file.new_dataset::<u64>()
        .shape(field.dim())
        .create("field")?
        .write(&field)?;

    file.close()?;
    Ok(())
}

pub(super) fn read(filename: &Path) -> Result<Document, Error> {
    let file = hdf5::File::open(filename)?;

    let mut scalars = [0.0; 4];
    for (name, value) in SCALARS.iter().zip(scalars.iter_mut()) {
        *value = file
            .attr(name)
            .and_then(|attr| attr.read_scalar::<f64>())
            .map_err(|e| missing(name, e))?;
    }
    let [tau, t_detect, t_max, dx] = scalars;

    let sources = read_table(&file, "sources", SOURCE_COLUMNS)?;
    let materials = read_table(&file, "materials", MATERIAL_COLUMNS)?;
    let field = file
        .dataset("field")
        .and_then(|dataset| dataset.read_2d::<u64>())
        .map_err(|e| missing("field", e))?;

    file.close()?;

    Ok(Document {
        tau,
        t_detect,
        t_max,
        dx,
        sources: sources
            .outer_iter()
            .map(|row| SourceRecord {
                x: row[0],
                y: row[1],
                t_start: row[2],
                t_cutoff: row[3],
                frequency: row[4],
                phase: row[5],
            })
            .collect(),
        materials: materials
            .outer_iter()
            .map(|row| MaterialRecord {
                relative_permeability: row[0],
                relative_permittivity: row[1],
            })
            .collect(),
        field: field
            .outer_iter()
            .map(|column| column.iter().map(|&cell| cell as usize).collect())
            .collect(),
    })
}

/// Reads a 2D dataset with one entry per row, checking its width.
fn read_table(
    file: &hdf5::File,
    name: &str,
    n_columns: usize,
) -> Result<ndarray::Array2<f64>, Error> {
    let dataset = file.dataset(name).map_err(|e| missing(name, e))?;
    let shape = dataset.shape();
    if shape.len() != 2 || shape[1] != n_columns {
        return Err(Error::MalformedDocument(format!(
            "`{}` has shape {:?}, expected (_, {})",
            name, shape, n_columns,
        )));
    }
    if shape[0] == 0 {
        return Ok(ndarray::Array2::zeros((0, n_columns)));
    }
    dataset.read_2d::<f64>().map_err(|e| missing(name, e))
}

fn missing(name: &str, e: hdf5::Error) -> Error {
    Error::MalformedDocument(format!("missing or unreadable `{}`: {}", name, e))
}
