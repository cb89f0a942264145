//! The serialized description consumed by the solver.
//!
//! A [`Document`] lists exactly the fields the solver reads: the time scalars,
//! the spatial step, every source and material in order and the material grid
//! as `field[column][row]`. [`export`] and [`import`] convert between a
//! `Document` and an [`Experiment`]; [`save`] and [`load`] move it through a
//! JSON or HDF5 file.

mod float_repr;
mod h5;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{Material, MaterialTable, Source};
use crate::grid::Grid;
use crate::{Error, Experiment};

/// The serialized form of an [`Experiment`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(with = "float_repr")]
    pub tau: f64,
    #[serde(with = "float_repr")]
    pub t_detect: f64,
    #[serde(with = "float_repr")]
    pub t_max: f64,
    #[serde(with = "float_repr")]
    pub dx: f64,
    pub sources: Vec<SourceRecord>,
    pub materials: Vec<MaterialRecord>,
    /// Material indices, indexed `[column][row]`.
    pub field: Vec<Vec<usize>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(with = "float_repr")]
    pub x: f64,
    #[serde(with = "float_repr")]
    pub y: f64,
    #[serde(with = "float_repr")]
    pub t_start: f64,
    #[serde(with = "float_repr")]
    pub t_cutoff: f64,
    #[serde(with = "float_repr")]
    pub frequency: f64,
    #[serde(with = "float_repr")]
    pub phase: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    #[serde(with = "float_repr")]
    pub relative_permeability: f64,
    #[serde(with = "float_repr")]
    pub relative_permittivity: f64,
}

impl From<&Source> for SourceRecord {
    fn from(source: &Source) -> Self {
        Self {
            x: source.x,
            y: source.y,
            t_start: source.t_start,
            t_cutoff: source.t_cutoff,
            frequency: source.frequency,
            phase: source.phase,
        }
    }
}

impl From<SourceRecord> for Source {
    fn from(record: SourceRecord) -> Self {
        Self {
            x: record.x,
            y: record.y,
            t_start: record.t_start,
            t_cutoff: record.t_cutoff,
            frequency: record.frequency,
            phase: record.phase,
        }
    }
}

impl From<&Material> for MaterialRecord {
    fn from(material: &Material) -> Self {
        Self {
            relative_permeability: material.relative_permeability(),
            relative_permittivity: material.relative_permittivity(),
        }
    }
}

impl From<MaterialRecord> for Material {
    fn from(record: MaterialRecord) -> Self {
        Material::new(record.relative_permeability, record.relative_permittivity)
    }
}

impl Document {
    /// Serializes the document into compact JSON.
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the document into indented JSON.
    pub fn to_json_string_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document from JSON. Only the structure is checked here; use
    /// [`import`] to validate the contents.
    ///
    /// Bare `Infinity`, `-Infinity` and `NaN` tokens, as written by Python's
    /// `json` module, are accepted alongside their quoted form.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(&float_repr::quote_bare_tokens(json))
            .map_err(|e| Error::MalformedDocument(e.to_string()))
    }

    /// The `(n_columns, n_rows)` shape of `field`, if it is a non-empty
    /// rectangle.
    pub(crate) fn field_shape(&self) -> Result<(usize, usize), Error> {
        let n_columns = self.field.len();
        let n_rows = self.field.first().map_or(0, Vec::len);
        if n_columns == 0 || n_rows == 0 {
            return Err(Error::MalformedDocument("`field` is empty".to_string()));
        }
        if let Some(column) = self.field.iter().position(|column| column.len() != n_rows) {
            return Err(Error::MalformedDocument(format!(
                "`field` column {} has {} rows, expected {}",
                column,
                self.field[column].len(),
                n_rows,
            )));
        }
        Ok((n_columns, n_rows))
    }
}

/// Captures the current state of an experiment.
pub fn export(experiment: &Experiment) -> Document {
    Document {
        tau: experiment.tau,
        t_detect: experiment.t_detect,
        t_max: experiment.t_max,
        dx: experiment.dx(),
        sources: experiment.sources.iter().map(SourceRecord::from).collect(),
        materials: experiment.materials().iter().map(MaterialRecord::from).collect(),
        field: experiment
            .field()
            .view()
            .outer_iter()
            .map(|column| column.to_vec())
            .collect(),
    }
}

/// Rebuilds an experiment from a document.
///
/// Fails with `Error::MalformedDocument` if the materials are empty, the
/// field is empty or ragged, `dx` is not a positive number or a cell refers
/// to a material that does not exist.
pub fn import(document: Document) -> Result<Experiment, Error> {
    let (n_columns, n_rows) = document.field_shape()?;
    if !(document.dx.is_finite() && document.dx > 0.0) {
        return Err(Error::MalformedDocument(format!(
            "`dx` must be a positive number, got {}",
            document.dx,
        )));
    }

    let materials = MaterialTable::from_vec(
        document.materials.into_iter().map(Material::from).collect(),
    )
    .ok_or_else(|| Error::MalformedDocument("`materials` is empty".to_string()))?;

    let mut cells = Vec::with_capacity(n_columns * n_rows);
    for (c, column) in document.field.into_iter().enumerate() {
        if let Some(r) = column.iter().position(|&cell| !materials.contains_index(cell)) {
            return Err(Error::MalformedDocument(format!(
                "`field[{}][{}]` refers to material {}, but there are only {} materials",
                c,
                r,
                column[r],
                materials.len(),
            )));
        }
        cells.extend(column);
    }
    let cells = ndarray::Array2::from_shape_vec((n_columns, n_rows), cells)
        .map_err(|e| Error::MalformedDocument(e.to_string()))?;

    Ok(Experiment::from_parts(
        document.tau,
        document.t_detect,
        document.t_max,
        document.sources.into_iter().map(Source::from).collect(),
        materials,
        Grid::from_cells(cells, document.dx),
    ))
}

impl From<&Experiment> for Document {
    fn from(experiment: &Experiment) -> Self {
        export(experiment)
    }
}

impl TryFrom<Document> for Experiment {
    type Error = Error;

    fn try_from(document: Document) -> Result<Self, Error> {
        import(document)
    }
}

/// How an experiment should be saved to file.
#[derive(Debug)]
pub struct SaveSettings<P: AsRef<Path>> {
    /// The path to the save file.
    pub filename: P,
    /// The file format.
    pub save_type: SaveType,
    /// Whether or not to replace an existing file.
    pub overwrite: bool,
}

/// Represents the file format to save in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SaveType {
    /// Compact JSON.
    Json,
    /// Indented JSON.
    PrettyJson,
    /// An HDF5 file with scalar attributes and one dataset per list.
    H5,
}

/// Exports an experiment and writes it to file.
///
/// Without `overwrite`, an existing file is never touched. The JSON text is
/// fully serialized before the file is opened.
pub fn save<P: AsRef<Path>>(experiment: &Experiment, settings: &SaveSettings<P>) -> Result<(), Error> {
    let filename = settings.filename.as_ref();
    let document = export(experiment);

    match settings.save_type {
        SaveType::Json | SaveType::PrettyJson => {
            let json = if settings.save_type == SaveType::PrettyJson {
                document.to_json_string_pretty()?
            } else {
                document.to_json_string()?
            };
            let mut file = open_for_writing(filename, settings.overwrite)?;
            file.write_all(json.as_bytes())?;
            file.flush()?;
        }
        SaveType::H5 => {
            if filename.exists() && !settings.overwrite {
                return Err(Error::FileExists {
                    path: filename.to_path_buf(),
                });
            }
            h5::write(filename, &document, settings.overwrite)?;
        }
    }

    debug!(path = %filename.display(), save_type = ?settings.save_type, "experiment saved");
    Ok(())
}

fn open_for_writing(filename: &Path, overwrite: bool) -> Result<fs::File, Error> {
    let mut options = fs::OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(filename).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            Error::FileExists {
                path: filename.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Reads an experiment from file.
///
/// Files ending in `.h5` or `.hdf5` are read as HDF5, everything else as JSON.
pub fn load<P: AsRef<Path>>(filename: P) -> Result<Experiment, Error> {
    let filename = filename.as_ref();
    let is_h5 = filename
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("h5") || ext.eq_ignore_ascii_case("hdf5"));

    let document = if is_h5 {
        h5::read(filename)?
    } else {
        Document::from_json_str(&fs::read_to_string(filename)?)?
    };

    debug!(path = %filename.display(), "experiment loaded");
    import(document)
}
