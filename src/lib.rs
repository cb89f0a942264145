//! A builder for 2-dimensional FDTD experiment setups.
//!
//! An [`Experiment`] describes a rectangular domain discretized into a grid of
//! material indices, the materials those indices refer to, and the sources
//! that excite the field. Shapes are painted onto the grid in call order and
//! the finished setup is exported as a [`document::Document`] for the solver.
//!
//! To get started, refer to the `demos` directory in the main repository.

mod experiment;
mod grid;

pub mod components;
pub mod document;
pub mod prelude;
pub mod shapes;

use std::path::PathBuf;

pub use experiment::{Experiment, ExperimentDescriptor, SimulationParameters};
pub use grid::Grid;

/// Represents an error while building, exporting or importing an experiment.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid domain: a {width} x {height} domain with a step size of {dx} \
        does not give an allocatable grid of at least one cell")]
    InvalidDomain {
        width: f64,
        height: f64,
        dx: f64,
    },
    #[error("Material index {index} is out of range \
        ( number of materials: {n_materials} )")]
    InvalidMaterialIndex {
        index: usize,
        n_materials: usize,
    },
    #[error("Malformed experiment document: {0}")]
    MalformedDocument(String),
    #[error("File {} already exists", .path.display())]
    FileExists {
        path: PathBuf,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    H5Error(#[from] hdf5::Error),
}
