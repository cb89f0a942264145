//! Includes commonly used library components.

pub use crate::{
    Error,
    Experiment,
    ExperimentDescriptor,
    Grid,
    SimulationParameters,
};
pub use crate::components::{Material, Source};
pub use crate::document::{load, save, SaveSettings, SaveType};
pub use crate::shapes::Shape;
