//! Materials and sources placed in an experiment.

mod material;
mod source;

pub use material::{Material, MaterialTable};
pub use source::{Source, SourceList};
