use tracing::{debug, warn};

use crate::components::{Material, MaterialTable, Source, SourceList};
use crate::grid::Grid;
use crate::shapes::{Circle, Rectangle, Ring, Shape};
use crate::Error;

/// The speed of light in vacuum, in m/s.
const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Solver step sizes derived from an experiment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    /// The physical size of each spatial step.
    pub delta_x: f64,
    /// The length of each temporal step, at 99% of the 2D Courant limit.
    pub delta_t: f64,
}

impl SimulationParameters {
    /// The number of half steps the solver takes to reach `t_max`, in seconds.
    #[inline]
    pub fn n_timesteps(&self, t_max: f64) -> usize {
        2 * (t_max / self.delta_t).ceil() as usize
    }
}

/// Describes the domain of an experiment.
pub struct ExperimentDescriptor {
    /// The physical width of the domain.
    pub width: f64,
    /// The physical height of the domain.
    pub height: f64,
    /// The physical size of each grid cell.
    pub dx: f64,
    /// The medium filling the domain, vacuum if `None`.
    pub base_material: Option<Material>,
}

/// The main `struct` of the builder.
///
/// An experiment owns its sources, materials and material grid. Shapes are
/// painted onto the grid in call order, so a later shape overwrites the cells
/// it shares with an earlier one.
#[derive(Clone, Debug, PartialEq)]
pub struct Experiment {
    /// Time scale of the experiment, in seconds. Source timings and the
    /// `t_*` bounds are multiples of it.
    pub tau: f64,
    /// When the solver starts accumulating the field.
    pub t_detect: f64,
    /// When the simulation stops.
    pub t_max: f64,
    /// The field excitations.
    pub sources: SourceList,
    materials: MaterialTable,
    field: Grid,
}

impl Experiment {
    /// Creates a new `Experiment` instance.
    ///
    /// The grid gets `floor(width / dx)` columns and `floor(height / dx)` rows,
    /// all filled with the base material, and a single source is placed at the
    /// center of the domain.
    pub fn new(desc: ExperimentDescriptor) -> Result<Self, Error> {
        let ExperimentDescriptor {
            width,
            height,
            dx,
            base_material,
        } = desc;

        if !(dx.is_finite() && dx > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(Error::InvalidDomain { width, height, dx });
        }
        let n_columns = (width / dx).floor();
        let n_rows = (height / dx).floor();
        // An allocation may not exceed isize::MAX bytes.
        let max_cells = isize::MAX as usize / std::mem::size_of::<usize>();
        if n_columns < 1.0
            || n_rows < 1.0
            || n_columns > max_cells as f64
            || n_rows > max_cells as f64
        {
            return Err(Error::InvalidDomain { width, height, dx });
        }
        let (n_columns, n_rows) = (n_columns as usize, n_rows as usize);
        if n_columns
            .checked_mul(n_rows)
            .map_or(true, |n_cells| n_cells > max_cells)
        {
            return Err(Error::InvalidDomain { width, height, dx });
        }

        debug!(n_columns, n_rows, dx, "experiment created");

        Ok(Self {
            tau: 100e-15,
            t_detect: 14.0,
            t_max: 15.0,
            sources: vec![Source::new(width / 2.0, height / 2.0)],
            materials: MaterialTable::new(base_material.unwrap_or_default()),
            field: Grid::new(n_columns, n_rows, dx),
        })
    }

    /// Assembles an experiment from already validated parts.
    pub(crate) fn from_parts(
        tau: f64,
        t_detect: f64,
        t_max: f64,
        sources: SourceList,
        materials: MaterialTable,
        field: Grid,
    ) -> Self {
        Self {
            tau,
            t_detect,
            t_max,
            sources,
            materials,
            field,
        }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.field.dx()
    }

    #[inline]
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    #[inline]
    pub fn field(&self) -> &Grid {
        &self.field
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.field.n_columns()
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.field.n_rows()
    }

    /// Appends a material and returns the index to paint it with.
    #[inline]
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material)
    }

    /// Appends a source and returns its position in the source list.
    #[inline]
    pub fn add_source(&mut self, source: Source) -> usize {
        self.sources.push(source);
        self.sources.len() - 1
    }

    /// Paints every cell whose position lies inside `shape` with
    /// `material_index` and returns the number of painted cells.
    ///
    /// Parts of the shape outside of the domain are ignored. The grid is left
    /// untouched if `material_index` is not in the material table.
    pub fn draw<S: Shape + ?Sized>(
        &mut self,
        shape: &S,
        material_index: usize,
    ) -> Result<usize, Error> {
        if !self.materials.contains_index(material_index) {
            return Err(Error::InvalidMaterialIndex {
                index: material_index,
                n_materials: self.materials.len(),
            });
        }

        let painted = self.field.paint(shape, material_index);
        if painted == 0 {
            warn!(material_index, "shape does not cover any grid cell");
        } else {
            debug!(material_index, painted, "shape drawn");
        }
        Ok(painted)
    }

    /// Paints a filled circle around `(x_center, y_center)`.
    #[inline]
    pub fn draw_circle(
        &mut self,
        x_center: f64,
        y_center: f64,
        radius: f64,
        material_index: usize,
    ) -> Result<usize, Error> {
        self.draw(
            &Circle {
                x_center,
                y_center,
                radius,
            },
            material_index,
        )
    }

    /// Paints an axis-aligned rectangle with its lower corner at `(x, y)`.
    #[inline]
    pub fn draw_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        material_index: usize,
    ) -> Result<usize, Error> {
        self.draw(
            &Rectangle {
                x,
                y,
                width,
                height,
            },
            material_index,
        )
    }

    /// Paints the annulus between `inner_radius` (exclusive) and
    /// `outer_radius` (inclusive) around `(x_center, y_center)`.
    #[inline]
    pub fn draw_ring(
        &mut self,
        x_center: f64,
        y_center: f64,
        inner_radius: f64,
        outer_radius: f64,
        material_index: usize,
    ) -> Result<usize, Error> {
        self.draw(
            &Ring {
                x_center,
                y_center,
                inner_radius,
                outer_radius,
            },
            material_index,
        )
    }

    /// Calculates the step sizes a solver would use for this experiment.
    #[inline]
    pub fn simulation_parameters(&self) -> SimulationParameters {
        let delta_x = self.dx();
        let delta_t = 0.99 * delta_x / (SPEED_OF_LIGHT * std::f64::consts::SQRT_2);

        SimulationParameters { delta_x, delta_t }
    }

    /// The number of solver half steps until `t_max`.
    #[inline]
    pub fn n_timesteps(&self) -> usize {
        self.simulation_parameters().n_timesteps(self.t_max * self.tau)
    }
}
