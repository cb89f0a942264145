use crate::shapes::Shape;

/// A fixed-size 2D array of material indices, addressed as `[column, row]`.
///
/// Cell `(c, r)` sits at the physical position `(c * dx, r * dx)`. The grid is
/// allocated once and never resized.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: ndarray::Array2<usize>,
    dx: f64,
}

impl Grid {
    /// Creates a grid where every cell holds material index 0.
    #[inline]
    pub(crate) fn new(n_columns: usize, n_rows: usize, dx: f64) -> Self {
        Self {
            cells: ndarray::Array2::<usize>::zeros((n_columns, n_rows)),
            dx,
        }
    }

    #[inline]
    pub(crate) fn from_cells(cells: ndarray::Array2<usize>, dx: f64) -> Self {
        Self { cells, dx }
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.cells.nrows()
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.cells.ncols()
    }

    /// The physical size of one cell.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// The material index of cell `(column, row)`.
    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<usize> {
        self.cells.get((column, row)).copied()
    }

    /// The physical position of cell `(column, row)`.
    #[inline]
    pub fn position(&self, column: usize, row: usize) -> (f64, f64) {
        (column as f64 * self.dx, row as f64 * self.dx)
    }

    /// The number of cells holding `material_index`.
    pub fn count(&self, material_index: usize) -> usize {
        self.cells.iter().filter(|&&cell| cell == material_index).count()
    }

    #[inline]
    pub fn view(&self) -> ndarray::ArrayView2<'_, usize> {
        self.cells.view()
    }

    /// Sets every cell covered by `shape` to `material_index` and returns how
    /// many cells were covered. Callers check the index beforehand.
    pub(crate) fn paint<S: Shape + ?Sized>(&mut self, shape: &S, material_index: usize) -> usize {
        let dx = self.dx;
        let mut painted = 0;
        for ((c, r), cell) in self.cells.indexed_iter_mut() {
            if shape.contains(c as f64 * dx, r as f64 * dx) {
                *cell = material_index;
                painted += 1;
            }
        }
        painted
    }
}
