// grid.rs - Saturating accumulation grid
//
// One value per cell, row-major, always within [0, 1].
// Out-of-range writes are dropped: rakes routinely overshoot the edge.

use ndarray::Array2;

use crate::rake::GridCellDelta;

#[derive(Clone, Debug, PartialEq)]
pub struct AccumulationGrid {
    // Indexed [row, col]
    cells: Array2<f64>,
}

impl AccumulationGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cells: Array2::zeros((rows, cols)) }
    }

    /// Grid covering a `width x height` area at `cell_size` resolution.
    /// Partial cells at the right/bottom edge are not included.
    pub fn for_area(width: f64, height: f64, cell_size: f64) -> Self {
        Self::new(cell_count(width, cell_size), cell_count(height, cell_size))
    }

    #[inline]
    pub fn cols(&self) -> usize { self.cells.ncols() }

    #[inline]
    pub fn rows(&self) -> usize { self.cells.nrows() }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        if x >= self.cols() || y >= self.rows() { return None; }
        Some((y, x))
    }

    /// Value at `(x, y)`, `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Add `delta.intensity` at its cell, clamped to [0, 1].
    /// Returns false if the cell is outside the grid.
    pub fn apply_delta(&mut self, delta: GridCellDelta) -> bool {
        let Some(idx) = self.index(delta.x, delta.y) else { return false };
        let cell = &mut self.cells[idx];
        *cell = saturate(*cell + delta.intensity);
        true
    }

    /// Apply a batch of deltas in order. Returns how many landed.
    pub fn apply_all<I>(&mut self, deltas: I) -> usize
    where
        I: IntoIterator<Item = GridCellDelta>,
    {
        deltas.into_iter().filter(|d| self.apply_delta(*d)).count()
    }

    /// Fade every cell by `rate`, never below zero.
    pub fn decay_step(&mut self, rate: f64) {
        self.cells.mapv_inplace(|v| saturate(v - rate));
    }

    pub fn reset(&mut self) {
        self.cells.fill(0.0);
    }

    /// Row-major snapshot for the renderer.
    pub fn as_slice(&self) -> &[f64] {
        // Array2::zeros is standard layout, so this is always contiguous
        self.cells.as_slice().unwrap_or(&[])
    }

    pub fn as_ptr(&self) -> *const f64 {
        self.cells.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells with any disturbance.
    pub fn disturbed_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0.0).count()
    }

    /// `(x, y, value)` for every cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells.indexed_iter().map(|((y, x), &v)| (x, y, v))
    }
}

fn cell_count(extent: f64, cell_size: f64) -> usize {
    let n = (extent / cell_size).floor();
    if n.is_finite() && n > 0.0 { n as usize } else { 0 }
}

// NaN collapses to 0 here; f64::clamp would propagate it.
#[inline]
fn saturate(v: f64) -> f64 {
    v.max(0.0).min(1.0)
}
