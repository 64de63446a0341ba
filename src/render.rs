// render.rs - Encode grid state for the host renderer
//
// Output encoding (one byte per cell, row-major):
//   0 = smooth sand
//   1 = raked        (value > 0)
//   2 = deeply raked (value > 0.5)
//
// The host draws one horizontal line per raked cell at its top edge,
// plus a reinforcing line 2 units lower for deep cells. `marks` yields
// exactly those segments for hosts that prefer geometry over bytes.

use crate::geom::Point;
use crate::sand::AccumulationGrid;

pub const SMOOTH: u8 = 0;
pub const RAKED: u8 = 1;
pub const DEEP: u8 = 2;

const RAKED_THRESHOLD: f64 = 0.0;
const DEEP_THRESHOLD: f64 = 0.5;
const REINFORCE_OFFSET: f64 = 2.0;

#[inline]
pub fn classify(v: f64) -> u8 {
    if v > DEEP_THRESHOLD {
        DEEP
    } else if v > RAKED_THRESHOLD {
        RAKED
    } else {
        SMOOTH
    }
}

pub struct Encoder {
    out: Vec<u8>,
    cols: usize,
    rows: usize,
}

impl Encoder {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            out: vec![SMOOTH; cols * rows],
            cols,
            rows,
        }
    }

    pub fn for_grid(grid: &AccumulationGrid) -> Self {
        Self::new(grid.cols(), grid.rows())
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.out.resize(cols * rows, SMOOTH);
    }

    pub fn clear(&mut self) {
        self.out.fill(SMOOTH);
    }

    pub fn ptr(&self) -> *const u8 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.out
    }

    /// Re-encode the full grid snapshot.
    pub fn encode(&mut self, grid: &AccumulationGrid) {
        if grid.cols() != self.cols || grid.rows() != self.rows {
            self.resize(grid.cols(), grid.rows());
        }
        for (dst, &v) in self.out.iter_mut().zip(grid.as_slice()) {
            *dst = classify(v);
        }
    }
}

/// A line segment in the sand area's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark {
    pub from: Point,
    pub to: Point,
}

/// Line segments for every raked cell. `origin` is the area's top-left.
pub fn marks(grid: &AccumulationGrid, cell_size: f64, origin: Point) -> impl Iterator<Item = Mark> + '_ {
    grid.iter().flat_map(move |(x, y, v)| {
        let px = origin.x + x as f64 * cell_size;
        let py = origin.y + y as f64 * cell_size;
        let line = |dy: f64| Mark {
            from: Point::new(px, py + dy),
            to: Point::new(px + cell_size, py + dy),
        };
        let level = classify(v);
        let top = (level >= RAKED).then(|| line(0.0));
        let reinforce = (level == DEEP).then(|| line(REINFORCE_OFFSET));
        top.into_iter().chain(reinforce)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rake::GridCellDelta;

    fn grid() -> AccumulationGrid {
        let mut g = AccumulationGrid::new(3, 2);
        g.apply_delta(GridCellDelta { x: 0, y: 0, intensity: 0.3 });
        g.apply_delta(GridCellDelta { x: 2, y: 1, intensity: 0.9 });
        g
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(classify(0.0), SMOOTH);
        assert_eq!(classify(0.01), RAKED);
        assert_eq!(classify(0.5), RAKED);
        assert_eq!(classify(0.51), DEEP);
    }

    #[test]
    fn encode_grid() {
        let mut enc = Encoder::new(0, 0);
        enc.encode(&grid());
        assert_eq!(enc.len(), 6);
        assert_eq!(enc.as_slice(), &[RAKED, SMOOTH, SMOOTH, SMOOTH, SMOOTH, DEEP]);

        enc.clear();
        assert!(enc.as_slice().iter().all(|&b| b == SMOOTH));
    }

    #[test]
    fn marks_for_raked_and_deep_cells() {
        let g = grid();
        let m: Vec<_> = marks(&g, 4.0, Point::new(100.0, 50.0)).collect();
        assert_eq!(
            m,
            vec![
                Mark { from: Point::new(100.0, 50.0), to: Point::new(104.0, 50.0) },
                Mark { from: Point::new(108.0, 54.0), to: Point::new(112.0, 54.0) },
                Mark { from: Point::new(108.0, 56.0), to: Point::new(112.0, 56.0) },
            ]
        );
    }
}
