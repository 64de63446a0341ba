// sand/ - Sand areas
//
// The accumulation grid, its construction-time config, and the
// pointer-driven layer that rakes strokes into it.

mod config;
mod grid;
mod layer;

pub use config::{DEFAULT_CELL_SIZE, DEFAULT_DECAY_RATE, SandConfig};
pub use grid::AccumulationGrid;
pub use layer::{RakeState, SandLayer};
