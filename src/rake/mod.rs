// rake/ - Rake patterns and stroke generation
//
// Pure functions: pattern lookup, stroke sampling, grid rasterization.
// The only state touched is the caller's jitter RNG.

mod pattern;
mod stroke;

pub use pattern::{RakePattern, RakeStyle, ShapeKind, list_styles, lookup};
pub use stroke::{GridCellDelta, Stroke, StrokeSample, generate_stroke, to_grid_cells};
