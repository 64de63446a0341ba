// layer.rs - Drag-to-rake interaction for one sand area
//
// State machine:
//   Idle   --down inside bounds-->  Raking  (single-point stroke at the down point)
//   Raking --move inside bounds-->  Raking  (stroke from last point to here)
//   Raking --up / leave / move outside / rake mode off-->  Idle
//
// Pointer coordinates are local to the area (origin at its top-left).
// Each layer owns its grid and RNG; nothing is shared between areas.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{AccumulationGrid, SandConfig};
use crate::error::Result;
use crate::geom::{Point, Rect};
use crate::rake::{RakePattern, RakeStyle, generate_stroke, lookup, to_grid_cells};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RakeState {
    #[default]
    Idle,
    Raking { last: Point },
}

pub struct SandLayer {
    config: SandConfig,
    grid: AccumulationGrid,
    state: RakeState,
    rng: StdRng,
}

impl SandLayer {
    pub fn new(config: SandConfig) -> Result<Self> {
        config.validate()?;
        let grid = AccumulationGrid::for_area(config.bounds.width, config.bounds.height, config.cell_size);
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(entropy_seed));
        log::info!(
            "sand layer {}x{} cells (cell size {}, {} rake)",
            grid.cols(), grid.rows(), config.cell_size, config.rake_style
        );
        Ok(Self { config, grid, state: RakeState::Idle, rng })
    }

    // Accessors
    pub fn config(&self) -> &SandConfig { &self.config }
    pub fn grid(&self) -> &AccumulationGrid { &self.grid }
    pub fn state(&self) -> RakeState { self.state }
    pub fn is_raking(&self) -> bool { matches!(self.state, RakeState::Raking { .. }) }
    pub fn rake_type(&self) -> RakeStyle { self.config.rake_style }
    pub fn pattern(&self) -> RakePattern { lookup(self.config.rake_style) }
    pub fn is_rake_mode(&self) -> bool { self.config.rake_enabled }

    /// Local bounds: (0, 0) to (width, height).
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.bounds.width, self.config.bounds.height)
    }

    pub fn set_rake_type(&mut self, style: RakeStyle) {
        if style != self.config.rake_style {
            log::info!("rake style {} -> {}", self.config.rake_style, style);
        }
        self.config.rake_style = style;
    }

    pub fn enable_rake_mode(&mut self) {
        self.config.rake_enabled = true;
    }

    /// Turning rake mode off ends any stroke in progress.
    pub fn disable_rake_mode(&mut self) {
        self.config.rake_enabled = false;
        self.state = RakeState::Idle;
    }

    /// Replace the jitter source, e.g. for reproducible fixtures.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Start a stroke. Returns the number of cells touched.
    pub fn on_pointer_down(&mut self, at: Point) -> usize {
        if !self.config.rake_enabled || !self.inside(at) {
            return 0;
        }
        self.state = RakeState::Raking { last: at };
        // A tap still leaves a mark
        self.rake_segment(at, at)
    }

    /// Continue a stroke. Leaving the bounds ends it.
    pub fn on_pointer_move(&mut self, at: Point) -> usize {
        let RakeState::Raking { last } = self.state else { return 0 };
        if !self.config.rake_enabled {
            self.state = RakeState::Idle;
            return 0;
        }
        if !self.inside(at) {
            log::debug!("pointer left sand at ({:.1}, {:.1})", at.x, at.y);
            self.state = RakeState::Idle;
            return 0;
        }
        self.state = RakeState::Raking { last: at };
        self.rake_segment(last, at)
    }

    pub fn on_pointer_up(&mut self) {
        self.state = RakeState::Idle;
    }

    pub fn on_pointer_leave(&mut self) {
        self.state = RakeState::Idle;
    }

    /// One "sand settling" step at the configured rate.
    pub fn settle(&mut self) {
        self.grid.decay_step(self.config.decay_rate);
    }

    /// One settling step at an explicit rate. Negative or non-finite
    /// rates are ignored and leave the grid untouched.
    pub fn decay_step(&mut self, rate: f64) -> bool {
        if !rate.is_finite() || rate < 0.0 {
            log::warn!("ignoring decay rate {rate}");
            return false;
        }
        self.grid.decay_step(rate);
        true
    }

    pub fn clear(&mut self) {
        log::info!("sand cleared");
        self.grid.reset();
        self.state = RakeState::Idle;
    }

    /// Rebuild the grid for a new area size. Existing patterns are lost.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        let mut config = self.config.clone();
        config.bounds.width = width;
        config.bounds.height = height;
        config.validate()?;

        self.grid = AccumulationGrid::for_area(width, height, config.cell_size);
        self.config = config;
        self.state = RakeState::Idle;
        log::info!("sand resized to {}x{} cells", self.grid.cols(), self.grid.rows());
        Ok(())
    }

    fn inside(&self, at: Point) -> bool {
        self.local_bounds().contains(at)
    }

    fn rake_segment(&mut self, from: Point, to: Point) -> usize {
        let pattern = lookup(self.config.rake_style);
        let stroke = generate_stroke(from, to, &pattern, &mut self.rng);
        let cells = to_grid_cells(stroke, self.config.cell_size, Point::default());
        let landed = self.grid.apply_all(cells);
        log::debug!(
            "rake ({:.1}, {:.1}) -> ({:.1}, {:.1}): {} cells",
            from.x, from.y, to.x, to.y, landed
        );
        landed
    }
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (js_sys::Date::now() as u64) << 20 ^ noise
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0xDEAD_BEEF)
}
