// stroke.rs - Stroke synthesis and grid rasterization
//
// A stroke walks the segment start -> end in ~2 unit steps. At every step
// it fans samples across the rake width along the path's perpendicular.
// Each sample's intensity gets an independent jitter in [0.8, 1.2).

use rand::Rng;

use super::pattern::RakePattern;
use crate::geom::Point;

/// Path length covered by one longitudinal step.
const STEP_LENGTH: f64 = 2.0;

/// Longer segments take proportionally longer steps so the stroke still
/// ends at `end`.
const MAX_STEPS: u32 = u32::MAX;

const JITTER_MIN: f64 = 0.8;
const JITTER_MAX: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSample {
    pub position: Point,
    pub intensity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCellDelta {
    pub x: i32,
    pub y: i32,
    pub intensity: f64,
}

/// Lazy sample sequence for one segment. Built by [`generate_stroke`].
pub struct Stroke<'a, R> {
    start: Point,
    // Longitudinal step and unit perpendicular
    step: (f64, f64),
    perp: (f64, f64),
    steps: u32,
    pattern: RakePattern,

    // Cursor: longitudinal index and current offset across the width
    i: u32,
    w: f64,
    done: bool,

    rng: &'a mut R,
}

/// Build the sample sequence for the segment `start -> end`.
///
/// Segments shorter than one step (including `start == end`) yield a
/// single sample at `start`. Non-finite endpoints are treated the same way.
pub fn generate_stroke<'a, R: Rng>(
    start: Point,
    end: Point,
    pattern: &RakePattern,
    rng: &'a mut R,
) -> Stroke<'a, R> {
    let distance = start.distance(end);
    let steps = (distance / STEP_LENGTH).floor();
    let steps = if steps.is_finite() && steps > 0.0 { steps.min(MAX_STEPS as f64) as u32 } else { 0 };

    let (step, perp) = if steps == 0 {
        ((0.0, 0.0), (0.0, 0.0))
    } else {
        let dx = (end.x - start.x) / steps as f64;
        let dy = (end.y - start.y) / steps as f64;
        let len = (dx * dx + dy * dy).sqrt();
        ((dx, dy), (-dy / len, dx / len))
    };

    Stroke {
        start,
        step,
        perp,
        steps,
        pattern: *pattern,
        i: 0,
        w: -pattern.width() / 2.0,
        done: false,
        rng,
    }
}

impl<R: Rng> Stroke<'_, R> {
    /// Number of longitudinal steps (0 for a single-point stroke).
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[inline]
    fn jitter(&mut self) -> f64 {
        self.pattern.base_intensity() * self.rng.gen_range(JITTER_MIN..JITTER_MAX)
    }
}

impl<R: Rng> Iterator for Stroke<'_, R> {
    type Item = StrokeSample;

    fn next(&mut self) -> Option<StrokeSample> {
        if self.done {
            return None;
        }

        if self.steps == 0 {
            self.done = true;
            let intensity = self.jitter();
            return Some(StrokeSample { position: self.start, intensity });
        }

        let half = self.pattern.width() / 2.0;
        loop {
            if self.w <= half {
                break;
            }
            if self.i >= self.steps {
                self.done = true;
                return None;
            }
            self.i += 1;
            self.w = -half;
        }

        let i = self.i as f64;
        let bx = self.start.x + self.step.0 * i;
        let by = self.start.y + self.step.1 * i;
        let offset = self.w + self.pattern.shape().offset(self.i, self.steps);
        let position = Point::new(bx + self.perp.0 * offset, by + self.perp.1 * offset);

        self.w += self.pattern.spacing();
        let intensity = self.jitter();
        Some(StrokeSample { position, intensity })
    }
}

/// Map samples onto grid cells relative to `origin`. One delta per
/// sample, in sample order, no merging.
pub fn to_grid_cells<I>(samples: I, cell_size: f64, origin: Point) -> impl Iterator<Item = GridCellDelta>
where
    I: IntoIterator<Item = StrokeSample>,
{
    samples
        .into_iter()
        // Non-finite samples have no cell
        .filter(|s| s.position.is_finite())
        .map(move |s| GridCellDelta {
            x: ((s.position.x - origin.x) / cell_size).floor() as i32,
            y: ((s.position.y - origin.y) / cell_size).floor() as i32,
            intensity: s.intensity,
        })
}
