// config.rs - Construction-time settings for a sand area
//
// Set once when the area is built. Only the rake style changes later.

use serde::{Deserialize, Serialize};

use crate::error::{GardenError, Result};
use crate::geom::Rect;
use crate::rake::RakeStyle;

pub const DEFAULT_CELL_SIZE: f64 = 4.0;
pub const DEFAULT_DECAY_RATE: f64 = 0.01;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandConfig {
    /// Area bounds in scene space. Pointer input is area-local.
    pub bounds: Rect,

    /// Side length of one grid cell
    pub cell_size: f64,

    pub rake_style: RakeStyle,

    /// Whether pointer input rakes at all
    pub rake_enabled: bool,

    /// Fixed jitter seed; random when absent
    pub seed: Option<u64>,

    /// Amount removed per `settle()` call
    pub decay_rate: f64,
}

impl Default for SandConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::default(),
            cell_size: DEFAULT_CELL_SIZE,
            rake_style: RakeStyle::Simple,
            rake_enabled: true,
            seed: None,
            decay_rate: DEFAULT_DECAY_RATE,
        }
    }
}

impl SandConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            ..Self::default()
        }
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_style(mut self, style: RakeStyle) -> Self {
        self.rake_style = style;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GardenError::InvalidCellSize(self.cell_size));
        }
        let Rect { x, y, width, height } = self.bounds;
        let finite = x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite();
        if !finite || width < 0.0 || height < 0.0 {
            return Err(GardenError::InvalidBounds { width, height });
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(GardenError::InvalidDecayRate(self.decay_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SandConfig::new(100.0, 60.0);
        assert_eq!(c.cell_size, 4.0);
        assert_eq!(c.rake_style, RakeStyle::Simple);
        assert!(c.rake_enabled);
        assert_eq!(c.seed, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields() {
        let c = SandConfig::from_json(
            r#"{"bounds": {"x": 100, "y": 100, "width": 1080, "height": 520}, "rake_style": "curved", "seed": 9}"#,
        )
        .unwrap();
        assert_eq!(c.bounds, Rect::new(100.0, 100.0, 1080.0, 520.0));
        assert_eq!(c.rake_style, RakeStyle::Curved);
        assert_eq!(c.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(c.seed, Some(9));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SandConfig::new(10.0, 10.0).with_cell_size(0.0).validate(),
            Err(GardenError::InvalidCellSize(_))
        ));
        assert!(matches!(
            SandConfig::new(-1.0, 10.0).validate(),
            Err(GardenError::InvalidBounds { .. })
        ));
        assert!(matches!(
            SandConfig::from_json(r#"{"rake_style": "zigzag"}"#),
            Err(GardenError::Config(_))
        ));
        assert!(matches!(
            SandConfig::from_json(r#"{"decay_rate": -0.5}"#),
            Err(GardenError::InvalidDecayRate(_))
        ));
    }

    #[test]
    fn style_names_parse_like_the_host() {
        let config = SandConfig::from_json(r#"{"rake_style": "Curved"}"#).unwrap();
        assert_eq!(config.rake_style, RakeStyle::Curved);
        let config = SandConfig::from_json(r#"{"rake_style": " FINE "}"#).unwrap();
        assert_eq!(config.rake_style, RakeStyle::Fine);

        let json = serde_json::to_string(&SandConfig::new(10.0, 10.0).with_style(RakeStyle::Wide)).unwrap();
        assert!(json.contains(r#""rake_style":"wide""#), "{json}");
        assert_eq!(SandConfig::from_json(&json).unwrap().rake_style, RakeStyle::Wide);
    }
}
