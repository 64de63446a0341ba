// error.rs - Configuration and construction errors
//
// Geometry and grid updates never fail. Only values that come in from
// the host (config, custom patterns, style names) are checked.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f64),

    #[error("sand bounds must be finite and non-negative, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("rake width must be finite and >= 0, got {0}")]
    InvalidWidth(f64),

    #[error("rake spacing must be finite and > 0, got {0}")]
    InvalidSpacing(f64),

    #[error("rake intensity must be finite, got {0}")]
    InvalidIntensity(f64),

    #[error("unknown rake style `{0}`")]
    UnknownRakeStyle(String),

    #[error("decay rate must be finite and >= 0, got {0}")]
    InvalidDecayRate(f64),

    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GardenError>;
