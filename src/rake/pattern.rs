// pattern.rs - Rake styles and their shape parameters
//
// A fixed catalog maps each style to one pattern. Lookups never fail.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GardenError, Result};

/// Serializes as its lowercase name. Deserializes through `FromStr`, so
/// config files accept the same spellings as the host does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RakeStyle {
    #[default]
    Simple,
    Wide,
    Curved,
    Fine,
}

impl RakeStyle {
    /// Catalog order.
    pub const ALL: [RakeStyle; 4] = [Self::Simple, Self::Wide, Self::Curved, Self::Fine];

    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Wide => "wide",
            Self::Curved => "curved",
            Self::Fine => "fine",
        }
    }

    /// Display label shown in the host's rake picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple Rake",
            Self::Wide => "Wide Rake",
            Self::Curved => "Curved Rake",
            Self::Fine => "Fine Rake",
        }
    }

    /// Lenient parse for values coming from the host. Unknown names map to `Simple`.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown rake style `{name}`, falling back to simple");
            Self::Simple
        })
    }

    /// Index into `ALL`; out-of-range falls back to `Simple`.
    pub fn from_index(index: u32) -> Self {
        match Self::ALL.get(index as usize) {
            Some(style) => *style,
            None => {
                log::warn!("rake style index {index} out of range, falling back to simple");
                Self::Simple
            }
        }
    }
}

impl FromStr for RakeStyle {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GardenError::UnknownRakeStyle(s.to_owned()))
    }
}

impl TryFrom<String> for RakeStyle {
    type Error = GardenError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl fmt::Display for RakeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Path-shape modifier applied as a perpendicular offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Straight,
    Curved,
    Wavy,
}

impl ShapeKind {
    /// Perpendicular offset at longitudinal step `i` of `steps`.
    #[inline]
    pub fn offset(self, i: u32, steps: u32) -> f64 {
        let t = i as f64 / steps as f64;
        match self {
            Self::Straight => 0.0,
            Self::Curved => (t * PI).sin() * 2.0,
            Self::Wavy => (t * PI * 4.0).sin(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RakePattern {
    width: f64,
    spacing: f64,
    base_intensity: f64,
    shape: ShapeKind,
}

impl RakePattern {
    /// Build a custom pattern. `width >= 0`, `spacing > 0`.
    pub fn new(width: f64, spacing: f64, base_intensity: f64, shape: ShapeKind) -> Result<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(GardenError::InvalidWidth(width));
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(GardenError::InvalidSpacing(spacing));
        }
        if !base_intensity.is_finite() {
            return Err(GardenError::InvalidIntensity(base_intensity));
        }
        Ok(Self::fixed(width, spacing, base_intensity, shape))
    }

    const fn fixed(width: f64, spacing: f64, base_intensity: f64, shape: ShapeKind) -> Self {
        Self { width, spacing, base_intensity, shape }
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn spacing(&self) -> f64 { self.spacing }
    pub fn base_intensity(&self) -> f64 { self.base_intensity }
    pub fn shape(&self) -> ShapeKind { self.shape }
}

// Catalog
const SIMPLE: RakePattern = RakePattern::fixed(3.0, 4.0, 1.0, ShapeKind::Straight);
const WIDE: RakePattern = RakePattern::fixed(6.0, 2.0, 0.8, ShapeKind::Straight);
const CURVED: RakePattern = RakePattern::fixed(4.0, 3.0, 1.2, ShapeKind::Curved);
const FINE: RakePattern = RakePattern::fixed(1.0, 1.0, 0.6, ShapeKind::Straight);

pub fn lookup(style: RakeStyle) -> RakePattern {
    match style {
        RakeStyle::Simple => SIMPLE,
        RakeStyle::Wide => WIDE,
        RakeStyle::Curved => CURVED,
        RakeStyle::Fine => FINE,
    }
}

pub fn list_styles() -> [RakeStyle; 4] {
    RakeStyle::ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_table() {
        let rows = [
            (RakeStyle::Simple, 3.0, 4.0, 1.0, ShapeKind::Straight),
            (RakeStyle::Wide, 6.0, 2.0, 0.8, ShapeKind::Straight),
            (RakeStyle::Curved, 4.0, 3.0, 1.2, ShapeKind::Curved),
            (RakeStyle::Fine, 1.0, 1.0, 0.6, ShapeKind::Straight),
        ];
        for (style, width, spacing, intensity, shape) in rows {
            let p = lookup(style);
            assert_eq!(p.width(), width, "{style}");
            assert_eq!(p.spacing(), spacing, "{style}");
            assert_eq!(p.base_intensity(), intensity, "{style}");
            assert_eq!(p.shape(), shape, "{style}");
        }
    }

    #[test]
    fn list_styles_is_stable() {
        let expected = [RakeStyle::Simple, RakeStyle::Wide, RakeStyle::Curved, RakeStyle::Fine];
        assert_eq!(list_styles(), expected);
        assert_eq!(list_styles(), list_styles());
    }

    #[test]
    fn unknown_names_fall_back_to_simple() {
        assert_eq!(RakeStyle::from_name_or_default("wide"), RakeStyle::Wide);
        assert_eq!(RakeStyle::from_name_or_default(" Curved "), RakeStyle::Curved);
        assert_eq!(RakeStyle::from_name_or_default("zigzag"), RakeStyle::Simple);
        assert_eq!(RakeStyle::from_index(3), RakeStyle::Fine);
        assert_eq!(RakeStyle::from_index(99), RakeStyle::Simple);
    }

    #[test]
    fn strict_parse_reports_unknown_style() {
        let err = "zigzag".parse::<RakeStyle>().unwrap_err();
        assert!(matches!(err, GardenError::UnknownRakeStyle(ref s) if s == "zigzag"));
    }

    #[test]
    fn custom_pattern_rejects_bad_geometry() {
        assert!(RakePattern::new(-1.0, 1.0, 1.0, ShapeKind::Straight).is_err());
        assert!(RakePattern::new(1.0, 0.0, 1.0, ShapeKind::Straight).is_err());
        assert!(RakePattern::new(1.0, f64::NAN, 1.0, ShapeKind::Straight).is_err());
        assert!(RakePattern::new(0.0, 1.0, 0.5, ShapeKind::Wavy).is_ok());
    }

    #[test]
    fn shape_offsets() {
        assert_eq!(ShapeKind::Straight.offset(3, 10), 0.0);
        assert!((ShapeKind::Curved.offset(5, 10) - 2.0).abs() < 1e-12);
        assert!(ShapeKind::Curved.offset(0, 10).abs() < 1e-12);
        assert!((ShapeKind::Wavy.offset(1, 8) - 1.0).abs() < 1e-12);
    }
}
