// element.rs - Decorative garden elements
//
// A closed set of variants sharing one capability surface: position,
// rotation, footprint, and a drag session that reverts invalid drops.

use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Placement;
use crate::error::Result;
use crate::geom::{Point, Rect};
use crate::sand::{SandConfig, SandLayer};

/// Degrees per `rotate_step` unless changed.
pub const DEFAULT_ROTATION_STEP: f64 = 15.0;
const MIN_ROTATION_STEP: f64 = 1.0;

// Unscaled sprite sizes
const STONE_SIZE: (f64, f64) = (50.0, 50.0);
const PLANT_SIZE: (f64, f64) = (40.0, 60.0);
const SAND_SIZE: (f64, f64) = (100.0, 100.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoneType {
    Small,
    #[default]
    Medium,
    Large,
    Flat,
}

impl StoneType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Flat => "flat",
        }
    }

    fn scale(self) -> (f64, f64) {
        match self {
            Self::Small => (0.5, 0.5),
            Self::Medium => (0.75, 0.75),
            Self::Large => (1.0, 1.0),
            Self::Flat => (0.8, 0.4),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    #[default]
    SmallShrub,
    Tree,
    Flower,
    Grass,
    Bamboo,
}

impl PlantType {
    pub fn name(self) -> &'static str {
        match self {
            Self::SmallShrub => "small_shrub",
            Self::Tree => "tree",
            Self::Flower => "flower",
            Self::Grass => "grass",
            Self::Bamboo => "bamboo",
        }
    }

    fn scale(self) -> f64 {
        match self {
            Self::SmallShrub => 0.6,
            Self::Tree => 1.2,
            Self::Flower => 0.4,
            Self::Grass => 0.3,
            Self::Bamboo => 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SandAreaSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SandAreaSize {
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn scale(self) -> f64 {
        match self {
            Self::Small => 0.6,
            Self::Medium => 1.0,
            Self::Large => 1.4,
        }
    }

    /// Side lengths of an area of this size.
    pub fn extent(self) -> (f64, f64) {
        (SAND_SIZE.0 * self.scale(), SAND_SIZE.1 * self.scale())
    }
}

/// A sand area element. Owns its own grid.
pub struct SandArea {
    size: SandAreaSize,
    layer: SandLayer,
}

impl SandArea {
    pub fn new(size: SandAreaSize) -> Result<Self> {
        let (w, h) = size.extent();
        Self::with_config(size, SandConfig::new(w, h))
    }

    /// Build with a custom config. Its bounds are overridden by `size`.
    pub fn with_config(size: SandAreaSize, mut config: SandConfig) -> Result<Self> {
        let (w, h) = size.extent();
        config.bounds.width = w;
        config.bounds.height = h;
        Ok(Self { size, layer: SandLayer::new(config)? })
    }

    pub fn size(&self) -> SandAreaSize { self.size }
    pub fn layer(&self) -> &SandLayer { &self.layer }
    pub fn layer_mut(&mut self) -> &mut SandLayer { &mut self.layer }

    /// Changing size wipes the raked pattern.
    pub fn set_size(&mut self, size: SandAreaSize) -> Result<()> {
        let (w, h) = size.extent();
        self.layer.resize(w, h)?;
        self.size = size;
        Ok(())
    }
}

impl fmt::Debug for SandArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandArea")
            .field("size", &self.size)
            .field("disturbed", &self.layer.grid().disturbed_cells())
            .finish()
    }
}

#[derive(Debug)]
pub enum ElementKind {
    Stone(StoneType),
    Plant(PlantType),
    SandArea(SandArea),
}

impl ElementKind {
    /// e.g. `stone_flat`, `plant_small_shrub`, `sand_area_large`
    pub fn type_name(&self) -> String {
        match self {
            Self::Stone(t) => format!("stone_{}", t.name()),
            Self::Plant(t) => format!("plant_{}", t.name()),
            Self::SandArea(a) => format!("sand_area_{}", a.size.name()),
        }
    }

    /// Width and height on screen, before rotation.
    pub fn footprint(&self) -> (f64, f64) {
        match self {
            Self::Stone(t) => {
                let (sx, sy) = t.scale();
                (STONE_SIZE.0 * sx, STONE_SIZE.1 * sy)
            }
            Self::Plant(t) => (PLANT_SIZE.0 * t.scale(), PLANT_SIZE.1 * t.scale()),
            Self::SandArea(a) => a.size.extent(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    origin: Point,
    // Element center minus pointer at grab time
    grab: Point,
    valid: bool,
}

#[derive(Debug)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    position: Point,
    rotation: f64,
    rotation_step: f64,
    drag: Option<DragSession>,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: 0.0,
            rotation_step: DEFAULT_ROTATION_STEP,
            drag: None,
        }
    }

    pub fn id(&self) -> ElementId { self.id }
    pub fn kind(&self) -> &ElementKind { &self.kind }
    pub fn kind_mut(&mut self) -> &mut ElementKind { &mut self.kind }
    pub fn position(&self) -> Point { self.position }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Footprint rectangle centered on the current position.
    pub fn bounds(&self) -> Rect {
        self.bounds_at(self.position)
    }

    pub fn bounds_at(&self, at: Point) -> Rect {
        let (w, h) = self.kind.footprint();
        Rect::centered(at, w, h)
    }

    pub fn sand_layer_mut(&mut self) -> Option<&mut SandLayer> {
        match &mut self.kind {
            ElementKind::SandArea(area) => Some(area.layer_mut()),
            _ => None,
        }
    }

    // Rotation

    /// Radians in [0, 2π).
    pub fn rotation(&self) -> f64 { self.rotation }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }

    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.rotation = normalize(degrees.to_radians());
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.rotation = normalize(self.rotation + degrees.to_radians());
    }

    pub fn rotate_step(&mut self, clockwise: bool) {
        let step = if clockwise { self.rotation_step } else { -self.rotation_step };
        self.rotate(step);
    }

    pub fn rotation_step(&self) -> f64 { self.rotation_step }

    /// At least one degree per step.
    pub fn set_rotation_step(&mut self, degrees: f64) {
        self.rotation_step = degrees.abs().max(MIN_ROTATION_STEP);
    }

    // Dragging

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = Some(DragSession {
            origin: self.position,
            grab: Point::new(self.position.x - pointer.x, self.position.y - pointer.y),
            valid: true,
        });
    }

    /// Follow the pointer. Returns whether the new position is placeable.
    /// Does nothing outside a drag session.
    pub fn drag_to(&mut self, pointer: Point, rule: &dyn Placement, others: &[&Element]) -> bool {
        let Some(session) = self.drag else { return false };
        let target = Point::new(pointer.x + session.grab.x, pointer.y + session.grab.y);
        let valid = rule.can_place(self, target, others);
        self.position = target;
        self.drag = Some(DragSession { valid, ..session });
        valid
    }

    /// Drop. An invalid drop returns the element to where the drag began.
    /// Returns whether the element stayed at the drop position.
    pub fn end_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else { return true };
        if !session.valid {
            self.position = session.origin;
        }
        session.valid
    }

    /// Round the position to the nearest multiple of `size`. Ignored mid-drag.
    pub fn snap_to_grid(&mut self, size: f64) {
        if self.is_dragging() || !(size.is_finite() && size > 0.0) {
            return;
        }
        self.position = Point::new(
            (self.position.x / size).round() * size,
            (self.position.y / size).round() * size,
        );
    }
}

#[inline]
fn normalize(radians: f64) -> f64 {
    radians.rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::WithinBounds;

    fn stone(at: Point) -> Element {
        Element::new(ElementId(1), ElementKind::Stone(StoneType::Medium), at)
    }

    #[test]
    fn footprints_follow_type_scale() {
        assert_eq!(ElementKind::Stone(StoneType::Flat).footprint(), (40.0, 20.0));
        assert_eq!(ElementKind::Plant(PlantType::Tree).footprint(), (48.0, 72.0));
        let area = SandArea::new(SandAreaSize::Large).unwrap();
        assert_eq!(ElementKind::SandArea(area).footprint(), (140.0, 140.0));
    }

    #[test]
    fn type_names() {
        assert_eq!(ElementKind::Stone(StoneType::Flat).type_name(), "stone_flat");
        assert_eq!(ElementKind::Plant(PlantType::SmallShrub).type_name(), "plant_small_shrub");
        let area = SandArea::new(SandAreaSize::Small).unwrap();
        assert_eq!(ElementKind::SandArea(area).type_name(), "sand_area_small");
    }

    #[test]
    fn names_match_serialized_form() {
        for t in [StoneType::Small, StoneType::Medium, StoneType::Large, StoneType::Flat] {
            assert_eq!(serde_json::to_value(t).unwrap(), t.name());
        }
        for t in [PlantType::SmallShrub, PlantType::Tree, PlantType::Flower, PlantType::Grass, PlantType::Bamboo] {
            assert_eq!(serde_json::to_value(t).unwrap(), t.name());
        }
        for s in [SandAreaSize::Small, SandAreaSize::Medium, SandAreaSize::Large] {
            assert_eq!(serde_json::to_value(s).unwrap(), s.name());
        }
    }

    #[test]
    fn rotation_wraps_into_one_turn() {
        let mut s = stone(Point::default());
        s.rotate_step(false);
        assert!((s.rotation_degrees() - 345.0).abs() < 1e-9);
        s.set_rotation_degrees(720.0 + 90.0);
        assert!((s.rotation_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_step_has_floor() {
        let mut s = stone(Point::default());
        s.set_rotation_step(-0.2);
        assert_eq!(s.rotation_step(), 1.0);
        s.set_rotation_step(-30.0);
        assert_eq!(s.rotation_step(), 30.0);
    }

    #[test]
    fn invalid_drop_reverts() {
        let rule = WithinBounds(Rect::new(0.0, 0.0, 200.0, 200.0));
        let mut s = stone(Point::new(100.0, 100.0));
        s.begin_drag(Point::new(110.0, 100.0));

        assert!(s.drag_to(Point::new(60.0, 60.0), &rule, &[]));
        assert_eq!(s.position(), Point::new(50.0, 60.0));

        // Half the stone would hang over the edge
        assert!(!s.drag_to(Point::new(10.0, 60.0), &rule, &[]));
        assert!(!s.end_drag());
        assert_eq!(s.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn valid_drop_stays() {
        let rule = WithinBounds(Rect::new(0.0, 0.0, 200.0, 200.0));
        let mut s = stone(Point::new(100.0, 100.0));
        s.begin_drag(Point::new(100.0, 100.0));
        s.drag_to(Point::new(150.0, 40.0), &rule, &[]);
        assert!(s.end_drag());
        assert_eq!(s.position(), Point::new(150.0, 40.0));
    }

    #[test]
    fn snap_rounds_and_skips_mid_drag() {
        let mut s = stone(Point::new(47.0, 81.0));
        s.begin_drag(Point::new(47.0, 81.0));
        s.snap_to_grid(32.0);
        assert_eq!(s.position(), Point::new(47.0, 81.0));
        s.end_drag();
        s.snap_to_grid(32.0);
        assert_eq!(s.position(), Point::new(32.0, 96.0));
    }

    #[test]
    fn sand_area_resize_clears_pattern() {
        let mut area = SandArea::new(SandAreaSize::Medium).unwrap();
        area.layer_mut().on_pointer_down(Point::new(10.0, 10.0));
        assert_eq!(area.layer().grid().disturbed_cells(), 1);
        area.set_size(SandAreaSize::Small).unwrap();
        assert_eq!(area.size(), SandAreaSize::Small);
        assert_eq!(area.layer().grid().cols(), 15);
        assert_eq!(area.layer().grid().disturbed_cells(), 0);
    }
}
