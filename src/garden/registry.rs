// registry.rs - The set of elements placed in a garden
//
// Owns every element, tracks the selection, and applies grid snapping.
// Placement rules see sibling elements only through explicit arguments.

use std::collections::BTreeMap;

use super::{Element, ElementId, ElementKind, Placement};
use crate::geom::Point;
use crate::sand::SandLayer;

pub const DEFAULT_SNAP_SIZE: f64 = 32.0;

pub struct Garden {
    // Ids are handed out in increasing order, so this iterates in insertion order
    elements: BTreeMap<ElementId, Element>,
    next_id: u32,
    selected: Option<ElementId>,
    snap_to_grid: bool,
    grid_size: f64,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new()
    }
}

impl Garden {
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            next_id: 1,
            selected: None,
            snap_to_grid: false,
            grid_size: DEFAULT_SNAP_SIZE,
        }
    }

    pub fn add(&mut self, kind: ElementKind, position: Point) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let mut element = Element::new(id, kind, position);
        if self.snap_to_grid {
            element.snap_to_grid(self.grid_size);
        }
        log::info!("added {} {} at ({:.0}, {:.0})", element.kind().type_name(), id, position.x, position.y);
        self.elements.insert(id, element);
        id
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        if self.selected == Some(id) {
            self.deselect();
        }
        let removed = self.elements.remove(&id).is_some();
        if removed {
            log::info!("removed {id}");
        }
        removed
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn sand_layer_mut(&mut self, id: ElementId) -> Option<&mut SandLayer> {
        self.elements.get_mut(&id)?.sand_layer_mut()
    }

    // Selection

    /// Select `id`, replacing any previous selection.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.elements.contains_key(&id) {
            return false;
        }
        self.deselect();
        log::debug!("selected {id}");
        self.selected = Some(id);
        true
    }

    /// Returns the element that was selected, if any.
    pub fn deselect(&mut self) -> Option<ElementId> {
        let previous = self.selected.take();
        if let Some(id) = previous {
            log::debug!("deselected {id}");
        }
        previous
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    // Snapping

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Enabling snaps every element that is not mid-drag.
    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.snap_to_grid = enabled;
        if enabled {
            self.snap_all();
        }
    }

    pub fn set_grid_size(&mut self, size: f64) {
        if !(size.is_finite() && size > 0.0) {
            log::warn!("ignoring snap grid size {size}");
            return;
        }
        self.grid_size = size;
        if self.snap_to_grid {
            self.snap_all();
        }
    }

    fn snap_all(&mut self) {
        let size = self.grid_size;
        for element in self.elements.values_mut() {
            element.snap_to_grid(size);
        }
    }

    // Dragging

    pub fn begin_drag(&mut self, id: ElementId, pointer: Point) -> bool {
        let Some(element) = self.elements.get_mut(&id) else { return false };
        element.begin_drag(pointer);
        true
    }

    /// Move a dragged element. `None` if `id` is unknown.
    pub fn drag(&mut self, id: ElementId, pointer: Point, rule: &dyn Placement) -> Option<bool> {
        let mut element = self.elements.remove(&id)?;
        let others: Vec<&Element> = self.elements.values().collect();
        let valid = element.drag_to(pointer, rule, &others);
        self.elements.insert(id, element);
        Some(valid)
    }

    /// Drop a dragged element, snapping it when enabled.
    /// `Some(false)` means the drop was invalid and the element went back.
    pub fn end_drag(&mut self, id: ElementId) -> Option<bool> {
        let element = self.elements.get_mut(&id)?;
        let placed = element.end_drag();
        if self.snap_to_grid {
            element.snap_to_grid(self.grid_size);
        }
        Some(placed)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::{PlantType, SandArea, SandAreaSize, StoneType, WithinBounds};
    use crate::geom::Rect;

    #[test]
    fn add_and_remove() {
        let mut g = Garden::new();
        let a = g.add(ElementKind::Stone(StoneType::Small), Point::new(10.0, 10.0));
        let b = g.add(ElementKind::Plant(PlantType::Grass), Point::new(20.0, 10.0));
        assert_ne!(a, b);
        assert_eq!(g.len(), 2);
        let order: Vec<_> = g.elements().map(Element::id).collect();
        assert_eq!(order, vec![a, b]);

        assert!(g.remove(a));
        assert!(!g.remove(a));
        assert!(g.get(a).is_none());
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn selection_is_exclusive() {
        let mut g = Garden::new();
        let a = g.add(ElementKind::Stone(StoneType::Small), Point::default());
        let b = g.add(ElementKind::Stone(StoneType::Large), Point::default());
        assert!(g.select(a));
        assert!(g.select(b));
        assert_eq!(g.selected(), Some(b));
        assert!(!g.select(ElementId(99)));
        assert_eq!(g.selected(), Some(b));

        g.remove(b);
        assert_eq!(g.selected(), None);
        assert_eq!(g.deselect(), None);
    }

    #[test]
    fn snapping_applies_on_add_and_toggle() {
        let mut g = Garden::new();
        let a = g.add(ElementKind::Stone(StoneType::Small), Point::new(47.0, 15.0));
        assert_eq!(g.get(a).unwrap().position(), Point::new(47.0, 15.0));

        g.set_snap_to_grid(true);
        assert_eq!(g.get(a).unwrap().position(), Point::new(32.0, 0.0));

        let b = g.add(ElementKind::Stone(StoneType::Small), Point::new(70.0, 70.0));
        assert_eq!(g.get(b).unwrap().position(), Point::new(64.0, 64.0));

        g.set_grid_size(50.0);
        assert_eq!(g.get(b).unwrap().position(), Point::new(50.0, 50.0));
        g.set_grid_size(0.0);
        assert_eq!(g.grid_size(), 50.0);
    }

    #[test]
    fn drag_rule_sees_other_elements() {
        let mut g = Garden::new();
        let a = g.add(ElementKind::Stone(StoneType::Medium), Point::new(100.0, 100.0));
        g.add(ElementKind::Stone(StoneType::Medium), Point::new(300.0, 100.0));

        // Keep stones at least 40 apart
        let spacing = |_: &Element, at: Point, others: &[&Element]| -> bool {
            others.iter().all(|o| o.position().distance(at) >= 40.0)
        };

        assert!(g.begin_drag(a, Point::new(100.0, 100.0)));
        assert_eq!(g.drag(a, Point::new(280.0, 100.0), &spacing), Some(false));
        assert_eq!(g.end_drag(a), Some(false));
        assert_eq!(g.get(a).unwrap().position(), Point::new(100.0, 100.0));

        g.begin_drag(a, Point::new(100.0, 100.0));
        assert_eq!(g.drag(a, Point::new(200.0, 100.0), &spacing), Some(true));
        assert_eq!(g.end_drag(a), Some(true));
        assert_eq!(g.get(a).unwrap().position(), Point::new(200.0, 100.0));
        assert_eq!(g.drag(ElementId(42), Point::default(), &spacing), None);
    }

    #[test]
    fn drop_snaps_when_enabled() {
        let mut g = Garden::new();
        g.set_snap_to_grid(true);
        let a = g.add(ElementKind::Stone(StoneType::Small), Point::new(64.0, 64.0));
        let rule = WithinBounds(Rect::new(0.0, 0.0, 500.0, 500.0));
        g.begin_drag(a, Point::new(64.0, 64.0));
        g.drag(a, Point::new(101.0, 90.0), &rule);
        assert_eq!(g.end_drag(a), Some(true));
        assert_eq!(g.get(a).unwrap().position(), Point::new(96.0, 96.0));
    }

    #[test]
    fn each_sand_area_owns_its_grid() {
        let mut g = Garden::new();
        let small = g.add(
            ElementKind::SandArea(SandArea::new(SandAreaSize::Small).unwrap()),
            Point::new(100.0, 100.0),
        );
        let large = g.add(
            ElementKind::SandArea(SandArea::new(SandAreaSize::Large).unwrap()),
            Point::new(400.0, 100.0),
        );
        let stone = g.add(ElementKind::Stone(StoneType::Flat), Point::default());

        g.sand_layer_mut(small).unwrap().on_pointer_down(Point::new(5.0, 5.0));
        assert!(g.sand_layer_mut(stone).is_none());

        let disturbed = |g: &mut Garden, id| g.sand_layer_mut(id).unwrap().grid().disturbed_cells();
        assert_eq!(disturbed(&mut g, small), 1);
        assert_eq!(disturbed(&mut g, large), 0);
    }

    #[test]
    fn clear_empties_garden() {
        let mut g = Garden::new();
        let a = g.add(ElementKind::Plant(PlantType::Bamboo), Point::default());
        g.select(a);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.selected(), None);
    }
}
