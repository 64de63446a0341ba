// placement.rs - Where an element may be dropped
//
// Rules get the other elements passed in explicitly.

use super::Element;
use crate::geom::{Point, Rect};

pub trait Placement {
    fn can_place(&self, element: &Element, at: Point, others: &[&Element]) -> bool;
}

/// Footprint must stay fully inside the rectangle.
#[derive(Clone, Copy, Debug)]
pub struct WithinBounds(pub Rect);

impl Placement for WithinBounds {
    fn can_place(&self, element: &Element, at: Point, _others: &[&Element]) -> bool {
        self.0.encloses(&element.bounds_at(at))
    }
}

impl<F> Placement for F
where
    F: Fn(&Element, Point, &[&Element]) -> bool,
{
    fn can_place(&self, element: &Element, at: Point, others: &[&Element]) -> bool {
        self(element, at, others)
    }
}
