// garden/ - Stones, plants and sand areas placed in a garden

mod element;
mod placement;
mod registry;

pub use element::{
    DEFAULT_ROTATION_STEP, Element, ElementId, ElementKind, PlantType, SandArea, SandAreaSize, StoneType,
};
pub use placement::{Placement, WithinBounds};
pub use registry::{DEFAULT_SNAP_SIZE, Garden};
