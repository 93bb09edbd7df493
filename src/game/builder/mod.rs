//! Builder Module
//!
//! Grid-snapped block placement: the shape catalog, the occupancy check and
//! the preview controller that ties snapping, validation and input together.

pub mod catalog;
pub mod placement;
pub mod preview;

pub use catalog::{BlockCatalog, PREVIEW_NAME};
pub use placement::{PlacementConfig, PlacementValidator};
pub use preview::{BlockPlacer, PlacementError, PlacementState, PreviewTarget};
