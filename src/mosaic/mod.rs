//! Mosaic composition from a source image and an indexed corpus

/// Per-cell matching and compositing
pub mod composer;
/// Grid layout and source sampling regions
pub mod grid;

pub use composer::compose;
pub use grid::MosaicGrid;
