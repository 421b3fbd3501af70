//! Emoji mosaic generation by nearest-color tile matching
//!
//! A directory of emoji images is normalized into a corpus of fixed-size tiles
//! and indexed by average color. Source images are then split into a grid and
//! each cell is replaced by the emoji whose average color is closest.

#![deny(unsafe_code)]

/// Emoji corpus loading, caching and initialization
pub mod corpus;
/// Input/output operations and error handling
pub mod io;
/// Grid layout and mosaic composition
pub mod mosaic;
/// Pixel buffers and channel layout conversion
pub mod raster;
/// Nearest-neighbor search over color features
pub mod spatial;

pub use corpus::{Corpus, CorpusConfig, CorpusHandle, initialize_corpus};
pub use io::error::{MosaicError, Result};
pub use mosaic::compose;
pub use raster::PixelBuffer;
