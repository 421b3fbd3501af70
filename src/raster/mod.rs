//! Pixel buffers and channel handling shared by the corpus and the composer

/// Owned `height × width × channels` sample buffers
pub mod buffer;
/// Channel layouts and the single rule for converting between them
pub mod channels;

pub use buffer::PixelBuffer;
pub use channels::ChannelLayout;
