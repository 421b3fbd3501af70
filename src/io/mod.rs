//! Input/output operations, configuration and error handling

/// Command-line interface for batch mosaic conversion
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error types shared by every module
pub mod error;
/// Conversions between `image` types and pixel buffers
pub mod image;
/// Progress display for corpus initialization and batch conversion
pub mod progress;
