//! Decoded pixel buffers exchanged between the engine and its callers

use crate::io::error::{MosaicError, Result};
use crate::raster::channels::ChannelLayout;
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

/// Row-major `height × width × channels` image with 8-bit samples
///
/// Buffers are never empty and always carry between one and four channels,
/// so every buffer maps onto a [`ChannelLayout`]. Deserialization goes through
/// [`PixelBuffer::from_array`] and enforces the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array3<u8>", into = "Array3<u8>")]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MalformedPixels`] if a dimension is zero, the
    /// channel count is not 1 to 4, or `samples` has the wrong length.
    pub fn new(height: usize, width: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        let data = Array3::from_shape_vec((height, width, channels), samples).map_err(|e| {
            MosaicError::MalformedPixels {
                reason: format!("{height}x{width}x{channels} does not match sample count: {e}"),
            }
        })?;
        Self::from_array(data)
    }

    /// Wrap an existing `(height, width, channels)` array
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MalformedPixels`] if a dimension is zero or the
    /// channel count is not 1 to 4.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if height == 0 || width == 0 {
            return Err(MosaicError::MalformedPixels {
                reason: format!("image has no pixels ({height}x{width})"),
            });
        }
        if ChannelLayout::from_channel_count(channels).is_none() {
            return Err(MosaicError::MalformedPixels {
                reason: format!("unsupported channel count {channels}"),
            });
        }
        Ok(Self { data })
    }

    // Callers guarantee non-zero dimensions and 1 to 4 channels
    pub(crate) const fn from_valid_array(data: Array3<u8>) -> Self {
        Self { data }
    }

    /// Buffer where every pixel holds `pixel`
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MalformedPixels`] under the same rules as [`Self::new`].
    pub fn filled(height: usize, width: usize, pixel: &[u8]) -> Result<Self> {
        let samples = pixel
            .iter()
            .copied()
            .cycle()
            .take(height * width * pixel.len())
            .collect();
        Self::new(height, width, pixel.len(), samples)
    }

    /// Number of pixel rows
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Number of pixel columns
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Samples per pixel
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// Channel interpretation derived from the channel count
    pub fn layout(&self) -> ChannelLayout {
        ChannelLayout::from_channel_count(self.channels()).unwrap_or(ChannelLayout::Rgba)
    }

    /// Read-only view of the underlying array
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Underlying `(height, width, channels)` array
    pub const fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    /// Samples of a single pixel, `None` when out of bounds
    pub fn pixel(&self, row: usize, col: usize) -> Option<Vec<u8>> {
        (row < self.height() && col < self.width()).then(|| {
            self.data
                .slice(ndarray::s![row, col, ..])
                .iter()
                .copied()
                .collect()
        })
    }

    /// Interleaved samples in row-major order
    pub fn to_samples(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}

impl TryFrom<Array3<u8>> for PixelBuffer {
    type Error = MosaicError;

    fn try_from(data: Array3<u8>) -> Result<Self> {
        Self::from_array(data)
    }
}

impl From<PixelBuffer> for Array3<u8> {
    fn from(buffer: PixelBuffer) -> Self {
        buffer.data
    }
}
