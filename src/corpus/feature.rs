//! Average-color summaries used as the matching key between regions and emoji

use crate::raster::PixelBuffer;
use ndarray::{ArrayView3, Axis};
use serde::{Deserialize, Serialize};

/// Upper bound of every feature component
pub const FEATURE_MAX: f64 = 255.0;

/// Per-channel mean intensity of a pixel region, in `0.0..=255.0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFeature(Vec<f64>);

impl ColorFeature {
    /// Feature from explicit components, clamped to the feature domain
    ///
    /// Non-finite components are kept as they are so index construction can
    /// reject them.
    pub fn new(components: Vec<f64>) -> Self {
        Self(
            components
                .into_iter()
                .map(|c| if c.is_finite() { c.clamp(0.0, FEATURE_MAX) } else { c })
                .collect(),
        )
    }

    /// Arithmetic mean of each channel over a `(rows, cols, channels)` region
    ///
    /// An empty region yields a zero vector with one component per channel.
    pub fn mean_of(region: ArrayView3<'_, u8>) -> Self {
        let (rows, cols, channels) = region.dim();
        let pixel_count = rows * cols;
        if pixel_count == 0 {
            return Self(vec![0.0; channels]);
        }

        let mut sums = vec![0u64; channels];
        for lane in region.lanes(Axis(2)) {
            for (sum, &sample) in sums.iter_mut().zip(lane.iter()) {
                *sum += u64::from(sample);
            }
        }

        Self::new(
            sums.into_iter()
                .map(|sum| sum as f64 / pixel_count as f64)
                .collect(),
        )
    }

    /// Mean color of a whole buffer
    pub fn of_buffer(buffer: &PixelBuffer) -> Self {
        Self::mean_of(buffer.view())
    }

    /// Feature components in channel order
    pub fn components(&self) -> &[f64] {
        &self.0
    }

    /// Number of components
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }
}

impl From<&[f64]> for ColorFeature {
    fn from(components: &[f64]) -> Self {
        Self::new(components.to_vec())
    }
}
