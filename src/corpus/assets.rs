//! Emoji bitmaps and the corpus that owns them

use crate::corpus::feature::ColorFeature;
use crate::io::error::{MosaicError, Result};
use crate::raster::{ChannelLayout, PixelBuffer};
use serde::{Deserialize, Serialize};

/// One emoji bitmap normalized to the corpus tile resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiAsset {
    name: String,
    pixels: PixelBuffer,
}

impl EmojiAsset {
    /// Create an asset from an identifier and its normalized bitmap
    pub fn new(name: impl Into<String>, pixels: PixelBuffer) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Identifier, usually the source file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized bitmap
    pub const fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }
}

/// Parallel arrays of emoji assets and their color features
///
/// A corpus is never empty, and every asset is a `tile_resolution` square
/// sharing one channel layout. Feature `i` always summarizes asset `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    tile_resolution: u32,
    layout: ChannelLayout,
    features: Vec<ColorFeature>,
    assets: Vec<EmojiAsset>,
}

impl Corpus {
    /// Build a corpus from assets, computing each feature as the asset's mean color
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_resolution` is zero
    /// - `assets` is empty
    /// - An asset is not a `tile_resolution` square or uses a different layout
    ///   than the first asset
    pub fn from_assets(tile_resolution: u32, assets: Vec<EmojiAsset>) -> Result<Self> {
        let features = assets
            .iter()
            .map(|asset| ColorFeature::of_buffer(asset.pixels()))
            .collect();
        Self::from_parts(tile_resolution, features, assets)
    }

    /// Reassemble a corpus from previously computed features and assets
    ///
    /// # Errors
    ///
    /// Returns an error under the same rules as [`Self::from_assets`], or if
    /// the feature and asset counts differ or a feature's dimensionality does
    /// not match the channel count.
    pub fn from_parts(
        tile_resolution: u32,
        features: Vec<ColorFeature>,
        assets: Vec<EmojiAsset>,
    ) -> Result<Self> {
        if tile_resolution == 0 {
            return Err(crate::io::error::invalid_parameter(
                "tile_resolution",
                &tile_resolution,
                &"must be a positive integer",
            ));
        }

        let Some(first) = assets.first() else {
            return Err(MosaicError::Index {
                reason: "corpus contains no emoji assets".to_string(),
            });
        };
        let Some(layout) = ChannelLayout::from_channel_count(first.pixels().channels()) else {
            return Err(crate::io::error::config_error(&format!(
                "asset '{}' has {} channels",
                first.name(),
                first.pixels().channels()
            )));
        };

        if features.len() != assets.len() {
            return Err(crate::io::error::config_error(&format!(
                "{} features for {} assets",
                features.len(),
                assets.len()
            )));
        }

        let edge = tile_resolution as usize;
        for (asset, feature) in assets.iter().zip(&features) {
            let pixels = asset.pixels();
            if pixels.height() != edge || pixels.width() != edge {
                return Err(crate::io::error::config_error(&format!(
                    "asset '{}' is {}x{}, expected {edge}x{edge}",
                    asset.name(),
                    pixels.height(),
                    pixels.width()
                )));
            }
            if pixels.channels() != layout.channel_count() {
                return Err(crate::io::error::config_error(&format!(
                    "asset '{}' has {} channels while the corpus uses {layout}",
                    asset.name(),
                    pixels.channels()
                )));
            }
            if feature.dimensions() != layout.channel_count() {
                return Err(crate::io::error::config_error(&format!(
                    "feature of '{}' has {} components, expected {}",
                    asset.name(),
                    feature.dimensions(),
                    layout.channel_count()
                )));
            }
        }

        Ok(Self {
            tile_resolution,
            layout,
            features,
            assets,
        })
    }

    /// Edge length of every asset in pixels
    pub const fn tile_resolution(&self) -> u32 {
        self.tile_resolution
    }

    /// Channel layout shared by every asset
    pub const fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always `false`: construction rejects empty corpora
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Features in construction order
    pub fn features(&self) -> &[ColorFeature] {
        &self.features
    }

    /// Assets in construction order
    pub fn assets(&self) -> &[EmojiAsset] {
        &self.assets
    }

    /// Asset at `index`, `None` when out of bounds
    pub fn asset(&self, index: usize) -> Option<&EmojiAsset> {
        self.assets.get(index)
    }

    /// Feature at `index`, `None` when out of bounds
    pub fn feature(&self, index: usize) -> Option<&ColorFeature> {
        self.features.get(index)
    }
}
