//! Builds a corpus by decoding and normalizing every emoji image in a directory

use crate::corpus::assets::{Corpus, EmojiAsset};
use crate::io::error::{MosaicError, Result};
use crate::io::image::{is_supported_image, pixel_buffer_from_image};
use crate::raster::ChannelLayout;
use crate::raster::channels::conform;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Scans an emoji directory and normalizes its images into a [`Corpus`]
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    directory: PathBuf,
    layout: ChannelLayout,
}

impl CorpusLoader {
    /// Loader for `directory` producing RGBA tiles
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            layout: ChannelLayout::default(),
        }
    }

    /// Use `layout` for every asset instead of RGBA
    #[must_use]
    pub const fn with_layout(mut self, layout: ChannelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Directory scanned by [`Self::build`]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Channel layout of produced assets
    pub const fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Decode every image, resize it to `tile_resolution` squared and summarize it
    ///
    /// Candidates are visited in sorted path order so the corpus order, and
    /// therefore nearest-neighbor tie breaking, is reproducible. Images that
    /// fail to decode are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_resolution` is zero
    /// - The directory cannot be read
    /// - No file in the directory decodes to an image
    pub fn build(&self, tile_resolution: u32) -> Result<Corpus> {
        if tile_resolution == 0 {
            return Err(crate::io::error::invalid_parameter(
                "tile_resolution",
                &tile_resolution,
                &"must be a positive integer",
            ));
        }

        let candidates = self.collect_candidates()?;
        info!(
            directory = %self.directory.display(),
            candidates = candidates.len(),
            tile_resolution,
            "building emoji corpus"
        );

        let mut assets = Vec::with_capacity(candidates.len());
        for path in &candidates {
            match self.load_asset(path, tile_resolution) {
                Ok(asset) => assets.push(asset),
                Err(error) => warn!(%error, "skipping emoji asset"),
            }
        }

        if assets.is_empty() {
            return Err(MosaicError::Load {
                path: self.directory.clone(),
                reason: format!(
                    "none of {} candidate files decoded to an image",
                    candidates.len()
                ),
            });
        }

        debug!(
            loaded = assets.len(),
            skipped = candidates.len() - assets.len(),
            "emoji corpus decoded"
        );
        Corpus::from_assets(tile_resolution, assets)
    }

    fn collect_candidates(&self) -> Result<Vec<PathBuf>> {
        let read_error = |e: std::io::Error| MosaicError::Load {
            path: self.directory.clone(),
            reason: e.to_string(),
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.directory).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn load_asset(&self, path: &Path, tile_resolution: u32) -> Result<EmojiAsset> {
        let img = image::open(path).map_err(|e| MosaicError::ImageDecode {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Uniform resize, aspect ratio not preserved
        let resized = img.resize_exact(tile_resolution, tile_resolution, FilterType::Triangle);
        let pixels = pixel_buffer_from_image(&resized)?;
        let pixels = conform(&pixels, self.layout).into_owned();

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Ok(EmojiAsset::new(name, pixels))
    }
}
