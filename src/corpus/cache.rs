//! On-disk persistence of built corpora, keyed by tile resolution
//!
//! Each resolution owns one JSON file. An entry also records the source
//! directory and channel layout it was built from; an entry for a different
//! directory or layout, an older format version, a file that fails to parse,
//! and an entry whose assets or features fail validation are all reported as
//! a miss so the caller rebuilds instead of failing.

use crate::corpus::assets::{Corpus, EmojiAsset};
use crate::corpus::feature::ColorFeature;
use crate::io::configuration::{CACHE_FILE_EXTENSION, CACHE_FILE_PREFIX, CACHE_FORMAT_VERSION};
use crate::io::error::{MosaicError, Result};
use crate::raster::ChannelLayout;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    format_version: u32,
    tile_resolution: u32,
    source_directory: PathBuf,
    channels: usize,
    features: Vec<ColorFeature>,
    assets: Vec<EmojiAsset>,
}

/// Precomputed corpora for one emoji directory
#[derive(Debug, Clone)]
pub struct PrecomputeCache {
    cache_directory: PathBuf,
    source_directory: PathBuf,
    layout: ChannelLayout,
}

impl PrecomputeCache {
    /// Cache in `cache_directory` for corpora built from `source_directory`
    pub fn new(
        cache_directory: impl Into<PathBuf>,
        source_directory: impl Into<PathBuf>,
        layout: ChannelLayout,
    ) -> Self {
        Self {
            cache_directory: cache_directory.into(),
            source_directory: source_directory.into(),
            layout,
        }
    }

    /// File holding the entry for `resolution`
    pub fn entry_path(&self, resolution: u32) -> PathBuf {
        self.cache_directory.join(format!(
            "{CACHE_FILE_PREFIX}{resolution}.{CACHE_FILE_EXTENSION}"
        ))
    }

    /// Restore the corpus stored for `resolution`
    ///
    /// Returns `None` when there is no usable entry. Unreadable, corrupt or
    /// mismatched entries are logged and treated the same as a missing one.
    pub fn load(&self, resolution: u32) -> Option<Corpus> {
        let path = self.entry_path(resolution);
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(error) => {
                debug!(path = %path.display(), %error, "no precomputed corpus");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_reader(BufReader::new(file)) {
            Ok(entry) => entry,
            Err(error) => {
                warn!(path = %path.display(), %error, "discarding corrupt corpus cache");
                return None;
            }
        };

        if let Some(mismatch) = self.mismatch(&entry, resolution) {
            warn!(path = %path.display(), mismatch, "discarding stale corpus cache");
            return None;
        }

        match Corpus::from_parts(entry.tile_resolution, entry.features, entry.assets) {
            Ok(corpus) if !features_match_assets(&corpus) => {
                warn!(path = %path.display(), "discarding corpus cache with stale features");
                None
            }
            Ok(corpus) => {
                info!(
                    path = %path.display(),
                    assets = corpus.len(),
                    "loaded precomputed corpus"
                );
                Some(corpus)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "discarding invalid corpus cache");
                None
            }
        }
    }

    /// Persist `corpus` as the entry for `resolution`
    ///
    /// The entry is written to a temporary file and renamed into place, so a
    /// concurrent reader never sees a half-written file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `resolution` differs from the corpus tile resolution
    /// - The cache directory cannot be created
    /// - The entry cannot be serialized or moved into place
    pub fn store(&self, resolution: u32, corpus: &Corpus) -> Result<()> {
        if corpus.tile_resolution() != resolution {
            return Err(crate::io::error::config_error(&format!(
                "cannot store a {}px corpus under resolution {resolution}",
                corpus.tile_resolution()
            )));
        }

        std::fs::create_dir_all(&self.cache_directory).map_err(|e| {
            crate::io::error::file_system_error(&self.cache_directory, "create directory", e)
        })?;

        let path = self.entry_path(resolution);
        let cache_error = |reason: String| MosaicError::Cache {
            path: path.clone(),
            reason,
        };

        let entry = CacheEntry {
            format_version: CACHE_FORMAT_VERSION,
            tile_resolution: resolution,
            source_directory: self.source_directory.clone(),
            channels: corpus.layout().channel_count(),
            features: corpus.features().to_vec(),
            assets: corpus.assets().to_vec(),
        };

        let staging = tempfile::NamedTempFile::new_in(&self.cache_directory).map_err(|e| {
            crate::io::error::file_system_error(&self.cache_directory, "create temporary file", e)
        })?;
        let mut writer = BufWriter::new(staging);
        serde_json::to_writer(&mut writer, &entry).map_err(|e| cache_error(e.to_string()))?;
        writer.flush().map_err(|e| cache_error(e.to_string()))?;
        let staging = writer
            .into_inner()
            .map_err(|e| cache_error(e.error().to_string()))?;
        staging
            .persist(&path)
            .map_err(|e| cache_error(e.error.to_string()))?;

        info!(path = %path.display(), assets = corpus.len(), "stored precomputed corpus");
        Ok(())
    }

    /// Remove the entry for `resolution`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be removed.
    pub fn invalidate(&self, resolution: u32) -> Result<()> {
        let path = self.entry_path(resolution);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "invalidated precomputed corpus");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(crate::io::error::file_system_error(
                path,
                "remove cache entry",
                error,
            )),
        }
    }

    /// Directory the entries live in
    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }

    fn mismatch(&self, entry: &CacheEntry, resolution: u32) -> Option<&'static str> {
        if entry.format_version != CACHE_FORMAT_VERSION {
            Some("format version")
        } else if entry.tile_resolution != resolution {
            Some("tile resolution")
        } else if entry.source_directory != self.source_directory {
            Some("source directory")
        } else if entry.channels != self.layout.channel_count() {
            Some("channel layout")
        } else {
            None
        }
    }
}

// Stored features must still be the mean color of their asset
fn features_match_assets(corpus: &Corpus) -> bool {
    corpus
        .assets()
        .iter()
        .zip(corpus.features())
        .all(|(asset, feature)| ColorFeature::of_buffer(asset.pixels()) == *feature)
}
