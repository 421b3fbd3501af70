//! Corpus initialization, once per tile resolution
//!
//! [`initialize_corpus`] runs the load, cache and index steps for one
//! resolution. [`CorpusRegistry`] wraps it in a per-resolution barrier so
//! concurrent requests for the same resolution share a single build while
//! different resolutions build independently.

use crate::corpus::assets::Corpus;
use crate::corpus::cache::PrecomputeCache;
use crate::corpus::loader::CorpusLoader;
use crate::io::error::Result;
use crate::raster::{ChannelLayout, PixelBuffer};
use crate::spatial::{KdTree, Metric};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Runtime options for building a corpus
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Directory holding the emoji images
    pub directory: PathBuf,
    /// Edge length of every emoji tile in pixels
    pub tile_resolution: u32,
    /// Channel layout every asset is normalized to
    pub layout: ChannelLayout,
    /// Metric used by the spatial index
    pub metric: Metric,
    /// Where precomputed corpora are kept, `None` disables the cache
    pub cache_directory: Option<PathBuf>,
}

impl CorpusConfig {
    /// Configuration with RGBA tiles, Euclidean matching and no cache
    pub fn new(directory: impl Into<PathBuf>, tile_resolution: u32) -> Self {
        Self {
            directory: directory.into(),
            tile_resolution,
            layout: ChannelLayout::default(),
            metric: Metric::default(),
            cache_directory: None,
        }
    }

    /// Keep precomputed corpora in `cache_directory`
    #[must_use]
    pub fn with_cache_directory(mut self, cache_directory: impl Into<PathBuf>) -> Self {
        self.cache_directory = Some(cache_directory.into());
        self
    }
}

/// Immutable corpus together with the index built from its features
#[derive(Debug, Clone)]
pub struct CorpusHandle {
    corpus: Corpus,
    index: KdTree,
}

impl CorpusHandle {
    /// Index `corpus` under `metric`
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be built from the corpus features.
    pub fn new(corpus: Corpus, metric: Metric) -> Result<Self> {
        let index = KdTree::with_metric(corpus.features(), metric)?;
        Ok(Self { corpus, index })
    }

    /// Loaded emoji assets and features
    pub const fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Spatial index over the corpus features
    pub const fn index(&self) -> &KdTree {
        &self.index
    }

    /// Compose `source` at the corpus tile resolution
    ///
    /// # Errors
    ///
    /// Returns an error if `scale_factor` is invalid or the grid is too large.
    pub fn compose(&self, source: &PixelBuffer, scale_factor: f64) -> Result<PixelBuffer> {
        crate::mosaic::compose(
            source,
            &self.corpus,
            &self.index,
            scale_factor,
            self.corpus.tile_resolution(),
        )
    }
}

/// Load (or restore) the corpus described by `config` and index it
///
/// With a cache directory configured, a stored entry is reused unless
/// `force_recompute` is set; otherwise the corpus is rebuilt from the emoji
/// directory and stored before it is returned. A failed store is logged and
/// the freshly built corpus is still used.
///
/// # Errors
///
/// Returns an error if:
/// - The tile resolution is zero or the metric is invalid
/// - The emoji directory is unreadable or has no decodable images
/// - A forced recompute cannot remove the old cache entry
/// - The spatial index cannot be built
pub fn initialize_corpus(config: &CorpusConfig, force_recompute: bool) -> Result<CorpusHandle> {
    let resolution = config.tile_resolution;
    if resolution == 0 {
        return Err(crate::io::error::invalid_parameter(
            "tile_resolution",
            &resolution,
            &"must be a positive integer",
        ));
    }
    let metric = config.metric.validate()?;

    let loader = CorpusLoader::new(&config.directory).with_layout(config.layout);
    let cache = config
        .cache_directory
        .as_ref()
        .map(|dir| PrecomputeCache::new(dir, &config.directory, config.layout));

    let corpus = match &cache {
        Some(cache) => {
            if force_recompute {
                cache.invalidate(resolution)?;
            }
            match cache.load(resolution) {
                Some(corpus) => corpus,
                None => {
                    let corpus = loader.build(resolution)?;
                    if let Err(error) = cache.store(resolution, &corpus) {
                        warn!(%error, "could not store precomputed corpus");
                    }
                    corpus
                }
            }
        }
        None => loader.build(resolution)?,
    };

    let handle = CorpusHandle::new(corpus, metric)?;
    info!(
        assets = handle.corpus().len(),
        tile_resolution = resolution,
        layout = %handle.corpus().layout(),
        "emoji corpus ready"
    );
    Ok(handle)
}

type Slot = Arc<Mutex<Option<Arc<CorpusHandle>>>>;

/// Shares initialized corpora between callers, building each resolution once
///
/// The first caller for a resolution builds while later callers for that
/// resolution wait on the same slot and receive the shared result. A failed
/// build leaves the slot empty, so the next caller retries.
#[derive(Debug)]
pub struct CorpusRegistry {
    template: CorpusConfig,
    slots: Mutex<HashMap<u32, Slot>>,
}

impl CorpusRegistry {
    /// Registry building corpora from `template`, whose resolution is ignored
    pub fn new(template: CorpusConfig) -> Self {
        Self {
            template,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Shared corpus for `tile_resolution`, building it on first use
    ///
    /// `force_recompute` rebuilds even when the resolution is already loaded
    /// and replaces the shared handle for subsequent callers.
    ///
    /// # Errors
    ///
    /// Propagates initialization errors from [`initialize_corpus`].
    pub fn get_or_init(
        &self,
        tile_resolution: u32,
        force_recompute: bool,
    ) -> Result<Arc<CorpusHandle>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(tile_resolution).or_default())
        };

        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if !force_recompute && let Some(handle) = guard.as_ref() {
            return Ok(Arc::clone(handle));
        }

        let config = CorpusConfig {
            tile_resolution,
            ..self.template.clone()
        };
        let handle = Arc::new(initialize_corpus(&config, force_recompute)?);
        *guard = Some(Arc::clone(&handle));
        Ok(handle)
    }

    /// Already initialized corpus for `tile_resolution`, without building
    pub fn get(&self, tile_resolution: u32) -> Option<Arc<CorpusHandle>> {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(&tile_resolution).map(Arc::clone)?
        };
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(Arc::clone)
    }
}
