//! Command-line interface for converting images into emoji mosaics

use crate::corpus::registry::{CorpusConfig, CorpusHandle, initialize_corpus};
use crate::io::configuration::{
    DEFAULT_CACHE_DIRECTORY, DEFAULT_LOG_LEVEL, DEFAULT_SCALE_FACTOR, DEFAULT_TILE_RESOLUTION,
    OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{is_supported_image, load_pixel_buffer, save_pixel_buffer};
use crate::io::progress::ProgressManager;
use crate::raster::ChannelLayout;
use crate::spatial::Metric;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Distance metric choices exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// L2 distance
    Euclidean,
    /// L1 distance
    Manhattan,
    /// L∞ distance
    Chebyshev,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Euclidean => Self::Euclidean,
            MetricArg::Manhattan => Self::Manhattan,
            MetricArg::Chebyshev => Self::Chebyshev,
        }
    }
}

/// Channel layout choices exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Grayscale tiles
    Luma,
    /// Grayscale tiles with transparency
    LumaAlpha,
    /// Opaque color tiles
    Rgb,
    /// Color tiles with transparency
    Rgba,
}

impl From<LayoutArg> for ChannelLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Luma => Self::Luma,
            LayoutArg::LumaAlpha => Self::LumaAlpha,
            LayoutArg::Rgb => Self::Rgb,
            LayoutArg::Rgba => Self::Rgba,
        }
    }
}

#[derive(Parser)]
#[command(name = "emoji-mosaic")]
#[command(author, version, about = "Convert images to emoji art")]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory with emoji images
    #[arg(value_name = "EMOJI_DIR")]
    pub emoji_directory: PathBuf,

    /// Input image or directory of images to convert
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Emoji tile resolution in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_RESOLUTION)]
    pub resolution: u32,

    /// Emoji scale factor (grid density relative to the source resolution)
    #[arg(short, long, default_value_t = DEFAULT_SCALE_FACTOR)]
    pub scale: f64,

    /// Color distance used to match emoji
    #[arg(short, long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Channel layout emoji tiles are normalized to
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Rgba)]
    pub layout: LayoutArg,

    /// Directory for precomputed corpora
    #[arg(long, default_value = DEFAULT_CACHE_DIRECTORY)]
    pub cache_dir: PathBuf,

    /// Do not read or write precomputed corpora
    #[arg(long)]
    pub no_cache: bool,

    /// Recompute the corpus and its index even if a cached one exists
    #[arg(short, long)]
    pub force_precompute: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Corpus options described by the arguments
    pub fn corpus_config(&self) -> CorpusConfig {
        CorpusConfig {
            directory: self.emoji_directory.clone(),
            tile_resolution: self.resolution,
            layout: self.layout.into(),
            metric: self.metric.into(),
            cache_directory: (!self.no_cache).then(|| self.cache_dir.clone()),
        }
    }
}

/// Batch processor that initializes the corpus once and converts each image
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Convert every target image
    ///
    /// Failures of a single image are logged and the batch continues; only
    /// failures that make the corpus unusable abort processing.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, corpus initialization or a
    /// fatal file system operation fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            info!(path = %self.cli.target.display(), "nothing to convert");
            return Ok(());
        }

        let handle = self.initialize()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            if let Some(ref pm) = self.progress_manager {
                pm.start_file(file);
            }

            let outcome = self.process_file(&handle, file);
            let succeeded = outcome.is_ok();
            if let Err(error) = outcome {
                if error.is_fatal() {
                    return Err(error);
                }
                error!(input = %file.display(), %error, "conversion failed");
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_file(succeeded);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn initialize(&mut self) -> Result<CorpusHandle> {
        let config = self.cli.corpus_config();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_initialization(&config.directory, config.tile_resolution);
        }

        let handle = initialize_corpus(&config, self.cli.force_precompute)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_initialization(handle.corpus().len());
        }
        Ok(handle)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a supported image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(&self.cli.target).map_err(|e| {
                crate::io::error::file_system_error(&self.cli.target, "read directory", e)
            })?;
            for entry in entries {
                let path = entry
                    .map_err(|e| {
                        crate::io::error::file_system_error(&self.cli.target, "read entry", e)
                    })?
                    .path();
                if path.is_file()
                    && is_supported_image(&path)
                    && !Self::is_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&self, handle: &CorpusHandle, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let source = load_pixel_buffer(input_path)?;
        let mosaic = handle.compose(&source, self.cli.scale)?;
        save_pixel_buffer(&mosaic, &output_path)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            width = mosaic.width(),
            height = mosaic.height(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "mosaic written"
        );
        Ok(())
    }

    /// Whether `path` looks like a mosaic this tool produced
    pub fn is_output(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    /// Output location for `input_path`: `<stem>_emoji.png` next to the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
            stem.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
