//! Engine constants and runtime configuration defaults

// Defaults for configurable parameters
/// Emoji tile edge length in pixels
pub const DEFAULT_TILE_RESOLUTION: u32 = 9;
/// Fraction of the source resolution covered by emoji tiles
pub const DEFAULT_SCALE_FACTOR: f64 = 0.8;
/// Directory holding precomputed corpus entries
pub const DEFAULT_CACHE_DIRECTORY: &str = ".emoji-cache";
/// Default `tracing` level for the command-line tool
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Safety limit to prevent excessive memory allocation
/// Maximum number of mosaic cells along either axis
pub const MAX_GRID_DIMENSION: usize = 10_000;
/// Largest Minkowski exponent; `255^p` summed over four channels stays finite
pub const MAX_MINKOWSKI_EXPONENT: f64 = 64.0;

// Cache settings
/// Bumped whenever the on-disk cache layout changes
pub const CACHE_FORMAT_VERSION: u32 = 2;
/// File name prefix of a cache entry (`emojis<resolution>.json`)
pub const CACHE_FILE_PREFIX: &str = "emojis";
/// File extension of a cache entry
pub const CACHE_FILE_EXTENSION: &str = "json";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Spinner refresh interval while the corpus initializes
pub const SPINNER_TICK_MS: u64 = 120;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_emoji";
/// Extension of generated mosaics
pub const OUTPUT_EXTENSION: &str = "png";
