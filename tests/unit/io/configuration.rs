//! Tests for engine defaults and limits

#[cfg(test)]
mod tests {
    use emoji_mosaic::io::configuration::{
        CACHE_FILE_EXTENSION, CACHE_FILE_PREFIX, DEFAULT_SCALE_FACTOR, DEFAULT_TILE_RESOLUTION,
        MAX_GRID_DIMENSION, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    };

    // Tests that defaults describe a usable configuration
    #[test]
    fn test_defaults_are_valid() {
        assert!(DEFAULT_TILE_RESOLUTION > 0);
        assert!(DEFAULT_SCALE_FACTOR.is_finite() && DEFAULT_SCALE_FACTOR > 0.0);
        assert!(MAX_GRID_DIMENSION > 0);
    }

    // Tests that file naming constants form plain file names
    #[test]
    fn test_file_naming() {
        for part in [CACHE_FILE_PREFIX, CACHE_FILE_EXTENSION, OUTPUT_SUFFIX, OUTPUT_EXTENSION] {
            assert!(!part.is_empty());
            assert!(!part.contains('/') && !part.contains('.'));
        }
    }
}
