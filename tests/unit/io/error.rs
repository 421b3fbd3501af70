//! Tests for error formatting and classification

#[cfg(test)]
mod tests {
    use emoji_mosaic::MosaicError;
    use emoji_mosaic::io::error::{config_error, file_system_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests that messages name the offending parameter and value
    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("scale_factor", &-1.5, &"must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'scale_factor' = '-1.5': must be positive"
        );
        assert!(!error.is_fatal());
        assert!(error.source().is_none());
    }

    // Tests that initialization failures are fatal and request failures are not
    #[test]
    fn test_fatal_classification() {
        let fatal = [
            MosaicError::Load {
                path: PathBuf::from("emoji"),
                reason: "no images".to_string(),
            },
            MosaicError::Index {
                reason: "no features".to_string(),
            },
            MosaicError::Cache {
                path: PathBuf::from("emojis9.json"),
                reason: "disk full".to_string(),
            },
            file_system_error("out", "create directory", std::io::ErrorKind::Other.into()),
        ];
        for error in &fatal {
            assert!(error.is_fatal(), "{error}");
        }

        let recoverable = [
            config_error(&"tile mismatch"),
            MosaicError::MalformedPixels {
                reason: "empty".to_string(),
            },
            invalid_parameter("query", &"2 components", &"expected 3"),
        ];
        for error in &recoverable {
            assert!(!error.is_fatal(), "{error}");
        }
    }

    // Tests that wrapped errors are exposed as sources
    #[test]
    fn test_error_sources() {
        let io_error = file_system_error(
            "cache",
            "remove cache entry",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(io_error.source().is_some());
        assert!(io_error.to_string().contains("remove cache entry"));
        assert!(io_error.to_string().contains("cache"));

        let decode = MosaicError::ImageDecode {
            path: PathBuf::from("broken.png"),
            source: image::ImageError::IoError(std::io::ErrorKind::InvalidData.into()),
        };
        assert!(decode.source().is_some());
        assert!(decode.to_string().contains("broken.png"));
    }

    // Tests the configuration error message
    #[test]
    fn test_config_error_display() {
        let error = config_error(&"index holds 3 features but the corpus has 2 assets");
        assert!(matches!(error, MosaicError::Config { .. }));
        assert_eq!(
            error.to_string(),
            "Configuration mismatch: index holds 3 features but the corpus has 2 assets"
        );
    }
}
