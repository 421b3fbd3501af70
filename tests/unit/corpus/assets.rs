//! Tests for corpus construction and invariants

#[cfg(test)]
mod tests {
    use emoji_mosaic::MosaicError;
    use emoji_mosaic::corpus::{ColorFeature, Corpus, EmojiAsset};
    use emoji_mosaic::raster::{ChannelLayout, PixelBuffer};

    fn solid(name: &str, edge: usize, pixel: &[u8]) -> EmojiAsset {
        let Ok(pixels) = PixelBuffer::filled(edge, edge, pixel) else {
            unreachable!("solid tile rejected");
        };
        EmojiAsset::new(name, pixels)
    }

    // Tests that features are computed from assets in construction order
    #[test]
    fn test_from_assets_computes_features() {
        let assets = vec![
            solid("black", 2, &[0, 0, 0]),
            solid("white", 2, &[255, 255, 255]),
        ];
        let Ok(corpus) = Corpus::from_assets(2, assets) else {
            unreachable!("valid corpus rejected");
        };

        assert_eq!(corpus.len(), 2);
        assert!(!corpus.is_empty());
        assert_eq!(corpus.tile_resolution(), 2);
        assert_eq!(corpus.layout(), ChannelLayout::Rgb);
        assert_eq!(
            corpus.feature(1).map(ColorFeature::components),
            Some(&[255.0, 255.0, 255.0][..])
        );
        assert_eq!(corpus.asset(0).map(EmojiAsset::name), Some("black"));
        assert!(corpus.asset(2).is_none());
    }

    // Tests that an empty corpus cannot be constructed
    #[test]
    fn test_empty_corpus_rejected() {
        let result = Corpus::from_assets(2, Vec::new());
        assert!(matches!(result, Err(MosaicError::Index { .. })));
    }

    // Tests that a zero tile resolution is rejected
    #[test]
    fn test_zero_resolution_rejected() {
        let result = Corpus::from_assets(0, vec![solid("a", 1, &[0])]);
        assert!(matches!(result, Err(MosaicError::InvalidParameter { .. })));
    }

    // Tests that assets must match the tile resolution
    #[test]
    fn test_wrong_tile_size_rejected() {
        let assets = vec![solid("small", 2, &[0, 0, 0]), solid("big", 3, &[0, 0, 0])];
        let result = Corpus::from_assets(2, assets);
        assert!(matches!(result, Err(MosaicError::Config { .. })));
    }

    // Tests that assets must share a channel layout
    #[test]
    fn test_mixed_layouts_rejected() {
        let assets = vec![solid("rgb", 2, &[0, 0, 0]), solid("rgba", 2, &[0, 0, 0, 255])];
        let result = Corpus::from_assets(2, assets);
        assert!(matches!(result, Err(MosaicError::Config { .. })));
    }

    // Tests that precomputed parts must line up with the assets
    #[test]
    fn test_from_parts_validates_features() {
        let assets = vec![solid("gray", 1, &[7])];

        let too_many = vec![ColorFeature::new(vec![7.0]), ColorFeature::new(vec![8.0])];
        assert!(Corpus::from_parts(1, too_many, assets.clone()).is_err());

        let too_wide = vec![ColorFeature::new(vec![7.0, 7.0])];
        assert!(Corpus::from_parts(1, too_wide, assets.clone()).is_err());

        let matching = vec![ColorFeature::new(vec![7.0])];
        assert!(Corpus::from_parts(1, matching, assets).is_ok());
    }

    // Tests that duplicate features are allowed
    #[test]
    fn test_duplicate_features_allowed() {
        let assets = vec![solid("a", 1, &[9, 9, 9]), solid("b", 1, &[9, 9, 9])];
        let Ok(corpus) = Corpus::from_assets(1, assets) else {
            unreachable!("duplicate features rejected");
        };
        assert_eq!(corpus.feature(0), corpus.feature(1));
    }
}
