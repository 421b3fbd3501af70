//! Tests for emoji directory scanning and asset normalization

#[cfg(test)]
mod tests {
    use emoji_mosaic::MosaicError;
    use emoji_mosaic::corpus::{ColorFeature, CorpusLoader, EmojiAsset};
    use emoji_mosaic::raster::ChannelLayout;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;

    fn write_emoji(dir: &Path, name: &str, size: u32, color: [u8; 4]) {
        let img = RgbaImage::from_pixel(size, size, Rgba(color));
        assert!(img.save(dir.join(name)).is_ok(), "failed to write {name}");
    }

    // Tests that every decodable image becomes a normalized asset in sorted order
    #[test]
    fn test_build_normalizes_assets() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        write_emoji(dir.path(), "b_white.png", 16, [255, 255, 255, 255]);
        write_emoji(dir.path(), "a_red.png", 5, [255, 0, 0, 255]);

        let Ok(corpus) = CorpusLoader::new(dir.path()).build(4) else {
            unreachable!("corpus build failed");
        };

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.tile_resolution(), 4);
        assert_eq!(corpus.layout(), ChannelLayout::Rgba);
        let names: Vec<&str> = corpus.assets().iter().map(EmojiAsset::name).collect();
        assert_eq!(names, vec!["a_red.png", "b_white.png"]);

        for asset in corpus.assets() {
            assert_eq!(asset.pixels().height(), 4);
            assert_eq!(asset.pixels().width(), 4);
        }
        assert_eq!(
            corpus.feature(0).map(ColorFeature::components),
            Some(&[255.0, 0.0, 0.0, 255.0][..])
        );
    }

    // Tests that undecodable files are skipped and unrelated files ignored
    #[test]
    fn test_build_skips_broken_files() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        write_emoji(dir.path(), "good.png", 3, [0, 0, 255, 255]);
        assert!(fs::write(dir.path().join("broken.png"), b"not a png").is_ok());
        assert!(fs::write(dir.path().join("notes.txt"), b"ignore me").is_ok());

        let Ok(corpus) = CorpusLoader::new(dir.path()).build(3) else {
            unreachable!("corpus build failed");
        };

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.asset(0).map(EmojiAsset::name), Some("good.png"));
    }

    // Tests that a directory without decodable images fails to load
    #[test]
    fn test_build_empty_directory_fails() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        assert!(matches!(
            CorpusLoader::new(dir.path()).build(4),
            Err(MosaicError::Load { .. })
        ));

        assert!(fs::write(dir.path().join("broken.png"), b"garbage").is_ok());
        assert!(matches!(
            CorpusLoader::new(dir.path()).build(4),
            Err(MosaicError::Load { .. })
        ));
    }

    // Tests that a missing directory fails to load
    #[test]
    fn test_build_missing_directory_fails() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        let missing = dir.path().join("does-not-exist");
        assert!(matches!(
            CorpusLoader::new(missing).build(4),
            Err(MosaicError::Load { .. })
        ));
    }

    // Tests that a zero tile resolution is rejected before touching the disk
    #[test]
    fn test_build_zero_resolution_fails() {
        let loader = CorpusLoader::new("/nonexistent");
        assert!(matches!(
            loader.build(0),
            Err(MosaicError::InvalidParameter { .. })
        ));
    }

    // Tests that assets are conformed to the configured layout
    #[test]
    fn test_build_with_rgb_layout() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        write_emoji(dir.path(), "green.png", 2, [0, 200, 0, 255]);

        let loader = CorpusLoader::new(dir.path()).with_layout(ChannelLayout::Rgb);
        assert_eq!(loader.layout(), ChannelLayout::Rgb);
        assert_eq!(loader.directory(), dir.path());

        let Ok(corpus) = loader.build(2) else {
            unreachable!("corpus build failed");
        };
        assert_eq!(corpus.layout(), ChannelLayout::Rgb);
        assert_eq!(
            corpus.feature(0).map(ColorFeature::components),
            Some(&[0.0, 200.0, 0.0][..])
        );
    }
}
