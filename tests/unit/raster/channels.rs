//! Tests for channel layout conversion rules

#[cfg(test)]
mod tests {
    use emoji_mosaic::raster::PixelBuffer;
    use emoji_mosaic::raster::channels::{ChannelLayout, conform, luma};
    use std::borrow::Cow;

    fn single_pixel(samples: &[u8]) -> PixelBuffer {
        let Ok(buffer) = PixelBuffer::filled(1, 1, samples) else {
            unreachable!("test pixel rejected");
        };
        buffer
    }

    fn converted(samples: &[u8], target: ChannelLayout) -> Option<Vec<u8>> {
        conform(&single_pixel(samples), target).pixel(0, 0)
    }

    // Tests that channel counts map to layouts and back
    #[test]
    fn test_layout_channel_counts() {
        for channels in 1..=4 {
            let layout = ChannelLayout::from_channel_count(channels);
            assert_eq!(layout.map(ChannelLayout::channel_count), Some(channels));
        }
        assert_eq!(ChannelLayout::from_channel_count(0), None);
        assert_eq!(ChannelLayout::from_channel_count(5), None);
        assert!(ChannelLayout::Rgba.has_alpha());
        assert!(!ChannelLayout::Rgb.has_alpha());
        assert!(ChannelLayout::LumaAlpha.has_alpha());
        assert!(!ChannelLayout::LumaAlpha.is_color());
    }

    // Tests that a matching layout borrows instead of copying
    #[test]
    fn test_conform_same_layout_borrows() {
        let buffer = single_pixel(&[1, 2, 3]);
        assert!(matches!(
            conform(&buffer, ChannelLayout::Rgb),
            Cow::Borrowed(_)
        ));
    }

    // Tests that gray is replicated across color channels with opaque alpha added
    #[test]
    fn test_conform_expands_luma() {
        assert_eq!(converted(&[90], ChannelLayout::Rgb), Some(vec![90, 90, 90]));
        assert_eq!(
            converted(&[90], ChannelLayout::Rgba),
            Some(vec![90, 90, 90, 255])
        );
        assert_eq!(converted(&[90], ChannelLayout::LumaAlpha), Some(vec![90, 255]));
        assert_eq!(
            converted(&[90, 40], ChannelLayout::Rgba),
            Some(vec![90, 90, 90, 40])
        );
    }

    // Tests that opaque alpha is appended to RGB and dropped from RGBA
    #[test]
    fn test_conform_alpha_handling() {
        assert_eq!(
            converted(&[1, 2, 3], ChannelLayout::Rgba),
            Some(vec![1, 2, 3, 255])
        );
        assert_eq!(converted(&[1, 2, 3, 4], ChannelLayout::Rgb), Some(vec![1, 2, 3]));
        assert_eq!(converted(&[7, 8], ChannelLayout::Luma), Some(vec![7]));
        assert_eq!(converted(&[7, 8], ChannelLayout::Rgb), Some(vec![7, 7, 7]));
    }

    // Tests that color is reduced to Rec. 709 luma for grayscale targets
    #[test]
    fn test_conform_reduces_color_to_luma() {
        assert_eq!(converted(&[255, 255, 255], ChannelLayout::Luma), Some(vec![255]));
        assert_eq!(converted(&[0, 0, 0], ChannelLayout::Luma), Some(vec![0]));
        assert_eq!(converted(&[255, 0, 0], ChannelLayout::Luma), Some(vec![54]));
        assert_eq!(
            converted(&[0, 255, 0, 128], ChannelLayout::LumaAlpha),
            Some(vec![182, 128])
        );
        assert_eq!(luma(0, 0, 255), 18);
    }

    // Tests that conversion keeps geometry and converts every pixel
    #[test]
    fn test_conform_preserves_geometry() {
        let Ok(buffer) = PixelBuffer::new(2, 3, 1, vec![0, 10, 20, 30, 40, 50]) else {
            unreachable!("gray buffer rejected");
        };
        let rgb = conform(&buffer, ChannelLayout::Rgb);

        assert_eq!((rgb.height(), rgb.width(), rgb.channels()), (2, 3, 3));
        assert_eq!(rgb.pixel(1, 2), Some(vec![50, 50, 50]));
        assert_eq!(rgb.pixel(0, 1), Some(vec![10, 10, 10]));
    }
}
