//! Conversions between `image` crate types and engine pixel buffers

use crate::io::error::{MosaicError, Result};
use crate::raster::{ChannelLayout, PixelBuffer};
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, LumaA, Rgb, Rgba};
use std::path::Path;

/// Whether the file extension belongs to an image format `image` can read
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// Copy a decoded image into a pixel buffer
///
/// 8-bit gray, gray-alpha, RGB and RGBA images keep their channel count;
/// every other color type is converted to 8-bit RGBA first.
///
/// # Errors
///
/// Returns [`MosaicError::MalformedPixels`] if the image has no pixels.
pub fn pixel_buffer_from_image(img: &DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, samples) = match img {
        DynamicImage::ImageLuma8(buffer) => (1, buffer.as_raw().clone()),
        DynamicImage::ImageLumaA8(buffer) => (2, buffer.as_raw().clone()),
        DynamicImage::ImageRgb8(buffer) => (3, buffer.as_raw().clone()),
        DynamicImage::ImageRgba8(buffer) => (4, buffer.as_raw().clone()),
        other => (4, other.to_rgba8().into_raw()),
    };
    PixelBuffer::new(height, width, channels, samples)
}

/// Copy a pixel buffer into the matching `image` crate type
///
/// # Errors
///
/// Returns [`MosaicError::MalformedPixels`] if the buffer is too large for
/// `image` dimensions.
pub fn pixel_buffer_to_image(buffer: &PixelBuffer) -> Result<DynamicImage> {
    let width = u32::try_from(buffer.width()).map_err(|e| MosaicError::MalformedPixels {
        reason: format!("width {} exceeds image limits: {e}", buffer.width()),
    })?;
    let height = u32::try_from(buffer.height()).map_err(|e| MosaicError::MalformedPixels {
        reason: format!("height {} exceeds image limits: {e}", buffer.height()),
    })?;
    let samples = buffer.to_samples();

    let img = match buffer.layout() {
        ChannelLayout::Luma => ImageBuffer::<Luma<u8>, _>::from_raw(width, height, samples)
            .map(DynamicImage::ImageLuma8),
        ChannelLayout::LumaAlpha => ImageBuffer::<LumaA<u8>, _>::from_raw(width, height, samples)
            .map(DynamicImage::ImageLumaA8),
        ChannelLayout::Rgb => ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, samples)
            .map(DynamicImage::ImageRgb8),
        ChannelLayout::Rgba => ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, samples)
            .map(DynamicImage::ImageRgba8),
    };

    img.ok_or_else(|| MosaicError::MalformedPixels {
        reason: "sample count does not match image dimensions".to_string(),
    })
}

/// Decode an image file into a pixel buffer
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or is not a decodable image
/// - The decoded image has no pixels
pub fn load_pixel_buffer(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|e| MosaicError::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })?;
    pixel_buffer_from_image(&img)
}

/// Encode a pixel buffer to disk, format chosen by extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created (reported as an export error)
/// - The buffer cannot be represented as an image
/// - The image cannot be saved to the specified path
pub fn save_pixel_buffer(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let export_error = |source| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    // Output-side failures only affect this image, never the batch
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| export_error(image::ImageError::IoError(e)))?;
    }

    pixel_buffer_to_image(buffer)?
        .save(path)
        .map_err(export_error)
}
