//! Channel layouts and the conversion rule between them
//!
//! Every place that has to reconcile two channel counts goes through
//! [`conform`], so corpus assets and source images follow the same rule:
//!
//! | source \ target | Luma        | LumaAlpha      | Rgb          | Rgba              |
//! |-----------------|-------------|----------------|--------------|-------------------|
//! | Luma            | as is       | `l, 255`       | `l, l, l`    | `l, l, l, 255`    |
//! | LumaAlpha       | `l`         | as is          | `l, l, l`    | `l, l, l, a`      |
//! | Rgb             | `Y(rgb)`    | `Y(rgb), 255`  | as is        | `r, g, b, 255`    |
//! | Rgba            | `Y(rgb)`    | `Y(rgb), a`    | `r, g, b`    | as is             |
//!
//! `Y` is Rec. 709 luma. Luma is replicated across color channels, missing
//! alpha is opaque, and alpha is dropped when the target has none.

use crate::raster::buffer::PixelBuffer;
use ndarray::Array3;
use std::borrow::Cow;
use std::fmt;

/// Interpretation of the samples of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single gray channel
    Luma,
    /// Gray plus alpha
    LumaAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    #[default]
    Rgba,
}

impl ChannelLayout {
    /// Layout for a channel count, `None` outside 1 to 4
    pub const fn from_channel_count(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Luma),
            2 => Some(Self::LumaAlpha),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Samples per pixel
    pub const fn channel_count(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::LumaAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether the last channel is alpha
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::LumaAlpha | Self::Rgba)
    }

    /// Whether the layout carries separate color channels
    pub const fn is_color(self) -> bool {
        matches!(self, Self::Rgb | Self::Rgba)
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Luma => "luma",
            Self::LumaAlpha => "luma-alpha",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
        };
        f.write_str(name)
    }
}

/// Rec. 709 luma of an 8-bit RGB triple
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722;
    ((weighted + 5000) / 10_000).min(255) as u8
}

// Split one pixel into (r, g, b, alpha) regardless of layout
fn decompose(pixel: &[u8], layout: ChannelLayout) -> ([u8; 3], Option<u8>) {
    let sample = |i: usize| pixel.get(i).copied().unwrap_or(0);
    match layout {
        ChannelLayout::Luma => ([sample(0); 3], None),
        ChannelLayout::LumaAlpha => ([sample(0); 3], Some(sample(1))),
        ChannelLayout::Rgb => ([sample(0), sample(1), sample(2)], None),
        ChannelLayout::Rgba => ([sample(0), sample(1), sample(2)], Some(sample(3))),
    }
}

fn compose_pixel(
    rgb: [u8; 3],
    alpha: Option<u8>,
    source: ChannelLayout,
    target: ChannelLayout,
    out: &mut [u8],
) {
    let gray = if source.is_color() {
        luma(rgb[0], rgb[1], rgb[2])
    } else {
        rgb[0]
    };
    let opacity = alpha.unwrap_or(u8::MAX);
    let samples: &[u8] = match target {
        ChannelLayout::Luma => &[gray],
        ChannelLayout::LumaAlpha => &[gray, opacity],
        ChannelLayout::Rgb => &rgb,
        ChannelLayout::Rgba => &[rgb[0], rgb[1], rgb[2], opacity],
    };
    for (slot, &value) in out.iter_mut().zip(samples) {
        *slot = value;
    }
}

/// Convert `buffer` to the `target` layout
///
/// Borrows when the layout already matches. See the module documentation for
/// the conversion table.
pub fn conform(buffer: &PixelBuffer, target: ChannelLayout) -> Cow<'_, PixelBuffer> {
    let source = buffer.layout();
    if source == target {
        return Cow::Borrowed(buffer);
    }

    let (height, width) = (buffer.height(), buffer.width());
    let channels = target.channel_count();
    let mut converted = Array3::<u8>::zeros((height, width, channels));

    for (mut out, lane) in converted
        .rows_mut()
        .into_iter()
        .zip(buffer.as_array().rows())
    {
        let pixel: Vec<u8> = lane.iter().copied().collect();
        let (rgb, alpha) = decompose(&pixel, source);
        let mut samples = [0u8; 4];
        compose_pixel(rgb, alpha, source, target, &mut samples);
        for (slot, &value) in out.iter_mut().zip(&samples) {
            *slot = value;
        }
    }

    Cow::Owned(PixelBuffer::from_valid_array(converted))
}
