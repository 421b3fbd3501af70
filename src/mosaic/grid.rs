//! Mosaic grid geometry: how many tiles fit and which source pixels each covers

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::Result;
use std::ops::Range;

/// Partition of a source image into emoji cells
///
/// The scale factor sets grid density, not a resize of the source: each axis
/// gets `max(1, floor(extent * scale / tile))` cells, and every cell samples
/// the proportional slice of the original source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicGrid {
    rows: usize,
    cols: usize,
    source_height: usize,
    source_width: usize,
    tile_resolution: usize,
}

impl MosaicGrid {
    /// Lay out a grid over a `source_height × source_width` image
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if:
    /// - `scale_factor` is not a finite positive number
    /// - `tile_resolution` is zero
    /// - Either source dimension is zero
    /// - The grid would exceed `MAX_GRID_DIMENSION` cells on an axis
    pub fn new(
        source_height: usize,
        source_width: usize,
        scale_factor: f64,
        tile_resolution: u32,
    ) -> Result<Self> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(crate::io::error::invalid_parameter(
                "scale_factor",
                &scale_factor,
                &"must be a finite number greater than zero",
            ));
        }
        if tile_resolution == 0 {
            return Err(crate::io::error::invalid_parameter(
                "tile_resolution",
                &tile_resolution,
                &"must be a positive integer",
            ));
        }
        if source_height == 0 || source_width == 0 {
            return Err(crate::io::error::invalid_parameter(
                "source",
                &format!("{source_height}x{source_width}"),
                &"image has no pixels",
            ));
        }

        let rows = cells_along(source_height, scale_factor, tile_resolution);
        let cols = cells_along(source_width, scale_factor, tile_resolution);
        if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            return Err(crate::io::error::invalid_parameter(
                "scale_factor",
                &scale_factor,
                &format!(
                    "grid of {rows}x{cols} cells exceeds the {MAX_GRID_DIMENSION} cell limit"
                ),
            ));
        }

        Ok(Self {
            rows,
            cols,
            source_height,
            source_width,
            tile_resolution: tile_resolution as usize,
        })
    }

    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Output height in pixels
    pub const fn output_height(&self) -> usize {
        self.rows * self.tile_resolution
    }

    /// Output width in pixels
    pub const fn output_width(&self) -> usize {
        self.cols * self.tile_resolution
    }

    /// Source rows sampled by cell row `row`
    pub fn row_span(&self, row: usize) -> Range<usize> {
        span(row, self.rows, self.source_height)
    }

    /// Source columns sampled by cell column `col`
    pub fn col_span(&self, col: usize) -> Range<usize> {
        span(col, self.cols, self.source_width)
    }

    /// Output pixel rows covered by cell row `row`
    pub const fn output_rows(&self, row: usize) -> Range<usize> {
        row * self.tile_resolution..(row + 1) * self.tile_resolution
    }

    /// Output pixel columns covered by cell column `col`
    pub const fn output_cols(&self, col: usize) -> Range<usize> {
        col * self.tile_resolution..(col + 1) * self.tile_resolution
    }
}

fn cells_along(extent: usize, scale_factor: f64, tile_resolution: u32) -> usize {
    let cells = (extent as f64 * scale_factor / f64::from(tile_resolution)).floor();
    // Saturating float-to-int conversion, clamped below by one cell
    (cells as usize).max(1)
}

// Proportional slice of `extent` for `index` of `cells`, never empty and never
// past the end. Cells outnumbering pixels share the nearest pixel.
fn span(index: usize, cells: usize, extent: usize) -> Range<usize> {
    let start = (index * extent / cells).min(extent.saturating_sub(1));
    let end = ((index + 1) * extent / cells).clamp(start + 1, extent);
    start..end
}
