//! Tile matching and compositing of emoji mosaics

use crate::corpus::assets::Corpus;
use crate::corpus::feature::ColorFeature;
use crate::io::error::{MosaicError, Result};
use crate::mosaic::grid::MosaicGrid;
use crate::raster::PixelBuffer;
use crate::raster::channels::conform;
use crate::spatial::NearestNeighbor;
use ndarray::{Array3, s};
use tracing::debug;

/// Replace every grid cell of `source` with the emoji closest to its mean color
///
/// The source is first conformed to the corpus channel layout. Output is a
/// `rows * tile × cols * tile` buffer in that layout, where the grid is laid
/// out by [`MosaicGrid`]. The call only reads `corpus` and `index`, so any
/// number of threads may compose against the same pair.
///
/// # Errors
///
/// Returns an error if:
/// - `scale_factor` or `tile_resolution` is invalid, or the grid is too large
/// - `tile_resolution` differs from the corpus tile resolution
/// - `index` was not built from a corpus of this size and dimensionality
pub fn compose<I>(
    source: &PixelBuffer,
    corpus: &Corpus,
    index: &I,
    scale_factor: f64,
    tile_resolution: u32,
) -> Result<PixelBuffer>
where
    I: NearestNeighbor + ?Sized,
{
    let grid = MosaicGrid::new(
        source.height(),
        source.width(),
        scale_factor,
        tile_resolution,
    )?;
    check_configuration(corpus, index, tile_resolution)?;

    let layout = corpus.layout();
    let channels = layout.channel_count();
    grid.output_height()
        .checked_mul(grid.output_width())
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            crate::io::error::invalid_parameter(
                "scale_factor",
                &scale_factor,
                &"output size overflows",
            )
        })?;

    let source = conform(source, layout);
    let pixels = source.view();
    let mut output = Array3::<u8>::zeros((grid.output_height(), grid.output_width(), channels));

    for row in 0..grid.rows() {
        let rows = grid.row_span(row);
        for col in 0..grid.cols() {
            let cols = grid.col_span(col);
            let region = pixels.slice(s![rows.clone(), cols, ..]);
            let feature = ColorFeature::mean_of(region);

            let matched = index.nearest(&feature)?;
            let asset = corpus.asset(matched).ok_or_else(|| {
                crate::io::error::config_error(&format!(
                    "index returned position {matched} for a corpus of {}",
                    corpus.len()
                ))
            })?;

            output
                .slice_mut(s![grid.output_rows(row), grid.output_cols(col), ..])
                .assign(asset.pixels().as_array());
        }
    }

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        height = grid.output_height(),
        width = grid.output_width(),
        "composed emoji mosaic"
    );
    PixelBuffer::from_array(output).map_err(|e| MosaicError::MalformedPixels {
        reason: format!("composed mosaic is invalid: {e}"),
    })
}

fn check_configuration<I>(corpus: &Corpus, index: &I, tile_resolution: u32) -> Result<()>
where
    I: NearestNeighbor + ?Sized,
{
    if corpus.tile_resolution() != tile_resolution {
        return Err(crate::io::error::config_error(&format!(
            "corpus was built for {}px tiles but {tile_resolution}px tiles were requested",
            corpus.tile_resolution()
        )));
    }
    if index.len() != corpus.len() {
        return Err(crate::io::error::config_error(&format!(
            "index holds {} features but the corpus has {} assets",
            index.len(),
            corpus.len()
        )));
    }
    if index.dimensions() != corpus.layout().channel_count() {
        return Err(crate::io::error::config_error(&format!(
            "index expects {} components but the corpus uses {}",
            index.dimensions(),
            corpus.layout()
        )));
    }
    Ok(())
}
