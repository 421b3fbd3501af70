//! Nearest-neighbor search over color features
//!
//! This module contains:
//! - Distance metrics shared by every index
//! - A balanced k-d tree used for corpus lookups
//! - A brute-force scan with identical results, for small corpora and checks

/// Balanced k-d tree index
pub mod kdtree;
/// Brute-force reference index
pub mod linear;
/// Lp distance metrics
pub mod metric;

pub use kdtree::KdTree;
pub use linear::LinearScan;
pub use metric::Metric;

use crate::corpus::feature::ColorFeature;
use crate::io::error::{MosaicError, Result};

/// Read-only nearest-neighbor lookup over the features it was built from
///
/// Implementations are immutable after construction and return positions in
/// the build order. Among equally distant features the lowest position wins.
pub trait NearestNeighbor {
    /// Number of components every query must have
    fn dimensions(&self) -> usize;

    /// Number of indexed features
    fn len(&self) -> usize;

    /// Whether the index holds no features
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metric the index ranks candidates by
    fn metric(&self) -> Metric;

    /// Position of the feature closest to `query`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if `query` has the wrong number of
    /// components or a non-finite component.
    fn nearest(&self, query: &ColorFeature) -> Result<usize>;
}

/// Flatten `features` into a row-major point matrix
///
/// # Errors
///
/// Returns [`MosaicError::Index`] if `features` is empty, has zero-dimensional
/// or ragged entries, or contains non-finite components.
pub(crate) fn flatten_features(features: &[ColorFeature]) -> Result<(Vec<f64>, usize)> {
    let Some(first) = features.first() else {
        return Err(MosaicError::Index {
            reason: "no features to index".to_string(),
        });
    };
    let dimensions = first.dimensions();
    if dimensions == 0 {
        return Err(MosaicError::Index {
            reason: "features have no components".to_string(),
        });
    }

    let mut points = Vec::with_capacity(features.len() * dimensions);
    for (position, feature) in features.iter().enumerate() {
        if feature.dimensions() != dimensions {
            return Err(MosaicError::Index {
                reason: format!(
                    "feature {position} has {} components, expected {dimensions}",
                    feature.dimensions()
                ),
            });
        }
        if feature.components().iter().any(|c| !c.is_finite()) {
            return Err(MosaicError::Index {
                reason: format!("feature {position} has a non-finite component"),
            });
        }
        points.extend_from_slice(feature.components());
    }
    Ok((points, dimensions))
}

/// Reject queries an index of `dimensions` components cannot answer
pub(crate) fn check_query(dimensions: usize, query: &ColorFeature) -> Result<()> {
    if query.dimensions() != dimensions {
        return Err(crate::io::error::invalid_parameter(
            "query",
            &format!("{} components", query.dimensions()),
            &format!("index expects {dimensions} components"),
        ));
    }
    if query.components().iter().any(|c| !c.is_finite()) {
        return Err(crate::io::error::invalid_parameter(
            "query",
            &format!("{:?}", query.components()),
            &"components must be finite",
        ));
    }
    Ok(())
}
