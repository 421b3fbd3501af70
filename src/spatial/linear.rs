//! Exhaustive nearest-neighbor scan

use crate::corpus::feature::ColorFeature;
use crate::io::error::Result;
use crate::spatial::metric::Metric;
use crate::spatial::{NearestNeighbor, check_query, flatten_features};

/// Compares every query against every feature
///
/// Linear per query, so only suitable for corpora of a few thousand entries.
#[derive(Debug, Clone)]
pub struct LinearScan {
    points: Vec<f64>,
    dimensions: usize,
    metric: Metric,
}

impl LinearScan {
    /// Index `features` under the Euclidean metric
    ///
    /// # Errors
    ///
    /// Returns an index error if `features` is empty, ragged or non-finite.
    pub fn new(features: &[ColorFeature]) -> Result<Self> {
        Self::with_metric(features, Metric::Euclidean)
    }

    /// Index `features` under `metric`
    ///
    /// # Errors
    ///
    /// Returns an error if `features` is empty, ragged or non-finite, or the
    /// metric is invalid.
    pub fn with_metric(features: &[ColorFeature], metric: Metric) -> Result<Self> {
        let metric = metric.validate()?;
        let (points, dimensions) = flatten_features(features)?;
        Ok(Self {
            points,
            dimensions,
            metric,
        })
    }
}

impl NearestNeighbor for LinearScan {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.points.len() / self.dimensions
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn nearest(&self, query: &ColorFeature) -> Result<usize> {
        check_query(self.dimensions, query)?;
        let target = query.components();

        let mut best = (f64::INFINITY, 0);
        for (position, point) in self.points.chunks_exact(self.dimensions).enumerate() {
            let distance = self.metric.reduced_distance(point, target);
            // Strict comparison keeps the first of equally distant features
            if distance < best.0 {
                best = (distance, position);
            }
        }
        Ok(best.1)
    }
}
