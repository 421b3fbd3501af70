//! Lp distance metrics over color features
//!
//! Searches compare *reduced* distances, which order points exactly like the
//! true distance but skip the final root (for example squared Euclidean).

use crate::io::configuration::MAX_MINKOWSKI_EXPONENT;
use crate::io::error::Result;

/// Distance used to compare a query feature against corpus features
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric {
    /// L2 distance
    #[default]
    Euclidean,
    /// L1 distance
    Manhattan,
    /// L∞ distance
    Chebyshev,
    /// General Lp distance, `1 <= p <= MAX_MINKOWSKI_EXPONENT`
    Minkowski(f64),
}

impl Metric {
    /// Check that the metric is a proper distance
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if a Minkowski exponent is below 1
    /// or above [`MAX_MINKOWSKI_EXPONENT`], where reduced distances between
    /// features would overflow.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Minkowski(p) if !(1.0..=MAX_MINKOWSKI_EXPONENT).contains(&p) => {
                Err(crate::io::error::invalid_parameter(
                    "metric",
                    &format!("minkowski({p})"),
                    &format!("exponent must be between 1 and {MAX_MINKOWSKI_EXPONENT}"),
                ))
            }
            _ => Ok(self),
        }
    }

    /// Reduced distance between two points of equal dimensionality
    pub fn reduced_distance(self, a: &[f64], b: &[f64]) -> f64 {
        let deltas = a.iter().zip(b).map(|(x, y)| (x - y).abs());
        match self {
            Self::Euclidean => deltas.map(|d| d * d).sum(),
            Self::Manhattan => deltas.sum(),
            Self::Chebyshev => deltas.fold(0.0, f64::max),
            Self::Minkowski(p) => deltas.map(|d| d.powf(p)).sum(),
        }
    }

    /// Reduced distance contributed by a single axis offset
    ///
    /// Lower bound on the reduced distance to any point whose coordinate on
    /// that axis is at least `delta` away from the query.
    pub fn reduced_axis_distance(self, delta: f64) -> f64 {
        let d = delta.abs();
        match self {
            Self::Euclidean => d * d,
            Self::Manhattan | Self::Chebyshev => d,
            Self::Minkowski(p) => d.powf(p),
        }
    }

    /// Convert a reduced distance back to the true distance
    pub fn from_reduced(self, reduced: f64) -> f64 {
        match self {
            Self::Euclidean => reduced.sqrt(),
            Self::Manhattan | Self::Chebyshev => reduced,
            Self::Minkowski(p) => reduced.powf(p.recip()),
        }
    }

    /// True distance between two points
    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        self.from_reduced(self.reduced_distance(a, b))
    }
}
