//! Balanced k-d tree over color features
//!
//! Each node stores one feature and splits its subtree on the axis with the
//! widest spread, at the median of that axis. Build cost is O(n log n) and
//! queries visit O(log n) nodes on well-spread data.
//!
//! Search is exact: a subtree is skipped only when its splitting plane is
//! strictly farther than the best candidate, so equally distant features are
//! always compared and the lowest position wins.

use crate::corpus::feature::ColorFeature;
use crate::io::error::Result;
use crate::spatial::metric::Metric;
use crate::spatial::{NearestNeighbor, check_query, flatten_features};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct KdNode {
    /// Position of the stored feature in build order
    point: usize,
    axis: usize,
    split: f64,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    point: usize,
}

impl Candidate {
    fn improves_on(self, other: Self) -> bool {
        match self.distance.total_cmp(&other.distance) {
            Ordering::Less => true,
            Ordering::Equal => self.point < other.point,
            Ordering::Greater => false,
        }
    }
}

/// Immutable k-d tree answering nearest-feature queries
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<f64>,
    dimensions: usize,
    nodes: Vec<KdNode>,
    root: usize,
    metric: Metric,
}

impl KdTree {
    /// Build a tree over `features` using the Euclidean metric
    ///
    /// # Errors
    ///
    /// Returns an index error if `features` is empty, ragged or non-finite.
    pub fn new(features: &[ColorFeature]) -> Result<Self> {
        Self::with_metric(features, Metric::Euclidean)
    }

    /// Build a tree over `features` ranking candidates by `metric`
    ///
    /// # Errors
    ///
    /// Returns an error if `features` is empty, ragged or non-finite, or the
    /// metric is invalid.
    pub fn with_metric(features: &[ColorFeature], metric: Metric) -> Result<Self> {
        let metric = metric.validate()?;
        let (points, dimensions) = flatten_features(features)?;

        let mut order: Vec<usize> = (0..features.len()).collect();
        let mut nodes = Vec::with_capacity(features.len());
        let root = build_subtree(&points, dimensions, &mut order, &mut nodes).unwrap_or(0);

        Ok(Self {
            points,
            dimensions,
            nodes,
            root,
            metric,
        })
    }

    /// Depth of the deepest leaf, 1 for a single feature
    pub fn depth(&self) -> usize {
        self.subtree_depth(Some(self.root))
    }

    fn subtree_depth(&self, node: Option<usize>) -> usize {
        node.and_then(|index| self.nodes.get(index))
            .map_or(0, |n| {
                1 + self.subtree_depth(n.left).max(self.subtree_depth(n.right))
            })
    }

    fn point(&self, position: usize) -> &[f64] {
        let start = position * self.dimensions;
        self.points
            .get(start..start + self.dimensions)
            .unwrap_or_default()
    }

    fn search(&self, slot: Option<usize>, query: &[f64], best: &mut Candidate) {
        let Some(node) = slot.and_then(|index| self.nodes.get(index)) else {
            return;
        };

        let here = Candidate {
            distance: self.metric.reduced_distance(self.point(node.point), query),
            point: node.point,
        };
        if here.improves_on(*best) {
            *best = here;
        }

        let delta = query.get(node.axis).copied().unwrap_or(0.0) - node.split;
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.search(near, query, best);
        if self.metric.reduced_axis_distance(delta) <= best.distance {
            self.search(far, query, best);
        }
    }
}

impl NearestNeighbor for KdTree {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn nearest(&self, query: &ColorFeature) -> Result<usize> {
        check_query(self.dimensions, query)?;
        let mut best = Candidate {
            distance: f64::INFINITY,
            point: usize::MAX,
        };
        self.search(Some(self.root), query.components(), &mut best);
        Ok(best.point)
    }
}

fn coordinate(points: &[f64], dimensions: usize, position: usize, axis: usize) -> f64 {
    points
        .get(position * dimensions + axis)
        .copied()
        .unwrap_or(0.0)
}

// Axis along which the given points are most spread out
fn widest_axis(points: &[f64], dimensions: usize, order: &[usize]) -> usize {
    let mut best_axis = 0;
    let mut best_spread = f64::NEG_INFINITY;
    for axis in 0..dimensions {
        let (low, high) = order.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(low, high), &position| {
                let value = coordinate(points, dimensions, position, axis);
                (low.min(value), high.max(value))
            },
        );
        if high - low > best_spread {
            best_spread = high - low;
            best_axis = axis;
        }
    }
    best_axis
}

// Left subtree holds coordinates <= split, right subtree coordinates >= split
fn build_subtree(
    points: &[f64],
    dimensions: usize,
    order: &mut [usize],
    nodes: &mut Vec<KdNode>,
) -> Option<usize> {
    if order.is_empty() {
        return None;
    }

    let axis = widest_axis(points, dimensions, order);
    let median = order.len() / 2;
    order.select_nth_unstable_by(median, |&a, &b| {
        coordinate(points, dimensions, a, axis)
            .total_cmp(&coordinate(points, dimensions, b, axis))
            .then(a.cmp(&b))
    });

    let (lower, rest) = order.split_at_mut(median);
    let (pivot, upper) = rest.split_first_mut()?;
    let point = *pivot;

    let slot = nodes.len();
    nodes.push(KdNode {
        point,
        axis,
        split: coordinate(points, dimensions, point, axis),
        left: None,
        right: None,
    });

    let left = build_subtree(points, dimensions, lower, nodes);
    let right = build_subtree(points, dimensions, upper, nodes);
    if let Some(node) = nodes.get_mut(slot) {
        node.left = left;
        node.right = right;
    }
    Some(slot)
}
