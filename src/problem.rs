//! Data model: points, the shared dataset and the cost evaluator.

use crate::error::{Result, SearchError};
use crate::solution::Configuration;
use serde::{Deserialize, Serialize};

/// A point in `R^n`. Immutable once loaded into a [`Dataset`]; centroids use
/// the same representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub coords: Vec<f64>,
}

impl Point {
    /// Create a new point from its coordinates.
    pub fn new(coords: Vec<f64>) -> Self {
        Point { coords }
    }

    /// The dimensionality of the point.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Euclidean distance to another point of the same dimensionality.
    pub fn distance(&self, other: &Point) -> f64 {
        self.coords
            .iter()
            .zip(&other.coords)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// The fixed point set the search engines optimize over. Owned by the caller,
/// read-only for every engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<Point>,
    dim: usize,
}

impl Dataset {
    /// Build a dataset from a non-empty collection of points with uniform
    /// dimensionality.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let dim = match points.first() {
            Some(p) => p.dim(),
            None => return Err(SearchError::EmptyDataset),
        };

        for point in &points {
            if point.dim() != dim {
                return Err(SearchError::DimensionMismatch {
                    expected: dim,
                    found: point.dim(),
                });
            }
        }

        Ok(Dataset { points, dim })
    }

    /// Build a dataset from raw coordinate rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Dataset::new(rows.into_iter().map(Point::new).collect())
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A dataset is never empty by construction.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimensionality of every point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The points, in load order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Per-axis `(min, max)` bounds over all points. Used to draw random
    /// centroid configurations inside the data range.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        let mut bounds = vec![(f64::INFINITY, f64::NEG_INFINITY); self.dim];

        for point in &self.points {
            for (axis, &value) in point.coords.iter().enumerate() {
                let (lo, hi) = bounds[axis];
                bounds[axis] = (lo.min(value), hi.max(value));
            }
        }

        bounds
    }

    /// The k-means objective: the sum over all points of the Euclidean
    /// distance to the nearest centroid of `configuration`.
    ///
    /// This is the single cost function shared by every engine, so costs are
    /// comparable across methods. Pure: no state is touched.
    pub fn total_distance(&self, configuration: &Configuration) -> Result<f64> {
        if configuration.dim() != self.dim {
            return Err(SearchError::DimensionMismatch {
                expected: self.dim,
                found: configuration.dim(),
            });
        }

        let mut total = 0.0;
        for point in &self.points {
            let nearest = configuration
                .centroids()
                .iter()
                .map(|c| point.distance(c))
                .fold(f64::INFINITY, f64::min);
            total += nearest;
        }

        Ok(total)
    }

    /// Index of the centroid of `configuration` nearest to `point`.
    pub fn nearest_centroid(point: &Point, configuration: &Configuration) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;

        for (i, centroid) in configuration.centroids().iter().enumerate() {
            let dist = point.distance(centroid);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }

        best
    }
}
