//! Centroid configurations and the result contract returned by the engines.

use crate::error::{Result, SearchError};
use crate::problem::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered sequence of exactly `k` centroids.
///
/// Order only matters for positional correspondence across parents and
/// children during crossover; cluster assignment itself is order-independent.
/// Equality is coordinate-wise, which is what the tabu list relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    centroids: Vec<Point>,
}

impl Configuration {
    /// Build a configuration from at least one centroid with uniform
    /// dimensionality.
    pub fn new(centroids: Vec<Point>) -> Result<Self> {
        let dim = match centroids.first() {
            Some(c) => c.dim(),
            None => {
                return Err(SearchError::InvalidParameter {
                    name: "centroids",
                    reason: "a configuration needs at least one centroid".to_string(),
                })
            }
        };

        for centroid in &centroids {
            if centroid.dim() != dim {
                return Err(SearchError::DimensionMismatch {
                    expected: dim,
                    found: centroid.dim(),
                });
            }
        }

        Ok(Configuration { centroids })
    }

    /// Build a configuration from raw coordinate rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Configuration::new(rows.into_iter().map(Point::new).collect())
    }

    /// Internal constructor for centroids already known to be well-formed.
    pub(crate) fn from_points(centroids: Vec<Point>) -> Self {
        Configuration { centroids }
    }

    /// Draw `k` centroids uniformly at random within per-axis bounds.
    pub fn random_within<R: Rng>(
        bounds: &[(f64, f64)],
        k: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if k == 0 {
            return Err(SearchError::InvalidParameter {
                name: "k",
                reason: "must be at least 1".to_string(),
            });
        }
        if bounds.is_empty() {
            return Err(SearchError::InvalidParameter {
                name: "bounds",
                reason: "need at least one axis".to_string(),
            });
        }

        let centroids = (0..k)
            .map(|_| {
                Point::new(
                    bounds
                        .iter()
                        .map(|&(lo, hi)| rng.gen_range(lo..=hi))
                        .collect(),
                )
            })
            .collect();

        Ok(Configuration { centroids })
    }

    /// Number of centroids.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Dimensionality of every centroid.
    pub fn dim(&self) -> usize {
        self.centroids[0].dim()
    }

    /// The centroids, in positional order.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Mutable access to a single centroid, for in-place perturbation.
    pub(crate) fn centroid_mut(&mut self, index: usize) -> &mut Point {
        &mut self.centroids[index]
    }
}

/// What local and tabu search hand back to the caller: the best configuration
/// found, its cost, and the cost-history sequence for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub configuration: Configuration,
    pub cost: f64,
    pub history: Vec<f64>,
}
