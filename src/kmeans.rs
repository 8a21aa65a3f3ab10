//! Lloyd-style k-means, used to produce initial centroid configurations for
//! the search engines.

use crate::error::{Result, SearchError};
use crate::problem::{Dataset, Point};
use crate::solution::Configuration;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Plain k-means with a convergence tolerance on centroid movement.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    pub max_iter: usize,
    pub tolerance: f64,
}

/// Outcome of a k-means fit: the fitted configuration, its cost under the
/// shared evaluator, and the final per-point cluster assignment.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub configuration: Configuration,
    pub cost: f64,
    pub labels: Vec<usize>,
}

impl KMeans {
    /// Create a k-means instance with default iteration limit (100) and
    /// tolerance (1e-4).
    pub fn new(n_clusters: usize) -> Self {
        KMeans {
            n_clusters,
            max_iter: 100,
            tolerance: 1e-4,
        }
    }

    /// Set the maximum number of fitting iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fit centroids to `dataset`, starting from `initial` when supplied and
    /// from `n_clusters` distinct random points otherwise.
    ///
    /// A cluster that loses all its points keeps its previous centroid
    /// unchanged; that is a legal boundary case, not an error.
    pub fn fit<R: Rng>(
        &self,
        dataset: &Dataset,
        initial: Option<Configuration>,
        rng: &mut R,
    ) -> Result<KMeansFit> {
        if self.n_clusters == 0 {
            return Err(SearchError::InvalidParameter {
                name: "n_clusters",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.n_clusters > dataset.len() {
            return Err(SearchError::InvalidParameter {
                name: "n_clusters",
                reason: format!(
                    "cannot place {} centroids over {} points",
                    self.n_clusters,
                    dataset.len()
                ),
            });
        }

        let mut centroids: Vec<Point> = match initial {
            Some(configuration) => {
                if configuration.dim() != dataset.dim() {
                    return Err(SearchError::DimensionMismatch {
                        expected: dataset.dim(),
                        found: configuration.dim(),
                    });
                }
                configuration.centroids().to_vec()
            }
            None => dataset
                .points()
                .choose_multiple(rng, self.n_clusters)
                .cloned()
                .collect(),
        };

        let mut labels = vec![0usize; dataset.len()];

        for iteration in 0..self.max_iter {
            let configuration = Configuration::from_points(centroids.clone());

            for (label, point) in labels.iter_mut().zip(dataset.points()) {
                *label = Dataset::nearest_centroid(point, &configuration);
            }

            let mut sums = vec![vec![0.0; dataset.dim()]; centroids.len()];
            let mut counts = vec![0usize; centroids.len()];

            for (point, &label) in dataset.points().iter().zip(&labels) {
                counts[label] += 1;
                for (axis, &value) in point.coords.iter().enumerate() {
                    sums[label][axis] += value;
                }
            }

            let mut shift = 0.0;
            for (i, centroid) in centroids.iter_mut().enumerate() {
                if counts[i] == 0 {
                    continue;
                }

                let mean = Point::new(
                    sums[i].iter().map(|s| s / counts[i] as f64).collect(),
                );
                shift += centroid.distance(&mean);
                *centroid = mean;
            }

            if shift < self.tolerance {
                debug!("k-means converged after {} iterations", iteration + 1);
                break;
            }
        }

        let configuration = Configuration::from_points(centroids);
        let cost = dataset.total_distance(&configuration)?;

        Ok(KMeansFit {
            configuration,
            cost,
            labels,
        })
    }
}
