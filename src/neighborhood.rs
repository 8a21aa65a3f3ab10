//! Neighborhood generation around a centroid configuration.

use crate::error::{Result, SearchError};
use crate::problem::Point;
use crate::solution::Configuration;
use itertools::Itertools;
use std::collections::HashSet;

/// For each centroid, the set of candidate replacement points obtained by
/// displacing the centroid along the Cartesian grid of per-axis offsets
/// `{-steps*delta, ..., -delta, 0, delta, ..., steps*delta}`, with the
/// all-zero offset excluded.
///
/// Per centroid this yields `(2*steps + 1)^dim - 1` neighbors before
/// deduplication; identical floating-point results collapse (set semantics).
#[derive(Debug, Clone)]
pub struct Neighborhood {
    sets: Vec<Vec<Point>>,
}

impl Neighborhood {
    /// Generate the neighborhood of `configuration` for the given step size
    /// and step count.
    ///
    /// `delta` must be positive and finite, `steps` at least 1.
    pub fn generate(configuration: &Configuration, delta: f64, steps: usize) -> Result<Self> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(SearchError::InvalidParameter {
                name: "delta",
                reason: format!("must be a positive finite number, got {}", delta),
            });
        }
        if steps == 0 {
            return Err(SearchError::InvalidParameter {
                name: "steps",
                reason: "must be at least 1".to_string(),
            });
        }

        let offsets: Vec<f64> = (-(steps as i64)..=steps as i64)
            .map(|i| i as f64 * delta)
            .collect();
        // Index `steps` into `offsets` is the exact zero offset.
        let zero = steps;

        let mut sets = Vec::with_capacity(configuration.k());

        for centroid in configuration.centroids() {
            let dim = centroid.dim();
            let mut seen: HashSet<Vec<u64>> = HashSet::new();
            let mut neighbors = Vec::new();

            for combo in std::iter::repeat(0..offsets.len())
                .take(dim)
                .multi_cartesian_product()
            {
                if combo.iter().all(|&i| i == zero) {
                    continue;
                }

                let coords: Vec<f64> = centroid
                    .coords
                    .iter()
                    .zip(&combo)
                    .map(|(c, &i)| c + offsets[i])
                    .collect();

                let key: Vec<u64> = coords.iter().map(|v| v.to_bits()).collect();
                if seen.insert(key) {
                    neighbors.push(Point::new(coords));
                }
            }

            sets.push(neighbors);
        }

        Ok(Neighborhood { sets })
    }

    /// Build a neighborhood from explicit per-centroid neighbor sets.
    ///
    /// Empty sets are allowed; they make the candidate space empty and the
    /// engines fall back to the starting configuration.
    pub fn from_sets(sets: Vec<Vec<Point>>) -> Self {
        Neighborhood { sets }
    }

    /// Number of centroids this neighborhood was generated for.
    pub fn centroid_count(&self) -> usize {
        self.sets.len()
    }

    /// The neighbor sets, one per centroid.
    pub fn sets(&self) -> &[Vec<Point>] {
        &self.sets
    }

    /// True if some centroid ended up with no neighbors at all. The candidate
    /// space is empty in that case and the engines fall back to the starting
    /// configuration.
    pub fn is_degenerate(&self) -> bool {
        self.sets.iter().any(|s| s.is_empty())
    }

    /// All candidate configurations formed by replacing every centroid
    /// simultaneously with one of its neighbors (full Cartesian product of
    /// the per-centroid sets).
    pub fn combinations(&self) -> impl Iterator<Item = Configuration> + '_ {
        self.sets
            .iter()
            .map(|s| s.iter())
            .multi_cartesian_product()
            .map(|combo| Configuration::from_points(combo.into_iter().cloned().collect()))
    }
}
