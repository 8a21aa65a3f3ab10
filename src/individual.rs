//! Individual representation for the genetic algorithm population.

use crate::error::Result;
use crate::genetic::Mutation;
use crate::problem::Dataset;
use crate::solution::Configuration;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;

/// A centroid configuration together with its cached fitness (the shared
/// k-means cost). Fitness is computed eagerly on construction and recomputed
/// whenever the configuration changes.
#[derive(Debug, Clone, Serialize)]
pub struct Individual {
    configuration: Configuration,
    fitness: f64,
}

impl Individual {
    /// Create an individual and evaluate its fitness against `dataset`.
    pub fn new(dataset: &Dataset, configuration: Configuration) -> Result<Self> {
        let fitness = dataset.total_distance(&configuration)?;
        Ok(Individual {
            configuration,
            fitness,
        })
    }

    /// The cached fitness (lower is better).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The underlying centroid configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Recompute the fitness from scratch. Repeated evaluation without an
    /// intervening mutation always yields the same value.
    pub fn reevaluate(&mut self, dataset: &Dataset) -> Result<f64> {
        self.fitness = dataset.total_distance(&self.configuration)?;
        Ok(self.fitness)
    }

    /// With probability `probability`, perturb one uniformly chosen centroid
    /// by a draw from `mutation` on every coordinate, then recompute the
    /// fitness. Returns whether a mutation was applied.
    pub fn mutate<R: Rng>(
        &mut self,
        dataset: &Dataset,
        mutation: &Mutation,
        probability: f64,
        rng: &mut R,
    ) -> Result<bool> {
        if rng.gen::<f64>() >= probability {
            return Ok(false);
        }

        let index = rng.gen_range(0..self.configuration.k());
        let centroid = self.configuration.centroid_mut(index);
        for coord in centroid.coords.iter_mut() {
            *coord += mutation.sample(rng)?;
        }

        self.reevaluate(dataset)?;
        Ok(true)
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl Eq for Individual {}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Individual {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness
            .partial_cmp(&other.fitness)
            .unwrap_or(Ordering::Equal)
    }
}
