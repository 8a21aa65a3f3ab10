//! Configuration parameters for the search engines.

use crate::error::{Result, SearchError};
use crate::genetic::{Mutation, SelectionMethod};
use crate::local_search::LocalSearchMode;
use serde::{Deserialize, Serialize};

/// Tunable parameters shared by the local, tabu and genetic search engines.
///
/// All values are validated once at entry via [`Config::validate`]; the
/// engines assume a validated config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of centroids (k)
    pub n_clusters: usize,
    /// Step size for neighborhood displacement
    pub delta: f64,
    /// Number of displacement steps per direction
    pub steps: usize,
    /// Maximum tabu-search iterations
    pub max_iter: usize,
    /// Tabu list capacity (0 disables tabu memory)
    pub tabu_size: usize,
    /// Target number of individuals in the genetic population
    pub population_size: usize,
    /// Number of generations to evolve
    pub generations: usize,
    /// Probability that an individual mutates, per generation
    pub mutation_rate: f64,
    /// Fraction of the population preserved as elite during replacement
    pub elite_fraction: f64,
    /// Number of contenders per tournament draw
    pub tournament_size: usize,
    /// Parent selection scheme
    pub selection_method: SelectionMethod,
    /// Local search improvement strategy
    pub local_search_mode: LocalSearchMode,
    /// Mutation perturbation distribution
    pub mutation: Mutation,
    /// Random seed (None draws from entropy)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            n_clusters: 3,
            delta: 0.1,
            steps: 1,
            max_iter: 150,
            tabu_size: 150,
            population_size: 20,
            generations: 50,
            mutation_rate: 0.1,
            elite_fraction: 0.2,
            tournament_size: 3,
            selection_method: SelectionMethod::Tournament,
            local_search_mode: LocalSearchMode::Best,
            mutation: Mutation::Gaussian { std_dev: 0.1 },
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the number of centroids.
    pub fn with_n_clusters(mut self, k: usize) -> Self {
        self.n_clusters = k;
        self
    }

    /// Set the neighborhood step size.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Set the number of displacement steps per direction.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set the maximum number of tabu iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the tabu list capacity.
    pub fn with_tabu_size(mut self, tabu_size: usize) -> Self {
        self.tabu_size = tabu_size;
        self
    }

    /// Set the genetic population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the per-individual mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the elite fraction retained during replacement.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the parent selection scheme.
    pub fn with_selection_method(mut self, method: SelectionMethod) -> Self {
        self.selection_method = method;
        self
    }

    /// Set the local search strategy.
    pub fn with_local_search_mode(mut self, mode: LocalSearchMode) -> Self {
        self.local_search_mode = mode;
        self
    }

    /// Set the mutation distribution.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(SearchError::InvalidParameter {
                name: "n_clusters",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(SearchError::InvalidParameter {
                name: "delta",
                reason: format!("must be a positive finite number, got {}", self.delta),
            });
        }
        if self.steps == 0 {
            return Err(SearchError::InvalidParameter {
                name: "steps",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.population_size == 0 {
            return Err(SearchError::InvalidParameter {
                name: "population_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::InvalidParameter {
                name: "mutation_rate",
                reason: format!("must lie in [0, 1], got {}", self.mutation_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.elite_fraction) {
            return Err(SearchError::InvalidParameter {
                name: "elite_fraction",
                reason: format!("must lie in [0, 1], got {}", self.elite_fraction),
            });
        }
        if self.tournament_size == 0 {
            return Err(SearchError::InvalidParameter {
                name: "tournament_size",
                reason: "must be at least 1".to_string(),
            });
        }

        match self.mutation {
            Mutation::Uniform { dmax } if !dmax.is_finite() || dmax < 0.0 => {
                Err(SearchError::InvalidParameter {
                    name: "dmax",
                    reason: format!("must be a non-negative finite number, got {}", dmax),
                })
            }
            Mutation::Gaussian { std_dev } if !std_dev.is_finite() || std_dev < 0.0 => {
                Err(SearchError::InvalidParameter {
                    name: "std_dev",
                    reason: format!("must be a non-negative finite number, got {}", std_dev),
                })
            }
            _ => Ok(()),
        }
    }
}
