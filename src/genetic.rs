//! Genetic operators and the generational search loop.

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::individual::Individual;
use crate::population::Population;
use crate::problem::{Dataset, Point};
use crate::solution::Configuration;
use log::{debug, info};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How parents are drawn from the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Draw a few individuals at random and keep the fittest.
    Tournament,
    /// Fitness-proportional sampling with inverted weights, so lower cost
    /// means higher selection probability.
    Roulette,
}

impl SelectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMethod::Tournament => "tournament",
            SelectionMethod::Roulette => "roulette",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMethod {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tournament" => Ok(SelectionMethod::Tournament),
            "roulette" => Ok(SelectionMethod::Roulette),
            _ => Err(SearchError::UnknownMode {
                kind: "selection_method",
                value: s.to_string(),
            }),
        }
    }
}

/// The perturbation distribution applied by mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    /// Uniform draw from `[-dmax, dmax]` per coordinate.
    Uniform { dmax: f64 },
    /// Zero-mean Gaussian draw with the given standard deviation.
    Gaussian { std_dev: f64 },
}

impl Mutation {
    /// Draw one perturbation value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        match *self {
            Mutation::Uniform { dmax } => {
                if !dmax.is_finite() || dmax < 0.0 {
                    return Err(SearchError::InvalidParameter {
                        name: "dmax",
                        reason: format!("must be a non-negative finite number, got {}", dmax),
                    });
                }
                Ok(rng.gen_range(-dmax..=dmax))
            }
            Mutation::Gaussian { std_dev } => {
                if !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(SearchError::InvalidParameter {
                        name: "std_dev",
                        reason: format!("must be a non-negative finite number, got {}", std_dev),
                    });
                }
                let normal =
                    Normal::new(0.0, std_dev).map_err(|_| SearchError::InvalidParameter {
                        name: "std_dev",
                        reason: format!("must be a non-negative finite number, got {}", std_dev),
                    })?;
                Ok(normal.sample(rng))
            }
        }
    }
}

/// Recombination capability shared by all crossover strategies.
///
/// Each strategy is constructed with an immutable reference to the dataset so
/// child fitness can be computed on construction; no process-wide shared
/// state is involved.
pub trait Recombine {
    /// Combine two parents into one or two children, each with its fitness
    /// already evaluated.
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual>>;
}

fn check_parent_shapes(parent1: &Individual, parent2: &Individual) -> Result<usize> {
    let k = parent1.configuration().k();
    if parent2.configuration().k() != k {
        return Err(SearchError::ShapeMismatch {
            expected: k,
            found: parent2.configuration().k(),
        });
    }
    Ok(k)
}

/// One child whose i-th centroid is the coordinate-wise mean of the parents'
/// i-th centroids.
pub struct MeanCrossover<'a> {
    dataset: &'a Dataset,
}

impl<'a> MeanCrossover<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        MeanCrossover { dataset }
    }
}

impl Recombine for MeanCrossover<'_> {
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual>> {
        check_parent_shapes(parent1, parent2)?;

        let centroids: Vec<Point> = parent1
            .configuration()
            .centroids()
            .iter()
            .zip(parent2.configuration().centroids())
            .map(|(a, b)| {
                Point::new(
                    a.coords
                        .iter()
                        .zip(&b.coords)
                        .map(|(x, y)| (x + y) / 2.0)
                        .collect(),
                )
            })
            .collect();

        let child = Individual::new(self.dataset, Configuration::new(centroids)?)?;
        Ok(vec![child])
    }
}

/// Two children: child A takes the second parent's first and last centroid
/// and the first parent's middle centroids, child B the complementary
/// assignment. With k = 1 or k = 2 the children degenerate to copies of the
/// opposite parent's extremes.
pub struct EndpointSwapCrossover<'a> {
    dataset: &'a Dataset,
}

impl<'a> EndpointSwapCrossover<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        EndpointSwapCrossover { dataset }
    }

    fn child(
        &self,
        ends: &Individual,
        middle: &Individual,
        k: usize,
    ) -> Result<Individual> {
        let centroids: Vec<Point> = (0..k)
            .map(|i| {
                let source = if i == 0 || i == k - 1 { ends } else { middle };
                source.configuration().centroids()[i].clone()
            })
            .collect();

        Individual::new(self.dataset, Configuration::new(centroids)?)
    }
}

impl Recombine for EndpointSwapCrossover<'_> {
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual>> {
        let k = check_parent_shapes(parent1, parent2)?;

        let child_a = self.child(parent2, parent1, k)?;
        let child_b = self.child(parent1, parent2, k)?;
        Ok(vec![child_a, child_b])
    }
}

/// One child assembled slot by slot: a fair per-centroid coin decides which
/// parent each slot is inherited from.
pub struct MaskCrossover<'a> {
    dataset: &'a Dataset,
}

impl<'a> MaskCrossover<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        MaskCrossover { dataset }
    }
}

impl Recombine for MaskCrossover<'_> {
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual>> {
        let k = check_parent_shapes(parent1, parent2)?;

        let centroids: Vec<Point> = (0..k)
            .map(|i| {
                let source = if rng.gen_bool(0.5) { parent1 } else { parent2 };
                source.configuration().centroids()[i].clone()
            })
            .collect();

        let child = Individual::new(self.dataset, Configuration::new(centroids)?)?;
        Ok(vec![child])
    }
}

/// What the genetic algorithm hands back: the final population, the all-time
/// best individual, and one best-fitness entry per generation.
#[derive(Debug, Clone, Serialize)]
pub struct GeneticResult {
    pub population: Vec<Individual>,
    pub best: Individual,
    pub history: Vec<f64>,
}

/// The generational loop: select, recombine, mutate, replace, repeated for a
/// fixed number of generations. No other termination criterion is applied.
pub struct GeneticAlgorithm {
    pub generations: usize,
    pub mutation_rate: f64,
    pub elite_fraction: f64,
    pub selection_method: SelectionMethod,
    pub tournament_size: usize,
    pub mutation: Mutation,
}

impl GeneticAlgorithm {
    /// Build the loop parameters from a validated [`Config`].
    pub fn from_config(config: &Config) -> Self {
        GeneticAlgorithm {
            generations: config.generations,
            mutation_rate: config.mutation_rate,
            elite_fraction: config.elite_fraction,
            selection_method: config.selection_method,
            tournament_size: config.tournament_size,
            mutation: config.mutation,
        }
    }

    /// Evolve `population` in place and return the final state.
    pub fn run<R: Rng>(
        &self,
        population: &mut Population<'_>,
        strategy: &dyn Recombine,
        rng: &mut R,
    ) -> Result<GeneticResult> {
        info!(
            "genetic algorithm: {} generations, population {}, selection {}",
            self.generations,
            population.target_size(),
            self.selection_method
        );

        let mut history = Vec::with_capacity(self.generations);

        for generation in 0..self.generations {
            population.recombine(strategy, self.selection_method, self.tournament_size, rng)?;
            population.mutate(&self.mutation, self.mutation_rate, rng)?;
            population.replace(self.elite_fraction, rng)?;

            let best = population.global_best().fitness();
            history.push(best);
            debug!("generation {}: best fitness {:.6}", generation, best);
        }

        Ok(GeneticResult {
            population: population.individuals().to_vec(),
            best: population.global_best().clone(),
            history,
        })
    }
}
