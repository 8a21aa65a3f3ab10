//! Population lifecycle for the genetic algorithm.

use crate::error::{Result, SearchError};
use crate::genetic::{Mutation, Recombine, SelectionMethod};
use crate::individual::Individual;
use crate::problem::Dataset;
use crate::solution::Configuration;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// An ordered collection of individuals of fixed target size, plus the best
/// individual ever seen across all generations.
///
/// The global best is retained by value, never aliased into the live pool, so
/// later in-place mutation of population members cannot corrupt it.
#[derive(Debug)]
pub struct Population<'a> {
    dataset: &'a Dataset,
    target_size: usize,
    individuals: Vec<Individual>,
    global_best: Individual,
}

impl<'a> Population<'a> {
    /// Initialize a population of `target_size` individuals with `k`
    /// centroids each.
    ///
    /// Externally supplied `seeds` (good configurations from k-means, local
    /// or tabu search) are taken first; the remainder is filled with
    /// configurations drawn uniformly at random within the dataset's per-axis
    /// bounds. Every individual's fitness is computed eagerly.
    pub fn new<R: Rng>(
        dataset: &'a Dataset,
        k: usize,
        target_size: usize,
        seeds: &[Configuration],
        rng: &mut R,
    ) -> Result<Self> {
        if target_size == 0 {
            return Err(SearchError::InvalidParameter {
                name: "population_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if k == 0 {
            return Err(SearchError::InvalidParameter {
                name: "n_clusters",
                reason: "must be at least 1".to_string(),
            });
        }

        let mut individuals = Vec::with_capacity(target_size);
        for seed in seeds.iter().take(target_size) {
            individuals.push(Individual::new(dataset, seed.clone())?);
        }

        let bounds = dataset.bounds();
        while individuals.len() < target_size {
            let configuration = Configuration::random_within(&bounds, k, rng)?;
            individuals.push(Individual::new(dataset, configuration)?);
        }

        individuals.sort();
        let global_best = individuals[0].clone();

        Ok(Population {
            dataset,
            target_size,
            individuals,
            global_best,
        })
    }

    /// The configured population size.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Current number of individuals (may exceed the target size between
    /// recombination and replacement).
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// A population is never empty by construction.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The current individuals.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The best individual seen across all generations (a private snapshot,
    /// not a live pool member).
    pub fn global_best(&self) -> &Individual {
        &self.global_best
    }

    fn refresh_global_best(&mut self) {
        if let Some(best) = self.individuals.iter().min() {
            if best.fitness() < self.global_best.fitness() {
                self.global_best = best.clone();
            }
        }
    }

    /// Draw one parent according to `method`.
    pub fn select_parent<R: Rng>(
        &self,
        method: SelectionMethod,
        tournament_size: usize,
        rng: &mut R,
    ) -> &Individual {
        match method {
            SelectionMethod::Tournament => self.tournament_pick(tournament_size, rng),
            SelectionMethod::Roulette => self.roulette_pick(rng),
        }
    }

    /// Tournament: draw `tournament_size` individuals without replacement and
    /// keep the fittest.
    fn tournament_pick<R: Rng>(&self, tournament_size: usize, rng: &mut R) -> &Individual {
        let draw = tournament_size.clamp(1, self.individuals.len());
        self.individuals
            .choose_multiple(rng, draw)
            .min()
            .expect("population is never empty")
    }

    /// Roulette: weight(i) = max fitness - fitness(i), cumulative sampling.
    /// Floating-point rounding can leave the cumulative sum short of the
    /// threshold; the last individual is the fallback in that case.
    fn roulette_pick<R: Rng>(&self, rng: &mut R) -> &Individual {
        let max_fitness = self
            .individuals
            .iter()
            .map(Individual::fitness)
            .fold(f64::NEG_INFINITY, f64::max);

        let weights: Vec<f64> = self
            .individuals
            .iter()
            .map(|ind| max_fitness - ind.fitness())
            .collect();
        let total: f64 = weights.iter().sum();

        let threshold = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;

        for (individual, weight) in self.individuals.iter().zip(&weights) {
            cumulative += weight;
            if cumulative >= threshold {
                return individual;
            }
        }

        self.individuals
            .last()
            .expect("population is never empty")
    }

    /// One selection + crossover sweep: pick parent pairs, recombine them
    /// with `strategy`, and append the offspring to the pool.
    pub fn recombine<R: Rng>(
        &mut self,
        strategy: &dyn Recombine,
        method: SelectionMethod,
        tournament_size: usize,
        rng: &mut R,
    ) -> Result<()> {
        let pairs = (self.target_size + 1) / 2;
        let mut offspring = Vec::with_capacity(self.target_size);

        for _ in 0..pairs {
            let parent1 = self.select_parent(method, tournament_size, rng).clone();
            let parent2 = self.select_parent(method, tournament_size, rng).clone();
            offspring.extend(strategy.recombine(&parent1, &parent2, rng)?);
        }

        self.individuals.extend(offspring);
        self.refresh_global_best();
        Ok(())
    }

    /// Apply the mutation operator to every individual in the pool.
    pub fn mutate<R: Rng>(
        &mut self,
        mutation: &Mutation,
        probability: f64,
        rng: &mut R,
    ) -> Result<()> {
        for individual in &mut self.individuals {
            individual.mutate(self.dataset, mutation, probability, rng)?;
        }

        self.refresh_global_best();
        Ok(())
    }

    /// Elitist replacement: keep the top `elite_fraction * target_size`
    /// individuals, guarantee the global best occupies an elite slot, and
    /// fill the rest by 1/fitness-weighted sampling with replacement over the
    /// non-elite remainder. The next generation always has exactly
    /// `target_size` individuals.
    pub fn replace<R: Rng>(&mut self, elite_fraction: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&elite_fraction) {
            return Err(SearchError::InvalidParameter {
                name: "elite_fraction",
                reason: format!("must lie in [0, 1], got {}", elite_fraction),
            });
        }

        self.individuals.sort();

        let elite_count =
            ((self.target_size as f64 * elite_fraction) as usize).min(self.individuals.len());
        let mut elite: Vec<Individual> = self.individuals[..elite_count].to_vec();

        let best_represented = elite
            .iter()
            .any(|ind| ind.fitness() <= self.global_best.fitness());
        if !best_represented {
            // The weakest elite slot gives way; with no elite slots at all
            // the global best becomes the single elite member.
            match elite.last_mut() {
                Some(weakest) => *weakest = self.global_best.clone(),
                None => elite.push(self.global_best.clone()),
            }
        }

        let remainder = &self.individuals[elite_count..];
        let need = self.target_size.saturating_sub(elite.len());

        let mut next = elite;
        if need > 0 {
            if remainder.is_empty() {
                next.extend(std::iter::repeat(self.global_best.clone()).take(need));
            } else {
                // Individuals with non-positive fitness get a neutral weight.
                let weights: Vec<f64> = remainder
                    .iter()
                    .map(|ind| {
                        if ind.fitness() > 0.0 {
                            1.0 / ind.fitness()
                        } else {
                            1.0
                        }
                    })
                    .collect();

                let sampler =
                    WeightedIndex::new(&weights).map_err(|e| SearchError::InvalidParameter {
                        name: "fitness",
                        reason: e.to_string(),
                    })?;

                for _ in 0..need {
                    next.push(remainder[sampler.sample(rng)].clone());
                }
            }
        }

        next.truncate(self.target_size);
        next.sort();

        self.individuals = next;
        self.refresh_global_best();
        Ok(())
    }
}
