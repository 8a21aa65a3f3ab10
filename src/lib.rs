//! # kmeans-mhs
//!
//! Metaheuristic search over k-means centroid configurations.
//!
//! Three complementary engines minimize the same objective, the sum over all
//! data points of the Euclidean distance to the nearest centroid:
//!
//! - **Local search** ([`local_search`]): first-improvement or
//!   best-improvement over the Cartesian product of per-centroid neighbor
//!   sets.
//! - **Tabu search** ([`tabu_search`]): best-improvement with a bounded FIFO
//!   memory of visited configurations, an aspiration criterion, and a
//!   neighborhood regenerated around the current configuration each
//!   iteration.
//! - **Genetic algorithm** ([`GeneticAlgorithm`]): a population of centroid
//!   configurations evolved through selection, pluggable recombination
//!   strategies, mutation and elitist replacement.
//!
//! The caller owns the dataset and supplies the initial configuration
//! (typically from [`KMeans`]); every engine returns its best configuration,
//! cost, and a cost history suitable for direct plotting.

pub mod config;
pub mod error;
pub mod genetic;
pub mod individual;
pub mod kmeans;
pub mod local_search;
pub mod neighborhood;
pub mod population;
pub mod problem;
pub mod solution;
pub mod tabu;
pub mod utils;

pub use crate::config::Config;
pub use crate::error::{Result, SearchError};
pub use crate::genetic::{
    EndpointSwapCrossover, GeneticAlgorithm, GeneticResult, MaskCrossover, MeanCrossover,
    Mutation, Recombine, SelectionMethod,
};
pub use crate::individual::Individual;
pub use crate::kmeans::{KMeans, KMeansFit};
pub use crate::local_search::{local_search, LocalSearchMode};
pub use crate::neighborhood::Neighborhood;
pub use crate::population::Population;
pub use crate::problem::{Dataset, Point};
pub use crate::solution::{Configuration, SearchResult};
pub use crate::tabu::{tabu_search, TabuList};
