//! Local search over the neighborhood combination space.

use crate::error::{Result, SearchError};
use crate::neighborhood::Neighborhood;
use crate::problem::Dataset;
use crate::solution::{Configuration, SearchResult};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which improvement strategy local search applies over the candidate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalSearchMode {
    /// Accept the first candidate that strictly improves on the start.
    First,
    /// Evaluate every candidate and keep the minimum.
    Best,
}

impl LocalSearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalSearchMode::First => "first",
            LocalSearchMode::Best => "best",
        }
    }
}

impl fmt::Display for LocalSearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocalSearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(LocalSearchMode::First),
            "best" => Ok(LocalSearchMode::Best),
            _ => Err(SearchError::UnknownMode {
                kind: "local_search_mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Run local search from `initial` over the candidate configurations of
/// `neighborhood`.
///
/// Every candidate replaces all centroids simultaneously with one neighbor
/// each. Candidates are visited in shuffled order to avoid enumeration bias.
/// Ties are not improvements: acceptance uses strict `<`.
///
/// The returned history starts with the cost of `initial` and then contains
/// the cost of every candidate evaluated, in evaluation order. If the
/// candidate space is empty (degenerate neighborhood) or no candidate
/// improves, the starting configuration is returned unchanged.
pub fn local_search<R: Rng>(
    dataset: &Dataset,
    initial: &Configuration,
    neighborhood: &Neighborhood,
    mode: LocalSearchMode,
    rng: &mut R,
) -> Result<SearchResult> {
    if neighborhood.centroid_count() != initial.k() {
        return Err(SearchError::ShapeMismatch {
            expected: initial.k(),
            found: neighborhood.centroid_count(),
        });
    }

    let start_cost = dataset.total_distance(initial)?;
    let mut history = vec![start_cost];

    let mut candidates: Vec<Configuration> = neighborhood.combinations().collect();
    candidates.shuffle(rng);

    debug!(
        "local search ({}) from cost {:.6} over {} candidates",
        mode,
        start_cost,
        candidates.len()
    );

    match mode {
        LocalSearchMode::First => {
            for candidate in candidates {
                let cost = dataset.total_distance(&candidate)?;
                history.push(cost);

                if cost < start_cost {
                    return Ok(SearchResult {
                        configuration: candidate,
                        cost,
                        history,
                    });
                }
            }

            Ok(SearchResult {
                configuration: initial.clone(),
                cost: start_cost,
                history,
            })
        }
        LocalSearchMode::Best => {
            let mut best = initial.clone();
            let mut best_cost = start_cost;

            for candidate in candidates {
                let cost = dataset.total_distance(&candidate)?;
                history.push(cost);

                if cost < best_cost {
                    best_cost = cost;
                    best = candidate;
                }
            }

            Ok(SearchResult {
                configuration: best,
                cost: best_cost,
                history,
            })
        }
    }
}
