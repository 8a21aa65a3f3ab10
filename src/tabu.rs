//! Tabu search with aspiration over dynamically regenerated neighborhoods.

use crate::error::{Result, SearchError};
use crate::neighborhood::Neighborhood;
use crate::problem::Dataset;
use crate::solution::{Configuration, SearchResult};
use log::debug;
use std::collections::VecDeque;

/// Bounded FIFO memory of recently visited configurations.
///
/// Membership is checked by coordinate-wise value equality of the full
/// configuration. A capacity of 0 disables the memory entirely.
#[derive(Debug, Clone)]
pub struct TabuList {
    entries: VecDeque<Configuration>,
    capacity: usize,
}

impl TabuList {
    /// Create an empty list with the given capacity.
    pub fn new(capacity: usize) -> Self {
        TabuList {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// True if `configuration` is currently tabu.
    pub fn contains(&self, configuration: &Configuration) -> bool {
        self.entries.iter().any(|e| e == configuration)
    }

    /// Record a visited configuration, evicting the oldest entry on overflow.
    pub fn push(&mut self, configuration: Configuration) {
        if self.capacity == 0 {
            return;
        }

        self.entries.push_back(configuration);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no configuration is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Run tabu search from `initial`, using `neighborhood` for the first
/// iteration and regenerating the neighborhood around the current
/// configuration (with the same `delta` and `steps`) at every subsequent one.
///
/// Each iteration selects the minimum-cost admissible candidate from the full
/// combination space. A candidate is admissible if it improves on the global
/// best cost (aspiration) or is not present in the tabu list; the accepted
/// configuration is then pushed onto the list. When no candidate is
/// admissible the current configuration is carried over unchanged. The cost
/// of the current configuration is appended to the history every iteration,
/// so the returned history has `max_iter + 1` entries including the starting
/// cost.
pub fn tabu_search(
    dataset: &Dataset,
    initial: &Configuration,
    neighborhood: &Neighborhood,
    delta: f64,
    steps: usize,
    max_iter: usize,
    tabu_size: usize,
) -> Result<SearchResult> {
    if neighborhood.centroid_count() != initial.k() {
        return Err(SearchError::ShapeMismatch {
            expected: initial.k(),
            found: neighborhood.centroid_count(),
        });
    }

    let mut current = initial.clone();
    let mut current_cost = dataset.total_distance(&current)?;
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut tabu = TabuList::new(tabu_size);
    let mut history = vec![current_cost];
    let mut neighborhood = neighborhood.clone();

    for iteration in 0..max_iter {
        let mut chosen: Option<(Configuration, f64)> = None;

        for candidate in neighborhood.combinations() {
            let cost = dataset.total_distance(&candidate)?;

            // Aspiration: a tabu candidate is admissible only when it beats
            // the best cost ever seen; a non-tabu candidate always is.
            if cost < best_cost || !tabu.contains(&candidate) {
                match chosen {
                    Some((_, chosen_cost)) if cost >= chosen_cost => {}
                    _ => chosen = Some((candidate, cost)),
                }
            }
        }

        if let Some((candidate, cost)) = chosen {
            current = candidate;
            current_cost = cost;
            tabu.push(current.clone());

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
            }
        }

        history.push(current_cost);
        debug!(
            "tabu iteration {}: current {:.6}, best {:.6}, tabu entries {}",
            iteration,
            current_cost,
            best_cost,
            tabu.len()
        );

        // Dynamic neighborhood: explore around wherever the search moved to.
        neighborhood = Neighborhood::generate(&current, delta, steps)?;
    }

    Ok(SearchResult {
        configuration: best,
        cost: best_cost,
        history,
    })
}
