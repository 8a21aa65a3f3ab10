//! Unit tests for the local search engine.

use kmeans_mhs::error::SearchError;
use kmeans_mhs::local_search::{local_search, LocalSearchMode};
use kmeans_mhs::neighborhood::Neighborhood;
use kmeans_mhs::problem::{Dataset, Point};
use kmeans_mhs::solution::Configuration;
use kmeans_mhs::utils::seeded_rng;

fn create_test_dataset() -> Dataset {
    Dataset::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ])
    .unwrap()
}

/// A configuration already at the best cost this neighborhood can reach.
fn optimal_start() -> Configuration {
    Configuration::from_rows(vec![vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap()
}

/// A configuration with obvious room for improvement.
fn poor_start() -> Configuration {
    Configuration::from_rows(vec![vec![5.0, 5.0], vec![10.0, 10.0]]).unwrap()
}

#[test]
fn test_best_improvement_never_worsens() {
    let dataset = create_test_dataset();
    let start = optimal_start();
    let start_cost = dataset.total_distance(&start).unwrap();
    let neighborhood = Neighborhood::generate(&start, 1.0, 1).unwrap();
    let mut rng = seeded_rng(Some(42));

    let result = local_search(
        &dataset,
        &start,
        &neighborhood,
        LocalSearchMode::Best,
        &mut rng,
    )
    .unwrap();

    assert!(
        result.cost <= start_cost,
        "best improvement returned {} from start {}",
        result.cost,
        start_cost
    );
    // No candidate in this grid strictly beats cost 2, so the start survives.
    assert_eq!(result.cost, start_cost);
    assert_eq!(result.configuration, start);
}

#[test]
fn test_best_improvement_finds_improvement() {
    let dataset = create_test_dataset();
    let start = poor_start();
    let start_cost = dataset.total_distance(&start).unwrap();
    let neighborhood = Neighborhood::generate(&start, 1.0, 1).unwrap();
    let mut rng = seeded_rng(Some(42));

    let result = local_search(
        &dataset,
        &start,
        &neighborhood,
        LocalSearchMode::Best,
        &mut rng,
    )
    .unwrap();

    assert!(result.cost < start_cost);
    // Best improvement evaluates the full combination space: 8 * 8
    // candidates plus the starting cost.
    assert_eq!(result.history.len(), 65);
}

#[test]
fn test_first_improvement_accepts_or_returns_start() {
    let dataset = create_test_dataset();
    let mut rng = seeded_rng(Some(7));

    // Improving case: strictly better and the accepted cost closes the
    // history.
    let start = poor_start();
    let start_cost = dataset.total_distance(&start).unwrap();
    let neighborhood = Neighborhood::generate(&start, 1.0, 1).unwrap();
    let improved = local_search(
        &dataset,
        &start,
        &neighborhood,
        LocalSearchMode::First,
        &mut rng,
    )
    .unwrap();

    assert!(improved.cost < start_cost);
    assert_eq!(*improved.history.last().unwrap(), improved.cost);
    assert!(improved.history.len() <= 65);

    // No improving candidate: the start comes back untouched.
    let start = optimal_start();
    let start_cost = dataset.total_distance(&start).unwrap();
    let neighborhood = Neighborhood::generate(&start, 1.0, 1).unwrap();
    let unchanged = local_search(
        &dataset,
        &start,
        &neighborhood,
        LocalSearchMode::First,
        &mut rng,
    )
    .unwrap();

    assert_eq!(unchanged.cost, start_cost);
    assert_eq!(unchanged.configuration, start);
    assert_eq!(unchanged.history.len(), 65);
}

#[test]
fn test_history_starts_with_initial_cost() {
    let dataset = create_test_dataset();
    let start = poor_start();
    let start_cost = dataset.total_distance(&start).unwrap();
    let neighborhood = Neighborhood::generate(&start, 1.0, 1).unwrap();
    let mut rng = seeded_rng(Some(3));

    for mode in [LocalSearchMode::First, LocalSearchMode::Best] {
        let result = local_search(&dataset, &start, &neighborhood, mode, &mut rng).unwrap();
        assert_eq!(result.history[0], start_cost);
    }
}

#[test]
fn test_ties_are_not_improvements() {
    // A neighborhood containing only mirror candidates with the same cost.
    let dataset = Dataset::from_rows(vec![vec![0.0, 0.0]]).unwrap();
    let start = Configuration::from_rows(vec![vec![1.0, 0.0]]).unwrap();
    let neighborhood = Neighborhood::from_sets(vec![vec![Point::new(vec![-1.0, 0.0])]]);
    let mut rng = seeded_rng(Some(1));

    let result = local_search(
        &dataset,
        &start,
        &neighborhood,
        LocalSearchMode::First,
        &mut rng,
    )
    .unwrap();

    assert_eq!(result.configuration, start);
    assert_eq!(result.history.len(), 2);
}

#[test]
fn test_degenerate_neighborhood_returns_start() {
    let dataset = create_test_dataset();
    let start = optimal_start();
    let start_cost = dataset.total_distance(&start).unwrap();
    let neighborhood = Neighborhood::from_sets(vec![vec![Point::new(vec![1.0, 1.0])], vec![]]);
    let mut rng = seeded_rng(Some(5));

    for mode in [LocalSearchMode::First, LocalSearchMode::Best] {
        let result = local_search(&dataset, &start, &neighborhood, mode, &mut rng).unwrap();
        assert_eq!(result.configuration, start);
        assert_eq!(result.cost, start_cost);
        assert_eq!(result.history, vec![start_cost]);
    }
}

#[test]
fn test_shape_mismatch_rejected() {
    let dataset = create_test_dataset();
    let start = optimal_start();
    let neighborhood = Neighborhood::from_sets(vec![vec![Point::new(vec![1.0, 1.0])]]);
    let mut rng = seeded_rng(Some(2));

    let err = local_search(
        &dataset,
        &start,
        &neighborhood,
        LocalSearchMode::Best,
        &mut rng,
    )
    .unwrap_err();

    assert_eq!(
        err,
        SearchError::ShapeMismatch {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_mode_parsing() {
    assert_eq!("first".parse::<LocalSearchMode>().unwrap(), LocalSearchMode::First);
    assert_eq!("best".parse::<LocalSearchMode>().unwrap(), LocalSearchMode::Best);

    let err = "bogus".parse::<LocalSearchMode>().unwrap_err();
    assert_eq!(
        err,
        SearchError::UnknownMode {
            kind: "local_search_mode",
            value: "bogus".to_string()
        }
    );
}
