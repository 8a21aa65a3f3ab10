//! Unit tests for the k-means initializer.

use kmeans_mhs::error::SearchError;
use kmeans_mhs::kmeans::KMeans;
use kmeans_mhs::problem::Dataset;
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

#[test]
fn test_converges_on_separated_pairs() {
    let dataset = create_test_dataset();
    let initial = Configuration::from_rows(vec![vec![1.0, 1.0], vec![9.0, 9.0]]).unwrap();
    let mut rng = seeded_rng(Some(5));

    let fit = KMeans::new(2)
        .fit(&dataset, Some(initial), &mut rng)
        .unwrap();

    // The pairs split cleanly and the centroids land on the pair means.
    assert_eq!(
        fit.configuration,
        Configuration::from_rows(vec![vec![0.0, 0.5], vec![10.0, 10.5]]).unwrap()
    );
    assert_eq!(fit.labels, vec![0, 0, 1, 1]);
    assert!((fit.cost - 2.0).abs() < 1e-12);
}

#[test]
fn test_cost_agrees_with_shared_evaluator() {
    let dataset = create_test_dataset();
    let mut rng = seeded_rng(Some(5));

    let fit = KMeans::new(2).fit(&dataset, None, &mut rng).unwrap();

    let recomputed = dataset.total_distance(&fit.configuration).unwrap();
    assert_eq!(fit.cost.to_bits(), recomputed.to_bits());
}

#[test]
fn test_random_init_draws_distinct_points() {
    let dataset = create_test_dataset();
    let mut rng = seeded_rng(Some(8));

    // With k equal to the dataset size every point becomes its own centroid
    // and the cost collapses to zero.
    let fit = KMeans::new(4).fit(&dataset, None, &mut rng).unwrap();
    assert_eq!(fit.configuration.k(), 4);
    assert_eq!(fit.cost, 0.0);
}

#[test]
fn test_iteration_cap_respected() {
    let dataset = create_test_dataset();
    let initial = Configuration::from_rows(vec![vec![5.0, 5.0], vec![6.0, 6.0]]).unwrap();
    let mut rng = seeded_rng(Some(5));

    // Zero tolerance with a generous cap still terminates.
    let fit = KMeans::new(2)
        .with_max_iter(50)
        .with_tolerance(0.0)
        .fit(&dataset, Some(initial), &mut rng)
        .unwrap();

    assert_eq!(fit.labels.len(), dataset.len());
    assert!(fit.cost.is_finite());
}

#[test]
fn test_rejects_zero_clusters() {
    let dataset = create_test_dataset();
    let mut rng = seeded_rng(Some(5));

    let err = KMeans::new(0).fit(&dataset, None, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        SearchError::InvalidParameter {
            name: "n_clusters",
            ..
        }
    ));
}

#[test]
fn test_rejects_more_clusters_than_points() {
    let dataset = create_test_dataset();
    let mut rng = seeded_rng(Some(5));

    let err = KMeans::new(5).fit(&dataset, None, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        SearchError::InvalidParameter {
            name: "n_clusters",
            ..
        }
    ));
}

#[test]
fn test_rejects_initial_dimension_mismatch() {
    let dataset = create_test_dataset();
    let initial = Configuration::from_rows(vec![vec![0.0, 0.0, 0.0]]).unwrap();
    let mut rng = seeded_rng(Some(5));

    let err = KMeans::new(1)
        .fit(&dataset, Some(initial), &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::DimensionMismatch {
            expected: 2,
            found: 3
        }
    );
}
