//! Unit tests for parameter validation and the config builder.

use kmeans_mhs::config::Config;
use kmeans_mhs::error::SearchError;
use kmeans_mhs::genetic::{GeneticAlgorithm, Mutation, SelectionMethod};
use kmeans_mhs::local_search::LocalSearchMode;

fn invalid_parameter_name(err: SearchError) -> &'static str {
    match err {
        SearchError::InvalidParameter { name, .. } => name,
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_builder_round_trip() {
    let config = Config::new()
        .with_n_clusters(5)
        .with_delta(0.25)
        .with_steps(2)
        .with_max_iter(80)
        .with_tabu_size(40)
        .with_population_size(30)
        .with_generations(100)
        .with_mutation_rate(0.3)
        .with_elite_fraction(0.1)
        .with_tournament_size(4)
        .with_selection_method(SelectionMethod::Roulette)
        .with_local_search_mode(LocalSearchMode::First)
        .with_mutation(Mutation::Uniform { dmax: 0.5 })
        .with_seed(123);

    assert!(config.validate().is_ok());
    assert_eq!(config.n_clusters, 5);
    assert_eq!(config.delta, 0.25);
    assert_eq!(config.steps, 2);
    assert_eq!(config.max_iter, 80);
    assert_eq!(config.tabu_size, 40);
    assert_eq!(config.population_size, 30);
    assert_eq!(config.generations, 100);
    assert_eq!(config.mutation_rate, 0.3);
    assert_eq!(config.elite_fraction, 0.1);
    assert_eq!(config.tournament_size, 4);
    assert_eq!(config.selection_method, SelectionMethod::Roulette);
    assert_eq!(config.local_search_mode, LocalSearchMode::First);
    assert_eq!(config.mutation, Mutation::Uniform { dmax: 0.5 });
    assert_eq!(config.seed, Some(123));
}

#[test]
fn test_rejects_out_of_range_parameters() {
    let cases: Vec<(Config, &'static str)> = vec![
        (Config::new().with_n_clusters(0), "n_clusters"),
        (Config::new().with_delta(0.0), "delta"),
        (Config::new().with_delta(-1.0), "delta"),
        (Config::new().with_delta(f64::INFINITY), "delta"),
        (Config::new().with_steps(0), "steps"),
        (Config::new().with_population_size(0), "population_size"),
        (Config::new().with_mutation_rate(-0.1), "mutation_rate"),
        (Config::new().with_mutation_rate(1.1), "mutation_rate"),
        (Config::new().with_elite_fraction(-0.1), "elite_fraction"),
        (Config::new().with_elite_fraction(1.5), "elite_fraction"),
        (Config::new().with_tournament_size(0), "tournament_size"),
        (
            Config::new().with_mutation(Mutation::Uniform { dmax: -1.0 }),
            "dmax",
        ),
        (
            Config::new().with_mutation(Mutation::Gaussian { std_dev: f64::NAN }),
            "std_dev",
        ),
    ];

    for (config, expected) in cases {
        let err = config.validate().unwrap_err();
        assert_eq!(invalid_parameter_name(err), expected);
    }
}

#[test]
fn test_boundary_rates_are_valid() {
    assert!(Config::new().with_mutation_rate(0.0).validate().is_ok());
    assert!(Config::new().with_mutation_rate(1.0).validate().is_ok());
    assert!(Config::new().with_elite_fraction(0.0).validate().is_ok());
    assert!(Config::new().with_elite_fraction(1.0).validate().is_ok());
    // Zero iterations and zero tabu capacity are legal degenerate settings.
    assert!(Config::new().with_max_iter(0).with_tabu_size(0).validate().is_ok());
}

#[test]
fn test_genetic_algorithm_from_config() {
    let config = Config::new()
        .with_generations(25)
        .with_mutation_rate(0.4)
        .with_elite_fraction(0.3)
        .with_selection_method(SelectionMethod::Roulette)
        .with_tournament_size(5)
        .with_mutation(Mutation::Uniform { dmax: 2.0 });

    let algorithm = GeneticAlgorithm::from_config(&config);

    assert_eq!(algorithm.generations, 25);
    assert_eq!(algorithm.mutation_rate, 0.4);
    assert_eq!(algorithm.elite_fraction, 0.3);
    assert_eq!(algorithm.selection_method, SelectionMethod::Roulette);
    assert_eq!(algorithm.tournament_size, 5);
    assert_eq!(algorithm.mutation, Mutation::Uniform { dmax: 2.0 });
}

#[test]
fn test_config_serde_round_trip() {
    let config = Config::new()
        .with_n_clusters(4)
        .with_selection_method(SelectionMethod::Roulette)
        .with_mutation(Mutation::Gaussian { std_dev: 0.2 })
        .with_seed(7);

    let json = serde_json::to_string(&config).unwrap();
    let back: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back["n_clusters"], 4);
    assert_eq!(back["selection_method"], "roulette");

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.n_clusters, 4);
    assert_eq!(parsed.selection_method, SelectionMethod::Roulette);
    assert_eq!(parsed.mutation, Mutation::Gaussian { std_dev: 0.2 });
    assert_eq!(parsed.seed, Some(7));
}
