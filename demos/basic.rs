//! Full pipeline demo: synthetic blob data -> k-means -> local search (both
//! modes) -> tabu search -> genetic algorithm seeded with the tabu result.

use clap::Parser;
use kmeans_mhs::config::Config;
use kmeans_mhs::genetic::{EndpointSwapCrossover, GeneticAlgorithm};
use kmeans_mhs::kmeans::KMeans;
use kmeans_mhs::local_search::{local_search, LocalSearchMode};
use kmeans_mhs::neighborhood::Neighborhood;
use kmeans_mhs::population::Population;
use kmeans_mhs::problem::Dataset;
use kmeans_mhs::tabu::tabu_search;
use kmeans_mhs::utils::{format_duration, save_reports, seeded_rng, SearchReport};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Run all three centroid search engines on synthetic blob data")]
struct Args {
    /// Points generated per cluster
    #[arg(long, default_value_t = 60)]
    points_per_cluster: usize,

    /// Number of clusters (and centroids)
    #[arg(long, default_value_t = 3)]
    clusters: usize,

    /// Neighborhood step size
    #[arg(long, default_value_t = 0.1)]
    delta: f64,

    /// Tabu iterations
    #[arg(long, default_value_t = 50)]
    max_iter: usize,

    /// Tabu list capacity
    #[arg(long, default_value_t = 50)]
    tabu_size: usize,

    /// Genetic population size
    #[arg(long, default_value_t = 20)]
    population: usize,

    /// Genetic generations
    #[arg(long, default_value_t = 50)]
    generations: usize,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON report of all cost histories to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Generate Gaussian blobs around centers spread on a circle.
fn generate_blobs<R: Rng>(
    clusters: usize,
    points_per_cluster: usize,
    rng: &mut R,
) -> Result<Dataset, Box<dyn std::error::Error>> {
    let noise = Normal::new(0.0, 0.25)?;
    let mut rows = Vec::with_capacity(clusters * points_per_cluster);

    for c in 0..clusters {
        let angle = c as f64 / clusters as f64 * std::f64::consts::TAU;
        let (cx, cy) = (2.0 * angle.cos(), 2.0 * angle.sin());

        for _ in 0..points_per_cluster {
            rows.push(vec![cx + noise.sample(rng), cy + noise.sample(rng)]);
        }
    }

    Ok(Dataset::from_rows(rows)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::new()
        .with_n_clusters(args.clusters)
        .with_delta(args.delta)
        .with_max_iter(args.max_iter)
        .with_tabu_size(args.tabu_size)
        .with_population_size(args.population)
        .with_generations(args.generations);
    config.validate()?;

    let mut rng = seeded_rng(args.seed);
    let dataset = generate_blobs(args.clusters, args.points_per_cluster, &mut rng)?;
    println!(
        "Generated {} points in {} blobs",
        dataset.len(),
        args.clusters
    );

    let start = Instant::now();

    // Initial configuration from k-means.
    let fit = KMeans::new(config.n_clusters).fit(&dataset, None, &mut rng)?;
    println!("k-means cost: {:.4}", fit.cost);

    let neighborhood = Neighborhood::generate(&fit.configuration, config.delta, config.steps)?;

    let first = local_search(
        &dataset,
        &fit.configuration,
        &neighborhood,
        LocalSearchMode::First,
        &mut rng,
    )?;
    println!("local search (first improvement) cost: {:.4}", first.cost);

    let best = local_search(
        &dataset,
        &fit.configuration,
        &neighborhood,
        LocalSearchMode::Best,
        &mut rng,
    )?;
    println!("local search (best improvement) cost: {:.4}", best.cost);

    let tabu = tabu_search(
        &dataset,
        &fit.configuration,
        &neighborhood,
        config.delta,
        config.steps,
        config.max_iter,
        config.tabu_size,
    )?;
    println!("tabu search cost: {:.4}", tabu.cost);

    // Genetic algorithm seeded with the tabu result.
    let mut population = Population::new(
        &dataset,
        config.n_clusters,
        config.population_size,
        &[tabu.configuration.clone()],
        &mut rng,
    )?;
    let strategy = EndpointSwapCrossover::new(&dataset);
    let outcome = GeneticAlgorithm::from_config(&config).run(&mut population, &strategy, &mut rng)?;
    println!("genetic algorithm cost: {:.4}", outcome.best.fitness());

    println!("Total runtime: {}", format_duration(start.elapsed()));

    if let Some(path) = args.report {
        let reports = vec![
            SearchReport::from_result("local_first", &first),
            SearchReport::from_result("local_best", &best),
            SearchReport::from_result("tabu", &tabu),
            SearchReport {
                method: "genetic".to_string(),
                centroids: outcome
                    .best
                    .configuration()
                    .centroids()
                    .iter()
                    .map(|p| p.coords.clone())
                    .collect(),
                cost: outcome.best.fitness(),
                history: outcome.history.clone(),
            },
        ];
        save_reports(&reports, &path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
