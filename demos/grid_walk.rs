//! Runs every strategy on a small obstacle map and prints the results.
//!
//! ```text
//! RUST_LOG=debug cargo run --example grid_walk
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;
use u_pathsearch::ga::{GaConfig, GaRunner};
use u_pathsearch::grid::{
    AStar, Cell, Dijkstra, Grid, GridSearchOutcome, GridSearchRunner, GridWalkOracle,
};
use u_pathsearch::local::{LocalSearchConfig, LocalSearchRunner};
use u_pathsearch::sa::{SaConfig, SaRunner};

const MAP: &str = "
    ........
    .####...
    ....#...
    ..#.#.##
    ..#.....
";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn report(name: &str, outcome: &GridSearchOutcome) {
    match outcome {
        GridSearchOutcome::Found { solution, score, .. } => {
            println!("{name:<10} score {score:>8.1}  {solution}");
        }
        GridSearchOutcome::NoPath => println!("{name:<10} no path"),
    }
}

fn main() -> u_pathsearch::Result<()> {
    enable_tracing();

    let grid = Grid::parse(MAP)?;
    let start = Cell::new(0, 0);
    let goal = Cell::new(7, 4);
    let mut oracle = GridWalkOracle::new(grid.clone(), start, goal);
    let min_error = oracle.min_error();
    let length = min_error as usize + 4;

    info!(%start, %goal, min_error, "Map loaded");

    let dijkstra = GridSearchRunner::run(&Dijkstra, &grid, start, goal, &mut oracle)?;
    report("dijkstra", &dijkstra);
    let astar = GridSearchRunner::run(&AStar, &grid, start, goal, &mut oracle)?;
    report("astar", &astar);

    let local = LocalSearchRunner::run(
        &mut oracle,
        &LocalSearchConfig::default()
            .with_solution_length(length)
            .with_max_iterations(5_000)
            .with_target_score(min_error)
            .with_seed(42),
    )?;
    println!("{:<10} score {:>8.1}  {}", "local", local.best_score, local.best);

    let sa = SaRunner::run(
        &mut oracle,
        &SaConfig::default()
            .with_solution_length(length)
            .with_max_iterations(5_000)
            .with_temperature_horizon(4_990)
            .with_target_score(min_error)
            .with_stop_at_target(true)
            .with_seed(42),
    )?;
    println!(
        "{:<10} score {:>8.1}  {} ({:?})",
        "annealing", sa.best_score, sa.best, sa.outcome
    );

    let ga = GaRunner::run(
        &mut oracle,
        &GaConfig::default()
            .with_population_size(100)
            .with_solution_length(length)
            .with_max_generations(200)
            .with_target_score(min_error)
            .with_seed(42),
    )?;
    println!(
        "{:<10} score {:>8.1}  {} ({:?})",
        "genetic", ga.best_score, ga.best, ga.termination
    );

    Ok(())
}
