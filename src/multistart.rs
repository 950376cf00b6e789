//! Independent restarts of a strategy.
//!
//! Every instance gets its own seed and builds its own oracle, so instances
//! share nothing and can run concurrently. With the `parallel` feature the
//! instances are spread over the rayon thread pool; otherwise they run one
//! after another in seed order. Results are always returned in seed order.

use crate::error::{Result, SearchError};
use crate::ga::{GaConfig, GaResult, GaRunner};
use crate::local::{LocalSearchConfig, LocalSearchResult, LocalSearchRunner};
use crate::model::Solution;
use crate::oracle::FitnessOracle;
use crate::sa::{SaConfig, SaResult, SaRunner};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A strategy result that reports a best solution and its score.
pub trait Scored {
    fn best_score(&self) -> f64;
    fn best_solution(&self) -> &Solution;
}

impl Scored for LocalSearchResult {
    fn best_score(&self) -> f64 {
        self.best_score
    }

    fn best_solution(&self) -> &Solution {
        &self.best
    }
}

impl Scored for SaResult {
    fn best_score(&self) -> f64 {
        self.best_score
    }

    fn best_solution(&self) -> &Solution {
        &self.best
    }
}

impl Scored for GaResult {
    fn best_score(&self) -> f64 {
        self.best_score
    }

    fn best_solution(&self) -> &Solution {
        &self.best
    }
}

/// Runs `run` once per seed.
pub fn run_independent<T, F>(seeds: &[u64], run: F) -> Vec<Result<T>>
where
    T: Send,
    F: Fn(u64) -> Result<T> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        seeds.par_iter().map(|&seed| run(seed)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run(seed)).collect()
    }
}

/// Picks the lowest-scoring result. Ties keep the earliest seed.
///
/// # Errors
/// The first failed run's error, or [`SearchError::InvalidConfig`] when
/// `results` is empty.
pub fn best_of<T: Scored>(results: Vec<Result<T>>) -> Result<T> {
    let results = results.into_iter().collect::<Result<Vec<T>>>()?;
    results
        .into_iter()
        .reduce(|best, r| if r.best_score() < best.best_score() { r } else { best })
        .ok_or_else(|| SearchError::InvalidConfig("multi-start needs at least one seed".into()))
}

/// Local search from every seed; `make_oracle` builds one oracle per run.
pub fn local_search<O, M>(
    seeds: &[u64],
    config: &LocalSearchConfig,
    make_oracle: M,
) -> Result<LocalSearchResult>
where
    O: FitnessOracle,
    M: Fn(u64) -> O + Sync + Send,
{
    info!(runs = seeds.len(), "Multi-start local search");
    best_of(run_independent(seeds, |seed| {
        let config = config.clone().with_seed(seed);
        LocalSearchRunner::run(&mut make_oracle(seed), &config)
    }))
}

/// Simulated annealing from every seed.
pub fn annealing<O, M>(seeds: &[u64], config: &SaConfig, make_oracle: M) -> Result<SaResult>
where
    O: FitnessOracle,
    M: Fn(u64) -> O + Sync + Send,
{
    info!(runs = seeds.len(), "Multi-start simulated annealing");
    best_of(run_independent(seeds, |seed| {
        let config = config.clone().with_seed(seed);
        SaRunner::run(&mut make_oracle(seed), &config)
    }))
}

/// Genetic algorithm from every seed. The config must be bounded.
pub fn genetic<O, M>(seeds: &[u64], config: &GaConfig, make_oracle: M) -> Result<GaResult>
where
    O: FitnessOracle,
    M: Fn(u64) -> O + Sync + Send,
{
    info!(runs = seeds.len(), "Multi-start genetic algorithm");
    best_of(run_independent(seeds, |seed| {
        let config = config.clone().with_seed(seed);
        GaRunner::run(&mut make_oracle(seed), &config)
    }))
}
