//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! seed → evaluate → truncate to elites → crossover → mutate → repeat.

use super::config::GaConfig;
use crate::error::{Result, SearchError};
use crate::model::Solution;
use crate::operators::{crossover, mutate, mutate_in_place};
use crate::oracle::{score, FitnessOracle};
use crate::random::create_rng;
use rand::Rng;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Why a GA run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaTermination {
    /// `max_generations` generations were evaluated.
    MaxGenerations,
    /// The best score reached `target_score`.
    TargetReached,
    /// The cancellation token was set.
    Cancelled,
    /// The generation observer returned `ControlFlow::Break`.
    Observer,
}

/// Statistics of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation index.
    pub generation: usize,
    /// Best score in this generation.
    pub best_score: f64,
    /// Mean score in this generation.
    pub mean_score: f64,
    /// Worst score in this generation.
    pub worst_score: f64,
    /// Worst score among the elites (the truncation threshold).
    pub elite_threshold: f64,
    /// Best score over all generations so far.
    pub best_so_far: f64,
    /// Oracle calls made so far.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual found during the entire run.
    pub best: Solution,

    /// Score of [`best`](Self::best).
    pub best_score: f64,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Total oracle calls.
    pub evaluations: usize,

    /// Why the run stopped.
    pub termination: GaTermination,

    /// Best score so far at the end of each generation.
    pub score_history: Vec<f64>,
}

impl GaResult {
    pub fn cancelled(&self) -> bool {
        self.termination == GaTermination::Cancelled
    }

    pub fn target_reached(&self) -> bool {
        self.termination == GaTermination::TargetReached
    }
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```
/// use u_pathsearch::ga::{GaConfig, GaRunner};
/// use u_pathsearch::model::{Action, Solution};
/// use u_pathsearch::OracleError;
///
/// let mut oracle = |s: &Solution| -> Result<f64, OracleError> {
///     Ok(s.iter().filter(|a| **a != Action::RIGHT).count() as f64)
/// };
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_elite_ratio(0.25)
///     .with_max_generations(30)
///     .with_seed(42);
/// let result = GaRunner::run(&mut oracle, &config).unwrap();
/// assert!(result.best_score <= 6.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA until `max_generations` or `target_score` stops it.
    ///
    /// # Errors
    /// Rejects an invalid configuration, and a configuration with neither a
    /// generation limit nor a target score since nothing could stop the run.
    /// Use [`run_with_cancel`](Self::run_with_cancel) for externally stopped
    /// runs.
    pub fn run<O: FitnessOracle + ?Sized>(oracle: &mut O, config: &GaConfig) -> Result<GaResult> {
        if !config.is_bounded() {
            return Err(SearchError::InvalidConfig(
                "unbounded GA run needs max_generations, target_score or a cancellation token"
                    .into(),
            ));
        }
        Self::run_with_observer(oracle, config, None, |_| ControlFlow::Continue(()))
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The token is checked after each generation has been evaluated, before
    /// the next one is bred.
    pub fn run_with_cancel<O: FitnessOracle + ?Sized>(
        oracle: &mut O,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        Self::run_with_observer(oracle, config, cancel, |_| ControlFlow::Continue(()))
    }

    /// Runs the GA, reporting every generation to `observer`.
    ///
    /// Returning `ControlFlow::Break(())` from the observer ends the run
    /// after the current generation.
    pub fn run_with_observer<O, F>(
        oracle: &mut O,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<GaResult>
    where
        O: FitnessOracle + ?Sized,
        F: FnMut(&GenerationStats) -> ControlFlow<()>,
    {
        config.validate()?;

        let (mut rng, seed) = create_rng(config.seed);
        let elite_count = config.elite_count();

        info!(
            seed,
            population = config.population_size,
            elites = elite_count,
            mutation_rate = config.mutation_rate,
            length = config.solution_length,
            "Genetic algorithm started"
        );

        // 1. Seed the population around one random solution
        let base = Solution::random(config.solution_length, &config.action_space, &mut rng);
        let mut population: Vec<Solution> = (0..config.population_size)
            .map(|_| mutate(&base, &config.action_space, &mut rng))
            .collect();

        let mut best = base;
        let mut best_score = f64::INFINITY;
        let mut score_history = Vec::new();
        let mut evaluations = 0usize;
        let mut generation = 0usize;

        // 2. Generational loop
        let termination = loop {
            debug_assert_eq!(population.len(), config.population_size);

            // Evaluate
            let mut scored: Vec<(Solution, f64)> = Vec::with_capacity(population.len());
            for individual in population {
                let value = score(oracle, &individual)?;
                evaluations += 1;
                scored.push((individual, value));
            }
            generation += 1;

            // Select: truncation, ascending score
            scored.sort_by(|a, b| a.1.total_cmp(&b.1));

            let gen_best = scored[0].1;
            if generation == 1 || gen_best < best_score {
                best = scored[0].0.clone();
                best_score = gen_best;
                debug!(generation, score = gen_best, "New best");
            }
            let best_so_far = best_score;
            score_history.push(best_so_far);

            let stats = GenerationStats {
                generation,
                best_score: gen_best,
                mean_score: scored.iter().map(|(_, s)| s).sum::<f64>() / scored.len() as f64,
                worst_score: scored[scored.len() - 1].1,
                elite_threshold: scored[elite_count - 1].1,
                best_so_far,
                evaluations,
            };
            trace!(
                generation,
                best = stats.best_score,
                mean = stats.mean_score,
                threshold = stats.elite_threshold,
                "Generation evaluated"
            );

            if observer(&stats).is_break() {
                break GaTermination::Observer;
            }
            if config.target_score.is_some_and(|t| best_so_far <= t) {
                break GaTermination::TargetReached;
            }
            if config.max_generations > 0 && generation >= config.max_generations {
                break GaTermination::MaxGenerations;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break GaTermination::Cancelled;
                }
            }

            let elites: Vec<Solution> = scored
                .into_iter()
                .take(elite_count)
                .map(|(individual, _)| individual)
                .collect();

            // Reproduce and mutate; the old population is replaced wholesale
            population = next_generation(&elites, config, &mut rng)?;
        };

        info!(
            generations = generation,
            evaluations,
            best_score,
            ?termination,
            "Genetic algorithm finished"
        );

        Ok(GaResult {
            best,
            best_score,
            generations: generation,
            evaluations,
            termination,
            score_history,
        })
    }
}

/// Breeds `population_size` children from `elites`.
///
/// Each child is the crossover of two elites drawn uniformly with
/// replacement, then mutated once with probability `mutation_rate`.
pub(crate) fn next_generation<R: Rng>(
    elites: &[Solution],
    config: &GaConfig,
    rng: &mut R,
) -> Result<Vec<Solution>> {
    (0..config.population_size)
        .map(|_| {
            let p1 = &elites[rng.random_range(0..elites.len())];
            let p2 = &elites[rng.random_range(0..elites.len())];
            let mut child = crossover(p1, p2)?;
            if rng.random_bool(config.mutation_rate) {
                mutate_in_place(&mut child, &config.action_space, rng);
            }
            Ok(child)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::model::{Action, ActionSpace};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Distance of the summed displacement from (3, 2).
    fn reach_3_2(s: &Solution) -> std::result::Result<f64, OracleError> {
        let (x, y) = s
            .iter()
            .fold((0, 0), |(x, y), a| (x + a.dx, y + a.dy));
        Ok(((x - 3).abs() + (y - 2).abs()) as f64)
    }

    /// Wide alphabet so crossover can always find distinct genes.
    fn line_space(n: i32) -> ActionSpace {
        ActionSpace::custom((0..n).map(|i| Action::new(i, 0))).unwrap()
    }

    /// Positions that do not hold `Action::new(i, 0)`.
    fn staircase(s: &Solution) -> std::result::Result<f64, OracleError> {
        Ok(s.iter()
            .enumerate()
            .filter(|(i, a)| **a != Action::new(*i as i32, 0))
            .count() as f64)
    }

    #[test]
    fn test_converges_on_positional_target() {
        let config = GaConfig::default()
            .with_population_size(60)
            .with_elite_ratio(0.2)
            .with_mutation_rate(0.5)
            .with_solution_length(5)
            .with_action_space(line_space(8))
            .with_max_generations(300)
            .with_seed(42);

        let result = GaRunner::run(&mut staircase, &config).unwrap();

        assert!(
            result.best_score <= 2.0,
            "expected at most 2 misplaced genes, got {}",
            result.best_score
        );
    }

    #[test]
    fn test_population_size_constant() {
        let mut batch_sizes = Vec::new();
        let mut calls = 0usize;
        let mut oracle = |s: &Solution| -> std::result::Result<f64, OracleError> {
            calls += 1;
            reach_3_2(s)
        };
        let config = GaConfig::default()
            .with_population_size(9)
            .with_elite_ratio(0.34)
            .with_max_generations(12)
            .with_seed(7);

        let result = GaRunner::run_with_observer(&mut oracle, &config, None, |stats| {
            batch_sizes.push(stats.evaluations);
            ControlFlow::Continue(())
        })
        .unwrap();

        assert_eq!(result.generations, 12);
        assert_eq!(result.evaluations, 9 * 12);
        assert_eq!(calls, 9 * 12);
        for (i, evaluations) in batch_sizes.iter().enumerate() {
            assert_eq!(*evaluations, 9 * (i + 1));
        }
    }

    #[test]
    fn test_next_generation_size_and_parentage() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GaConfig::default()
            .with_population_size(4)
            .with_elite_ratio(0.5)
            .with_mutation_rate(0.0)
            .with_solution_length(3);

        let elites = vec![
            Solution::new(vec![Action::new(1, 0), Action::new(2, 0), Action::new(3, 0)]),
            Solution::new(vec![Action::new(4, 0), Action::new(5, 0), Action::new(6, 0)]),
        ];
        let elite_genes: HashSet<Action> =
            elites.iter().flat_map(|s| s.iter().copied()).collect();

        for _ in 0..50 {
            let children = next_generation(&elites, &config, &mut rng).unwrap();
            assert_eq!(children.len(), 4);
            for child in &children {
                assert_eq!(child.len(), 3);
                assert!(child.iter().all(|a| elite_genes.contains(a)));
            }
        }
    }

    #[test]
    fn test_parents_come_from_top_elites() {
        // P = 4, E = 2: the second generation may only carry genes of the
        // two best individuals of the first.
        let mut evaluated: Vec<(Solution, f64)> = Vec::new();
        let mut oracle = |s: &Solution| -> std::result::Result<f64, OracleError> {
            let value = s.iter().map(|a| a.dx as f64).sum::<f64>();
            evaluated.push((s.clone(), value));
            Ok(value)
        };
        let config = GaConfig::default()
            .with_population_size(4)
            .with_elite_ratio(0.5)
            .with_mutation_rate(0.0)
            .with_solution_length(4)
            .with_action_space(line_space(50))
            .with_max_generations(2)
            .with_seed(3);

        let result = GaRunner::run(&mut oracle, &config).unwrap();
        assert_eq!(result.generations, 2);
        assert_eq!(evaluated.len(), 8);

        let mut first: Vec<(Solution, f64)> = evaluated[..4].to_vec();
        first.sort_by(|a, b| a.1.total_cmp(&b.1));
        let elite_genes: HashSet<Action> = first[..2]
            .iter()
            .flat_map(|(s, _)| s.iter().copied())
            .collect();

        for (child, _) in &evaluated[4..] {
            assert!(
                child.iter().all(|a| elite_genes.contains(a)),
                "child {child} carries genes outside the top-2 elites"
            );
        }
    }

    #[test]
    fn test_initial_population_is_mutated_copies_of_one_seed() {
        let mut evaluated: Vec<Solution> = Vec::new();
        let mut oracle = |s: &Solution| -> std::result::Result<f64, OracleError> {
            evaluated.push(s.clone());
            Ok(1.0)
        };
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(0.5)
            .with_solution_length(8)
            .with_action_space(line_space(30))
            .with_max_generations(1)
            .with_seed(9);

        GaRunner::run(&mut oracle, &config).unwrap();

        // Any two mutated copies of the same base differ in at most 2 genes.
        for a in &evaluated {
            for b in &evaluated {
                assert!(a.hamming_distance(b).unwrap() <= 2);
            }
        }
    }

    #[test]
    fn test_history_non_increasing() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_elite_ratio(0.2)
            .with_max_generations(40)
            .with_seed(42);

        let result = GaRunner::run(&mut reach_3_2, &config).unwrap();

        assert_eq!(result.score_history.len(), result.generations);
        for window in result.score_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert_eq!(result.best_score, *result.score_history.last().unwrap());
    }

    #[test]
    fn test_target_stops_run() {
        let mut oracle = |_: &Solution| -> std::result::Result<f64, OracleError> { Ok(0.0) };
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(0.5)
            .with_target_score(0.0)
            .with_seed(42);

        // Unbounded by generations: the target is the only stop condition.
        let result = GaRunner::run(&mut oracle, &config).unwrap();

        assert!(result.target_reached());
        assert_eq!(result.generations, 1);
        assert_eq!(result.best_score, 0.0);
    }

    #[test]
    fn test_run_rejects_unbounded_config() {
        let config = GaConfig::default();
        assert!(matches!(
            GaRunner::run(&mut reach_3_2, &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cancellation() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(0.5)
            .with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = GaRunner::run_with_cancel(&mut reach_3_2, &config, Some(cancel)).unwrap();

        assert!(result.cancelled());
        assert_eq!(result.generations, 1);
        assert_eq!(result.evaluations, 10);
    }

    #[test]
    fn test_observer_stops_run() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(0.5)
            .with_seed(42);

        let result = GaRunner::run_with_observer(&mut reach_3_2, &config, None, |stats| {
            if stats.generation == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

        assert_eq!(result.termination, GaTermination::Observer);
        assert_eq!(result.generations, 3);
    }

    #[test]
    fn test_oracle_failure_aborts() {
        let mut calls = 0;
        let mut oracle = |_: &Solution| -> std::result::Result<f64, OracleError> {
            calls += 1;
            if calls == 15 {
                Err(OracleError::new("simulation crashed"))
            } else {
                Ok(3.0)
            }
        };
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(0.5)
            .with_max_generations(5)
            .with_seed(42);

        let err = GaRunner::run(&mut oracle, &config).unwrap_err();
        assert!(matches!(err, SearchError::Oracle(_)));
    }
}
