//! Local search execution loop.

use super::config::LocalSearchConfig;
use crate::error::Result;
use crate::model::Solution;
use crate::operators::mutate;
use crate::oracle::{score, FitnessOracle};
use crate::random::create_rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// Final current solution. Acceptance never worsens the score, so this
    /// is also the best solution seen.
    pub best: Solution,

    /// Score of [`best`](Self::best).
    pub best_score: f64,

    /// Mutate-and-score iterations executed (the initial evaluation excluded).
    pub iterations: usize,

    /// Total oracle calls, initial evaluation included.
    pub evaluations: usize,

    /// Candidates that replaced the current solution, plateau moves included.
    pub accepted_moves: usize,

    /// Accepted candidates that strictly improved the score.
    pub improving_moves: usize,

    /// Whether the configured target score was reached.
    pub target_reached: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Current score after the initial evaluation and after every accepted move.
    pub score_history: Vec<f64>,
}

/// Executes the local search.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Runs local search until the iteration budget is spent or the target
    /// score is reached.
    ///
    /// # Errors
    /// Returns an error for an invalid configuration, or as soon as the
    /// oracle fails on any candidate.
    pub fn run<O: FitnessOracle + ?Sized>(
        oracle: &mut O,
        config: &LocalSearchConfig,
    ) -> Result<LocalSearchResult> {
        Self::run_with_cancel(oracle, config, None)
    }

    /// Runs local search with an optional cancellation token.
    ///
    /// The token is checked between iterations, after the previous
    /// candidate's score has been handled.
    pub fn run_with_cancel<O: FitnessOracle + ?Sized>(
        oracle: &mut O,
        config: &LocalSearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LocalSearchResult> {
        config.validate()?;

        let (mut rng, seed) = create_rng(config.seed);
        let space = &config.action_space;

        let mut current = Solution::random(config.solution_length, space, &mut rng);
        let mut current_score = score(oracle, &current)?;
        let mut evaluations = 1usize;

        info!(
            seed,
            length = config.solution_length,
            max_iterations = config.max_iterations,
            initial_score = current_score,
            "Local search started"
        );

        let reached = |s: f64| config.target_score.is_some_and(|t| s <= t);

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut score_history = vec![current_score];

        while iterations < config.max_iterations && !reached(current_score) {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let candidate = mutate(&current, space, &mut rng);
            let candidate_score = score(oracle, &candidate)?;
            evaluations += 1;

            let accept = candidate_score <= current_score;
            trace!(
                iteration = iterations,
                current = current_score,
                candidate = candidate_score,
                accept,
                "Candidate scored"
            );

            if accept {
                if candidate_score < current_score {
                    improving_moves += 1;
                    debug!(iteration = iterations, score = candidate_score, "New best");
                }
                accepted_moves += 1;
                current = candidate;
                current_score = candidate_score;
                score_history.push(current_score);
            }

            iterations += 1;
        }

        let target_reached = reached(current_score);
        info!(
            iterations,
            score = current_score,
            target_reached,
            cancelled,
            "Local search finished"
        );

        Ok(LocalSearchResult {
            best: current,
            best_score: current_score,
            iterations,
            evaluations,
            accepted_moves,
            improving_moves,
            target_reached,
            cancelled,
            score_history,
        })
    }
}
