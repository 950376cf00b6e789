//! SA execution loop.

use super::config::{acceptance_probability, SaConfig};
use crate::error::Result;
use crate::model::Solution;
use crate::operators::mutate;
use crate::oracle::{score, FitnessOracle};
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// How a Simulated Annealing run ended relative to its target score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaOutcome {
    /// The best score is at or below the target.
    GoalReached,
    /// The budget ran out first; the best solution found is still reported.
    BestEffort,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best solution observed during the run.
    pub best: Solution,

    /// Score of the best solution. Running minimum over every score seen.
    pub best_score: f64,

    /// The current solution when the run stopped.
    pub current: Solution,

    /// Score of the final current solution.
    pub current_score: f64,

    /// Mutate-and-score iterations executed.
    pub iterations: usize,

    /// Total oracle calls, initial evaluation included.
    pub evaluations: usize,

    /// Temperature at the last executed iteration.
    pub final_temperature: f64,

    /// Number of accepted moves (non-worsening and worsening).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of worsening moves accepted by the probabilistic rule.
    pub worsening_accepted: usize,

    /// Goal reached or best effort.
    pub outcome: SaOutcome,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best score after the initial evaluation and after every iteration.
    pub best_history: Vec<f64>,
}

impl SaResult {
    pub fn is_goal_reached(&self) -> bool {
        self.outcome == SaOutcome::GoalReached
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    ///
    /// # Errors
    /// Returns an error for an invalid configuration, or as soon as the
    /// oracle fails on any candidate.
    pub fn run<O: FitnessOracle + ?Sized>(oracle: &mut O, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(oracle, config, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<O: FitnessOracle + ?Sized>(
        oracle: &mut O,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        config.validate()?;

        let (mut rng, seed) = create_rng(config.seed);
        let space = &config.action_space;
        let horizon = config.horizon();

        // Initialize
        let mut current = Solution::random(config.solution_length, space, &mut rng);
        let mut current_score = score(oracle, &current)?;
        let mut best = current.clone();
        let mut best_score = current_score;
        let mut evaluations = 1usize;

        info!(
            seed,
            length = config.solution_length,
            max_iterations = config.max_iterations,
            horizon,
            initial_score = current_score,
            target = config.target_score,
            "Simulated annealing started"
        );

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut worsening_accepted = 0usize;
        let mut final_temperature = config.schedule.temperature(0, horizon);
        let mut cancelled = false;
        let mut best_history = Vec::with_capacity(config.max_iterations + 1);
        best_history.push(best_score);

        while iterations < config.max_iterations {
            if config.stop_at_target && current_score <= config.target_score {
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let candidate = mutate(&current, space, &mut rng);
            let candidate_score = score(oracle, &candidate)?;
            evaluations += 1;

            let temperature = config.schedule.temperature(iterations, horizon);
            let delta = candidate_score - current_score;
            let draw: f64 = rng.random();
            let probability = acceptance_probability(delta, temperature);

            // Metropolis acceptance criterion
            let accept = candidate_score <= current_score || draw < probability;

            trace!(
                iteration = iterations,
                current = current_score,
                candidate = candidate_score,
                temperature,
                draw,
                probability,
                accept,
                "Candidate scored"
            );

            if candidate_score < best_score {
                best = candidate.clone();
                best_score = candidate_score;
                debug!(iteration = iterations, score = best_score, "New best");
            }

            if accept {
                accepted_moves += 1;
                if delta < 0.0 {
                    improving_moves += 1;
                } else if delta > 0.0 {
                    worsening_accepted += 1;
                }
                current = candidate;
                current_score = candidate_score;
            }

            final_temperature = temperature;
            iterations += 1;
            best_history.push(best_score);
        }

        let outcome = if best_score <= config.target_score {
            SaOutcome::GoalReached
        } else {
            SaOutcome::BestEffort
        };

        match outcome {
            SaOutcome::GoalReached => info!(
                iterations,
                best_score,
                target = config.target_score,
                "Simulated annealing reached the goal"
            ),
            SaOutcome::BestEffort => info!(
                iterations,
                best_score,
                target = config.target_score,
                "Simulated annealing finished without reaching the goal"
            ),
        }

        Ok(SaResult {
            best,
            best_score,
            current,
            current_score,
            iterations,
            evaluations,
            final_temperature,
            accepted_moves,
            improving_moves,
            worsening_accepted,
            outcome,
            cancelled,
            best_history,
        })
    }
}
