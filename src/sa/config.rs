//! SA configuration and temperature schedules.

use crate::error::{Result, SearchError};
use crate::model::ActionSpace;

/// Temperature as a function of the iteration counter.
///
/// # Variants
///
/// - Exploding: zero before the horizon, `exp(iter - horizon)` from it on
/// - Linear: `initial * (1 - iter / horizon)`, clamped at zero
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureSchedule {
    /// `T = 0` while `iter < horizon`, then `T = exp(iter - horizon)`.
    ///
    /// With the default horizon (`max_iterations - 1`) only the last step
    /// runs at `T = 1`; every earlier step behaves like local search.
    #[default]
    Exploding,

    /// Linear cooling from `initial` at iteration 0 down to 0 at the horizon.
    Linear {
        /// Starting temperature. Must be positive.
        initial: f64,
    },
}

impl TemperatureSchedule {
    /// Temperature at `iteration` for a schedule spanning `horizon` iterations.
    pub fn temperature(&self, iteration: usize, horizon: usize) -> f64 {
        match *self {
            TemperatureSchedule::Exploding => temperature(iteration, horizon),
            TemperatureSchedule::Linear { initial } => {
                if horizon == 0 || iteration >= horizon {
                    0.0
                } else {
                    initial * (1.0 - iteration as f64 / horizon as f64)
                }
            }
        }
    }
}

/// The exploding schedule: `0` before `horizon`, `exp(iteration - horizon)` after.
///
/// ```
/// use u_pathsearch::sa::temperature;
///
/// assert_eq!(temperature(5, 10), 0.0);
/// assert_eq!(temperature(10, 10), 1.0);
/// assert!((temperature(12, 10) - 2f64.exp()).abs() < 1e-12);
/// ```
pub fn temperature(iteration: usize, horizon: usize) -> f64 {
    if iteration < horizon {
        0.0
    } else {
        ((iteration - horizon) as f64).exp()
    }
}

/// Probability of accepting a candidate that is `delta` worse than current.
///
/// Non-worsening moves (`delta <= 0`) always have probability 1. At zero
/// (or negative) temperature worsening moves have probability 0, which
/// also avoids the division by zero.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else if temperature > 0.0 {
        (-delta / temperature).exp()
    } else {
        0.0
    }
}

/// Configuration for the Simulated Annealing strategy.
///
/// # Examples
///
/// ```
/// use u_pathsearch::sa::{SaConfig, TemperatureSchedule};
///
/// let config = SaConfig::default()
///     .with_solution_length(42)
///     .with_max_iterations(1000)
///     .with_temperature_horizon(800)
///     .with_schedule(TemperatureSchedule::Exploding)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaConfig {
    /// Number of actions in every solution.
    pub solution_length: usize,

    /// Number of mutate-and-score iterations (hard budget).
    pub max_iterations: usize,

    /// The `horizon` argument of the schedule. `None` uses
    /// `max_iterations - 1`, the index of the last step.
    pub temperature_horizon: Option<usize>,

    /// Temperature schedule.
    pub schedule: TemperatureSchedule,

    /// Score at or below which the run counts as having reached the goal.
    pub target_score: f64,

    /// Stop early once the current score reaches `target_score`.
    pub stop_at_target: bool,

    /// Alphabet for the initial solution and for mutations.
    pub action_space: ActionSpace,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            solution_length: 42,
            max_iterations: 1000,
            temperature_horizon: None,
            schedule: TemperatureSchedule::default(),
            target_score: 0.0,
            stop_at_target: false,
            action_space: ActionSpace::default(),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_solution_length(mut self, n: usize) -> Self {
        self.solution_length = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_temperature_horizon(mut self, horizon: usize) -> Self {
        self.temperature_horizon = Some(horizon);
        self
    }

    pub fn with_schedule(mut self, schedule: TemperatureSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_target_score(mut self, score: f64) -> Self {
        self.target_score = score;
        self
    }

    pub fn with_stop_at_target(mut self, stop: bool) -> Self {
        self.stop_at_target = stop;
        self
    }

    pub fn with_action_space(mut self, space: ActionSpace) -> Self {
        self.action_space = space;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The horizon actually passed to the schedule.
    pub fn horizon(&self) -> usize {
        self.temperature_horizon
            .unwrap_or(self.max_iterations.saturating_sub(1))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.solution_length == 0 {
            return Err(SearchError::InvalidConfig(
                "solution_length must be at least 1".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !self.target_score.is_finite() || self.target_score < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "target_score must be a non-negative finite value, got {}",
                self.target_score
            )));
        }
        if let TemperatureSchedule::Linear { initial } = self.schedule {
            if initial <= 0.0 || !initial.is_finite() {
                return Err(SearchError::InvalidConfig(format!(
                    "linear initial temperature must be positive, got {initial}"
                )));
            }
        }
        self.action_space.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.solution_length, 42);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.horizon(), 999);
        assert_eq!(config.schedule, TemperatureSchedule::Exploding);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_horizon_override() {
        let config = SaConfig::default().with_temperature_horizon(10);
        assert_eq!(config.horizon(), 10);
    }

    #[test]
    fn test_exploding_temperature_values() {
        assert_eq!(temperature(5, 10), 0.0);
        assert_eq!(temperature(0, 10), 0.0);
        assert_eq!(temperature(10, 10), 1.0);
        assert!((temperature(12, 10) - 2f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn test_exploding_is_non_decreasing() {
        let mut last = 0.0;
        for iter in 0..40 {
            let t = temperature(iter, 20);
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn test_linear_temperature_values() {
        let schedule = TemperatureSchedule::Linear { initial: 10.0 };
        assert!((schedule.temperature(0, 100) - 10.0).abs() < 1e-12);
        assert!((schedule.temperature(50, 100) - 5.0).abs() < 1e-12);
        assert_eq!(schedule.temperature(100, 100), 0.0);
        assert_eq!(schedule.temperature(150, 100), 0.0);
    }

    #[test]
    fn test_probability_zero_temperature() {
        assert_eq!(acceptance_probability(3.0, 0.0), 0.0);
        assert_eq!(acceptance_probability(0.0, 0.0), 1.0);
        assert_eq!(acceptance_probability(-2.0, 0.0), 1.0);
    }

    #[test]
    fn test_probability_positive_temperature() {
        let p = acceptance_probability(1.0, 1.0);
        assert!((p - (-1f64).exp()).abs() < 1e-12);
        // infinite temperature accepts everything
        assert_eq!(acceptance_probability(1000.0, f64::INFINITY), 1.0);
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SaConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_linear_initial() {
        let config = SaConfig::default().with_schedule(TemperatureSchedule::Linear { initial: 0.0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_target() {
        let config = SaConfig::default().with_target_score(-0.5);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_keeps_schedule() {
        let config = SaConfig::default()
            .with_schedule(TemperatureSchedule::Linear { initial: 3.5 })
            .with_temperature_horizon(50);
        let json = serde_json::to_string(&config).unwrap();
        let back: SaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.schedule, TemperatureSchedule::Linear { initial: 3.5 });
        assert_eq!(back.horizon(), 50);
        assert_eq!(back.solution_length, config.solution_length);
    }
}
