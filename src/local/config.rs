//! Local search configuration.

use crate::error::{Result, SearchError};
use crate::model::ActionSpace;

/// Configuration for [`LocalSearchRunner`](super::LocalSearchRunner).
///
/// # Examples
///
/// ```
/// use u_pathsearch::local::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_solution_length(6)
///     .with_max_iterations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocalSearchConfig {
    /// Number of actions in every solution.
    pub solution_length: usize,

    /// Number of mutate-and-score iterations after the initial evaluation.
    pub max_iterations: usize,

    /// Stop as soon as the current score is at or below this value.
    ///
    /// `None` runs the full iteration budget.
    pub target_score: Option<f64>,

    /// Alphabet for the initial solution and for mutations.
    pub action_space: ActionSpace,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            solution_length: 6,
            max_iterations: 1000,
            target_score: None,
            action_space: ActionSpace::default(),
            seed: None,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_solution_length(mut self, n: usize) -> Self {
        self.solution_length = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_target_score(mut self, score: f64) -> Self {
        self.target_score = Some(score);
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
        if let Some(target) = self.target_score {
            if !target.is_finite() || target < 0.0 {
                return Err(SearchError::InvalidConfig(format!(
                    "target_score must be a non-negative finite value, got {target}"
                )));
            }
        }
        self.action_space.validate()
    }
}
