//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{Result, SearchError};
use crate::model::ActionSpace;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_pathsearch::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.elite_count(), 40);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pathsearch::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_elite_ratio(0.1)
///     .with_mutation_rate(0.2)
///     .with_max_generations(100);
/// assert_eq!(config.elite_count(), 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Fraction of the population kept as crossover parents (0.0–1.0].
    ///
    /// The elite count is `floor(population_size * elite_ratio)` and must be
    /// at least 1.
    pub elite_ratio: f64,

    /// Probability that a child receives one mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of actions in every solution.
    pub solution_length: usize,

    /// Maximum number of generations. 0 = no limit.
    pub max_generations: usize,

    /// Stop once the best score is at or below this value.
    pub target_score: Option<f64>,

    /// Alphabet for the seed solution and for mutations.
    pub action_space: ActionSpace,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            elite_ratio: 0.2,
            mutation_rate: 0.1,
            solution_length: 6,
            max_generations: 0,
            target_score: None,
            action_space: ActionSpace::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the solution length.
    pub fn with_solution_length(mut self, n: usize) -> Self {
        self.solution_length = n;
        self
    }

    /// Sets the maximum number of generations (0 for no limit).
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the target score.
    pub fn with_target_score(mut self, score: f64) -> Self {
        self.target_score = Some(score);
        self
    }

    /// Sets the action space.
    pub fn with_action_space(mut self, space: ActionSpace) -> Self {
        self.action_space = space;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elites: `floor(population_size * elite_ratio)`.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Whether the loop can end without an external signal.
    pub fn is_bounded(&self) -> bool {
        self.max_generations > 0 || self.target_score.is_some()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SearchError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.solution_length == 0 {
            return Err(SearchError::InvalidConfig(
                "solution_length must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(SearchError::InvalidConfig(format!(
                "elite_ratio must be in [0, 1], got {}",
                self.elite_ratio
            )));
        }
        if self.elite_count() == 0 {
            return Err(SearchError::InvalidConfig(format!(
                "elite_ratio {} leaves no elites in a population of {}",
                self.elite_ratio, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::InvalidConfig(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
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
