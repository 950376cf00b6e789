//! Fitness oracle contract.
//!
//! The oracle is the only component that knows how good a [`Solution`] is.
//! It may run a full simulation before returning, so every strategy treats
//! [`FitnessOracle::evaluate`] as a blocking call and does not compare or
//! accept a candidate until the score is available.

use crate::error::{OracleError, Result, SearchError};
use crate::model::Solution;

/// Scores candidate solutions. Lower is better; zero is optimal.
///
/// Implementations own whatever session state evaluation needs, which is
/// why `evaluate` takes `&mut self`. A strategy calls it exactly once per
/// scored candidate and never caches scores, even for equal solutions.
///
/// Any `FnMut(&Solution) -> Result<f64, OracleError>` closure is an oracle:
///
/// ```
/// use u_pathsearch::model::{Action, Solution};
/// use u_pathsearch::oracle::FitnessOracle;
/// use u_pathsearch::OracleError;
///
/// let mut oracle = |s: &Solution| -> Result<f64, OracleError> {
///     Ok(s.iter().filter(|a| **a != Action::RIGHT).count() as f64)
/// };
/// let score = oracle.evaluate(&Solution::new(vec![Action::RIGHT, Action::UP])).unwrap();
/// assert_eq!(score, 1.0);
/// ```
pub trait FitnessOracle {
    /// Runs `solution` and returns its score.
    ///
    /// # Errors
    /// Any [`OracleError`] aborts the calling strategy.
    fn evaluate(&mut self, solution: &Solution) -> std::result::Result<f64, OracleError>;
}

impl<F> FitnessOracle for F
where
    F: FnMut(&Solution) -> std::result::Result<f64, OracleError>,
{
    fn evaluate(&mut self, solution: &Solution) -> std::result::Result<f64, OracleError> {
        self(solution)
    }
}

/// Evaluates `solution` and rejects scores outside the fitness domain.
pub(crate) fn score<O: FitnessOracle + ?Sized>(oracle: &mut O, solution: &Solution) -> Result<f64> {
    let value = oracle.evaluate(solution)?;
    if value.is_nan() || value < 0.0 {
        return Err(SearchError::InvalidScore(value));
    }
    Ok(value)
}
