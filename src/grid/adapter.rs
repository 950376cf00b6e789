//! One-shot strategy: turn a grid shortest path into a solution.

use super::map::{Cell, Grid};
use super::search::ShortestPath;
use crate::error::{Result, SearchError};
use crate::model::Solution;
use crate::oracle::{score, FitnessOracle};
use tracing::{debug, info};

/// Converts a cell path into the displacement actions that walk it.
///
/// A path of `L` cells yields `L - 1` actions; paths of zero or one cell
/// yield an empty solution.
///
/// # Errors
/// Returns [`SearchError::InvalidPath`] when a step between two cells does
/// not fit in an [`Action`](crate::model::Action).
///
/// ```
/// use u_pathsearch::grid::{path_to_solution, Cell};
/// use u_pathsearch::model::Action;
///
/// let path = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)];
/// let s = path_to_solution(&path).unwrap();
/// assert_eq!(s.actions(), &[Action::new(1, 0), Action::new(0, 1)]);
/// ```
pub fn path_to_solution(path: &[Cell]) -> Result<Solution> {
    let actions = path
        .windows(2)
        .map(|w| {
            w[0].step_to(w[1]).ok_or_else(|| {
                SearchError::InvalidPath(format!("step {} -> {} overflows", w[0], w[1]))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(actions.into())
}

/// Result of a grid search run.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSearchOutcome {
    /// A path exists; its actions were scored once by the oracle.
    Found {
        solution: Solution,
        path: Vec<Cell>,
        score: f64,
    },
    /// No usable path. The oracle was not called.
    NoPath,
}

impl GridSearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Found { solution, .. } => Some(solution),
            Self::NoPath => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Found { score, .. } => Some(*score),
            Self::NoPath => None,
        }
    }
}

/// Runs a shortest-path provider and scores its answer.
pub struct GridSearchRunner;

impl GridSearchRunner {
    /// Finds a path from `start` to `goal` with `finder` and evaluates the
    /// resulting solution.
    ///
    /// A missing path, or a path without any move, is reported as
    /// [`GridSearchOutcome::NoPath`].
    ///
    /// # Errors
    /// Propagates oracle failures and invalid scores, and rejects paths
    /// whose steps overflow an action.
    pub fn run<F, O>(
        finder: &F,
        grid: &Grid,
        start: Cell,
        goal: Cell,
        oracle: &mut O,
    ) -> Result<GridSearchOutcome>
    where
        F: ShortestPath + ?Sized,
        O: FitnessOracle + ?Sized,
    {
        info!(%start, %goal, width = grid.width(), height = grid.height(), "Grid search started");

        let path = match finder.shortest_path(grid, start, goal) {
            Some(path) if path.len() > 1 => path,
            _ => {
                info!(%start, %goal, "No grid path");
                return Ok(GridSearchOutcome::NoPath);
            }
        };

        let solution = path_to_solution(&path)?;
        debug!(actions = solution.len(), %solution, "Path converted");
        let score = score(oracle, &solution)?;
        info!(actions = solution.len(), score, "Grid search finished");

        Ok(GridSearchOutcome::Found {
            solution,
            path,
            score,
        })
    }
}
