//! Deterministic walk simulator used as a fitness oracle.

use super::map::{Cell, Grid};
use crate::error::OracleError;
use crate::model::Solution;
use crate::oracle::FitnessOracle;

/// Penalty factor applied to the remaining distance when the goal is missed.
const MISS_FACTOR: u32 = 100;
/// Flat penalty for running into an obstacle or the border.
const COLLISION_PENALTY: u32 = 1000;

/// What happened when a solution was walked on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Where the walker stopped.
    pub final_cell: Cell,
    /// Actions applied before the walk stopped.
    pub performed_actions: usize,
    pub found_goal: bool,
    pub hit_obstacle: bool,
}

impl WalkOutcome {
    /// Error of the walk. Zero only when the goal is reached with no moves.
    ///
    /// `distance * (found ? 0 : 100) + performed + (collided ? 1000 : 0)`
    pub fn error(&self, goal: Cell) -> f64 {
        let miss = if self.found_goal { 0 } else { MISS_FACTOR };
        let collision = if self.hit_obstacle { COLLISION_PENALTY } else { 0 };
        (self.final_cell.manhattan(goal) as f64) * miss as f64
            + self.performed_actions as f64
            + collision as f64
    }
}

/// Walks a [`Solution`] from `start` and scores how close it ends to `goal`.
///
/// The walk stops at the first action that would leave the grid or enter an
/// obstacle (the walker stays put) and as soon as the goal is reached.
///
/// ```
/// use u_pathsearch::grid::{Cell, Grid, GridWalkOracle};
/// use u_pathsearch::model::{Action, Solution};
/// use u_pathsearch::oracle::FitnessOracle;
///
/// let grid = Grid::new(3, 3).unwrap();
/// let mut oracle = GridWalkOracle::new(grid, Cell::new(0, 0), Cell::new(1, 1));
/// let s = Solution::new(vec![Action::RIGHT, Action::UP]);
/// assert_eq!(oracle.evaluate(&s).unwrap(), 2.0);
/// assert_eq!(oracle.min_error(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct GridWalkOracle {
    grid: Grid,
    start: Cell,
    goal: Cell,
}

impl GridWalkOracle {
    pub fn new(grid: Grid, start: Cell, goal: Cell) -> Self {
        Self { grid, start, goal }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Lowest error any solution can reach: the Manhattan distance from
    /// start to goal.
    pub fn min_error(&self) -> f64 {
        self.start.manhattan(self.goal) as f64
    }

    /// Replays `solution` on the grid.
    pub fn simulate(&self, solution: &Solution) -> WalkOutcome {
        let mut cell = self.start;
        let mut performed_actions = 0;
        let mut found_goal = cell == self.goal;
        let mut hit_obstacle = false;

        for action in solution.iter() {
            if found_goal {
                break;
            }
            // coordinate overflow leaves the grid too
            let Some(next) = cell.offset(*action).filter(|c| self.grid.is_free(*c)) else {
                hit_obstacle = true;
                break;
            };
            cell = next;
            performed_actions += 1;
            found_goal = cell == self.goal;
        }

        WalkOutcome {
            final_cell: cell,
            performed_actions,
            found_goal,
            hit_obstacle,
        }
    }
}

impl FitnessOracle for GridWalkOracle {
    fn evaluate(&mut self, solution: &Solution) -> Result<f64, OracleError> {
        if self.grid.is_blocked(self.start) {
            return Err(OracleError::new(format!(
                "start cell {} is not a free grid cell",
                self.start
            )));
        }
        Ok(self.simulate(solution).error(self.goal))
    }
}
