//! Black-box path search over fixed-length action sequences.
//!
//! A candidate solution is a sequence of planar grid displacements. Its
//! quality is known only to an external [`FitnessOracle`](oracle::FitnessOracle)
//! that scores it (lower is better, zero is optimal). The crate provides
//! interchangeable strategies that search the sequence space with that oracle:
//!
//! - **Local Search**: mutate-and-keep-if-not-worse single trajectory.
//! - **Simulated Annealing (SA)**: local search that also accepts worsening
//!   moves with probability `exp(-delta / T)`.
//! - **Genetic Algorithm (GA)**: truncation selection, duplicate-avoiding
//!   crossover and single-point mutation over a fixed-size population.
//! - **Grid Search**: one-shot conversion of a Dijkstra or A* path on an
//!   obstacle grid into a solution.
//!
//! Strategies can run in the background through [`handle::SearchHandle`]
//! or as independent restarts through [`multistart`].
//!
//! # Example
//!
//! ```
//! use u_pathsearch::grid::{Cell, Grid, GridWalkOracle};
//! use u_pathsearch::local::{LocalSearchConfig, LocalSearchRunner};
//!
//! let grid = Grid::parse("....\n.#..\n....").unwrap();
//! let mut oracle = GridWalkOracle::new(grid, Cell::new(0, 0), Cell::new(3, 0));
//! let config = LocalSearchConfig::default()
//!     .with_solution_length(3)
//!     .with_max_iterations(500)
//!     .with_seed(42);
//! let result = LocalSearchRunner::run(&mut oracle, &config).unwrap();
//! assert!(result.best_score <= result.score_history[0]);
//! ```

pub mod error;
pub mod ga;
pub mod grid;
pub mod handle;
pub mod local;
pub mod model;
pub mod multistart;
pub mod operators;
pub mod oracle;
pub mod sa;

mod random;

pub use error::{OracleError, Result, SearchError};
