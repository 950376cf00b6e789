//! Obstacle grids and the one-shot shortest-path strategy.
//!
//! - [`Grid`], [`Cell`]: boolean obstacle map with integer coordinates
//! - [`ShortestPath`]: path provider contract, implemented by [`Dijkstra`]
//!   and [`AStar`]
//! - [`GridWalkOracle`]: fitness oracle that walks a solution on a grid
//! - [`GridSearchRunner`]: turns a shortest path into a scored [`Solution`]
//!
//! [`Solution`]: crate::model::Solution

mod adapter;
mod map;
mod search;
mod walk;

pub use adapter::{path_to_solution, GridSearchOutcome, GridSearchRunner};
pub use map::{Cell, Grid};
pub use search::{AStar, Dijkstra, ShortestPath};
pub use walk::{GridWalkOracle, WalkOutcome};
