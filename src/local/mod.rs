//! Naive local search.
//!
//! A single non-restarting trajectory: mutate a copy of the current
//! solution, score it, and keep it when it is at least as good. Plateau
//! moves are accepted, so the search can drift across equal-score regions.

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::{LocalSearchResult, LocalSearchRunner};
