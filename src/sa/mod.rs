//! Simulated Annealing (SA).
//!
//! The local search loop with one extra acceptance rule: a worsening
//! candidate is kept when a uniform draw falls below
//! `exp(-(new - current) / T)`. The temperature `T` comes from a
//! [`TemperatureSchedule`] evaluated at the current iteration.
//!
//! The default schedule, [`TemperatureSchedule::Exploding`], is zero until
//! the horizon and then grows as `exp(iter - horizon)`. Temperature rises
//! instead of decaying; [`TemperatureSchedule::Linear`] is available as an
//! opt-in cooling alternative.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;

pub use config::{acceptance_probability, temperature, SaConfig, TemperatureSchedule};
pub use runner::{SaOutcome, SaResult, SaRunner};
