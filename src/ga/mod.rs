//! Genetic Algorithm.
//!
//! A truncation-selection GA over fixed-length action sequences:
//!
//! 1. Seed: every individual is a mutated copy of one random solution
//! 2. Evaluate the whole population with the fitness oracle
//! 3. Keep the best `floor(P * elite_ratio)` individuals as elites
//! 4. Breed `P` children, each the [`crossover`](crate::operators::crossover)
//!    of two elites drawn with replacement
//! 5. Mutate each child with probability `mutation_rate`
//! 6. Replace the population wholesale and repeat
//!
//! Elites are not copied forward; only their genes survive through
//! crossover. The loop has no built-in stopping score: callers bound it with
//! `max_generations`, `target_score`, a cancellation token, or an observer.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, elite ratio, mutation rate, limits
//! - [`GaRunner`]: executes the generational loop
//! - [`GaResult`]: best solution, score history, termination reason
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GaTermination, GenerationStats};
