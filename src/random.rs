//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the generator for one strategy run.
///
/// Without a seed a fresh one is drawn from the thread-local generator.
/// The seed actually used is returned so it can be logged and replayed.
pub(crate) fn create_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}
