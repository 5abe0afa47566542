//! Deterministic RNG construction.
//!
//! Both engines thread a single [`StdRng`] handle through every operator,
//! so a seeded run consumes its random draws in a fixed, reproducible
//! sequence regardless of how fitness evaluation is dispatched.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded RNG for reproducible runs.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
