//! Seeded random source
//!
//! Engine functions take any `rand::Rng`. Simulations and tests use
//! `SeededRng` so a run replays exactly from one 64-bit seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub type SeededRng = ChaCha8Rng;

/// Deterministic generator: same seed = same sequence
pub fn seeded_rng(seed: u64) -> SeededRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Seeded generator, or one drawn from OS entropy when no seed is given
pub fn create_rng(seed: Option<u64>) -> SeededRng {
    match seed {
        Some(s) => seeded_rng(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
