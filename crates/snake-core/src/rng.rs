//! Deterministic game-level RNG wrapper.
//!
//! Every random decision in a game (spawn rectangles, respawn cells) draws
//! from one `SimRng` seeded by `GameConfig::seed`.  Combined with the
//! scheduler's deterministic turn order, a fixed seed and a fixed input trace
//! reproduce a game exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Game-level RNG.
///
/// Used only from the single game task; give each independent consumer its
/// own [`child`](Self::child) if their draws must not interleave.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    ///
    /// Spawners each own a child so that adding a spawner does not perturb
    /// the draws of the others.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
