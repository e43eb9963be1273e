//! Seeded random source threaded through every generation stage.
//!
//! Nothing in the crate touches `thread_rng()`. Placement, k-means seeding and
//! packet sampling all draw from the one `GenRng` owned by the `Generator`,
//! in pipeline order, so a fixed seed reproduces the same scenario.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub struct GenRng {
    inner: StdRng,
    seed: u64,
}

impl GenRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Pick a fresh seed from OS entropy. The seed is kept so it can be logged
    /// and the run repeated with `--seed`.
    pub fn from_entropy() -> Self {
        let seed = rand::rngs::OsRng.next_u64();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Access the underlying generator for `rand`/`rand_distr` distributions.
    #[inline]
    pub fn inner(&mut self) -> &mut StdRng {
        &mut self.inner
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Uniform index into a non-empty slice of candidates.
    #[inline]
    pub fn pick<'a, T>(&mut self, candidates: &'a [T]) -> &'a T {
        &candidates[self.inner.gen_range(0..candidates.len())]
    }

    #[inline]
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }
}
