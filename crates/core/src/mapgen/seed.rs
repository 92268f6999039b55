//! Seeded pseudo-random stream shared by every generation phase.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Single random source threaded through the whole pipeline.
///
/// Every helper consumes exactly one value from the underlying stream, even
/// when the requested range is degenerate, so the draw sequence only depends
/// on how many draws each phase makes.
pub struct DungeonRng {
    inner: ChaCha8Rng,
}

impl DungeonRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_chacha(inner: ChaCha8Rng) -> Self {
        Self { inner }
    }

    /// Uniform in `[0, 1]`, both ends inclusive.
    pub fn value(&mut self) -> f32 {
        let bits = self.inner.next_u32() >> 8;
        bits as f32 / ((1_u32 << 24) - 1) as f32
    }

    pub fn coin(&mut self) -> bool {
        self.value() > 0.5
    }

    /// Uniform real in `[min, max]`; `min` when `max <= min`.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let t = self.value();
        if max <= min {
            return min;
        }
        (min + (max - min) * t).min(max)
    }

    /// Full-width draw, used to derive seeds for further layouts.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform integer in `[min, max)`; `min` when the range is empty.
    pub fn range_usize(&mut self, min: usize, max: usize) -> usize {
        let raw = self.inner.next_u64();
        if max <= min {
            return min;
        }
        min + (raw % (max - min) as u64) as usize
    }
}
