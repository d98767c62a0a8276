// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It drives layout jitter and connection rewiring, and makes runs reproducible
// when a seed is supplied.

/// Source of uniform randomness consumed by the renderer.
///
/// Every random draw the network makes goes through this trait so tests and
/// hosts can swap in a fixed or scripted source.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f32_01(&mut self) -> f32;

    #[inline]
    fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32_01()
    }

    /// Uniform integer in `[low, high)`. Returns `low` for an empty range.
    #[inline]
    fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as f32;
        let v = (self.next_f32_01() * span) as usize;
        low + v.min(high - low - 1)
    }

    /// Bernoulli trial with success probability `p`.
    #[inline]
    fn gen_bool(&mut self, p: f32) -> bool {
        self.next_f32_01() < p
    }
}

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    /// Seed from the wall clock; used when a config carries no seed.
    pub fn from_entropy() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos ^ 0xD1B54A32D192ED03)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl RandomSource for Prng {
    #[inline]
    fn next_f32_01(&mut self) -> f32 {
        // 24 high bits keep the result strictly below 1.0 after the f32 cast.
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    #[inline]
    fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u64;
        let v = self.next_u64() % span;
        low + v as usize
    }
}
