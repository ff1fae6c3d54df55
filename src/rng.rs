//! Seeded random number generation.
//!
//! The ground-truth overlay has to be reproducible: the same seed must
//! rebuild the same point clouds and the same Normal draws on every mount.
//! Mulberry32 keeps one `u32` of state and is plenty for visualization
//! sampling; it plugs into the `rand` ecosystem via `RngCore`/`SeedableRng`
//! so generic samplers can consume it.

use rand::{RngCore, SeedableRng};
use std::f64::consts::PI;

const U32_RANGE: f64 = 4_294_967_296.0;

/// Mulberry32 PRNG.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next uniform draw in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Standard normal draw via the Box-Muller transform.
///
/// Two uniform draws per sample; a draw of exactly 0 is rejected and redrawn
/// so the logarithm stays finite.
pub fn standard_normal<R: RngCore>(rng: &mut R) -> f64 {
    let mut u = 0.0;
    while u == 0.0 {
        u = rng.next_u32() as f64 / U32_RANGE;
    }
    let mut v = 0.0;
    while v == 0.0 {
        v = rng.next_u32() as f64 / U32_RANGE;
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}
