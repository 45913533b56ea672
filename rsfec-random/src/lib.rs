//! Deterministic test randomness for the codec crates.
//!
//! [`QuickRand`] is the multiplicative congruential generator used by the
//! round-trip exerciser and the seed-reproducible test suites. It is fast,
//! tiny, and emphatically not cryptographic; reproducibility across runs
//! and platforms is the only design goal.

use rand::{RngCore, SeedableRng};
use rsfec_algebra::GfExp;

/// 32-bit multiplicative congruential generator.
#[derive(Clone, Debug)]
pub struct QuickRand {
    state: u32,
}

impl QuickRand {
    pub const MULTIPLIER: u32 = 1_099_087_573;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Uniform draw from `[min, max]`, both ends inclusive.
    pub fn int_in(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        self.state = self.state.wrapping_mul(Self::MULTIPLIER);
        min + ((self.state >> 8) % (max - min + 1))
    }

    /// Random element of GF(2^m) in exponent form, zero included.
    pub fn element(&mut self, m: usize) -> GfExp {
        GfExp(self.int_in(0, (1 << m) - 1) as u16)
    }

    /// Random nonzero element of GF(2^m) in exponent form.
    pub fn nonzero_element(&mut self, m: usize) -> GfExp {
        GfExp(self.int_in(1, (1 << m) - 1) as u16)
    }

    /// Fills `out` with random exponent-form coefficients.
    pub fn fill_poly(&mut self, m: usize, out: &mut [GfExp]) {
        for c in out.iter_mut() {
            *c = self.element(m);
        }
    }
}

impl RngCore for QuickRand {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(Self::MULTIPLIER);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32()) << 32 | u64::from(self.next_u32())
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

impl SeedableRng for QuickRand {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
