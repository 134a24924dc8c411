//! RNG module - seedable piece and item randomness
//!
//! A small linear congruential generator keeps the simulation free of
//! external randomness sources: two engines built from the same seed
//! draw identical piece and item streams, which the determinism tests
//! and any replay tooling rely on. Draws are independent and uniform,
//! there is no bag.

use blockfall_types::{ItemKind, PieceKind};

/// Knuth's MMIX multiplier and increment
const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

/// Simple LCG (Linear Congruential Generator) RNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Restart the stream from a fresh seed
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Generate next random u64
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Generate random value in range [0, max). The low bits of an LCG
    /// cycle quickly, so the draw comes from the high half of the state.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u64() >> 32) % max as u64) as u32
    }

    /// Draw a piece kind, uniform over the seven kinds
    pub fn piece_kind(&mut self) -> PieceKind {
        let kinds = PieceKind::all();
        kinds[self.next_range(kinds.len() as u32) as usize]
    }

    /// Draw an item kind, uniform over the five kinds
    pub fn item_kind(&mut self) -> ItemKind {
        let kinds = ItemKind::all();
        kinds[self.next_range(kinds.len() as u32) as usize]
    }
}
