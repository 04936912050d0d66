//! RNG module - uniform random piece selection
//!
//! Pieces are drawn uniformly with replacement: every draw is an independent
//! pick among the seven kinds, so repeats and droughts are possible.
//!
//! A small seeded LCG keeps games reproducible for tests and benchmarks.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point for some LCG variants; keep it out.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator (with replacement, no bag)
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: SimpleRng,
    seed: u32,
}

impl PieceRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw one piece kind, each with probability 1/7
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Seed this randomizer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_randomizer_produces_every_kind() {
        let mut pieces = PieceRandomizer::new(42);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[(pieces.draw().id() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "seen = {seen:?}");
    }

    #[test]
    fn test_randomizer_allows_repeats() {
        // With replacement, 200 draws over 7 kinds must contain an immediate repeat.
        let mut pieces = PieceRandomizer::new(3);
        let draws: Vec<PieceKind> = (0..200).map(|_| pieces.draw()).collect();
        assert!(draws.windows(2).any(|w| w[0] == w[1]));
    }

    #[test]
    fn test_randomizer_is_reproducible() {
        let mut a = PieceRandomizer::new(99);
        let mut b = PieceRandomizer::new(99);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
        assert_eq!(a.seed(), 99);
    }
}
