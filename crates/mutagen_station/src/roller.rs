//! # Chance Roller
//!
//! The station's one shared pseudorandom source. A merge succeeds iff the
//! roll is at most the success chance.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws uniform values in `[0, 100]`.
pub trait ChanceRoller {
    /// Draws one value in `[0, 100]`.
    fn roll(&mut self) -> f32;
}

/// Deterministic roller backed by ChaCha8.
///
/// The same seed replays the same sequence of merge outcomes.
#[derive(Clone, Debug)]
pub struct SeededRoller {
    rng: ChaCha8Rng,
}

impl SeededRoller {
    /// Creates a roller from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ChanceRoller for SeededRoller {
    fn roll(&mut self) -> f32 {
        self.rng.gen_range(0.0..=100.0)
    }
}

impl<R: ChanceRoller + ?Sized> ChanceRoller for &mut R {
    fn roll(&mut self) -> f32 {
        (**self).roll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_in_range() {
        let mut roller = SeededRoller::new(42);
        for _ in 0..10_000 {
            let value = roller.roll();
            assert!((0.0..=100.0).contains(&value), "roll {value} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRoller::new(7);
        let mut b = SeededRoller::new(7);
        for _ in 0..100 {
            assert_eq!(a.roll().to_bits(), b.roll().to_bits());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeededRoller::new(1);
        let mut b = SeededRoller::new(2);
        let same = (0..32).all(|_| a.roll().to_bits() == b.roll().to_bits());
        assert!(!same);
    }

    #[test]
    fn test_rolls_spread() {
        let mut roller = SeededRoller::new(99);
        let below_half = (0..10_000).filter(|_| roller.roll() < 50.0).count();
        assert!((4_000..6_000).contains(&below_half));
    }
}
