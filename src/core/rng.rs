//! Deterministic dice rolling.
//!
//! ## Key Features
//!
//! - **Deterministic**: same seed produces the identical roll sequence
//! - **Injectable**: every roll operation on the engine takes a
//!   `&mut DiceRng`, so there is no ambient randomness anywhere
//! - **Forkable**: independent branches for self-play simulations
//! - **Serializable**: O(1) state capture and restore for replay
//!
//! ## Usage
//!
//! ```
//! use gammon_core::core::DiceRng;
//!
//! let mut rng = DiceRng::new(42);
//! let roll = rng.roll_dice();
//! assert!((1..=6).contains(&roll.first()));
//!
//! // Same seed, same sequence.
//! let mut replay = DiceRng::new(42);
//! assert_eq!(replay.roll_dice(), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::player::Player;

/// Deterministic dice source backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DiceRng {
    /// Create a new dice source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Roll a single die.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Roll a pair of dice.
    pub fn roll_dice(&mut self) -> Dice {
        let first = self.roll_die();
        let second = self.roll_die();
        // Both values are in range; construction cannot fail.
        Dice::new(first, second).unwrap_or_else(|_| unreachable!())
    }

    /// Roll a non-double pair, re-rolling doubles until the values differ.
    pub fn roll_non_double(&mut self) -> Dice {
        loop {
            let dice = self.roll_dice();
            if !dice.is_double() {
                return dice;
            }
        }
    }

    /// Flip a coin between the two players.
    pub fn coin_flip(&mut self) -> Player {
        if self.inner.gen_bool(0.5) {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Fork this source into an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Capture the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore a source from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for replay checkpoints.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of how many
/// rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    /// Fork counter for deterministic branching.
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_dice(), rng2.roll_dice());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DiceRng::new(1);
        let mut rng2 = DiceRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_die()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_die()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_range() {
        let mut rng = DiceRng::new(7);
        for _ in 0..200 {
            let die = rng.roll_die();
            assert!((1..=6).contains(&die));
        }
    }

    #[test]
    fn test_roll_non_double() {
        let mut rng = DiceRng::new(9);
        for _ in 0..50 {
            assert!(!rng.roll_non_double().is_double());
        }
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = DiceRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..20).map(|_| rng.roll_die()).collect();
        let seq2: Vec<_> = (0..20).map(|_| forked.roll_die()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        assert_eq!(rng1.fork().seed, rng2.fork().seed);
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = DiceRng::new(42);
        for _ in 0..100 {
            rng.roll_die();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_die()).collect();

        let mut restored = DiceRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_die()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = DiceRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: DiceRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_coin_flip_hits_both_sides() {
        let mut rng = DiceRng::new(3);
        let flips: Vec<_> = (0..100).map(|_| rng.coin_flip()).collect();
        assert!(flips.contains(&Player::White));
        assert!(flips.contains(&Player::Black));
    }
}
