//! Deterministic random number generation for dice, decks and bots.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls and deals
//! - **Deal numbers**: A solitaire deal number is just a seed
//! - **Serializable**: O(1) state capture and restore
//! - **Context streams**: Independent sequences for different purposes
//!
//! ```
//! use parlor::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll(6);
//! assert!((1..=6).contains(&roll));
//!
//! // The same seed always rolls the same way.
//! let mut again = GameRng::new(42);
//! assert_eq!(again.roll(6), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG shared by every game.
///
/// Uses ChaCha8 for speed while keeping a reproducible, seekable stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// Keeps bot decisions from perturbing the dice: the same context always
    /// produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Roll a die with `sides` faces, returning 1..=sides.
    pub fn roll(&mut self, sides: u32) -> u32 {
        self.inner.gen_range(1..=sides)
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i64>) -> i64 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a float in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_deal_number_same_deck() {
        let mut first: Vec<u8> = (1..=52).collect();
        let mut second = first.clone();
        GameRng::new(11_982).shuffle(&mut first);
        GameRng::new(11_982).shuffle(&mut second);
        assert_eq!(first, second);
        let mut other: Vec<u8> = (1..=52).collect();
        GameRng::new(11_983).shuffle(&mut other);
        assert_ne!(first, other);
    }

    #[test]
    fn test_dice_cover_every_face() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let roll = rng.roll(6);
            assert!((1..=6).contains(&roll));
            seen[roll as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_bot_stream_leaves_dice_alone() {
        let table = GameRng::new(42);
        let mut dice = table.clone();
        let mut bots = table.for_context("bots");
        let mut quiet = table.clone();
        for _ in 0..5 {
            bots.gen_f64();
        }
        let rolls: Vec<u32> = (0..10).map(|_| dice.roll(6)).collect();
        let untouched: Vec<u32> = (0..10).map(|_| quiet.roll(6)).collect();
        assert_eq!(rolls, untouched);
        assert_ne!(table.for_context("bots").seed(), table.for_context("session").seed());
    }

    #[test]
    fn test_probability_is_clamped() {
        let mut rng = GameRng::new(3);
        assert!(rng.gen_bool(1.5));
        assert!(!rng.gen_bool(-0.5));
        assert!(rng.choose::<u8>(&[]).is_none());
    }

    #[test]
    fn test_resume_mid_game() {
        let mut rng = GameRng::new(932);
        for _ in 0..37 {
            rng.roll(10);
        }
        let saved = rng.state();
        let expected: Vec<i64> = (0..8).map(|_| rng.gen_range(50..101)).collect();
        let mut resumed = GameRng::from_state(&saved);
        let actual: Vec<i64> = (0..8).map(|_| resumed.gen_range(50..101)).collect();
        assert_eq!(actual, expected);
        assert_eq!(resumed.seed(), 932);
    }
}
