//! Single dice.
//!
//! `Die` is a fair die. `ShuffleDie` deals its faces out of a shuffled
//! population, so over `sides * repeats` rolls every face comes up exactly
//! `repeats` times.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, Result};

/// Something that can be rolled.
pub trait Roll: std::fmt::Debug {
    /// Roll and return the new value.
    fn roll(&mut self, rng: &mut GameRng) -> Result<u32>;

    /// The face showing.
    fn value(&self) -> u32;

    /// Number of faces.
    fn sides(&self) -> u32;
}

/// A fair die.
///
/// Dice order and compare by value, and compare directly with integers.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Die {
    sides: u32,
    value: u32,
    /// Held dice refuse to roll.
    pub held: bool,
}

impl Die {
    /// Create a die and give it an initial roll.
    pub fn new(sides: u32, rng: &mut GameRng) -> Self {
        Self { sides, value: rng.roll(sides), held: false }
    }

    /// Create a die showing a specific face.
    #[must_use]
    pub fn showing(sides: u32, value: u32) -> Self {
        Self { sides, value, held: false }
    }

    /// Force the face showing (for setting up positions).
    pub fn set(&mut self, value: u32) -> Result<()> {
        if value == 0 || value > self.sides {
            return Err(GameError::illegal(format!("A d{} cannot show {}.", self.sides, value)));
        }
        self.value = value;
        Ok(())
    }
}

impl Roll for Die {
    fn roll(&mut self, rng: &mut GameRng) -> Result<u32> {
        if self.held {
            return Err(GameError::illegal("Held dice cannot be rolled."));
        }
        self.value = rng.roll(self.sides);
        Ok(self.value)
    }

    fn value(&self) -> u32 {
        self.value
    }

    fn sides(&self) -> u32 {
        self.sides
    }
}

impl PartialEq for Die {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Die {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Die {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialEq<u32> for Die {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

impl PartialOrd<u32> for Die {
    fn partial_cmp(&self, other: &u32) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(other)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A die that samples faces without replacement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShuffleDie {
    sides: u32,
    value: u32,
    /// Copies of each face per refill.
    pub repeats: u32,
    population: Vec<u32>,
}

impl ShuffleDie {
    /// Create a shuffle die and give it an initial roll.
    pub fn new(sides: u32, repeats: u32, rng: &mut GameRng) -> Self {
        let mut die = Self { sides, value: 1, repeats: repeats.max(1), population: Vec::new() };
        die.reset();
        die.value = die.draw(rng);
        die
    }

    /// Refill the population with every face `repeats` times.
    pub fn reset(&mut self) {
        self.population = (1..=self.sides)
            .flat_map(|face| std::iter::repeat(face).take(self.repeats as usize))
            .collect();
    }

    /// Faces left before the next refill.
    #[must_use]
    pub fn population(&self) -> &[u32] {
        &self.population
    }

    fn draw(&mut self, rng: &mut GameRng) -> u32 {
        if self.population.is_empty() {
            self.reset();
        }
        let index = rng.gen_range_usize(0..self.population.len());
        self.population.swap_remove(index)
    }
}

impl Roll for ShuffleDie {
    fn roll(&mut self, rng: &mut GameRng) -> Result<u32> {
        self.value = self.draw(rng);
        Ok(self.value)
    }

    fn value(&self) -> u32 {
        self.value
    }

    fn sides(&self) -> u32 {
        self.sides
    }
}

impl std::fmt::Display for ShuffleDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
