//! Groups of dice rolled together.

use serde::{Deserialize, Serialize};

use super::die::{Die, Roll};
use crate::core::{oxford, GameError, GameRng, Result};

/// A set of dice, some of which may be held.
///
/// Held dice keep their values through `roll` and display with a `*`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    dice: Vec<Die>,
}

impl Pool {
    /// Create and roll one die per entry of `sides`.
    pub fn new(sides: &[u32], rng: &mut GameRng) -> Self {
        Self { dice: sides.iter().map(|&s| Die::new(s, rng)).collect() }
    }

    /// Roll every unheld die.
    pub fn roll(&mut self, rng: &mut GameRng) {
        for die in self.dice.iter_mut().filter(|d| !d.held) {
            // Unheld dice always roll.
            let _ = die.roll(rng);
        }
    }

    /// Roll the die at `index`, held or not.
    pub fn roll_index(&mut self, index: usize, rng: &mut GameRng) -> Result<u32> {
        let die = self
            .dice
            .get_mut(index)
            .ok_or_else(|| GameError::illegal(format!("There is no die number {}.", index + 1)))?;
        die.held = false;
        die.roll(rng)
    }

    /// Hold one unheld die showing each of `values`.
    ///
    /// Either every value is held or nothing changes.
    pub fn hold(&mut self, values: &[u32]) -> Result<()> {
        let mut chosen = Vec::with_capacity(values.len());
        for &value in values {
            let index = self
                .dice
                .iter()
                .enumerate()
                .position(|(i, d)| !d.held && d.value() == value && !chosen.contains(&i))
                .ok_or_else(|| GameError::illegal(format!("There is no unheld {value} to hold.")))?;
            chosen.push(index);
        }
        for index in chosen {
            self.dice[index].held = true;
        }
        Ok(())
    }

    /// Release every held die.
    pub fn release(&mut self) {
        for die in &mut self.dice {
            die.held = false;
        }
    }

    /// How many dice show `value`.
    #[must_use]
    pub fn count(&self, value: u32) -> usize {
        self.dice.iter().filter(|d| **d == value).count()
    }

    /// How many dice are held.
    #[must_use]
    pub fn held(&self) -> usize {
        self.dice.iter().filter(|d| d.held).count()
    }

    /// The face of each die, in order.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.dice.iter().map(Roll::value).collect()
    }

    /// Force the faces showing (for setting up positions).
    pub fn set_values(&mut self, values: &[u32]) -> Result<()> {
        if values.len() != self.dice.len() {
            return Err(GameError::illegal(format!("Expected {} values.", self.dice.len())));
        }
        for (die, &value) in self.dice.iter_mut().zip(values) {
            die.set(value)?;
        }
        Ok(())
    }

    /// Sort the dice by value.
    pub fn sort(&mut self) {
        self.dice.sort();
    }

    /// Sort the dice by value, highest first.
    pub fn sort_descending(&mut self) {
        self.dice.sort_by(|a, b| b.cmp(a));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self
            .dice
            .iter()
            .map(|d| if d.held { format!("{d}*") } else { d.to_string() })
            .collect();
        f.write_str(&oxford(&faces))
    }
}

/// Dice whose combined rolls are dealt like dominoes.
///
/// Every possible combination of faces is put in a population; each roll
/// takes one combination out, and the population refills when empty. Over
/// 36 rolls of two d6, every pair comes up exactly once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DominoPool {
    sides: Vec<u32>,
    values: Vec<u32>,
    population: Vec<Vec<u32>>,
}

impl DominoPool {
    pub fn new(sides: &[u32], rng: &mut GameRng) -> Self {
        let mut pool = Self { sides: sides.to_vec(), values: Vec::new(), population: Vec::new() };
        pool.roll(rng);
        pool
    }

    /// Every combination of faces, in lexicographic order.
    #[must_use]
    pub fn possible(&self) -> Vec<Vec<u32>> {
        self.sides.iter().fold(vec![Vec::new()], |combos, &sides| {
            combos
                .iter()
                .flat_map(|combo| {
                    (1..=sides).map(move |face| {
                        let mut next = combo.clone();
                        next.push(face);
                        next
                    })
                })
                .collect()
        })
    }

    /// Refill the population.
    pub fn reset(&mut self) {
        self.population = self.possible();
    }

    /// Draw the next combination.
    pub fn roll(&mut self, rng: &mut GameRng) -> &[u32] {
        if self.population.is_empty() {
            self.reset();
        }
        let index = rng.gen_range_usize(0..self.population.len());
        self.values = self.population.swap_remove(index);
        &self.values
    }

    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Combinations left before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.population.len()
    }
}

impl std::fmt::Display for DominoPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&oxford(&self.values))
    }
}
