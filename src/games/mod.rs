//! The games in the library.
//!
//! Each game lives in its own module with a builder, its `Game` impl, and its
//! bots. `catalogue` lists what can be played; `find` looks a game up by any
//! of its names.

pub mod backgammon;
pub mod canfield;
pub mod flip;
pub mod grail_quest;
pub mod klondike;
pub mod mate;
pub mod ninety_nine;
pub mod pig;
pub mod solitaire;
pub mod sorter;
pub mod yacht;

use crate::core::{Category, GameInfo};

/// Every playable game, in listing order.
#[must_use]
pub fn catalogue() -> [&'static GameInfo; 10] {
    [
        &backgammon::INFO,
        &canfield::INFO,
        &klondike::INFO,
        &mate::INFO,
        &ninety_nine::INFO,
        &pig::INFO,
        &yacht::INFO,
        &grail_quest::INFO,
        &flip::INFO,
        &sorter::INFO,
    ]
}

/// Look a game up by name or alias.
#[must_use]
pub fn find(name: &str) -> Option<&'static GameInfo> {
    catalogue().into_iter().find(|info| info.matches(name))
}

/// Games listed under `category`.
#[must_use]
pub fn by_category(category: Category) -> Vec<&'static GameInfo> {
    catalogue().into_iter().filter(|info| info.categories.contains(&category)).collect()
}
