//! Ninety-Nine: the accumulating card game, not the trick-taking one.

mod bots;
mod game;

pub use bots::Bot99;
pub use game::{NinetyNine, NinetyNineBuilder, NinetyNineMove, NinetyNineOptions, INFO, LIMIT};
