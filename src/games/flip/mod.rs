//! Flip, a coin-flipping test game: lead by two heads to win.

mod bots;
mod game;

pub use bots::FlipBot;
pub use game::{Flip, FlipBuilder, FlipMove, INFO, LEAD};
