//! Mate: chess-piece dice captured across a row of five columns.

mod bots;
mod game;

pub use bots::{MateBot, MateStyle};
pub use game::{Mate, MateBuilder, MateMove, Piece, COLUMNS, INFO, TARGET};
