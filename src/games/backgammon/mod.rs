//! Backgammon.
//!
//! The position is a packed array of 24 signed counts plus bar and
//! borne-off totals, so it is `Copy` and hashes cheaply. Move generation
//! enumerates every order of the dice and deduplicates plays by the
//! position they reach.
//!
//! ```
//! use parlor::games::backgammon::{legal_plays, dice_for_roll, Position, Side};
//!
//! let plays = legal_plays(&Position::default(), Side::O, &dice_for_roll(6, 5));
//! assert_eq!(plays.len(), 7);
//! ```

mod board;
mod bots;
mod game;
mod moves;

pub use board::{Position, Side, Spot, Step, CHECKERS, HOME, POINTS};
pub use bots::{evaluate, BackgammonBot, Weights};
pub use game::{Backgammon, BackgammonBuilder, BackgammonMove, INFO};
pub use moves::{dice_for_roll, legal_plays, sequences, Dice, Play, Steps};
