//! Solitaire machinery shared by Klondike and Canfield.
//!
//! A deal is a [`Table`] of piles plus a [`SolitaireRules`] describing how
//! cards are dealt and which moves are allowed. The games built on it only
//! pick rules.

mod checkers;
mod dealers;
mod game;
mod table;

pub use checkers::{BuildRule, LaneRule, Mover, PairRule, SortRule};
pub use dealers::Dealer;
pub use game::{Solitaire, SolitaireMove, SolitaireRules, DECK_SIZE};
pub use table::{Location, Pile, Placed, Table};
