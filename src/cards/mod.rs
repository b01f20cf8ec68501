//! Standard playing cards.
//!
//! ## Key Types
//!
//! - `Card`: rank and suit, parsed from text like `5d` or `10h`
//! - `Deck`: 52 cards plus discards, shuffled through `GameRng`
//! - `Hand`: the cards one player holds

pub mod card;
pub mod deck;

pub use card::{Card, Color, Suit, RANKS, SUITS};
pub use deck::{Deck, Hand};
