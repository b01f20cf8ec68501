//! Playing cards.
//!
//! Ranks run `A23456789TJQK` (1 through 13), suits `CDHS`. Cards parse from
//! text like `5d`, `TS` or `10h` and display as rank then suit, `5D`.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};

/// Rank characters in order, ace low.
pub const RANKS: &str = "A23456789TJQK";

/// Suit characters in order.
pub const SUITS: &str = "CDHS";

/// Card suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    /// Position in `SUITS`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Card colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// Create a card. `rank` is 1 (ace) through 13 (king).
    pub fn new(rank: u8, suit: Suit) -> Result<Self> {
        if !(1..=13).contains(&rank) {
            return Err(GameError::Parse(format!("rank {rank}")));
        }
        Ok(Self { rank, suit })
    }

    /// Every card, suit by suit, ace to king.
    pub fn all() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| (1..=13).map(move |rank| Card { rank, suit }))
    }

    /// Parse text like `5d`, `TS`, `10h` or `ah`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let bad = || GameError::Parse(text.to_string());
        let mut chars = text.chars();
        let suit = chars.next_back().and_then(Suit::from_letter).ok_or_else(bad)?;
        let rank_text = chars.as_str().to_ascii_uppercase();
        let rank = match rank_text.as_str() {
            "10" => 10,
            _ if rank_text.len() == 1 => {
                let index = RANKS.find(rank_text.as_str()).ok_or_else(bad)?;
                index as u8 + 1
            }
            _ => return Err(bad()),
        };
        Ok(Self { rank, suit })
    }

    /// 1 (ace) through 13 (king).
    #[must_use]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[must_use]
    pub fn rank_char(&self) -> char {
        RANKS.as_bytes()[usize::from(self.rank - 1)] as char
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// True if this card is exactly one rank above `other`.
    ///
    /// With `wrap`, an ace is above a king.
    #[must_use]
    pub fn is_above(&self, other: &Card, wrap: bool) -> bool {
        self.rank == other.rank + 1 || (wrap && self.rank == 1 && other.rank == 13)
    }

    /// True if this card is exactly one rank below `other`.
    #[must_use]
    pub fn is_below(&self, other: &Card, wrap: bool) -> bool {
        other.is_above(self, wrap)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit.letter())
    }
}

impl std::str::FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Card::parse("5d").unwrap(), Card::new(5, Suit::Diamonds).unwrap());
        assert_eq!(Card::parse("TS").unwrap(), Card::new(10, Suit::Spades).unwrap());
        assert_eq!(Card::parse("10h").unwrap(), Card::new(10, Suit::Hearts).unwrap());
        assert_eq!(Card::parse("ac").unwrap().rank(), 1);
        assert!(Card::parse("1c").is_err());
        assert!(Card::parse("5x").is_err());
        assert!(Card::parse("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::parse("10h").unwrap().to_string(), "TH");
        assert_eq!(Card::parse("kc").unwrap().to_string(), "KC");
    }

    #[test]
    fn test_color() {
        assert_eq!(Card::parse("5d").unwrap().color(), Color::Red);
        assert_eq!(Card::parse("5s").unwrap().color(), Color::Black);
    }

    #[test]
    fn test_above_below() {
        let ace = Card::parse("AS").unwrap();
        let two = Card::parse("2H").unwrap();
        let king = Card::parse("KD").unwrap();
        assert!(two.is_above(&ace, false));
        assert!(ace.is_below(&two, false));
        assert!(!ace.is_above(&king, false));
        assert!(ace.is_above(&king, true));
        assert!(king.is_below(&ace, true));
    }
}
