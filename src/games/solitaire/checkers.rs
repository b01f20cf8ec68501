//! Rule predicates for solitaire moves.
//!
//! A game is configured with lists of checkers for each kind of move. Every
//! checker in the list must pass; the first failure's message is shown to the
//! player.
//!
//! | Move    | Checkers                      |
//! |---------|-------------------------------|
//! | `build` | build rules, then pair rules  |
//! | `lane`  | lane rules                    |
//! | `sort`  | sort rules                    |

use serde::{Deserialize, Serialize};

use super::table::{Location, Table};
use crate::cards::Card;
use crate::core::{GameError, Result};

/// A card about to move, with the cards stacked on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mover {
    pub card: Card,
    pub from: Location,
    /// Index of `card` in its pile.
    pub index: usize,
    /// Number of cards moving, `card` included.
    pub count: usize,
}

/// Restrictions on what may be built onto the tableau.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildRule {
    /// Only single cards move.
    One,
    /// Tableau stacks only move whole.
    Whole,
    /// Only cards from the reserve or waste.
    Reserve,
}

impl BuildRule {
    pub fn check(self, table: &Table, mover: &Mover) -> Result<()> {
        match self {
            BuildRule::One if mover.count > 1 => Err(GameError::illegal("You may only move one card at a time.")),
            BuildRule::Whole => {
                let Location::Tableau(_) = mover.from else { return Ok(()) };
                let whole = table
                    .pile(mover.from)
                    .map_or(true, |pile| mover.index == 0 || pile.get(mover.index - 1).is_some_and(|p| !p.up));
                if whole {
                    Ok(())
                } else {
                    Err(GameError::illegal("You may only move complete stacks."))
                }
            }
            BuildRule::Reserve if !matches!(mover.from, Location::Reserve(_) | Location::Waste) => {
                Err(GameError::illegal("You may only build cards from the reserve or the waste."))
            }
            _ => Ok(()),
        }
    }
}

/// How a moving card must relate to the card it is built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairRule {
    /// One rank lower.
    Down,
    /// Opposite colour.
    AltColor,
    /// Same suit.
    Suit,
}

impl PairRule {
    pub fn check(self, mover: Card, target: Card, wrap: bool) -> Result<()> {
        let ok = match self {
            PairRule::Down => mover.is_below(&target, wrap),
            PairRule::AltColor => mover.color() != target.color(),
            PairRule::Suit => mover.suit() == target.suit(),
        };
        if ok {
            return Ok(());
        }
        let message = match self {
            PairRule::Down => format!("The {mover} is not one rank lower than the {target}."),
            PairRule::AltColor => format!("The {mover} is not the opposite color of the {target}."),
            PairRule::Suit => format!("The {mover} is not the same suit as the {target}."),
        };
        Err(GameError::IllegalMove(message))
    }
}

/// Restrictions on filling an empty tableau pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneRule {
    /// Only kings, or stacks starting with a king.
    King,
    /// Only from the reserve, or the waste once the reserve is empty.
    Reserve,
    /// Only single cards.
    One,
}

impl LaneRule {
    pub fn check(self, table: &Table, mover: &Mover) -> Result<()> {
        match self {
            LaneRule::King if mover.card.rank() != 13 => {
                Err(GameError::illegal("You can only move kings to an empty lane."))
            }
            LaneRule::Reserve => {
                let reserve_empty = table.reserve().iter().all(|pile| pile.is_empty());
                match mover.from {
                    Location::Reserve(_) => Ok(()),
                    Location::Waste if reserve_empty => Ok(()),
                    _ if reserve_empty => Err(GameError::illegal(
                        "You can only fill empty lanes from the waste.",
                    )),
                    _ => Err(GameError::illegal("You can only fill empty lanes from the reserve.")),
                }
            }
            LaneRule::One if mover.count > 1 => {
                Err(GameError::illegal("You can only move one card to an empty lane."))
            }
            _ => Ok(()),
        }
    }
}

/// Restrictions on sorting a card to its foundation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortRule {
    /// Empty foundations start with an ace.
    Ace,
    /// Empty foundations start with the deal's base rank.
    Rank,
    /// Foundations build up in suit.
    Up,
}

impl SortRule {
    /// Check `card` against the top of its foundation.
    pub fn check(self, table: &Table, card: Card, top: Option<Card>, wrap: bool) -> Result<()> {
        match (self, top) {
            (SortRule::Ace, None) if card.rank() != 1 => {
                Err(GameError::illegal("Only aces can be sorted to empty foundations."))
            }
            (SortRule::Rank, None) => match table.base_rank() {
                Some(rank) if rank != card.rank() => Err(GameError::illegal(format!(
                    "Only {} cards can be sorted to empty foundations.",
                    crate::cards::RANKS.as_bytes()[usize::from(rank - 1)] as char
                ))),
                _ => Ok(()),
            },
            (SortRule::Up, Some(top)) if !(card.suit() == top.suit() && card.is_above(&top, wrap)) => {
                Err(GameError::illegal(format!("The {card} cannot be sorted onto the {top}.")))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> Card {
        Card::parse(text).unwrap()
    }

    fn mover(card: Card, from: Location, index: usize, count: usize) -> Mover {
        Mover { card, from, index, count }
    }

    #[test]
    fn test_pair_rules() {
        assert!(PairRule::Down.check(card("5H"), card("6S"), false).is_ok());
        assert!(PairRule::Down.check(card("5H"), card("7S"), false).is_err());
        assert!(PairRule::Down.check(card("KH"), card("AS"), true).is_ok());
        assert!(PairRule::Down.check(card("KH"), card("AS"), false).is_err());
        assert!(PairRule::AltColor.check(card("5H"), card("6S"), false).is_ok());
        assert!(PairRule::AltColor.check(card("5H"), card("6D"), false).is_err());
        assert!(PairRule::Suit.check(card("5H"), card("6H"), false).is_ok());
        assert!(PairRule::Suit.check(card("5H"), card("6D"), false).is_err());
    }

    #[test]
    fn test_build_rules() {
        let mut table = Table::new(2, 1, 0);
        table.deal_to(Location::Tableau(0), card("9C"), false);
        table.deal_to(Location::Tableau(0), card("8D"), true);
        table.deal_to(Location::Tableau(0), card("7S"), true);

        let whole = mover(card("8D"), Location::Tableau(0), 1, 2);
        let part = mover(card("7S"), Location::Tableau(0), 2, 1);
        assert!(BuildRule::Whole.check(&table, &whole).is_ok());
        assert!(BuildRule::Whole.check(&table, &part).is_err());
        assert!(BuildRule::One.check(&table, &whole).is_err());
        assert!(BuildRule::One.check(&table, &part).is_ok());
        assert!(BuildRule::Reserve.check(&table, &part).is_err());
        let waste = mover(card("2C"), Location::Waste, 0, 1);
        assert!(BuildRule::Reserve.check(&table, &waste).is_ok());
        assert!(BuildRule::Whole.check(&table, &waste).is_ok());
    }

    #[test]
    fn test_lane_rules() {
        let mut table = Table::new(2, 1, 0);
        table.deal_to(Location::Reserve(0), card("4C"), true);
        let king = mover(card("KD"), Location::Waste, 0, 1);
        let queen = mover(card("QD"), Location::Reserve(0), 0, 1);
        assert!(LaneRule::King.check(&table, &king).is_ok());
        assert!(LaneRule::King.check(&table, &queen).is_err());
        assert!(LaneRule::Reserve.check(&table, &queen).is_ok());
        assert!(LaneRule::Reserve.check(&table, &king).is_err());

        let empty = Table::new(2, 1, 0);
        assert!(LaneRule::Reserve.check(&empty, &king).is_ok());
        let tableau = mover(card("KD"), Location::Tableau(1), 0, 3);
        assert!(LaneRule::Reserve.check(&empty, &tableau).is_err());
        assert!(LaneRule::One.check(&empty, &tableau).is_err());
    }

    #[test]
    fn test_sort_rules() {
        let mut table = Table::new(1, 0, 0);
        assert!(SortRule::Ace.check(&table, card("AH"), None, false).is_ok());
        assert!(SortRule::Ace.check(&table, card("2H"), None, false).is_err());
        assert!(SortRule::Up.check(&table, card("2H"), Some(card("AH")), false).is_ok());
        assert!(SortRule::Up.check(&table, card("2H"), Some(card("AD")), false).is_err());
        assert!(SortRule::Up.check(&table, card("AH"), Some(card("KH")), true).is_ok());
        assert!(SortRule::Up.check(&table, card("AH"), Some(card("KH")), false).is_err());

        table.base_rank = Some(7);
        assert!(SortRule::Rank.check(&table, card("7C"), None, true).is_ok());
        assert!(SortRule::Rank.check(&table, card("AC"), None, true).is_err());
    }
}
