//! Dealers: the steps that lay out a new deal.
//!
//! A game lists its dealers in order; each takes cards off the top of the
//! shuffled deck. `StockAll` normally comes last.

use serde::{Deserialize, Serialize};

use super::table::{Location, Table};
use crate::cards::{Card, Deck};
use crate::core::{GameError, Result};

/// One step of laying out the cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dealer {
    /// A triangle: pile n gets n cards, only the top one face up.
    Klondike,
    /// `count` cards to the first reserve pile, only the top face up unless
    /// `visible`.
    ReserveN { count: usize, visible: bool },
    /// One card to its foundation; every foundation starts on its rank.
    StartFoundation,
    /// Every card of `rank` to the foundations.
    RankFoundations { rank: u8 },
    /// One card face up on each tableau pile.
    Tableau1,
    /// Five cards for the player to choose a foundation starter from.
    Selective,
    /// Everything left to the stock, face down.
    StockAll,
}

fn next(deck: &mut Deck) -> Result<Card> {
    deck.deal_top().ok_or_else(|| GameError::illegal("The deck ran out during the deal."))
}

impl Dealer {
    pub fn deal(self, table: &mut Table, deck: &mut Deck) -> Result<()> {
        match self {
            Dealer::Klondike => {
                let piles = table.tableau.len();
                for row in 0..piles {
                    for pile in row..piles {
                        table.deal_to(Location::Tableau(pile), next(deck)?, pile == row);
                    }
                }
            }
            Dealer::ReserveN { count, visible } => {
                for index in 0..count {
                    table.deal_to(Location::Reserve(0), next(deck)?, visible || index + 1 == count);
                }
            }
            Dealer::StartFoundation => {
                let card = next(deck)?;
                table.base_rank = Some(card.rank());
                table.deal_to(Location::foundation_for(card.suit()), card, true);
            }
            Dealer::RankFoundations { rank } => {
                table.base_rank = Some(rank);
                let starters: Vec<Card> = deck.cards().iter().copied().filter(|c| c.rank() == rank).collect();
                for card in starters {
                    deck.force(card)?;
                    let card = next(deck)?;
                    table.deal_to(Location::foundation_for(card.suit()), card, true);
                }
            }
            Dealer::Tableau1 => {
                for pile in 0..table.tableau.len() {
                    table.deal_to(Location::Tableau(pile), next(deck)?, true);
                }
            }
            Dealer::Selective => {
                let count = table.tableau.len() + 1;
                for _ in 0..count {
                    table.selection.push(next(deck)?);
                }
            }
            Dealer::StockAll => {
                while let Some(card) = deck.deal_top() {
                    table.deal_to(Location::Stock, card, false);
                }
            }
        }
        Ok(())
    }
}
