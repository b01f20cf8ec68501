//! Decks and hands.
//!
//! The top of the deck is the end of its card vector. Discards are kept
//! apart and shuffled back in when the deck runs out.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::{GameError, GameRng, Result};

/// A standard 52-card deck with a discard pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    discards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A fresh deck in suit-then-rank order, unshuffled.
    #[must_use]
    pub fn new() -> Self {
        Self { cards: Card::all().collect(), discards: Vec::new() }
    }

    /// Gather the discards and shuffle everything.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        self.cards.append(&mut self.discards);
        rng.shuffle(&mut self.cards);
    }

    /// Deal the top card, reshuffling the discards if the deck is empty.
    pub fn deal(&mut self, rng: &mut GameRng) -> Result<Card> {
        if self.cards.is_empty() {
            if self.discards.is_empty() {
                return Err(GameError::illegal("The deck is out of cards."));
            }
            tracing::debug!(cards = self.discards.len(), "reshuffling discards");
            self.shuffle(rng);
        }
        self.cards.pop().ok_or_else(|| GameError::illegal("The deck is out of cards."))
    }

    /// Deal the top card without reshuffling.
    pub fn deal_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn discard(&mut self, card: Card) {
        self.discards.push(card);
    }

    /// Position of `card` in the undealt cards, counted from the bottom.
    #[must_use]
    pub fn find(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    /// Move `card` to the top so it is dealt next.
    pub fn force(&mut self, card: Card) -> Result<()> {
        let index = self
            .find(card)
            .ok_or_else(|| GameError::illegal(format!("{card} is not in the deck.")))?;
        let card = self.cards.remove(index);
        self.cards.push(card);
        Ok(())
    }

    /// Undealt cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The next `count` cards to be dealt, next first.
    #[must_use]
    pub fn peek(&self, count: usize) -> Vec<Card> {
        self.cards.iter().rev().take(count).copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn discards(&self) -> &[Card] {
        &self.discards
    }
}

/// The cards one player holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the top card of `deck`.
    pub fn draw(&mut self, deck: &mut Deck, rng: &mut GameRng) -> Result<Card> {
        let card = deck.deal(rng)?;
        self.cards.push(card);
        Ok(card)
    }

    /// Remove `card` from the hand without discarding it.
    pub fn remove(&mut self, card: Card) -> Result<Card> {
        let index = self
            .cards
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| GameError::illegal(format!("You do not have the {card}.")))?;
        Ok(self.cards.remove(index))
    }

    /// Move `card` from the hand to the deck's discards.
    pub fn discard(&mut self, card: Card, deck: &mut Deck) -> Result<()> {
        let card = self.remove(card)?;
        deck.discard(card);
        Ok(())
    }

    /// Discard the whole hand.
    pub fn discard_all(&mut self, deck: &mut Deck) {
        for card in self.cards.drain(..) {
            deck.discard(card);
        }
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        f.write_str(&cards.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_new_deck_has_52_unique() {
        let deck = Deck::new();
        let unique: FxHashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(deck.len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle(&mut GameRng::new(7));
        b.shuffle(&mut GameRng::new(7));
        assert_eq!(a, b);
        assert_ne!(a, Deck::new());
    }

    #[test]
    fn test_force_deals_next() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        let queen = Card::parse("QH").unwrap();
        deck.force(queen).unwrap();
        assert_eq!(deck.deal(&mut rng).unwrap(), queen);
        assert!(deck.force(queen).is_err());
    }

    #[test]
    fn test_reshuffles_discards() {
        let mut rng = GameRng::new(2);
        let mut deck = Deck::new();
        let mut hand = Hand::new();
        for _ in 0..52 {
            hand.draw(&mut deck, &mut rng).unwrap();
        }
        assert!(deck.is_empty());
        assert!(deck.deal(&mut rng).is_err());

        hand.discard_all(&mut deck);
        assert_eq!(deck.discards().len(), 52);
        assert!(deck.deal(&mut rng).is_ok());
        assert_eq!(deck.len(), 51);
        assert!(deck.discards().is_empty());
    }

    #[test]
    fn test_hand_discard() {
        let mut rng = GameRng::new(3);
        let mut deck = Deck::new();
        let mut hand = Hand::new();
        let card = hand.draw(&mut deck, &mut rng).unwrap();
        assert!(hand.contains(card));
        hand.discard(card, &mut deck).unwrap();
        assert!(!hand.contains(card));
        assert!(hand.discard(card, &mut deck).is_err());
        assert_eq!(deck.discards(), &[card]);
    }
}
