//! Klondike setup.

use serde::{Deserialize, Serialize};

use crate::core::{Category, GameInfo, Result};
use crate::games::solitaire::{Dealer, LaneRule, PairRule, Solitaire, SolitaireRules, SortRule};

pub const INFO: GameInfo = GameInfo {
    name: "Klondike",
    aka: &["Seven Up", "Sevens", "Klon"],
    categories: &[Category::Solitaire],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Traditional
Bot Design: Craig O'Brien
";

const RULES: &str = "
Seven tableau piles are dealt: one card on the first, two on the second, and
so on up to seven on the last. Only the top card of each pile is face up. The
rest of the cards form the stock.

The foundations are built up in suit from ace to king. The tableau is built
down in alternating colors. Any face-up card may be moved along with the cards
on top of it. Only kings may be moved to empty tableau piles. Cards are turned
from the stock three at a time, with unlimited passes through the stock.

OPTIONS:
switch-one: Once, you may switch to turning one card at a time for one last
    pass through the stock.
turn-one: Cards are turned from the stock one at a time.
";

/// Klondike rule options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlondikeOptions {
    /// Turn one card at a time.
    pub turn_one: bool,
    /// Allow one switch to turning single cards.
    pub switch_one: bool,
}

impl KlondikeOptions {
    /// The solitaire rules these options describe.
    #[must_use]
    pub fn rules(self) -> SolitaireRules {
        SolitaireRules {
            build: Vec::new(),
            pair: vec![PairRule::Down, PairRule::AltColor],
            lane: vec![LaneRule::King],
            sort: vec![SortRule::Ace, SortRule::Up],
            dealers: vec![Dealer::Klondike, Dealer::StockAll],
            tableau: 7,
            turn_count: if self.turn_one { 1 } else { 3 },
            switch_one: self.switch_one,
            ..SolitaireRules::default()
        }
    }
}

/// Builder for a Klondike deal.
pub struct KlondikeBuilder {
    name: String,
    options: KlondikeOptions,
}

impl Default for KlondikeBuilder {
    fn default() -> Self {
        Self { name: "Player".to_string(), options: KlondikeOptions::default() }
    }
}

impl KlondikeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn options(mut self, options: KlondikeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn turn_one(mut self) -> Self {
        self.options.turn_one = true;
        self
    }

    pub fn switch_one(mut self) -> Self {
        self.options.switch_one = true;
        self
    }

    /// Deal number `deal`.
    pub fn build(self, deal: u64) -> Result<Solitaire> {
        Solitaire::new(&INFO, self.name, self.options.rules(), deal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::solitaire::{Location, SolitaireMove};
    use crate::rules::Game;

    const P0: PlayerId = PlayerId::new(0);

    #[test]
    fn test_layout() {
        let game = KlondikeBuilder::new().build(1).unwrap();
        let table = game.table();
        assert_eq!(table.tableau().len(), 7);
        assert_eq!(table.stock_len(), 24);
        assert_eq!(table.turn_count(), 3);
        assert!(table.tableau().iter().all(|pile| pile.last().is_some_and(|p| p.up)));
    }

    #[test]
    fn test_turn_one() {
        let mut game = KlondikeBuilder::new().turn_one().build(1).unwrap();
        game.apply_move(P0, SolitaireMove::Turn).unwrap();
        assert_eq!(game.table().waste().len(), 1);
    }

    #[test]
    fn test_switch_one_once() {
        let mut plain = KlondikeBuilder::new().build(4).unwrap();
        assert!(plain.apply_move(P0, SolitaireMove::Switch).is_err());

        let mut game = KlondikeBuilder::new().switch_one().build(4).unwrap();
        game.apply_move(P0, SolitaireMove::Turn).unwrap();
        game.apply_move(P0, SolitaireMove::Switch).unwrap();
        let table = game.table();
        assert_eq!(table.turn_count(), 1);
        assert_eq!(table.stock_len(), 24);
        assert!(table.waste().is_empty());
        // The stock is in its original order again.
        let fresh = KlondikeBuilder::new().build(4).unwrap();
        assert_eq!(table.pile(Location::Stock), fresh.table().pile(Location::Stock));
        assert!(game.apply_move(P0, SolitaireMove::Switch).is_err());

        for _ in 0..24 {
            game.apply_move(P0, SolitaireMove::Turn).unwrap();
        }
        assert!(game.apply_move(P0, SolitaireMove::Turn).is_err());
    }

    #[test]
    fn test_info() {
        assert!(INFO.matches("sevens"));
        assert!(INFO.rules.contains("kings"));
    }
}
