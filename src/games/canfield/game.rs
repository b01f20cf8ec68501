//! Canfield setup and its variants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Category, GameError, GameInfo, Result};
use crate::games::solitaire::{BuildRule, Dealer, LaneRule, PairRule, Solitaire, SolitaireRules, SortRule};

pub const INFO: GameInfo = GameInfo {
    name: "Canfield",
    aka: &["Demon", "Canf"],
    categories: &[Category::Solitaire],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Richard A. Canfield
";

const RULES: &str = "
The deal is four cards to four tableau piles, one card to start one of the
foundations, thirteen cards to a reserve, and the rest of the cards to the
stock.

Foundation piles are built up in rank by suit from whatever rank was put in
the first foundation pile, going from king to ace if necessary. Tableau piles
are built down in rank by alternating color. The top card of the reserve is
available for building, and you may turn over the stock to the waste three
cards at a time and use the top card of the waste. Empty piles on the tableau
may only be filled from the reserve. If the reserve is empty, cards from the
waste may be used to fill empty spots on the tableau.

Stacks on the tableau may be moved, but only if the whole stack is moved.

VARIANTS:
chameleon: A 12 card reserve and three tableau piles. Tableau building is
    down regardless of color, and partial stacks may be moved. The stock is
    turned one card at a time, with only one pass through the stock.
rainbow: Tableau building is down regardless of color.
rainbow-one: As rainbow, but the stock is turned one card at a time, with two
    passes through the stock.
selective: You are given five cards, and choose one to go on the foundations.
    The rest start the tableau piles.
storehouse: The foundations start filled with twos. The stock is turned one
    card at a time, with two passes through the stock. The tableau is built
    down by suit.
";

/// The Canfield variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanfieldVariant {
    #[default]
    Standard,
    Chameleon,
    Rainbow,
    RainbowOne,
    Selective,
    Storehouse,
}

impl CanfieldVariant {
    pub const ALL: [CanfieldVariant; 6] = [
        CanfieldVariant::Standard,
        CanfieldVariant::Chameleon,
        CanfieldVariant::Rainbow,
        CanfieldVariant::RainbowOne,
        CanfieldVariant::Selective,
        CanfieldVariant::Storehouse,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CanfieldVariant::Standard => "standard",
            CanfieldVariant::Chameleon => "chameleon",
            CanfieldVariant::Rainbow => "rainbow",
            CanfieldVariant::RainbowOne => "rainbow-one",
            CanfieldVariant::Selective => "selective",
            CanfieldVariant::Storehouse => "storehouse",
        }
    }

    /// The solitaire rules for this variant.
    #[must_use]
    pub fn rules(self) -> SolitaireRules {
        let mut rules = SolitaireRules {
            build: vec![BuildRule::Whole],
            pair: vec![PairRule::Down, PairRule::AltColor],
            lane: vec![LaneRule::Reserve],
            sort: vec![SortRule::Rank, SortRule::Up],
            dealers: vec![
                Dealer::ReserveN { count: 13, visible: false },
                Dealer::StartFoundation,
                Dealer::Tableau1,
                Dealer::StockAll,
            ],
            tableau: 4,
            reserve: 1,
            cells: 0,
            turn_count: 3,
            max_passes: None,
            wrap_ranks: true,
            switch_one: false,
        };
        match self {
            CanfieldVariant::Standard => {}
            CanfieldVariant::Chameleon => {
                rules.build.clear();
                rules.lane.clear();
                rules.pair = vec![PairRule::Down];
                rules.dealers[0] = Dealer::ReserveN { count: 12, visible: false };
                rules.tableau = 3;
                rules.turn_count = 1;
                rules.max_passes = Some(1);
            }
            CanfieldVariant::Rainbow => rules.pair = vec![PairRule::Down],
            CanfieldVariant::RainbowOne => {
                rules.pair = vec![PairRule::Down];
                rules.turn_count = 1;
                rules.max_passes = Some(2);
            }
            CanfieldVariant::Selective => {
                rules.dealers = vec![
                    Dealer::ReserveN { count: 13, visible: false },
                    Dealer::Selective,
                    Dealer::StockAll,
                ];
            }
            CanfieldVariant::Storehouse => {
                rules.pair = vec![PairRule::Down, PairRule::Suit];
                rules.dealers = vec![
                    Dealer::RankFoundations { rank: 2 },
                    Dealer::ReserveN { count: 13, visible: false },
                    Dealer::Tableau1,
                    Dealer::StockAll,
                ];
                rules.turn_count = 1;
                rules.max_passes = Some(2);
            }
        }
        rules
    }
}

impl FromStr for CanfieldVariant {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return Ok(CanfieldVariant::Standard);
        }
        CanfieldVariant::ALL.into_iter().find(|v| v.name() == text).ok_or_else(|| {
            let names: Vec<&str> = CanfieldVariant::ALL.iter().map(|v| v.name()).collect();
            GameError::InvalidOption(format!(
                "unknown Canfield variant {text:?}; the variants are {}",
                names.join(", ")
            ))
        })
    }
}

/// Builder for a Canfield deal.
pub struct CanfieldBuilder {
    name: String,
    variant: CanfieldVariant,
}

impl Default for CanfieldBuilder {
    fn default() -> Self {
        Self { name: "Player".to_string(), variant: CanfieldVariant::Standard }
    }
}

impl CanfieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn variant(mut self, variant: CanfieldVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Deal number `deal`.
    pub fn build(self, deal: u64) -> Result<Solitaire> {
        tracing::debug!(variant = self.variant.name(), deal, "dealing canfield");
        Solitaire::new(&INFO, self.name, self.variant.rules(), deal)
    }
}
