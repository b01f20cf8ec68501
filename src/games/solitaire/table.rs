//! The solitaire table: every pile and where each card lies.
//!
//! Piles are persistent vectors, so a snapshot of the whole table for undo
//! costs a handful of reference count bumps.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// A card on the table and whether it is face up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placed {
    pub card: Card,
    pub up: bool,
}

impl Placed {
    #[must_use]
    pub fn up(card: Card) -> Self {
        Self { card, up: true }
    }

    #[must_use]
    pub fn down(card: Card) -> Self {
        Self { card, up: false }
    }
}

impl std::fmt::Display for Placed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.up {
            write!(f, "{}", self.card)
        } else {
            f.write_str("??")
        }
    }
}

/// A pile of cards, bottom first.
pub type Pile = Vector<Placed>;

/// Where a pile sits on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
    Reserve(usize),
    Cell(usize),
}

impl Location {
    /// The foundation a card sorts to.
    #[must_use]
    pub fn foundation_for(suit: Suit) -> Self {
        Location::Foundation(suit.index())
    }
}

/// The complete state of a solitaire deal, cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub(crate) stock: Pile,
    pub(crate) waste: Pile,
    pub(crate) foundations: Vec<Pile>,
    pub(crate) tableau: Vec<Pile>,
    pub(crate) reserve: Vec<Pile>,
    pub(crate) cells: Vec<Pile>,
    /// Passes through the stock begun so far.
    pub(crate) passes: u32,
    /// Cards moved from stock to waste per turn.
    pub(crate) turn_count: usize,
    /// Passes allowed, `None` for unlimited.
    pub(crate) max_passes: Option<u32>,
    /// Whether the one-card switch has been used.
    pub(crate) switched: bool,
    /// Rank every foundation starts on, when fixed by the deal.
    pub(crate) base_rank: Option<u8>,
    /// Cards waiting for the player to pick a foundation starter.
    pub(crate) selection: Vec<Card>,
}

impl Table {
    /// An empty table with the given pile counts.
    #[must_use]
    pub fn new(tableau: usize, reserve: usize, cells: usize) -> Self {
        Self {
            stock: Pile::new(),
            waste: Pile::new(),
            foundations: vec![Pile::new(); Suit::ALL.len()],
            tableau: vec![Pile::new(); tableau],
            reserve: vec![Pile::new(); reserve],
            cells: vec![Pile::new(); cells],
            passes: 1,
            turn_count: 3,
            max_passes: None,
            switched: false,
            base_rank: None,
            selection: Vec::new(),
        }
    }

    #[must_use]
    pub fn pile(&self, location: Location) -> Option<&Pile> {
        match location {
            Location::Stock => Some(&self.stock),
            Location::Waste => Some(&self.waste),
            Location::Foundation(i) => self.foundations.get(i),
            Location::Tableau(i) => self.tableau.get(i),
            Location::Reserve(i) => self.reserve.get(i),
            Location::Cell(i) => self.cells.get(i),
        }
    }

    pub(crate) fn pile_mut(&mut self, location: Location) -> Option<&mut Pile> {
        match location {
            Location::Stock => Some(&mut self.stock),
            Location::Waste => Some(&mut self.waste),
            Location::Foundation(i) => self.foundations.get_mut(i),
            Location::Tableau(i) => self.tableau.get_mut(i),
            Location::Reserve(i) => self.reserve.get_mut(i),
            Location::Cell(i) => self.cells.get_mut(i),
        }
    }

    /// Every pile location, stock first.
    #[must_use]
    pub fn locations(&self) -> Vec<Location> {
        let mut locations = vec![Location::Stock, Location::Waste];
        locations.extend((0..self.foundations.len()).map(Location::Foundation));
        locations.extend((0..self.tableau.len()).map(Location::Tableau));
        locations.extend((0..self.reserve.len()).map(Location::Reserve));
        locations.extend((0..self.cells.len()).map(Location::Cell));
        locations
    }

    /// Where `card` is: its pile and its index from the bottom.
    #[must_use]
    pub fn find(&self, card: Card) -> Option<(Location, usize)> {
        self.locations().into_iter().find_map(|location| {
            self.pile(location)?
                .iter()
                .position(|placed| placed.card == card)
                .map(|index| (location, index))
        })
    }

    /// The face-up card on top of a pile.
    #[must_use]
    pub fn top(&self, location: Location) -> Option<Card> {
        self.pile(location)?.last().filter(|p| p.up).map(|p| p.card)
    }

    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    #[must_use]
    pub fn tableau(&self) -> &[Pile] {
        &self.tableau
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile] {
        &self.foundations
    }

    #[must_use]
    pub fn reserve(&self) -> &[Pile] {
        &self.reserve
    }

    #[must_use]
    pub fn cells(&self) -> &[Pile] {
        &self.cells
    }

    #[must_use]
    pub fn selection(&self) -> &[Card] {
        &self.selection
    }

    #[must_use]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    #[must_use]
    pub fn base_rank(&self) -> Option<u8> {
        self.base_rank
    }

    /// Cards sorted to the foundations.
    #[must_use]
    pub fn sorted(&self) -> usize {
        self.foundations.iter().map(Vector::len).sum()
    }

    /// Cards anywhere on the table, including a pending selection.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.locations()
            .into_iter()
            .filter_map(|l| self.pile(l))
            .map(Vector::len)
            .sum::<usize>()
            + self.selection.len()
    }

    /// First empty tableau pile.
    #[must_use]
    pub fn empty_lane(&self) -> Option<Location> {
        self.tableau.iter().position(Vector::is_empty).map(Location::Tableau)
    }

    /// Move the cards from `index` up out of `from` onto `to`, face up.
    ///
    /// A face-down card left on top of a tableau or reserve pile is turned up.
    pub(crate) fn move_stack(&mut self, from: Location, index: usize, to: Location) {
        let Some(source) = self.pile_mut(from) else { return };
        let moving = source.split_off(index.min(source.len()));
        if matches!(from, Location::Tableau(_) | Location::Reserve(_)) {
            if let Some(exposed) = source.back_mut() {
                exposed.up = true;
            }
        }
        if let Some(target) = self.pile_mut(to) {
            target.extend(moving.into_iter().map(|p| Placed::up(p.card)));
        }
    }

    /// Put a card from the deck straight onto a pile.
    pub(crate) fn deal_to(&mut self, location: Location, card: Card, up: bool) {
        if let Some(pile) = self.pile_mut(location) {
            pile.push_back(Placed { card, up });
        }
    }
}

fn pile_text(pile: &Pile) -> String {
    pile.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let foundations: Vec<String> = self
            .foundations
            .iter()
            .map(|pile| pile.last().map_or_else(|| "--".to_string(), ToString::to_string))
            .collect();
        writeln!(f, "Foundations: {}", foundations.join(" "))?;
        for pile in &self.reserve {
            match pile.last() {
                Some(top) => writeln!(f, "Reserve: {} ({} cards)", top, pile.len())?,
                None => writeln!(f, "Reserve: --")?,
            }
        }
        if !self.cells.is_empty() {
            let cells: Vec<String> = self
                .cells
                .iter()
                .map(|pile| pile.last().map_or_else(|| "--".to_string(), ToString::to_string))
                .collect();
            writeln!(f, "Cells: {}", cells.join(" "))?;
        }
        writeln!(f, "Tableau:")?;
        for (index, pile) in self.tableau.iter().enumerate() {
            writeln!(f, "{}: {}", index + 1, pile_text(pile))?;
        }
        let shown = self.waste.len().saturating_sub(self.turn_count);
        let waste: Pile = self.waste.clone().split_off(shown);
        write!(f, "Stock: {} cards. Waste: {}", self.stock.len(), pile_text(&waste))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> Card {
        Card::parse(text).unwrap()
    }

    #[test]
    fn test_find_and_top() {
        let mut table = Table::new(2, 1, 0);
        table.deal_to(Location::Tableau(0), card("KS"), false);
        table.deal_to(Location::Tableau(0), card("QH"), true);
        table.deal_to(Location::Reserve(0), card("5C"), true);
        assert_eq!(table.find(card("QH")), Some((Location::Tableau(0), 1)));
        assert_eq!(table.top(Location::Tableau(0)), Some(card("QH")));
        assert_eq!(table.top(Location::Tableau(1)), None);
        assert_eq!(table.find(card("2D")), None);
        assert_eq!(table.card_count(), 3);
    }

    #[test]
    fn test_move_stack_flips_exposed_card() {
        let mut table = Table::new(2, 0, 0);
        table.deal_to(Location::Tableau(0), card("KS"), false);
        table.deal_to(Location::Tableau(0), card("QH"), true);
        table.deal_to(Location::Tableau(0), card("JC"), true);
        table.move_stack(Location::Tableau(0), 1, Location::Tableau(1));
        assert_eq!(table.tableau()[1].len(), 2);
        assert_eq!(table.top(Location::Tableau(0)), Some(card("KS")));
        assert_eq!(table.empty_lane(), None);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut table = Table::new(1, 0, 0);
        table.deal_to(Location::Tableau(0), card("AS"), true);
        let snapshot = table.clone();
        table.move_stack(Location::Tableau(0), 0, Location::foundation_for(Suit::Spades));
        assert_eq!(table.sorted(), 1);
        assert_eq!(snapshot.sorted(), 0);
        assert_ne!(snapshot, table);
    }

    #[test]
    fn test_display() {
        let mut table = Table::new(2, 1, 0);
        table.deal_to(Location::Tableau(0), card("KS"), false);
        table.deal_to(Location::Tableau(0), card("QH"), true);
        table.deal_to(Location::Reserve(0), card("5C"), true);
        table.deal_to(Location::Waste, card("2D"), true);
        let text = table.to_string();
        assert!(text.contains("1: ?? QH"));
        assert!(text.contains("Reserve: 5C (1 cards)"));
        assert!(text.ends_with("Stock: 0 cards. Waste: 2D"));
    }
}
