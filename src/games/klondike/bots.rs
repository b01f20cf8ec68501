//! Klonbot: plays every card it can as soon as it can.

use rustc_hash::FxHashSet;

use super::game::KlondikeBuilder;
use crate::cards::Card;
use crate::core::{PlayerId, PlayerMap, Result};
use crate::games::solitaire::{Location, Solitaire, SolitaireMove};
use crate::interface::{Agent, Response, Session};

/// Consecutive stock turns before Klonbot gives up.
pub const MAX_IDLE_TURNS: u32 = 8;

/// A bot that plays Klondike greedily.
#[derive(Clone, Debug, Default)]
pub struct Klonbot {
    made: FxHashSet<SolitaireMove>,
    idle_turns: u32,
}

impl Klonbot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first move it likes for `card`, if any.
    fn move_for(game: &Solitaire, card: Card, targets: &[Card]) -> Option<SolitaireMove> {
        let table = game.table();
        if card.rank() == 1 {
            return Some(SolitaireMove::Sort(card));
        }
        let foundation = table.top(Location::foundation_for(card.suit()));
        if foundation.is_some_and(|top| card.is_above(&top, false)) {
            return Some(SolitaireMove::Sort(card));
        }
        if card.rank() == 13 && table.empty_lane().is_some() {
            return Some(SolitaireMove::Lane(card));
        }
        targets
            .iter()
            .find(|target| card.is_below(target, false) && card.color() != target.color())
            .map(|&target| SolitaireMove::Build { card, target })
    }

    /// Choose the next move, or `None` to give up.
    pub fn choose(&mut self, game: &Solitaire) -> Option<SolitaireMove> {
        let table = game.table();
        let targets: Vec<Card> = (0..table.tableau().len())
            .filter_map(|i| table.top(Location::Tableau(i)))
            .collect();

        // The deepest face-up card of each pile, unless it is a king already
        // at the bottom.
        let mut cards: Vec<Card> = table
            .tableau()
            .iter()
            .filter_map(|pile| {
                let index = pile.iter().position(|p| p.up)?;
                let card = pile[index].card;
                (!(index == 0 && card.rank() == 13)).then_some(card)
            })
            .collect();
        cards.extend(&targets);
        cards.extend(table.top(Location::Waste));

        for card in cards {
            let Some(mv) = Self::move_for(game, card, &targets) else { continue };
            if !self.made.contains(&mv) && game.check(mv).is_ok() {
                self.made.insert(mv);
                self.idle_turns = 0;
                return Some(mv);
            }
        }

        if self.idle_turns > MAX_IDLE_TURNS || game.check(SolitaireMove::Turn).is_err() {
            return None;
        }
        self.idle_turns += 1;
        Some(SolitaireMove::Turn)
    }
}

impl Agent<Solitaire> for Klonbot {
    fn name(&self) -> &str {
        "Klonbot"
    }

    fn respond(&mut self, game: &Solitaire, _player: PlayerId) -> Response<SolitaireMove> {
        match self.choose(game) {
            Some(mv) => Response::Move(mv),
            None => Response::Text("quit".to_string()),
        }
    }
}

/// Let Klonbot play deals `from` through `to` and return the deal numbers
/// it won.
pub fn simulate(from: u64, to: u64) -> Result<Vec<u64>> {
    let mut wins = Vec::new();
    for deal in from..=to {
        let game = KlondikeBuilder::new().player("Klonbot").build(deal)?;
        let agents: Vec<Box<dyn Agent<Solitaire>>> = vec![Box::new(Klonbot::new())];
        let mut session = Session::new(game, PlayerMap::from_vec(agents), PlayerId::new(0), deal)?;
        let outcome = session.play()?;
        tracing::debug!(deal, score = outcome.score, "klonbot finished");
        if outcome.wins > 0 {
            wins.push(deal);
        }
    }
    tracing::info!(from, to, wins = wins.len(), "klonbot simulation done");
    Ok(wins)
}
