//! A backgammon bot that scores the position after every legal play.

use super::board::{Position, Side, POINTS};
use super::game::{Backgammon, BackgammonMove};
use crate::core::{bot_name, GameRng, PlayerId};
use crate::interface::{Agent, Response};

/// Weights for the position evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weights {
    /// Per pip of race lead.
    pub pip: i32,
    /// Per checker borne off.
    pub off: i32,
    /// Per lone checker an opponent could hit.
    pub blot: i32,
    /// Per point held with two or more checkers.
    pub point: i32,
    /// Per opposing checker on the bar.
    pub hit: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self { pip: 1, off: 10, blot: -6, point: 4, hit: 8 }
    }
}

/// Score `position` for `side`; higher is better.
#[must_use]
pub fn evaluate(position: &Position, side: Side, weights: &Weights) -> i32 {
    let other = side.other();
    let lead = position.pips(other) as i32 - position.pips(side) as i32;
    let mut blots = 0;
    let mut points = 0;
    for point in 1..=POINTS {
        match position.count(side, point) {
            0 => {}
            1 => blots += 1,
            _ => points += 1,
        }
    }
    weights.pip * lead
        + weights.off * i32::from(position.off(side))
        + weights.blot * blots
        + weights.point * points
        + weights.hit * i32::from(position.bar(other))
}

/// A bot that picks the play leading to the best evaluated position.
#[derive(Clone, Debug)]
pub struct BackgammonBot {
    name: String,
    weights: Weights,
}

impl BackgammonBot {
    pub fn new(taken: &[String], rng: &mut GameRng) -> Self {
        Self { name: bot_name('b', taken, rng), weights: Weights::default() }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// The best complete play for the rest of the turn.
    pub fn choose(&self, game: &Backgammon) -> Option<BackgammonMove> {
        let side = game.side();
        game.plays()
            .iter()
            .max_by_key(|play| evaluate(&play.result, side, &self.weights))
            .map(BackgammonMove::from)
    }
}

impl Agent<Backgammon> for BackgammonBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &Backgammon, _player: PlayerId) -> Response<BackgammonMove> {
        match self.choose(game) {
            Some(mv) => {
                tracing::debug!(bot = %self.name, mv = %mv, "backgammon bot move");
                Response::Move(mv)
            }
            None => Response::Text("quit".to_string()),
        }
    }
}
