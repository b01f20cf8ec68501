//! Mate bots.

use super::game::{Mate, MateMove};
use crate::core::{bot_name, GameRng, PlayerId};
use crate::interface::{Agent, Response};
use crate::rules::Game;

/// How a Mate bot picks its capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MateStyle {
    /// Random attacker, random target it can reach.
    Random,
    /// Most valuable target, then most valuable attacker.
    Attack,
    /// Most valuable attacker first, so it gets rerolled.
    #[default]
    Defend,
}

/// A computer Mate player.
#[derive(Clone, Debug)]
pub struct MateBot {
    name: String,
    style: MateStyle,
    rng: GameRng,
}

impl MateBot {
    pub fn new(style: MateStyle, taken: &[String], rng: &mut GameRng) -> Self {
        let initial = match style {
            MateStyle::Random => 'r',
            MateStyle::Attack => 'a',
            MateStyle::Defend => 'd',
        };
        let name = bot_name(initial, taken, rng);
        let rng = rng.for_context(&name);
        Self { name, style, rng }
    }

    /// Choose a capture for `me`.
    pub fn choose(&mut self, game: &Mate, me: PlayerId) -> Option<MateMove> {
        let moves = game.moves_for(me);
        match self.style {
            MateStyle::Random => {
                let attackers: Vec<usize> = moves.iter().map(|m| m.attacker).collect();
                let attacker = *self.rng.choose(&attackers)?;
                let targets: Vec<MateMove> = moves.into_iter().filter(|m| m.attacker == attacker).collect();
                self.rng.choose(&targets).copied()
            }
            style => {
                let mine = game.pieces(me);
                let theirs = game.pieces(me.next(2));
                let value = |m: &MateMove| -> (u32, u32, MateMove) {
                    let target = theirs[m.target].points();
                    let attacker = mine[m.attacker].points();
                    match style {
                        MateStyle::Defend => (attacker, target, *m),
                        _ => (target, attacker, *m),
                    }
                };
                moves.iter().map(value).max().map(|(_, _, m)| m)
            }
        }
    }
}

impl Agent<Mate> for MateBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &Mate, player: PlayerId) -> Response<MateMove> {
        match self.choose(game, player) {
            Some(mv) => Response::Move(mv),
            None => Response::Text("quit".to_string()),
        }
    }
}
