//! Players at the table.
//!
//! An `Agent` is anything that can take a seat: a human typing at a
//! terminal, a scripted test double, or a bot. Bots never hold on to the
//! game; they get a shared reference when asked to act.

use std::collections::VecDeque;

use crate::core::{GameError, PlayerId, PlayerMap, Result};
use crate::rules::Game;

/// An agent's answer when asked to act.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response<M> {
    /// A fully formed move.
    Move(M),
    /// A line of text to dispatch (a command or a move to parse).
    Text(String),
}

/// Anything that can occupy a seat.
pub trait Agent<G: Game> {
    /// The name shown at the table.
    fn name(&self) -> &str;

    /// Decide what to do as `player`.
    fn respond(&mut self, game: &G, player: PlayerId) -> Response<G::Move>;

    /// Receive information from the game.
    fn tell(&mut self, _message: &str) {}

    /// Receive a complaint about the last response.
    ///
    /// Bots should never be wrong, so the default is to stop the game.
    fn error(&mut self, message: &str) -> Result<()> {
        Err(GameError::Bot {
            name: self.name().to_string(),
            reason: message.to_string(),
        })
    }
}

/// Who sits in a seat before agents are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seat<B> {
    /// The primary (human) player.
    Human,
    /// A computer player.
    Bot(B),
}

/// Attach agents to seats.
///
/// The single `Seat::Human` gets `human`; bot seats are boxed as they are.
/// Returns the agents and the human's seat (seat 0 if every seat is a bot).
pub fn seat_agents<'a, G, B>(
    seats: Vec<Seat<B>>,
    human: Box<dyn Agent<G> + 'a>,
) -> (PlayerMap<Box<dyn Agent<G> + 'a>>, PlayerId)
where
    G: Game,
    B: Agent<G> + 'a,
{
    let mut human = Some(human);
    let mut human_seat = PlayerId::new(0);
    let mut agents: Vec<Box<dyn Agent<G> + 'a>> = Vec::with_capacity(seats.len());

    for (index, seat) in seats.into_iter().enumerate() {
        match seat {
            Seat::Bot(bot) => agents.push(Box::new(bot)),
            Seat::Human => {
                if let Some(agent) = human.take() {
                    human_seat = PlayerId::new(index as u8);
                    agents.push(agent);
                }
            }
        }
    }

    (PlayerMap::from_vec(agents), human_seat)
}

/// A test double that answers from a queue of lines.
///
/// Everything it is told is kept for inspection. When the script runs out
/// it quits.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    name: String,
    lines: VecDeque<String>,
    /// Everything the game said to this seat.
    pub heard: Vec<String>,
    /// Every complaint about this seat's input.
    pub errors: Vec<String>,
}

impl Scripted {
    pub fn new(name: impl Into<String>, lines: &[&str]) -> Self {
        Self {
            name: name.into(),
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            heard: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Lines not yet used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl<G: Game> Agent<G> for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, _game: &G, _player: PlayerId) -> Response<G::Move> {
        Response::Text(self.lines.pop_front().unwrap_or_else(|| "quit".to_string()))
    }

    fn tell(&mut self, message: &str) {
        self.heard.push(message.to_string());
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }
}

/// Shared-reference wrapper so tests can inspect a `Scripted` after play.
impl<G: Game> Agent<G> for &mut Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &G, player: PlayerId) -> Response<G::Move> {
        <Scripted as Agent<G>>::respond(self, game, player)
    }

    fn tell(&mut self, message: &str) {
        <Scripted as Agent<G>>::tell(self, message);
    }

    fn error(&mut self, message: &str) -> Result<()> {
        <Scripted as Agent<G>>::error(self, message)
    }
}
