//! Flip: coin flipping until someone leads by two heads.

use serde::{Deserialize, Serialize};

use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::rules::{Game, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Flip",
    aka: &[],
    categories: &[Category::Test],
    credits: "\nDesign and programming by Craig \"Ichabod\" O'Brien\n",
    rules: "\nWhoever gets two more heads than their opponent wins. Each turn you\nflip the coin as many times as you like, but only the last flip counts.\n",
};

/// Heads needed to lead by.
pub const LEAD: i64 = 2;

/// Flip the coin this many times; only the last flip counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipMove(pub u32);

/// Builder for a game of Flip.
pub struct FlipBuilder {
    names: Vec<String>,
    shuffle_seats: bool,
}

impl Default for FlipBuilder {
    fn default() -> Self {
        Self { names: vec!["Player".to_string(), "Flip".to_string()], shuffle_seats: true }
    }
}

impl FlipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.names = vec![first.into(), second.into()];
        self
    }

    /// Keep the seats in the order given instead of shuffling them.
    pub fn fixed_seats(mut self) -> Self {
        self.shuffle_seats = false;
        self
    }

    /// Build the game, shuffling the seats unless they are fixed.
    pub fn build(self, seed: u64) -> Result<Flip> {
        let mut rng = GameRng::new(seed);
        let mut seats: Vec<usize> = (0..self.names.len()).collect();
        if self.shuffle_seats {
            rng.shuffle(&mut seats);
        }
        let names: Vec<String> = seats.iter().map(|&i| self.names[i].clone()).collect();
        Ok(Flip {
            names: PlayerMap::from_vec(names),
            heads: PlayerMap::with_value(2, 0),
            current: PlayerId::new(0),
            turns: 0,
            rng,
            messages: MessageLog::new(),
            forfeited: None,
        })
    }
}

/// A game of Flip.
#[derive(Debug)]
pub struct Flip {
    names: PlayerMap<String>,
    heads: PlayerMap<i64>,
    current: PlayerId,
    turns: u32,
    rng: GameRng,
    messages: MessageLog,
    forfeited: Option<PlayerId>,
}

impl Flip {
    #[must_use]
    pub fn heads(&self) -> &PlayerMap<i64> {
        &self.heads
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// The seat a named player is in.
    #[must_use]
    pub fn seat_of(&self, name: &str) -> Option<PlayerId> {
        self.names.iter().find(|(_, n)| n.as_str() == name).map(|(p, _)| p)
    }

    fn winner(&self) -> Option<PlayerId> {
        if let Some(quitter) = self.forfeited {
            return Some(quitter.next(2));
        }
        if self.turns % 2 != 0 {
            return None;
        }
        let first = PlayerId::new(0);
        let second = PlayerId::new(1);
        match self.heads[first] - self.heads[second] {
            LEAD => Some(first),
            diff if diff == -LEAD => Some(second),
            _ => None,
        }
    }
}

impl Game for Flip {
    type Move = FlipMove;

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn player_count(&self) -> usize {
        2
    }

    fn player_name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    fn current_player(&self) -> PlayerId {
        self.current
    }

    fn status(&self, _player: PlayerId) -> String {
        self.heads
            .iter()
            .map(|(p, h)| format!("{}: {h} heads", self.names[p]))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "How many times would you like to flip the coin (only the last flip counts)? ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<FlipMove> {
        let text = text.trim();
        text.parse().map(FlipMove).map_err(|_| GameError::Parse(text.to_string()))
    }

    fn apply_move(&mut self, player: PlayerId, mv: FlipMove) -> Result<TurnStatus> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::NotYourTurn(player));
        }
        if mv.0 == 0 {
            return Err(GameError::illegal("You have to flip the coin at least once."));
        }
        let mut heads = false;
        for index in 1..=mv.0 {
            heads = self.rng.gen_bool(0.5);
            let side = if heads { "heads" } else { "tails" };
            self.messages.say(format!("{}'s flip #{index} is {side}.", self.names[player]));
        }
        if heads {
            self.heads[player] += 1;
        }
        self.messages
            .say(format!("{} now has {} heads.", self.names[player], self.heads[player]));
        self.turns += 1;
        self.current = player.next(2);
        if let Some(winner) = self.winner() {
            self.messages.say(format!("{} wins with {} heads!", self.names[winner], self.heads[winner]));
        }
        Ok(TurnStatus::Done)
    }

    fn legal_moves(&self, _player: PlayerId) -> Vec<FlipMove> {
        (1..=3).map(FlipMove).collect()
    }

    fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        let winner = self.winner()?;
        let heads = self.heads[player];
        Some(if player == winner { Outcome::win(heads) } else { Outcome::loss(heads) })
    }

    fn forfeit(&mut self, player: PlayerId) {
        self.forfeited = Some(player);
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}
