use super::game::{Flip, FlipMove};
use crate::core::{GameRng, PlayerId};
use crate::interface::{Agent, Response};

const COUNT_WORDS: [&str; 4] = ["none", "once", "twice", "three times"];

/// Flips the coin one to three times at random.
#[derive(Debug)]
pub struct FlipBot {
    name: String,
    rng: GameRng,
}

impl FlipBot {
    /// A bot named `Flip`, or `Tosser` if that is taken.
    pub fn new(taken: &[String], seed: u64) -> Self {
        let name = if taken.iter().any(|t| t == "Flip") { "Tosser" } else { "Flip" };
        Self { name: name.to_string(), rng: GameRng::new(seed) }
    }
}

impl Agent<Flip> for FlipBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, _game: &Flip, _player: PlayerId) -> Response<FlipMove> {
        let flips = self.rng.roll(3);
        tracing::debug!(bot = %self.name, "chooses to flip {}", COUNT_WORDS[flips as usize]);
        Response::Move(FlipMove(flips))
    }
}
