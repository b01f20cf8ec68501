//! The turn loop.
//!
//! A `Session` seats agents at a game and runs it to the end:
//!
//! 1. The acting seat is told the status of the game.
//! 2. Its agent responds with a move or a line of text.
//! 3. Messages the game produced are broadcast to every seat.
//! 4. Recoverable errors go back to the agent, who tries again.
//! 5. The seat keeps acting until its turn is `Done`.
//!
//! The session ends when the game has an outcome. Quitting forfeits.

use crate::core::{GameError, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::rules::{Game, TurnStatus};

use super::agent::{Agent, Response};
use super::commands::{dispatch, Dispatched};

/// A game with agents in its seats.
pub struct Session<'a, G: Game> {
    game: G,
    agents: PlayerMap<Box<dyn Agent<G> + 'a>>,
    human: PlayerId,
    rng: GameRng,
    turns: u32,
}

impl<'a, G: Game> Session<'a, G> {
    /// Seat `agents` at `game`. `human` is the seat whose outcome `play` reports.
    pub fn new(game: G, agents: PlayerMap<Box<dyn Agent<G> + 'a>>, human: PlayerId, seed: u64) -> Result<Self> {
        if agents.player_count() != game.player_count() {
            return Err(GameError::InvalidOption(format!(
                "{} needs {} players, got {}",
                game.info().name,
                game.player_count(),
                agents.player_count()
            )));
        }
        Ok(Self {
            game,
            agents,
            human,
            rng: GameRng::new(seed).for_context("session"),
            turns: 0,
        })
    }

    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Take the game back, e.g. to inspect its final state.
    pub fn into_game(self) -> G {
        self.game
    }

    /// Take back the game and the agents, e.g. to seat them at a rematch.
    pub fn into_parts(self) -> (G, PlayerMap<Box<dyn Agent<G> + 'a>>) {
        (self.game, self.agents)
    }

    /// Number of completed turns.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Run the game to its end and report the human seat's outcome.
    pub fn play(&mut self) -> Result<Outcome> {
        tracing::info!(
            game = self.game.info().name,
            players = self.game.player_count(),
            "game started"
        );

        while !self.game.is_over() {
            self.play_turn()?;
            self.turns += 1;
        }

        let turns = self.turns;
        let Self { game, agents, human, .. } = self;
        for (player, agent) in agents.iter_mut() {
            agent.tell(&game.status(player));
        }
        let outcome = game.outcome(*human).unwrap_or_default();
        tracing::info!(game = game.info().name, turns, %outcome, "game over");
        Ok(outcome)
    }

    fn play_turn(&mut self) -> Result<()> {
        let Self { game, agents, rng, .. } = self;
        let player = game.current_player();
        agents[player].tell(&game.status(player));

        loop {
            let result = match agents[player].respond(game, player) {
                Response::Move(mv) => {
                    tracing::debug!(%player, ?mv, "agent move");
                    game.apply_move(player, mv).map(Dispatched::Turn)
                }
                Response::Text(line) => dispatch(game, player, &line, rng),
            };
            broadcast(game, agents);

            match result {
                Ok(Dispatched::Reply(text)) => agents[player].tell(&text),
                Ok(Dispatched::Turn(TurnStatus::Done)) => return Ok(()),
                Ok(Dispatched::Turn(TurnStatus::Continue)) => {
                    if game.is_over() {
                        return Ok(());
                    }
                    agents[player].tell(&game.status(player));
                }
                Ok(Dispatched::Quit) => {
                    tracing::info!(%player, "player quit");
                    game.forfeit(player);
                    broadcast(game, agents);
                    return Ok(());
                }
                Err(error) if error.is_recoverable() => agents[player].error(&error.to_string())?,
                Err(error) => return Err(error),
            }

            if game.is_over() {
                return Ok(());
            }
        }
    }
}

fn broadcast<G: Game>(game: &mut G, agents: &mut PlayerMap<Box<dyn Agent<G> + '_>>) {
    for message in game.drain_messages() {
        for (_, agent) in agents.iter_mut() {
            agent.tell(&message);
        }
    }
}
