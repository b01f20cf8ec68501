//! The shared game base.
//!
//! Games implement `Game` to define:
//! - How player text becomes a typed move
//! - How moves change the game
//! - Whose turn it is, and when the game is over
//!
//! The session loop calls into `Game` but never interprets game-specific
//! concepts directly.

use crate::core::{GameInfo, Outcome, PlayerId, Result};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (shared victory, tied leaders).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// Convert to a two-sided outcome for `player` with the given score.
    #[must_use]
    pub fn outcome_for(&self, player: PlayerId, score: i64) -> Outcome {
        match self {
            GameResult::Draw => Outcome::draw(score),
            GameResult::Winners(ps) if ps.len() > 1 && ps.contains(&player) => Outcome::draw(score),
            result if result.is_winner(player) => Outcome::win(score),
            _ => Outcome::loss(score),
        }
    }
}

/// What happens after a move or command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// The same player acts again.
    Continue,
    /// The turn passes to `current_player()`.
    Done,
}

/// Game trait.
///
/// ## Implementation Notes
///
/// - `parse_move` must not change the game; it only reads it
/// - `apply_move` validates, returns `GameError::IllegalMove` for illegal
///   moves, and advances `current_player()` before returning `Done`
/// - `outcome` returns `None` while the game continues
/// - Text meant for every seat is queued and handed out by `drain_messages`
pub trait Game {
    /// A fully parsed move.
    type Move: Clone + std::fmt::Debug;

    /// Static names and texts.
    fn info(&self) -> &'static GameInfo;

    /// Number of seats at the table.
    fn player_count(&self) -> usize;

    /// Display name of a seat.
    fn player_name(&self, player: PlayerId) -> &str;

    /// The seat that acts next.
    fn current_player(&self) -> PlayerId;

    /// Text rendering of the game as seen by `player`.
    fn status(&self, player: PlayerId) -> String;

    /// The question put to the acting player.
    fn prompt(&self, _player: PlayerId) -> String {
        "What is your move? ".to_string()
    }

    /// Parse player text into a move.
    fn parse_move(&self, player: PlayerId, text: &str) -> Result<Self::Move>;

    /// Apply a move for `player`.
    fn apply_move(&mut self, player: PlayerId, mv: Self::Move) -> Result<TurnStatus>;

    /// Enumerate legal moves where that is practical. Empty otherwise.
    fn legal_moves(&self, _player: PlayerId) -> Vec<Self::Move> {
        Vec::new()
    }

    /// Command aliases: (alias, full verb).
    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Help text for a topic, if the game has any.
    fn help(&self, _topic: &str) -> Option<String> {
        None
    }

    /// Game-specific commands that are not moves (`scores`, `undo`, ...).
    ///
    /// Returns `None` when the verb is not a game command. Checked before
    /// the shared commands, so games may override them.
    fn game_command(&mut self, _player: PlayerId, _verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        None
    }

    /// The game's outcome for `player`, once the game is over.
    fn outcome(&self, player: PlayerId) -> Option<Outcome>;

    /// `player` quits. Counts as a loss for them and ends the game.
    fn forfeit(&mut self, player: PlayerId);

    /// Take the messages produced since the last call.
    fn drain_messages(&mut self) -> Vec<String>;

    /// Check if the game is over.
    fn is_over(&self) -> bool {
        self.outcome(PlayerId::new(0)).is_some()
    }
}

/// Response to a non-move command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandReply {
    /// Text for the acting player; their action continues.
    Text(String),
    /// The command changed the game.
    Turn(TurnStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));

        let team = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(team.is_winner(PlayerId::new(0)));
        assert!(!team.is_winner(PlayerId::new(1)));
        assert!(team.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_outcome_for() {
        let result = GameResult::Winner(PlayerId::new(0));
        assert_eq!(result.outcome_for(PlayerId::new(0), 3), Outcome::win(3));
        assert_eq!(result.outcome_for(PlayerId::new(1), -3), Outcome::loss(-3));

        let tied = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(1)]);
        assert_eq!(tied.outcome_for(PlayerId::new(1), 64), Outcome::draw(64));
    }
}
