//! Error type shared by every game.
//!
//! Illegal moves are expected during play: the session shows the message to
//! the player and asks again. Only bots producing illegal moves and storage
//! failures escape a game loop.

use thiserror::Error;

use super::PlayerId;

/// Errors produced while parsing, validating or applying moves.
#[derive(Debug, Error)]
pub enum GameError {
    /// The move parsed but breaks the rules.
    #[error("{0}")]
    IllegalMove(String),

    /// The text could not be understood as a move.
    #[error("I do not understand {0:?}.")]
    Parse(String),

    /// A command verb no handler recognised.
    #[error("I do not recognize the command {0:?}.")]
    UnknownCommand(String),

    /// A seat tried to act out of turn.
    #[error("It is not {0}'s turn.")]
    NotYourTurn(PlayerId),

    /// The game has already finished.
    #[error("The game is over.")]
    GameOver,

    /// A bot produced a move the game rejected.
    #[error("bot {name} made an illegal play: {reason}")]
    Bot { name: String, reason: String },

    /// A builder or option value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Reading or writing the player's data files failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl GameError {
    /// Shorthand for an illegal move with a formatted message.
    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalMove(message.into())
    }

    /// True for errors the player can recover from by trying again.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IllegalMove(_) | Self::Parse(_) | Self::UnknownCommand(_) | Self::NotYourTurn(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
