//! The shared game base.
//!
//! Games implement `Game` to define:
//! - Text parsing of player commands into typed moves
//! - How moves change the game
//! - Turn order and end-of-game conditions
//!
//! The session loop calls into `Game` but never interprets
//! game-specific concepts directly.

pub mod engine;
pub mod messages;

pub use engine::{CommandReply, Game, GameResult, TurnStatus};
pub use messages::MessageLog;
