//! Core types shared by every game: seats, RNG, errors, results, metadata.

pub mod config;
pub mod error;
pub mod names;
pub mod outcome;
pub mod player;
pub mod rng;
pub mod text;

pub use config::{Category, GameInfo};
pub use error::{GameError, Result};
pub use names::bot_name;
pub use outcome::Outcome;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use text::{oxford, plural};
