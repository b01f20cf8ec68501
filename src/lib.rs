//! # parlor
//!
//! A library of text-driven parlor games: dice, cards, boards, solitaire and
//! one adventure, each with computer opponents.
//!
//! ## Design Principles
//!
//! 1. **Typed moves**: Games parse player text into a `Game::Move` once. Bots
//!    produce moves directly and never go through the parser.
//!
//! 2. **Seats, not names**: Every per-player value lives in a `PlayerMap`
//!    indexed by `PlayerId`.
//!
//! 3. **Reproducible**: All randomness flows through a seeded `GameRng`, so a
//!    seed replays a whole game.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, errors, outcomes, game metadata
//! - `rules`: the `Game` trait and message log
//! - `interface`: agents, command dispatch, the session loop, storage
//! - `dice`, `cards`, `board`: shared equipment
//! - `games`: the games themselves
//!
//! ## Quick start
//!
//! ```
//! use parlor::games::sorter::{Sorter, Swap};
//! use parlor::{Game, PlayerId};
//!
//! let mut game = Sorter::with_sequence("Ichabod", &[1, 0, 2]).unwrap();
//! game.apply_move(PlayerId::new(0), Swap(0, 1)).unwrap();
//! assert!(game.is_over());
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod dice;
pub mod games;
pub mod interface;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{Category, GameError, GameInfo, GameRng, GameRngState, Outcome, PlayerId, PlayerMap, Result};

pub use crate::rules::{CommandReply, Game, GameResult, MessageLog, TurnStatus};

pub use crate::interface::{Agent, PlayerStore, Response, Scripted, Seat, Session};
