//! Pig: push your luck with a single die.
//!
//! ## Quick start
//!
//! ```
//! use parlor::games::pig::{PigBuilder, PigMove};
//! use parlor::rules::Game;
//!
//! let mut pig = PigBuilder::new().build(42).unwrap();
//! let first = pig.current_player();
//! pig.apply_move(first, PigMove::Roll).unwrap();
//! assert!(pig.turn_rolls() <= 1);
//! ```
//!
//! Bots are described by presets (`easy`, `medium`, `hard`, `knizia`,
//! `satan`, `x`, `stupid`) or by a strategy with parameters, such as
//! `bpr=19/14/31`. See [`PigStrategy::parse`].

mod bots;
mod game;

pub use bots::{PigBot, PigStrategy};
pub use game::{Pig, PigBuilder, PigMove, PigOptions, INFO, TARGET};
