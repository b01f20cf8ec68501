//! Yacht and its cousins: five dice, three rolls, one category per turn.
//!
//! ## Quick start
//!
//! ```
//! use parlor::games::yacht::{YachtBuilder, YachtMove};
//! use parlor::rules::{Game, TurnStatus};
//!
//! let mut yacht = YachtBuilder::new().build(42).unwrap();
//! let me = yacht.current_player();
//! assert_eq!(yacht.apply_move(me, YachtMove::Roll).unwrap(), TurnStatus::Continue);
//! let chance = yacht.find_category("chance").unwrap();
//! assert_eq!(yacht.apply_move(me, YachtMove::Score(chance)).unwrap(), TurnStatus::Done);
//! assert!(yacht.card(me)[chance].is_some());
//! ```
//!
//! Variants (`cheerio`, `general`, `hindenberg`, `yahtzee`, `yam`) are
//! groups of options; see [`YachtOptions::apply`].

mod bots;
mod game;
mod scoring;

pub use bots::{YachtBot, YachtStyle};
pub use game::{Yacht, YachtBuilder, YachtMove, YachtOptions, INFO};
pub use scoring::{Pattern, ScoreCategory, ScoreSpec, Scoring};
