//! Everything between a game and the people playing it.
//!
//! ## Components
//!
//! - `commands`: verb splitting, aliases, the shared command set
//! - `rpn`: the calculator behind the `rpn` command
//! - `agent`: the `Agent` trait, seats, and a scripted test agent
//! - `human`: a line-oriented human over any reader and writer
//! - `session`: the turn loop
//! - `storage`: per-player result and shortcut files

pub mod agent;
pub mod commands;
pub mod human;
pub mod rpn;
pub mod session;
pub mod storage;

pub use agent::{seat_agents, Agent, Response, Scripted, Seat};
pub use commands::{dispatch, expand_alias, split_verb, Dispatched};
pub use human::Human;
pub use session::Session;
pub use storage::{PlayerStore, ResultRecord};
