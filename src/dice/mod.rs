//! Dice: single dice, sampling dice, and pools.
//!
//! ## Key Types
//!
//! - `Die`: a fair die that can be held
//! - `ShuffleDie`: a die that deals its faces without replacement
//! - `Pool`: several dice rolled together, with holds
//! - `DominoPool`: dice whose combinations are dealt without replacement
//!
//! All rolling goes through `GameRng`, so games stay reproducible.

pub mod die;
pub mod pool;

pub use die::{Die, Roll, ShuffleDie};
pub use pool::{DominoPool, Pool};
