//! Klondike: the solitaire most people mean by "solitaire".
//!
//! ```
//! use parlor::games::klondike::KlondikeBuilder;
//!
//! let game = KlondikeBuilder::new().turn_one().build(1).unwrap();
//! assert_eq!(game.table().stock_len(), 24);
//! ```

mod bots;
mod game;

pub use bots::{simulate, Klonbot, MAX_IDLE_TURNS};
pub use game::{KlondikeBuilder, KlondikeOptions, INFO};
