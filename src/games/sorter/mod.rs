//! Sorter, a one-player test game of swapping numbers into order.

mod game;

pub use game::{minimum_swaps, Sorter, SorterBuilder, Swap, INFO};
