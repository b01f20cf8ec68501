//! Generic boards for board games.
//!
//! ## Key Types
//!
//! - `Cell`: behaviour shared by board cells
//! - `BoardCell`: a cell holding at most one piece
//! - `MultiCell`: a cell holding a stack of pieces
//! - `Coordinate`: n-dimensional integer location
//! - `Board`: cells keyed by location, with moves and captures
//! - `DimBoard`: a board over integer coordinates

pub mod cell;
pub mod coordinate;
pub mod grid;

pub use cell::{BoardCell, Cell, MultiCell};
pub use coordinate::Coordinate;
pub use grid::{Board, DimBoard};
