//! Canfield, also known as Demon, and five variants.

mod game;

pub use game::{CanfieldBuilder, CanfieldVariant, INFO};
