//! Static game metadata.
//!
//! Every game describes itself with a `GameInfo`: names, categories and the
//! texts shown by the shared `rules` and `credits` commands. The library
//! catalogue (`games::catalogue`) is just a list of these.

use serde::Serialize;

/// Shelf a game is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Adventure,
    Board,
    Card,
    Dice,
    Solitaire,
    Test,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Category::Adventure => "Adventure Games",
            Category::Board => "Board Games",
            Category::Card => "Card Games",
            Category::Dice => "Dice Games",
            Category::Solitaire => "Solitaire Games",
            Category::Test => "Test Games",
        };
        f.write_str(text)
    }
}

/// Names and texts describing one game.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct GameInfo {
    /// Primary name.
    pub name: &'static str,

    /// Other names the game answers to.
    pub aka: &'static [&'static str],

    /// Shelves the game is listed under.
    pub categories: &'static [Category],

    /// Design and programming credits.
    pub credits: &'static str,

    /// Rules text.
    pub rules: &'static str,
}

impl GameInfo {
    /// Check whether `name` refers to this game (case-insensitive).
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name) || self.aka.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}
