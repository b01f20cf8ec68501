//! Per-game results for the primary seat.
//!
//! Win/loss/draw is counted against each opponent: finishing second of five
//! is three wins, one loss and no draws.

use serde::{Deserialize, Serialize};

use super::{PlayerId, PlayerMap};

/// Result of one game from the point of view of one seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub score: i64,
}

impl Outcome {
    /// A single win against one opponent.
    #[must_use]
    pub fn win(score: i64) -> Self {
        Self { wins: 1, score, ..Self::default() }
    }

    /// A single loss against one opponent.
    #[must_use]
    pub fn loss(score: i64) -> Self {
        Self { losses: 1, score, ..Self::default() }
    }

    /// A single draw.
    #[must_use]
    pub fn draw(score: i64) -> Self {
        Self { draws: 1, score, ..Self::default() }
    }

    /// Quitting: a loss against every opponent.
    #[must_use]
    pub fn forfeit(opponents: usize, score: i64) -> Self {
        Self { losses: opponents as u32, score, ..Self::default() }
    }

    /// Compare `player`'s ranking value against every other seat.
    ///
    /// Higher is better. The score reported is `player`'s own value.
    #[must_use]
    pub fn ranked<T: Ord + Copy + Into<i64>>(values: &PlayerMap<T>, player: PlayerId) -> Self {
        let mine = values[player];
        let mut outcome = Self { score: mine.into(), ..Self::default() };
        for (other, value) in values.iter() {
            if other == player {
                continue;
            }
            match value.cmp(&mine) {
                std::cmp::Ordering::Less => outcome.wins += 1,
                std::cmp::Ordering::Greater => outcome.losses += 1,
                std::cmp::Ordering::Equal => outcome.draws += 1,
            }
        }
        outcome
    }

    /// Total number of opponents this outcome was counted against.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{} (score {})",
            self.wins, self.losses, self.draws, self.score
        )
    }
}

/// Running totals over several games.
impl std::ops::AddAssign for Outcome {
    fn add_assign(&mut self, other: Self) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
        self.score += other.score;
    }
}
