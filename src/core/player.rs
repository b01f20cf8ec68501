//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are numbered in play order, so
//! `PlayerId(0)` always acts first in a fresh game.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access.
//! Games keep scores, hands, dice pools and tokens in these maps instead of
//! keying anything by player name.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting 1-255 seats.
///
/// Seat indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seat IDs for a game with `player_count` seats.
    ///
    /// ```
    /// use parlor::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use parlor::core::{PlayerId, PlayerMap};
///
/// let mut tokens: PlayerMap<u32> = PlayerMap::with_value(4, 3);
/// tokens[PlayerId::new(1)] -= 1;
/// assert_eq!(tokens[PlayerId::new(1)], 2);
/// assert_eq!(tokens[PlayerId::new(0)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(PlayerId).map(factory).collect();

        Self { data }
    }

    /// Wrap an existing vector, one entry per seat in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all seat IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T: Ord + Copy> PlayerMap<T> {
    /// The largest value held by any seat.
    #[must_use]
    pub fn max_value(&self) -> Option<T> {
        self.data.iter().copied().max()
    }

    /// The largest value held by any seat other than `player`.
    #[must_use]
    pub fn max_other(&self, player: PlayerId) -> Option<T> {
        self.iter()
            .filter(|(p, _)| *p != player)
            .map(|(_, v)| *v)
            .max()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Seat 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).next(1), PlayerId::new(0));
    }

    #[test]
    fn test_tokens_per_seat() {
        let mut tokens: PlayerMap<i32> = PlayerMap::with_value(4, 3);
        for (player, count) in tokens.iter_mut() {
            if player.index() % 2 == 1 {
                *count -= 1;
            }
        }
        let left: Vec<i32> = tokens.values().copied().collect();
        assert_eq!(left, vec![3, 2, 3, 2]);
        let seats: Vec<PlayerId> = tokens.player_ids().filter(|&p| tokens[p] == 3).collect();
        assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(2)]);
    }

    #[test]
    fn test_hands_from_factory() {
        let hands: PlayerMap<Vec<u8>> = PlayerMap::new(3, |p| vec![p.0; p.index() + 1]);
        assert_eq!(hands[PlayerId::new(2)], vec![2, 2, 2]);
        assert_eq!(hands.player_count(), 3);
    }

    #[test]
    fn test_player_map_max() {
        let map = PlayerMap::from_vec(vec![40, 95, 12]);
        assert_eq!(map.max_value(), Some(95));
        assert_eq!(map.max_other(PlayerId::new(1)), Some(40));
    }

    #[test]
    fn test_player_map_max_single_seat() {
        let solo: PlayerMap<i64> = PlayerMap::from_vec(vec![-3]);
        assert_eq!(solo.max_value(), Some(-3));
        assert_eq!(solo.max_other(PlayerId::new(0)), None);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
