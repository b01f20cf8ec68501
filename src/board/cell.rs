//! Board cells.
//!
//! A cell knows its location and holds pieces. `BoardCell` holds at most one
//! piece and adding a piece captures whatever was there; `MultiCell` holds a
//! stack of pieces (a backgammon point, a pile of counters).
//!
//! Cells hash by location alone but compare equal only when location and
//! contents both match.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Behaviour shared by every kind of cell.
pub trait Cell: Clone {
    type Location: Clone + Eq + Hash + Ord + std::fmt::Debug;
    type Piece: Clone + PartialEq + std::fmt::Debug;

    /// An empty cell at `location`.
    fn at(location: Self::Location) -> Self;

    fn location(&self) -> &Self::Location;

    /// Add a piece, returning a captured piece if the cell can hold only one.
    fn add_piece(&mut self, piece: Self::Piece) -> Option<Self::Piece>;

    /// Remove the piece on top, if any.
    fn remove_piece(&mut self) -> Option<Self::Piece>;

    /// Remove every piece, returning them bottom first.
    fn clear(&mut self) -> Vec<Self::Piece>;

    /// The pieces in the cell, bottom first.
    fn pieces(&self) -> Vec<&Self::Piece>;

    /// How many of the pieces equal `piece`.
    fn count(&self, piece: &Self::Piece) -> usize {
        self.pieces().into_iter().filter(|p| *p == piece).count()
    }

    fn contains(&self, piece: &Self::Piece) -> bool {
        self.count(piece) > 0
    }

    fn len(&self) -> usize {
        self.pieces().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A cell holding at most one piece.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardCell<L, P> {
    location: L,
    contents: Option<P>,
    /// Glyph shown when the cell is empty.
    pub empty: char,
}

impl<L, P> BoardCell<L, P> {
    pub fn new(location: L, piece: Option<P>) -> Self {
        Self { location, contents: piece, empty: ' ' }
    }

    /// The piece in the cell.
    #[must_use]
    pub fn piece(&self) -> Option<&P> {
        self.contents.as_ref()
    }
}

impl<L, P> Cell for BoardCell<L, P>
where
    L: Clone + Eq + Hash + Ord + std::fmt::Debug,
    P: Clone + PartialEq + std::fmt::Debug,
{
    type Location = L;
    type Piece = P;

    fn at(location: L) -> Self {
        Self::new(location, None)
    }

    fn location(&self) -> &L {
        &self.location
    }

    fn add_piece(&mut self, piece: P) -> Option<P> {
        self.contents.replace(piece)
    }

    fn remove_piece(&mut self) -> Option<P> {
        self.contents.take()
    }

    fn clear(&mut self) -> Vec<P> {
        self.contents.take().into_iter().collect()
    }

    fn pieces(&self) -> Vec<&P> {
        self.contents.iter().collect()
    }
}

impl<L: PartialEq, P: PartialEq> PartialEq for BoardCell<L, P> {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.contents == other.contents
    }
}

impl<L: Eq, P: Eq> Eq for BoardCell<L, P> {}

impl<L: Hash, P> Hash for BoardCell<L, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

impl<L, P: std::fmt::Display> std::fmt::Display for BoardCell<L, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.contents {
            Some(piece) => write!(f, "{piece}"),
            None => write!(f, "{}", self.empty),
        }
    }
}

/// A cell holding a stack of pieces.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultiCell<L, P> {
    location: L,
    contents: Vec<P>,
    /// Glyph shown when the cell is empty.
    pub empty: char,
}

impl<L, P: PartialEq> MultiCell<L, P> {
    pub fn new(location: L, pieces: Vec<P>) -> Self {
        Self { location, contents: pieces, empty: ' ' }
    }

    /// Remove the lowest piece equal to `piece`.
    pub fn remove_specific(&mut self, piece: &P) -> Option<P> {
        let index = self.contents.iter().position(|p| p == piece)?;
        Some(self.contents.remove(index))
    }

    /// The piece on top of the stack.
    #[must_use]
    pub fn top(&self) -> Option<&P> {
        self.contents.last()
    }
}

impl<L, P> Cell for MultiCell<L, P>
where
    L: Clone + Eq + Hash + Ord + std::fmt::Debug,
    P: Clone + PartialEq + std::fmt::Debug,
{
    type Location = L;
    type Piece = P;

    fn at(location: L) -> Self {
        Self::new(location, Vec::new())
    }

    fn location(&self) -> &L {
        &self.location
    }

    fn add_piece(&mut self, piece: P) -> Option<P> {
        self.contents.push(piece);
        None
    }

    fn remove_piece(&mut self) -> Option<P> {
        self.contents.pop()
    }

    fn clear(&mut self) -> Vec<P> {
        std::mem::take(&mut self.contents)
    }

    fn pieces(&self) -> Vec<&P> {
        self.contents.iter().collect()
    }
}

impl<L: PartialEq, P: PartialEq> PartialEq for MultiCell<L, P> {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.contents == other.contents
    }
}

impl<L: Eq, P: Eq> Eq for MultiCell<L, P> {}

impl<L: Hash, P> Hash for MultiCell<L, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

impl<L, P: std::fmt::Display> std::fmt::Display for MultiCell<L, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.contents.is_empty() {
            return write!(f, "{}", self.empty);
        }
        let pieces: Vec<String> = self.contents.iter().map(ToString::to_string).collect();
        f.write_str(&pieces.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn cell() -> BoardCell<&'static str, char> {
        BoardCell::new("here", Some('@'))
    }

    #[test]
    fn test_add_piece_captures() {
        let mut cell = cell();
        assert_eq!(cell.add_piece('&'), Some('@'));
        assert_eq!(cell.piece(), Some(&'&'));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cell = cell();
        assert_eq!(cell.remove_piece(), Some('@'));
        assert!(cell.is_empty());
        cell.add_piece('@');
        assert_eq!(cell.clear(), vec!['@']);
        assert_eq!(cell.count(&'@'), 0);
    }

    #[test]
    fn test_contains_and_count() {
        let cell = cell();
        assert!(cell.contains(&'@'));
        assert!(!cell.contains(&'p'));
        assert_eq!(cell.count(&'@'), 1);
        assert_eq!(cell.len(), 1);
    }

    #[test]
    fn test_hash_by_location_equality_by_contents() {
        let knight = BoardCell::new("here", Some('N'));
        assert_eq!(hash_of(&knight), hash_of(&cell()));
        assert_ne!(knight, cell());
        assert_eq!(BoardCell::new("here", Some('@')), cell());
        assert_ne!(BoardCell::new("there", Some('@')), cell());
    }

    #[test]
    fn test_display() {
        let mut cell = cell();
        assert_eq!(cell.to_string(), "@");
        cell.remove_piece();
        assert_eq!(cell.to_string(), " ");
        cell.empty = '+';
        assert_eq!(cell.to_string(), "+");
    }

    #[test]
    fn test_multi_cell_stack() {
        let mut cell = MultiCell::new("here", vec!['@', '@']);
        assert_eq!(cell.add_piece('&'), None);
        assert_eq!(cell.pieces(), vec![&'@', &'@', &'&']);
        assert_eq!(cell.count(&'@'), 2);
        assert_eq!(cell.remove_specific(&'@'), Some('@'));
        assert_eq!(cell.pieces(), vec![&'@', &'&']);
        assert_eq!(cell.remove_piece(), Some('&'));
        assert_eq!(cell.to_string(), "@");
        cell.clear();
        assert_eq!(cell.to_string(), " ");
    }

    #[test]
    fn test_multi_cell_display() {
        let cell = MultiCell::new(1, vec!['@', '@']);
        assert_eq!(cell.to_string(), "@, @");
    }
}
