//! Boards: cells keyed by location.

use std::collections::BTreeMap;
use std::ops::Add;

use super::cell::{Cell, MultiCell};
use super::coordinate::Coordinate;
use crate::core::{GameError, Result};

/// A set of cells keyed and ordered by location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board<C: Cell> {
    cells: BTreeMap<C::Location, C>,
}

impl<C: Cell> Board<C> {
    /// Create an empty cell at each location.
    pub fn new(locations: impl IntoIterator<Item = C::Location>) -> Self {
        let cells = locations.into_iter().map(|l| (l.clone(), C::at(l))).collect();
        Self { cells }
    }

    #[must_use]
    pub fn get(&self, location: &C::Location) -> Option<&C> {
        self.cells.get(location)
    }

    pub fn get_mut(&mut self, location: &C::Location) -> Option<&mut C> {
        self.cells.get_mut(location)
    }

    fn cell_mut(&mut self, location: &C::Location) -> Result<&mut C> {
        self.cells
            .get_mut(location)
            .ok_or_else(|| GameError::illegal(format!("{location:?} is not on the board.")))
    }

    /// Put a piece at `location`, returning any capture.
    pub fn place(&mut self, location: &C::Location, piece: C::Piece) -> Result<Option<C::Piece>> {
        Ok(self.cell_mut(location)?.add_piece(piece))
    }

    /// Move the top piece from `start` to `end`, capturing everything at `end`.
    pub fn displace(&mut self, start: &C::Location, end: &C::Location) -> Result<Vec<C::Piece>> {
        self.cell_mut(end)?;
        let piece = self
            .cell_mut(start)?
            .remove_piece()
            .ok_or_else(|| GameError::illegal(format!("There is no piece at {start:?}.")))?;
        let target = self.cell_mut(end)?;
        let captured = target.clear();
        target.add_piece(piece);
        Ok(captured)
    }

    /// Move the top piece from `start` onto `end` without clearing `end`.
    pub fn shift(&mut self, start: &C::Location, end: &C::Location) -> Result<Option<C::Piece>> {
        self.cell_mut(end)?;
        let piece = self
            .cell_mut(start)?
            .remove_piece()
            .ok_or_else(|| GameError::illegal(format!("There is no piece at {start:?}.")))?;
        self.place(end, piece)
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            cell.clear();
        }
    }

    /// The cell `delta` away from `location`, if it is on the board.
    #[must_use]
    pub fn offset<D>(&self, location: &C::Location, delta: D) -> Option<&C>
    where
        C::Location: Add<D, Output = C::Location>,
    {
        self.cells.get(&(location.clone() + delta))
    }

    /// Copy the contents of every shared location from `other`.
    pub fn copy_pieces(&mut self, other: &Board<C>) {
        for (location, cell) in &mut self.cells {
            if let Some(source) = other.cells.get(location) {
                *cell = source.clone();
            }
        }
    }

    pub fn locations(&self) -> impl Iterator<Item = &C::Location> {
        self.cells.keys()
    }

    pub fn cells(&self) -> impl Iterator<Item = &C> {
        self.cells.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<L, P> Board<MultiCell<L, P>>
where
    L: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug,
    P: Clone + PartialEq + std::fmt::Debug,
{
    /// True if two or more pieces other than `piece` hold `location`.
    #[must_use]
    pub fn safe(&self, location: &L, piece: &P) -> bool {
        self.get(location)
            .map_or(false, |cell| cell.pieces().into_iter().filter(|p| *p != piece).count() >= 2)
    }

    /// Move the top piece from `start` to `end`, capturing a lone enemy.
    ///
    /// Fails without changing anything if `end` is safe from the piece.
    pub fn safe_displace(&mut self, start: &L, end: &L) -> Result<Vec<P>> {
        let piece = self
            .get(start)
            .and_then(MultiCell::top)
            .cloned()
            .ok_or_else(|| GameError::illegal(format!("There is no piece at {start:?}.")))?;
        if self.safe(end, &piece) {
            return Err(GameError::illegal(format!("{end:?} is blocked.")));
        }
        let hit = self.get(end).and_then(MultiCell::top).is_some_and(|top| *top != piece);
        if hit {
            return self.displace(start, end);
        }
        self.shift(start, end)?;
        Ok(Vec::new())
    }
}

impl<C: Cell<Location = Coordinate>> Board<C> {
    /// A board over the cartesian product of `1..=d` for each dimension.
    #[must_use]
    pub fn dim(dimensions: &[i32]) -> Self {
        let locations = dimensions.iter().fold(vec![Vec::new()], |points, &size| {
            points
                .iter()
                .flat_map(|point| {
                    (1..=size).map(move |value| {
                        let mut next: Vec<i32> = point.clone();
                        next.push(value);
                        next
                    })
                })
                .collect()
        });
        Self::new(locations.iter().map(|p| Coordinate::new(p)))
    }
}

/// A board of cells at integer coordinates.
pub type DimBoard<C> = Board<C>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardCell;

    type LineBoard = Board<BoardCell<i32, char>>;

    fn line() -> LineBoard {
        let mut board = LineBoard::new(0..5);
        board.place(&2, '@').unwrap();
        board.place(&4, '&').unwrap();
        board
    }

    #[test]
    fn test_displace_capture() {
        let mut board = line();
        assert_eq!(board.displace(&2, &4).unwrap(), vec!['&']);
        assert_eq!(board.get(&4).unwrap().piece(), Some(&'@'));
        assert!(board.get(&2).unwrap().is_empty());
    }

    #[test]
    fn test_displace_no_capture() {
        let mut board = line();
        assert!(board.displace(&2, &3).unwrap().is_empty());
        assert_eq!(board.get(&3).unwrap().piece(), Some(&'@'));
        assert!(board.displace(&2, &3).is_err());
        assert!(board.displace(&3, &9).is_err());
        assert_eq!(board.get(&3).unwrap().piece(), Some(&'@'));
    }

    #[test]
    fn test_place_replaces() {
        let mut board = line();
        assert_eq!(board.place(&2, '?').unwrap(), Some('@'));
        assert_eq!(board.place(&3, '?').unwrap(), None);
    }

    #[test]
    fn test_offset() {
        let board = line();
        assert_eq!(board.offset(&2, 2).map(Cell::location), Some(&4));
        assert!(board.offset(&2, 7).is_none());
    }

    #[test]
    fn test_clear_and_copy() {
        let mut board = line();
        let mut other = LineBoard::new(0..5);
        other.copy_pieces(&board);
        assert_eq!(other, board);
        board.clear();
        assert!(board.cells().all(Cell::is_empty));
        assert!(!other.get(&2).unwrap().is_empty());
    }

    #[test]
    fn test_dim_board() {
        let mut board: DimBoard<BoardCell<Coordinate, char>> = Board::dim(&[3, 3]);
        assert_eq!(board.len(), 9);
        let first: Vec<_> = board.locations().take(2).cloned().collect();
        assert_eq!(first, vec![Coordinate::from((1, 1)), Coordinate::from((1, 2))]);

        board.place(&Coordinate::from((1, 2)), '@').unwrap();
        let copy = board.clone();
        board.shift(&Coordinate::from((1, 2)), &Coordinate::from((2, 3))).unwrap();
        assert_ne!(copy, board);

        let center = Coordinate::from((2, 2));
        let cell = board.offset(&center, (-1, 1)).unwrap();
        assert_eq!(cell.location(), &Coordinate::from((1, 3)));
        assert_eq!(Board::<BoardCell<Coordinate, char>>::dim(&[2, 3, 4]).len(), 24);
    }

    #[test]
    fn test_safe_displace() {
        let mut board: Board<MultiCell<i32, char>> = Board::new(1..=5);
        board.place(&2, '@').unwrap();
        board.place(&2, '@').unwrap();
        board.place(&4, '&').unwrap();

        assert!(board.safe(&2, &'&'));
        assert!(!board.safe(&2, &'@'));
        assert!(!board.safe(&3, &'@'));

        assert_eq!(board.safe_displace(&2, &4).unwrap(), vec!['&']);
        assert_eq!(board.get(&4).unwrap().pieces(), vec![&'@']);
        assert_eq!(board.get(&2).unwrap().pieces(), vec![&'@']);

        board.place(&1, '@').unwrap();
        board.place(&2, '@').unwrap();
        assert!(board.safe_displace(&1, &2).unwrap().is_empty());
        assert_eq!(board.get(&2).unwrap().len(), 3);

        board.place(&5, '&').unwrap();
        assert!(board.safe_displace(&5, &2).is_err());
        assert_eq!(board.get(&5).unwrap().pieces(), vec![&'&']);
    }
}
