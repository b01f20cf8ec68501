//! N-dimensional integer coordinates.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A point on an n-dimensional board.
///
/// Arithmetic is element-wise; adding coordinates of different lengths uses
/// the shorter length.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate(pub SmallVec<[i32; 3]>);

impl Coordinate {
    #[must_use]
    pub fn new(values: &[i32]) -> Self {
        Self(values.iter().copied().collect())
    }

    /// Element-wise absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.iter().map(|v| v.abs()).collect())
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    fn zip_with(&self, other: &Self, op: impl Fn(i32, i32) -> i32) -> Self {
        Self(self.0.iter().zip(other.0.iter()).map(|(&a, &b)| op(a, b)).collect())
    }
}

impl<const N: usize> From<[i32; N]> for Coordinate {
    fn from(values: [i32; N]) -> Self {
        Self::new(&values)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(&[x, y])
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, other: Coordinate) -> Coordinate {
        self.zip_with(&other, |a, b| a + b)
    }
}

impl Add<(i32, i32)> for Coordinate {
    type Output = Coordinate;

    fn add(self, other: (i32, i32)) -> Coordinate {
        self + Coordinate::from(other)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, other: Coordinate) -> Coordinate {
        self.zip_with(&other, |a, b| a - b)
    }
}

impl Mul<i32> for Coordinate {
    type Output = Coordinate;

    fn mul(self, factor: i32) -> Coordinate {
        Self(self.0.iter().map(|v| v * factor).collect())
    }
}

impl Mul<Coordinate> for i32 {
    type Output = Coordinate;

    fn mul(self, coordinate: Coordinate) -> Coordinate {
        coordinate * self
    }
}

impl Neg for Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        self * -1
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Coordinate::from([8, 0, 1]);
        let b = Coordinate::from([1, 2, 3]);
        assert_eq!(a.clone() + b.clone(), Coordinate::from([9, 2, 4]));
        assert_eq!(a.clone() - b.clone(), Coordinate::from([7, -2, -2]));
        assert_eq!(a - (-b), Coordinate::from([9, 2, 4]));
    }

    #[test]
    fn test_scale_and_abs() {
        assert_eq!(Coordinate::from((3, 2)) * 5, Coordinate::from((15, 10)));
        assert_eq!(5 * Coordinate::from((3, 2)), Coordinate::from((15, 10)));
        assert_eq!(Coordinate::from((-8, 1)).abs(), Coordinate::from((8, 1)));
        assert_eq!(-Coordinate::from([1, -2, 3]), Coordinate::from([-1, 2, -3]));
    }

    #[test]
    fn test_add_tuple() {
        assert_eq!(Coordinate::from((3, 2)) + (5, 4), Coordinate::from((8, 6)));
    }
}
