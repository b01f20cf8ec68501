//! The backgammon position.
//!
//! Points are stored once, numbered for O: index 0 is O's 1 point and X's
//! 24 point. Positive counts are O's checkers, negative counts are X's.
//! Every public method takes point numbers from the given side's own
//! perspective, so move logic never needs to know which side it is moving.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Checkers per side.
pub const CHECKERS: u8 = 15;

/// Points on the board.
pub const POINTS: u8 = 24;

/// Highest point of a side's home board.
pub const HOME: u8 = 6;

/// One of the two colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    O,
    X,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Side::O => Side::X,
            Side::X => Side::O,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Side::O => 0,
            Side::X => 1,
        }
    }

    /// O sits in seat 0 and X in seat 1.
    #[must_use]
    pub fn of(player: PlayerId) -> Self {
        if player.index() == 0 {
            Side::O
        } else {
            Side::X
        }
    }

    #[must_use]
    pub fn player(self) -> PlayerId {
        PlayerId::new(self.index() as u8)
    }

    fn sign(self) -> i8 {
        match self {
            Side::O => 1,
            Side::X => -1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::O => "O",
            Side::X => "X",
        })
    }
}

/// Where a single checker moves from or to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spot {
    Bar,
    Point(u8),
    Off,
}

impl Spot {
    /// Distance from the side's bearing-off edge: the bar is 25, off is 0.
    #[must_use]
    pub fn pips(self) -> u8 {
        match self {
            Spot::Bar => POINTS + 1,
            Spot::Point(point) => point,
            Spot::Off => 0,
        }
    }

    /// Parse `bar`, `off` or a point number.
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "bar" | "b" | "25" => Some(Spot::Bar),
            "off" | "o" | "0" | "home" => Some(Spot::Off),
            number => number.parse().ok().filter(|p| (1..=POINTS).contains(p)).map(Spot::Point),
        }
    }
}

impl std::fmt::Display for Spot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Spot::Bar => f.write_str("bar"),
            Spot::Point(point) => write!(f, "{point}"),
            Spot::Off => f.write_str("off"),
        }
    }
}

/// One checker moved by one die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub from: Spot,
    pub to: Spot,
    pub die: u8,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

/// A full backgammon position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    points: [i8; POINTS as usize],
    bar: [u8; 2],
    off: [u8; 2],
}

impl Default for Position {
    /// The standard starting layout.
    fn default() -> Self {
        Self::from_layout(&[(24, 2), (13, 5), (8, 3), (6, 5)])
    }
}

fn index(side: Side, point: u8) -> usize {
    match side {
        Side::O => usize::from(point - 1),
        Side::X => usize::from(POINTS - point),
    }
}

impl Position {
    /// A board with no checkers on it.
    #[must_use]
    pub fn empty() -> Self {
        Self { points: [0; POINTS as usize], bar: [0; 2], off: [0; 2] }
    }

    /// Both sides laid out the same way from their own perspective.
    ///
    /// Checkers not placed are counted as borne off.
    #[must_use]
    pub fn from_layout(layout: &[(u8, u8)]) -> Self {
        let mut position = Self::empty();
        for side in [Side::O, Side::X] {
            for &(point, count) in layout {
                position.set(side, point, count);
            }
            position.off[side.index()] = CHECKERS.saturating_sub(position.on_board(side));
        }
        position
    }

    /// Put exactly `count` of `side`'s checkers on `point`.
    pub fn set(&mut self, side: Side, point: u8, count: u8) {
        self.points[index(side, point)] = side.sign() * count as i8;
    }

    /// Checkers `side` has on its own `point`.
    #[must_use]
    pub fn count(&self, side: Side, point: u8) -> u8 {
        let value = self.points[index(side, point)] * side.sign();
        value.max(0) as u8
    }

    /// Opposing checkers on `side`'s `point`.
    #[must_use]
    pub fn opponents(&self, side: Side, point: u8) -> u8 {
        self.count(side.other(), POINTS + 1 - point)
    }

    #[must_use]
    pub fn bar(&self, side: Side) -> u8 {
        self.bar[side.index()]
    }

    pub fn set_bar(&mut self, side: Side, count: u8) {
        self.bar[side.index()] = count;
    }

    #[must_use]
    pub fn off(&self, side: Side) -> u8 {
        self.off[side.index()]
    }

    pub fn set_off(&mut self, side: Side, count: u8) {
        self.off[side.index()] = count;
    }

    /// Checkers on the points, not counting the bar.
    #[must_use]
    pub fn on_board(&self, side: Side) -> u8 {
        (1..=POINTS).map(|p| self.count(side, p)).sum()
    }

    /// Whether every checker still in play is in the home board.
    #[must_use]
    pub fn all_home(&self, side: Side) -> bool {
        self.bar(side) == 0 && (HOME + 1..=POINTS).all(|p| self.count(side, p) == 0)
    }

    /// Total pips `side` needs to bear everything off.
    #[must_use]
    pub fn pips(&self, side: Side) -> u32 {
        let board: u32 = (1..=POINTS).map(|p| u32::from(p) * u32::from(self.count(side, p))).sum();
        board + 25 * u32::from(self.bar(side))
    }

    /// Spots `side` could move a checker from.
    pub fn sources(&self, side: Side) -> impl Iterator<Item = Spot> + '_ {
        let entering = self.bar(side) > 0;
        let bar = entering.then_some(Spot::Bar);
        let points = (1..=POINTS)
            .rev()
            .filter(move |&p| !entering && self.count(side, p) > 0)
            .map(Spot::Point);
        bar.into_iter().chain(points)
    }

    /// Where a checker from `from` lands with `die`, if it may move.
    #[must_use]
    pub fn target(&self, side: Side, from: Spot, die: u8) -> Option<Spot> {
        match from {
            Spot::Off => return None,
            Spot::Bar if self.bar(side) == 0 => return None,
            Spot::Point(p) if self.bar(side) > 0 || self.count(side, p) == 0 => return None,
            _ => {}
        }
        let start = from.pips();
        if start > die {
            let to = start - die;
            return (self.opponents(side, to) < 2).then_some(Spot::Point(to));
        }
        if !self.all_home(side) {
            return None;
        }
        // Bearing off: exact, or from the highest occupied point.
        let highest = (start + 1..=HOME).all(|p| self.count(side, p) == 0);
        (start == die || highest).then_some(Spot::Off)
    }

    /// Move one checker with `die`, hitting a lone opposing checker.
    #[must_use]
    pub fn step(&self, side: Side, from: Spot, die: u8) -> Option<(Position, Step)> {
        let to = self.target(side, from, die)?;
        let mut next = *self;
        match from {
            Spot::Bar => next.bar[side.index()] -= 1,
            Spot::Point(p) => next.points[index(side, p)] -= side.sign(),
            Spot::Off => return None,
        }
        match to {
            Spot::Point(p) => {
                if next.opponents(side, p) == 1 {
                    next.points[index(side, p)] = 0;
                    next.bar[side.other().index()] += 1;
                }
                next.points[index(side, p)] += side.sign();
            }
            Spot::Off => next.off[side.index()] += 1,
            Spot::Bar => return None,
        }
        Some((next, Step { from, to, die }))
    }

    /// What a checker at `point` of `side` shows on the board.
    fn cell(&self, side: Side, point: u8) -> String {
        let value = self.points[index(side, point)];
        match value {
            0 => ".".to_string(),
            n if n > 0 => format!("O{n}"),
            n => format!("X{}", -n),
        }
    }

    /// The board drawn with points numbered for `side`.
    #[must_use]
    pub fn render(&self, side: Side) -> String {
        let row = |points: Vec<u8>| -> (String, String) {
            let split = |parts: Vec<String>| format!("{} |{}", parts[..6].concat(), parts[6..].concat());
            let labels = points.iter().map(|p| format!("{p:>3}")).collect();
            let cells = points.iter().map(|&p| format!("{:>3}", self.cell(side, p))).collect();
            (split(labels), split(cells))
        };
        let (top_labels, top_cells) = row((13..=POINTS).collect());
        let (bottom_labels, bottom_cells) = row((1..=12).rev().collect());
        format!(
            "{top_labels}\n{top_cells}\n\n{bottom_cells}\n{bottom_labels}\nBar: O {}, X {}. Off: O {}, X {}.",
            self.bar(Side::O),
            self.bar(Side::X),
            self.off(Side::O),
            self.off(Side::X),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_layout() {
        let position = Position::default();
        for side in [Side::O, Side::X] {
            assert_eq!(position.on_board(side), CHECKERS);
            assert_eq!(position.count(side, 24), 2);
            assert_eq!(position.count(side, 6), 5);
            assert_eq!(position.pips(side), 167);
            assert_eq!(position.off(side), 0);
        }
        assert_eq!(position.opponents(Side::O, 1), 2);
        assert_eq!(position.opponents(Side::O, 12), 5);
    }

    #[test]
    fn test_blocked_and_hit() {
        let mut position = Position::from_layout(&[(13, 1)]);
        // X's lone checker on its 13 sits on O's 12.
        assert_eq!(position.target(Side::O, Spot::Point(13), 1), Some(Spot::Point(12)));
        let (hit, step) = position.step(Side::O, Spot::Point(13), 1).unwrap();
        assert_eq!(step.to, Spot::Point(12));
        assert_eq!(hit.bar(Side::X), 1);
        assert_eq!(hit.count(Side::O, 12), 1);
        assert_eq!(hit.count(Side::X, 13), 0);

        position.set(Side::X, 13, 2);
        assert_eq!(position.target(Side::O, Spot::Point(13), 1), None);
    }

    #[test]
    fn test_entering_first() {
        let mut position = Position::default();
        position.set_bar(Side::O, 1);
        let sources: Vec<Spot> = position.sources(Side::O).collect();
        assert_eq!(sources, vec![Spot::Bar]);
        assert_eq!(position.target(Side::O, Spot::Bar, 3), Some(Spot::Point(22)));
        // X's 6 point is O's 19.
        assert_eq!(position.target(Side::O, Spot::Bar, 6), None);
        assert_eq!(position.target(Side::O, Spot::Point(13), 2), None);
    }

    #[test]
    fn test_bearing_off() {
        let position = Position::from_layout(&[(5, 2), (3, 1)]);
        assert!(position.all_home(Side::O));
        assert_eq!(position.target(Side::O, Spot::Point(5), 5), Some(Spot::Off));
        assert_eq!(position.target(Side::O, Spot::Point(5), 6), Some(Spot::Off));
        // A higher die only bears off from the highest point.
        assert_eq!(position.target(Side::O, Spot::Point(3), 4), None);
        assert_eq!(position.target(Side::O, Spot::Point(3), 2), Some(Spot::Point(1)));

        let outside = Position::from_layout(&[(7, 1), (3, 1)]);
        assert_eq!(outside.target(Side::O, Spot::Point(3), 3), None);
    }

    #[test]
    fn test_parse_spots() {
        assert_eq!(Spot::parse("bar"), Some(Spot::Bar));
        assert_eq!(Spot::parse("OFF"), Some(Spot::Off));
        assert_eq!(Spot::parse("13"), Some(Spot::Point(13)));
        assert_eq!(Spot::parse("26"), None);
        assert_eq!(Spot::parse("x"), None);
    }

    #[test]
    fn test_render_mirrors_numbering() {
        let position = Position::default();
        let o = position.render(Side::O);
        let x = position.render(Side::X);
        assert!(o.starts_with(" 13"));
        assert!(o.contains("O5"));
        assert!(x.contains("X5"));
        assert!(o.ends_with("Off: O 0, X 0."));
    }
}
