//! Score categories and how a roll is valued in each.
//!
//! A category pairs a pattern the dice must show with a rule for what the
//! roll is then worth. Rolls that miss the pattern score zero.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};

/// What the dice must show for a category to score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Any number of dice showing the face.
    Number(u32),
    ThreeKind,
    FourKind { strict: bool },
    FiveKind,
    FullHouse { strict: bool },
    /// 1-2-3-4-5.
    LittleStraight { wild: bool },
    /// 2-3-4-5-6.
    BigStraight { wild: bool },
    /// Either straight, when only one straight category is in play.
    Straight { wild: bool },
    Chance,
    LowChance,
}

impl Pattern {
    /// The qualifying sub-total for `values`, or 0 if the pattern is missed.
    ///
    /// Strict four of a kind and full house refuse five of a kind. Wild
    /// straights let a one stand in for a missing two.
    #[must_use]
    pub fn check(self, values: &[u32]) -> u32 {
        let counts = face_counts(values);
        let sum: u32 = values.iter().sum();
        let most = counts.iter().copied().max().unwrap_or(0);
        let most_face = |at_least: u32| (1..=6u32).rev().find(|&face| counts[face as usize] >= at_least);
        match self {
            Pattern::Number(face) => face * counts.get(face as usize).copied().unwrap_or(0),
            Pattern::ThreeKind => most_face(3).map_or(0, |face| 3 * face),
            Pattern::FourKind { strict } if strict && most == 5 => 0,
            Pattern::FourKind { .. } => most_face(4).map_or(0, |face| 4 * face),
            Pattern::FiveKind => most_face(5).map_or(0, |face| 5 * face),
            Pattern::FullHouse { strict } => {
                let mut shape: Vec<u32> = counts.iter().copied().filter(|&c| c > 0).collect();
                shape.sort_unstable();
                match shape.as_slice() {
                    [2, 3] => sum,
                    [5] if !strict => sum,
                    _ => 0,
                }
            }
            Pattern::LittleStraight { wild } => match straight_low(values, wild) {
                Some(1) => sum,
                _ => 0,
            },
            Pattern::BigStraight { wild } => match straight_low(values, wild) {
                Some(2) => sum,
                _ => 0,
            },
            Pattern::Straight { wild } => straight_low(values, wild).map_or(0, |_| sum),
            Pattern::Chance | Pattern::LowChance => sum,
        }
    }

    /// Dice the bots aim for, with how many of them they need to match.
    #[must_use]
    pub fn ideal(self) -> (usize, [u32; 5]) {
        match self {
            Pattern::Number(face) => {
                let next = |step: u32| (face + step - 1) % 6 + 1;
                (3, [face, face, face, next(1), next(2)])
            }
            Pattern::ThreeKind => (3, [4, 4, 4, 3, 5]),
            Pattern::FourKind { .. } => (4, [2, 2, 2, 2, 4]),
            Pattern::FiveKind => (5, [4; 5]),
            Pattern::FullHouse { .. } => (5, [3, 3, 2, 2, 2]),
            Pattern::LittleStraight { .. } => (5, [1, 2, 3, 4, 5]),
            Pattern::BigStraight { .. } | Pattern::Straight { .. } => (5, [2, 3, 4, 5, 6]),
            Pattern::Chance => (3, [4, 4, 5, 5, 6]),
            Pattern::LowChance => (3, [3, 4, 4, 5, 5]),
        }
    }
}

/// How many dice show each face, indexed by face.
#[must_use]
pub fn face_counts(values: &[u32]) -> [u32; 7] {
    let mut counts = [0; 7];
    for &value in values {
        if let Some(count) = counts.get_mut(value as usize) {
            *count += 1;
        }
    }
    counts
}

/// The low end of the straight the dice make, if any.
fn straight_low(values: &[u32], wild: bool) -> Option<u32> {
    if values.len() != 5 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let run = |dice: &[u32]| dice.windows(2).all(|pair| pair[1] == pair[0] + 1).then(|| dice[0]);
    if let Some(low) = run(&sorted) {
        return Some(low);
    }
    if wild && !sorted.contains(&2) && sorted[0] == 1 {
        sorted[0] = 2;
        sorted.sort_unstable();
        return run(&sorted);
    }
    None
}

/// What a qualifying roll is worth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scoring {
    /// The qualifying dice only.
    SubTotal,
    /// Every die, plus a bonus.
    Total { bonus: u32 },
    /// A set number of points.
    Fixed(u32),
}

/// A score specification from the options, such as `total+40` or `45/40`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSpec {
    /// `None` takes the category out of the game.
    pub scoring: Option<Scoring>,
    /// Extra points for scoring without rerolling.
    pub first: u32,
}

impl std::str::FromStr for ScoreSpec {
    type Err = GameError;

    /// Parse `total`, `sub-total`, `total+N`, `N`, or `FIRST/NORMAL`.
    ///
    /// A score of 0 removes the category.
    fn from_str(text: &str) -> Result<Self> {
        let bad = || GameError::InvalidOption(format!("invalid score specification {text:?}"));
        let number = |part: &str| part.trim().parse::<u32>().map_err(|_| bad());
        let text = text.trim().to_lowercase();
        let spec = if text == "total" {
            Self { scoring: Some(Scoring::Total { bonus: 0 }), first: 0 }
        } else if text == "sub-total" {
            Self { scoring: Some(Scoring::SubTotal), first: 0 }
        } else if let Some(bonus) = text.strip_prefix("total+") {
            Self { scoring: Some(Scoring::Total { bonus: number(bonus)? }), first: 0 }
        } else if let Some((first, normal)) = text.split_once('/') {
            let (first, normal) = (number(first)?, number(normal)?);
            if first < normal || normal == 0 {
                return Err(bad());
            }
            Self { scoring: Some(Scoring::Fixed(normal)), first: first - normal }
        } else {
            let points = number(&text)?;
            Self { scoring: (points > 0).then_some(Scoring::Fixed(points)), first: 0 }
        };
        Ok(spec)
    }
}

/// A line on the score card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreCategory {
    pub name: String,
    pub description: &'static str,
    pub pattern: Pattern,
    pub scoring: Scoring,
    pub first: u32,
}

impl ScoreCategory {
    fn new(name: &str, description: &'static str, pattern: Pattern, scoring: Scoring) -> Self {
        Self { name: name.to_string(), description, pattern, scoring, first: 0 }
    }

    /// Value `values` in this category, rolled in `roll_count` rolls.
    #[must_use]
    pub fn score(&self, values: &[u32], roll_count: u32) -> u32 {
        let sub_total = self.pattern.check(values);
        if sub_total == 0 {
            return 0;
        }
        let base = match self.scoring {
            Scoring::SubTotal => sub_total,
            Scoring::Total { bonus } => values.iter().sum::<u32>() + bonus,
            Scoring::Fixed(points) => points,
        };
        if roll_count == 1 {
            base + self.first
        } else {
            base
        }
    }

    /// True for the six number categories.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.pattern, Pattern::Number(_))
    }
}

/// Names of the categories a score option can change, with its option key.
pub const SCORE_KEYS: [(&str, &str); 8] = [
    ("three-kind", "Three of a Kind"),
    ("low-chance", "Low Chance"),
    ("chance", "Chance"),
    ("low-straight", "Little Straight"),
    ("big-straight", "Big Straight"),
    ("full-house", "Full House"),
    ("four-kind", "Four of a Kind"),
    ("five-kind", "Yacht"),
];

/// Every category that could be in play, in score card order.
///
/// `None` scoring marks a category that sits out unless an option adds it.
#[must_use]
pub fn standard_categories() -> Vec<(ScoreCategory, Option<Scoring>)> {
    let numbers = ["Ones", "Twos", "Threes", "Fours", "Fives", "Sixes"];
    let descriptions = [
        "As many ones as possible",
        "As many twos as possible",
        "As many threes as possible",
        "As many fours as possible",
        "As many fives as possible",
        "As many sixes as possible",
    ];
    let mut all: Vec<(ScoreCategory, Option<Scoring>)> = numbers
        .iter()
        .zip(descriptions)
        .zip(1..)
        .map(|((name, description), face)| {
            (ScoreCategory::new(name, description, Pattern::Number(face), Scoring::SubTotal), Some(Scoring::SubTotal))
        })
        .collect();
    let rest = [
        ("Three of a Kind", "Three of the same number", Pattern::ThreeKind, None),
        ("Low Chance", "Any roll (lower than Chance)", Pattern::LowChance, None),
        ("Chance", "Any roll", Pattern::Chance, Some(Scoring::Total { bonus: 0 })),
        ("Little Straight", "1-2-3-4-5", Pattern::LittleStraight { wild: false }, Some(Scoring::Fixed(30))),
        ("Big Straight", "2-3-4-5-6", Pattern::BigStraight { wild: false }, Some(Scoring::Fixed(30))),
        ("Full House", "Three of a kind and a pair", Pattern::FullHouse { strict: false }, Some(Scoring::SubTotal)),
        ("Four of a Kind", "Four of the same number", Pattern::FourKind { strict: false }, Some(Scoring::SubTotal)),
        ("Yacht", "Five of the same number", Pattern::FiveKind, Some(Scoring::Fixed(50))),
    ];
    for (name, description, pattern, scoring) in rest {
        let shown = scoring.unwrap_or(Scoring::SubTotal);
        all.push((ScoreCategory::new(name, description, pattern, shown), scoring));
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_kinds() {
        assert_eq!(Pattern::Number(5).check(&[5, 2, 5, 5, 1]), 15);
        assert_eq!(Pattern::Number(6).check(&[5, 2, 5, 5, 1]), 0);
        assert_eq!(Pattern::ThreeKind.check(&[4, 4, 1, 4, 6]), 12);
        assert_eq!(Pattern::ThreeKind.check(&[4, 4, 1, 3, 6]), 0);
        assert_eq!(Pattern::FourKind { strict: false }.check(&[2, 2, 2, 2, 6]), 8);
        assert_eq!(Pattern::FourKind { strict: false }.check(&[3; 5]), 12);
        assert_eq!(Pattern::FourKind { strict: true }.check(&[3; 5]), 0);
        assert_eq!(Pattern::FiveKind.check(&[6; 5]), 30);
        assert_eq!(Pattern::FiveKind.check(&[6, 6, 6, 6, 5]), 0);
    }

    #[test]
    fn test_full_house() {
        let loose = Pattern::FullHouse { strict: false };
        let strict = Pattern::FullHouse { strict: true };
        assert_eq!(loose.check(&[2, 5, 2, 5, 5]), 19);
        assert_eq!(loose.check(&[2, 5, 2, 5, 4]), 0);
        assert_eq!(loose.check(&[1; 5]), 5);
        assert_eq!(strict.check(&[1; 5]), 0);
        assert_eq!(strict.check(&[3, 3, 3, 6, 6]), 21);
    }

    #[test]
    fn test_straights() {
        let little = Pattern::LittleStraight { wild: false };
        let big = Pattern::BigStraight { wild: false };
        assert_eq!(little.check(&[3, 1, 4, 5, 2]), 15);
        assert_eq!(little.check(&[3, 6, 4, 5, 2]), 0);
        assert_eq!(big.check(&[3, 6, 4, 5, 2]), 20);
        assert_eq!(big.check(&[3, 6, 4, 5, 5]), 0);
        assert_eq!(Pattern::Straight { wild: false }.check(&[1, 2, 3, 4, 5]), 15);
        assert_eq!(Pattern::Straight { wild: false }.check(&[6, 2, 3, 4, 5]), 20);
    }

    #[test]
    fn test_wild_one_fills_the_two() {
        assert_eq!(Pattern::LittleStraight { wild: true }.check(&[1, 1, 3, 4, 5]), 14);
        assert_eq!(Pattern::BigStraight { wild: true }.check(&[1, 3, 4, 5, 6]), 19);
        assert_eq!(Pattern::BigStraight { wild: false }.check(&[1, 3, 4, 5, 6]), 0);
        assert_eq!(Pattern::Straight { wild: true }.check(&[1, 1, 4, 5, 6]), 0);
    }

    #[test]
    fn test_category_scoring() {
        let mut yacht = ScoreCategory::new("Yacht", "", Pattern::FiveKind, Scoring::Fixed(50));
        assert_eq!(yacht.score(&[2; 5], 3), 50);
        assert_eq!(yacht.score(&[2, 2, 2, 2, 1], 3), 0);
        yacht.scoring = Scoring::Total { bonus: 40 };
        assert_eq!(yacht.score(&[2; 5], 3), 50);
        yacht.scoring = Scoring::Fixed(40);
        yacht.first = 5;
        assert_eq!(yacht.score(&[2; 5], 1), 45);
        assert_eq!(yacht.score(&[2; 5], 2), 40);
    }

    #[test]
    fn test_score_spec_parse() {
        let spec: ScoreSpec = "total+30".parse().unwrap();
        assert_eq!(spec.scoring, Some(Scoring::Total { bonus: 30 }));
        let spec: ScoreSpec = "45/40".parse().unwrap();
        assert_eq!(spec, ScoreSpec { scoring: Some(Scoring::Fixed(40)), first: 5 });
        assert_eq!("0".parse::<ScoreSpec>().unwrap().scoring, None);
        assert_eq!("Sub-Total".parse::<ScoreSpec>().unwrap().scoring, Some(Scoring::SubTotal));
        assert!("lots".parse::<ScoreSpec>().is_err());
        assert!("total+".parse::<ScoreSpec>().is_err());
        assert!("30/40".parse::<ScoreSpec>().is_err());
    }

    #[test]
    fn test_ideal_dice_meet_their_pattern() {
        for (category, _) in standard_categories() {
            let (_, dice) = category.pattern.ideal();
            assert!(category.pattern.check(&dice) > 0, "{}", category.name);
        }
    }
}
