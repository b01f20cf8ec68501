//! Yacht bots.
//!
//! The easy bot reads its first roll for sets of a number or the start of a
//! straight, then keeps collecting whatever it set aside. The medium bot aims
//! at the open category its dice are closest to, and scores each roll where
//! it beats that category's usual score by the most.

use serde::{Deserialize, Serialize};

use super::game::{Yacht, YachtMove};
use super::scoring::{face_counts, Pattern};
use crate::core::{bot_name, GameError, GameRng, PlayerId, Result};
use crate::interface::{Agent, Response};
use crate::rules::Game;

/// How a bot plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum YachtStyle {
    Easy,
    Medium,
}

impl YachtStyle {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            other => Err(GameError::InvalidOption(format!("unknown Yacht bot {other:?}"))),
        }
    }

    fn initial(self) -> char {
        match self {
            Self::Easy => 'e',
            Self::Medium => 'm',
        }
    }
}

/// What the dice set aside are being collected for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Aim {
    /// More of one number.
    Run,
    /// Two numbers.
    Full,
    Straight,
    /// High dice.
    Chance,
}

/// A computer Yacht player.
#[derive(Clone, Debug)]
pub struct YachtBot {
    name: String,
    style: YachtStyle,
    /// Set after holding, so the next answer is a roll.
    roll_next: bool,
    aim: Aim,
}

impl YachtBot {
    /// Create a bot with a name not in `taken`.
    pub fn new(style: YachtStyle, taken: &[String], rng: &mut GameRng) -> Self {
        Self { name: bot_name(style.initial(), taken, rng), style, roll_next: false, aim: Aim::Run }
    }

    pub fn from_spec(spec: &str, taken: &[String], rng: &mut GameRng) -> Result<Self> {
        Ok(Self::new(YachtStyle::parse(spec)?, taken, rng))
    }

    #[must_use]
    pub fn style(&self) -> YachtStyle {
        self.style
    }

    /// Choose the next move.
    pub fn decide(&mut self, game: &Yacht, me: PlayerId) -> YachtMove {
        if std::mem::take(&mut self.roll_next) && game.can_roll() {
            return YachtMove::Roll;
        }
        if !game.can_roll() {
            return YachtMove::Score(self.category(game, me));
        }
        let free = game.free_values();
        let held = game.held_values();
        let hold = match (held.is_empty(), self.style) {
            (true, YachtStyle::Easy) => easy_first_holds(game, me, &free),
            (true, YachtStyle::Medium) => self.medium_first_holds(game, me, &free),
            (false, YachtStyle::Easy) => easy_later_holds(&held, &free),
            (false, YachtStyle::Medium) => self.medium_later_holds(&held, &free),
        };
        if hold.is_empty() {
            YachtMove::Roll
        } else if hold.len() == free.len() {
            YachtMove::Score(self.category(game, me))
        } else {
            self.roll_next = true;
            YachtMove::Hold(hold)
        }
    }

    /// The category to score the dice in.
    fn category(&self, game: &Yacht, me: PlayerId) -> usize {
        let legal: Vec<usize> = game
            .legal_moves(me)
            .into_iter()
            .filter_map(|mv| match mv {
                YachtMove::Score(index) => Some(index),
                _ => None,
            })
            .collect();
        // A repeat five of a kind earns its bonus without using up a category.
        if let Some(&bonus) = legal.iter().find(|&&index| game.card(me)[index].is_some()) {
            return bonus;
        }
        let value = |index: usize| {
            let points = i64::from(game.score_for(me, index));
            match self.style {
                YachtStyle::Easy => points,
                YachtStyle::Medium => points - target_score(game, index),
            }
        };
        legal
            .iter()
            .copied()
            .max_by_key(|&index| (value(index), std::cmp::Reverse(index)))
            .unwrap_or(0)
    }

    fn medium_first_holds(&mut self, game: &Yacht, me: PlayerId, free: &[u32]) -> Vec<u32> {
        let counts = face_counts(free);
        let ranked = ranked_faces(&counts);
        let mut best: Option<(i64, i64, Vec<u32>, Aim)> = None;
        for index in game.open_categories(me) {
            let category = &game.categories()[index];
            let (need, ideal) = category.pattern.ideal();
            let need = need as i64;
            let gain = i64::from(category.score(free, game.roll_count())) - target_score(game, index);
            let (hold, aim) = match category.pattern {
                Pattern::Number(face) => (vec![face; counts[face as usize] as usize], Aim::Run),
                Pattern::ThreeKind | Pattern::FourKind { .. } | Pattern::FiveKind => {
                    let (count, face) = ranked[0];
                    (vec![face; count as usize], Aim::Run)
                }
                Pattern::Chance | Pattern::LowChance => {
                    (free.iter().copied().filter(|&v| v >= 5).collect(), Aim::Chance)
                }
                Pattern::LittleStraight { .. } | Pattern::BigStraight { .. } | Pattern::Straight { .. } => {
                    (distinct(free.iter().copied().filter(|v| ideal.contains(v))), Aim::Straight)
                }
                Pattern::FullHouse { .. } => {
                    let (first, first_face) = ranked[0];
                    let (second, second_face) = ranked[1];
                    let mut hold = vec![first_face; first.min(3) as usize];
                    hold.extend(vec![second_face; second.min(2) as usize]);
                    (hold, Aim::Full)
                }
            };
            let closeness = hold.len() as i64 - need;
            if best.as_ref().map_or(true, |(c, g, _, _)| (closeness, gain) > (*c, *g)) {
                best = Some((closeness, gain, hold, aim));
            }
        }
        let (_, _, hold, aim) = best.unwrap_or((0, 0, Vec::new(), Aim::Run));
        tracing::trace!(bot = %self.name, ?aim, ?hold, "yacht bot aim");
        self.aim = aim;
        hold
    }

    fn medium_later_holds(&self, held: &[u32], free: &[u32]) -> Vec<u32> {
        match self.aim {
            Aim::Run => free.iter().copied().filter(|&v| v == held[0]).collect(),
            Aim::Full => free.iter().copied().filter(|v| held.contains(v)).collect(),
            Aim::Straight => straight_fill(held, free),
            Aim::Chance => free.iter().copied().filter(|&v| v >= 4).collect(),
        }
    }
}

/// Points a category usually earns, judged on its ideal dice.
fn target_score(game: &Yacht, index: usize) -> i64 {
    let category = &game.categories()[index];
    let (_, ideal) = category.pattern.ideal();
    i64::from(category.score(&ideal, 2))
}

/// Faces by how many dice show them, most first.
fn ranked_faces(counts: &[u32; 7]) -> Vec<(u32, u32)> {
    let mut ranked: Vec<(u32, u32)> = (1..=6).map(|face| (counts[face as usize], face)).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked
}

fn distinct(values: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut values: Vec<u32> = values.collect();
    values.sort_unstable();
    values.dedup();
    values
}

/// New faces for a straight, never both ends.
fn straight_fill(held: &[u32], free: &[u32]) -> Vec<u32> {
    let mut hold = distinct(free.iter().copied().filter(|v| !held.contains(v)));
    if held.contains(&1) {
        hold.retain(|&v| v != 6);
    } else if held.contains(&6) {
        hold.retain(|&v| v != 1);
    }
    hold
}

fn easy_first_holds(game: &Yacht, me: PlayerId, free: &[u32]) -> Vec<u32> {
    let counts = face_counts(free);
    let ranked = ranked_faces(&counts);
    let (top, top_face) = ranked[0];
    let (second, second_face) = ranked[1];
    let open = |wanted: fn(Pattern) -> bool| {
        game.open_categories(me).any(|index| wanted(game.categories()[index].pattern))
    };
    let low: Vec<u32> = distinct(free.iter().copied().filter(|&v| v < 6));
    let high: Vec<u32> = distinct(free.iter().copied().filter(|&v| v > 1));

    if second > 1 {
        let mut hold = vec![top_face; top as usize];
        hold.extend(vec![second_face; second as usize]);
        hold
    } else if top > 2 {
        vec![top_face; top as usize]
    } else if low.len() > 2 && open(|p| matches!(p, Pattern::LittleStraight { .. })) {
        low
    } else if high.len() > 2 && open(|p| matches!(p, Pattern::BigStraight { .. } | Pattern::Straight { .. })) {
        high
    } else if top > 1 {
        vec![top_face; top as usize]
    } else {
        free.iter().copied().max().into_iter().collect()
    }
}

fn easy_later_holds(held: &[u32], free: &[u32]) -> Vec<u32> {
    match distinct(held.iter().copied()).len() {
        1 => free.iter().copied().filter(|&v| v == held[0]).collect(),
        2 => free.iter().copied().filter(|v| held.contains(v)).collect(),
        _ => straight_fill(held, free),
    }
}

impl Agent<Yacht> for YachtBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &Yacht, player: PlayerId) -> Response<YachtMove> {
        let mv = self.decide(game, player);
        tracing::debug!(bot = %self.name, ?mv, dice = %game.dice(), "yacht bot decision");
        Response::Move(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::yacht::{YachtBuilder, YachtOptions};

    fn solo(seed: u64) -> (Yacht, PlayerId) {
        let yacht = YachtBuilder::new().players(vec!["Ann".to_string()]).build(seed).unwrap();
        (yacht, PlayerId::new(0))
    }

    fn bot(style: YachtStyle) -> YachtBot {
        YachtBot::new(style, &[], &mut GameRng::new(3))
    }

    #[test]
    fn test_parse_styles() {
        assert_eq!(YachtStyle::parse("Easy").unwrap(), YachtStyle::Easy);
        assert_eq!(YachtStyle::parse("medium").unwrap(), YachtStyle::Medium);
        assert!(YachtStyle::parse("hard").is_err());
        let bot = YachtBot::from_spec("medium", &[], &mut GameRng::new(1)).unwrap();
        assert!(bot.name().starts_with('M'));
    }

    #[test]
    fn test_bots_finish_every_variant() {
        for (seed, variant) in ["", "general", "yahtzee", "yam", "cheerio", "hindenberg"].iter().enumerate() {
            let mut options = YachtOptions::default();
            for word in variant.split_whitespace() {
                options.apply(word).unwrap();
            }
            let mut bots = vec![bot(YachtStyle::Easy), bot(YachtStyle::Medium)];
            let mut yacht = YachtBuilder::new()
                .players(vec!["Easy".to_string(), "Medium".to_string()])
                .options(options)
                .build(seed as u64)
                .unwrap();
            let mut actions = 0;
            while !yacht.is_over() {
                let player = yacht.current_player();
                let mv = bots[player.index()].decide(&yacht, player);
                yacht.apply_move(player, mv).unwrap();
                actions += 1;
                assert!(actions < 1_000, "{variant}");
            }
            assert!(yacht.totals().max_value() > Some(0), "{variant}");
        }
    }

    #[test]
    fn test_easy_scores_a_yacht() {
        let (mut yacht, me) = solo(1);
        yacht.set_dice(&[3; 5]);
        let five = yacht.find_category("yacht").unwrap();
        assert_eq!(bot(YachtStyle::Easy).decide(&yacht, me), YachtMove::Score(five));
    }

    #[test]
    fn test_easy_holds_then_rolls() {
        let (mut yacht, me) = solo(1);
        yacht.set_dice(&[6, 6, 1, 3, 4]);
        let mut easy = bot(YachtStyle::Easy);
        let hold = easy.decide(&yacht, me);
        assert_eq!(hold, YachtMove::Hold(vec![1, 3, 4]));
        yacht.apply_move(me, hold).unwrap();
        assert_eq!(easy.decide(&yacht, me), YachtMove::Roll);
    }

    #[test]
    fn test_medium_scores_against_targets() {
        let (mut yacht, me) = solo(1);
        yacht.set_dice(&[2, 2, 5, 5, 5]);
        let full = yacht.find_category("full house").unwrap();
        assert_eq!(bot(YachtStyle::Medium).decide(&yacht, me), YachtMove::Score(full));
    }

    #[test]
    fn test_medium_chases_a_straight() {
        let (mut yacht, me) = solo(1);
        yacht.set_dice(&[1, 2, 3, 4, 6]);
        let mut medium = bot(YachtStyle::Medium);
        match medium.decide(&yacht, me) {
            YachtMove::Hold(hold) => {
                assert_eq!(hold.len(), 4);
                assert_eq!(medium.aim, Aim::Straight);
                yacht.apply_move(me, YachtMove::Hold(hold)).unwrap();
            }
            other => panic!("expected a hold, got {other:?}"),
        }
        assert_eq!(medium.decide(&yacht, me), YachtMove::Roll);
    }

    #[test]
    fn test_straight_fill_keeps_one_end() {
        assert_eq!(straight_fill(&[1, 2, 3, 4], &[6]), Vec::<u32>::new());
        assert_eq!(straight_fill(&[2, 3, 4], &[5, 5]), vec![5]);
        assert_eq!(straight_fill(&[3, 4, 6], &[1, 5]), vec![5]);
    }
}
