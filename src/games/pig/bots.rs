//! Pig bots.
//!
//! Every strategy shares two overrides: keep rolling when someone has
//! already reached 100 and the bot is not ahead of them, and stop as soon as
//! banking would win.
//!
//! ## Strategies
//!
//! | Strategy        | Defaults  | Rolls while                                  |
//! |-----------------|-----------|----------------------------------------------|
//! | `value`         | 25        | turn score < value                           |
//! | `base-pace-race`| 19/14/31  | under base, too far behind, or leader close  |
//! | `pace-race`     | 21/8/29   | under a hold value scaled by the deficit     |
//! | `rolls`         | 5         | fewer than n rolls this turn                 |
//! | `scoring-turns` | 4         | under (100 - score) / turns remaining        |

use serde::{Deserialize, Serialize};

use super::game::{Pig, PigMove, TARGET};
use crate::core::{bot_name, GameError, GameRng, PlayerId, Result};
use crate::interface::{Agent, Response};
use crate::rules::Game;

const SATAN_NAMES: [&str; 8] = ["Abbadon", "Apollyon", "Beast", "Beelzebub", "Belial", "Devil", "Lucifer", "Satan"];

/// A Pig decision rule and its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PigStrategy {
    Value { value: i64 },
    BasePaceRace { base: i64, pace: i64, race: i64 },
    PaceRace { pace: i64, modifier: i64, race: i64 },
    Rolls { rolls: u32 },
    ScoringTurns { turns: i64 },
}

impl PigStrategy {
    /// Parse a preset name or a general bot with slash-separated parameters.
    ///
    /// Missing parameters take their defaults: `bpr=20` is `bpr=20/14/31`.
    ///
    /// ```
    /// use parlor::games::pig::PigStrategy;
    ///
    /// assert_eq!(PigStrategy::parse("knizia").unwrap(), PigStrategy::Value { value: 20 });
    /// assert_eq!(
    ///     PigStrategy::parse("pr=25").unwrap(),
    ///     PigStrategy::PaceRace { pace: 25, modifier: 8, race: 29 }
    /// );
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim().to_lowercase();
        let (kind, params) = text.split_once('=').unwrap_or((text.as_str(), ""));
        let params: Vec<i64> = params
            .split('/')
            .filter(|p| !p.is_empty())
            .map(|p| p.trim().parse::<i64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| GameError::InvalidOption(format!("bad bot parameters in {text:?}")))?;
        if params.iter().any(|&p| !(0..=100).contains(&p)) {
            return Err(GameError::InvalidOption(format!("bot parameters must be 0-100: {text:?}")));
        }
        let arg = |index: usize, default: i64| params.get(index).copied().unwrap_or(default);

        let strategy = match kind {
            "stupid" => Self::Value { value: 25 },
            "easy" => Self::ScoringTurns { turns: 4 },
            "medium" => Self::BasePaceRace { base: 19, pace: 14, race: 31 },
            "hard" => Self::PaceRace { pace: 21, modifier: 8, race: 29 },
            "knizia" => Self::Value { value: 20 },
            "satan" => Self::BasePaceRace { base: 6, pace: 6, race: 6 },
            "x" => Self::Rolls { rolls: 3 },
            "value" => Self::Value { value: arg(0, 25) },
            "base-pace-race" | "bpr" => Self::BasePaceRace { base: arg(0, 19), pace: arg(1, 14), race: arg(2, 31) },
            "pace-race" | "pr" => Self::PaceRace { pace: arg(0, 21), modifier: arg(1, 8).max(1), race: arg(2, 29) },
            "rolls" => Self::Rolls { rolls: arg(0, 5).max(1) as u32 },
            "scoring-turns" | "t" => Self::ScoringTurns { turns: arg(0, 4).max(1) },
            _ => return Err(GameError::InvalidOption(format!("unknown Pig bot {kind:?}"))),
        };
        Ok(strategy)
    }

    fn initial(&self) -> char {
        match self {
            Self::Value { .. } => 'v',
            Self::BasePaceRace { .. } => 'b',
            Self::PaceRace { .. } => 'p',
            Self::Rolls { .. } => 'r',
            Self::ScoringTurns { .. } => 't',
        }
    }
}

impl Default for PigStrategy {
    fn default() -> Self {
        Self::BasePaceRace { base: 19, pace: 14, race: 31 }
    }
}

/// A computer Pig player.
#[derive(Clone, Debug)]
pub struct PigBot {
    name: String,
    strategy: PigStrategy,
    /// Scoring turns left, for `ScoringTurns`.
    turns_left: i64,
}

impl PigBot {
    /// Create a bot with a name not in `taken`.
    pub fn new(strategy: PigStrategy, taken: &[String], rng: &mut GameRng) -> Self {
        let name = if strategy == (PigStrategy::BasePaceRace { base: 6, pace: 6, race: 6 }) {
            let free: Vec<&str> = SATAN_NAMES.iter().copied().filter(|n| !taken.iter().any(|t| t == n)).collect();
            rng.choose(&free).map_or_else(|| bot_name('s', taken, rng), |n| (*n).to_string())
        } else {
            bot_name(strategy.initial(), taken, rng)
        };
        let turns_left = match strategy {
            PigStrategy::ScoringTurns { turns } => turns,
            _ => 0,
        };
        Self { name, strategy, turns_left }
    }

    /// Create a bot from a preset or general bot description.
    pub fn from_spec(spec: &str, taken: &[String], rng: &mut GameRng) -> Result<Self> {
        Ok(Self::new(PigStrategy::parse(spec)?, taken, rng))
    }

    #[must_use]
    pub fn strategy(&self) -> PigStrategy {
        self.strategy
    }

    /// Decide whether to roll or stop.
    pub fn decide(&mut self, game: &Pig, me: PlayerId) -> PigMove {
        let scores = game.scores();
        let turn = game.turn_score();
        let mine = scores[me];
        let max_score = scores.max_value().unwrap_or(0);
        let max_other = scores.max_other(me).unwrap_or(0);

        if game.turn_rolls() == 0 {
            return PigMove::Roll;
        }
        // PaceRace watches the best opponent; the rest watch the best score.
        let leader = match self.strategy {
            PigStrategy::PaceRace { .. } => max_other,
            _ => max_score,
        };
        if leader >= TARGET && mine + turn <= leader {
            return PigMove::Roll;
        }
        if mine + turn >= TARGET {
            return PigMove::Stop;
        }

        let roll = match self.strategy {
            PigStrategy::Value { value } => turn < value,
            PigStrategy::BasePaceRace { base, pace, race } => {
                turn < base || pace < max_score - mine - turn || TARGET - max_score <= race
            }
            PigStrategy::PaceRace { pace, modifier, race } => {
                let hold = (pace as f64 + (max_other - mine) as f64 / modifier as f64).round() as i64;
                turn < hold || TARGET - max_other <= race
            }
            PigStrategy::Rolls { rolls } => game.turn_rolls() < rolls,
            PigStrategy::ScoringTurns { .. } => {
                let hold = (TARGET - mine).div_euclid(self.turns_left.max(1));
                if turn < hold {
                    true
                } else {
                    self.turns_left = (self.turns_left - 1).max(1);
                    false
                }
            }
        };
        if roll {
            PigMove::Roll
        } else {
            PigMove::Stop
        }
    }
}

impl Agent<Pig> for PigBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &Pig, player: PlayerId) -> Response<PigMove> {
        let mv = self.decide(game, player);
        tracing::debug!(bot = %self.name, ?mv, turn_score = game.turn_score(), "pig bot decision");
        Response::Move(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pig::PigBuilder;

    #[test]
    fn test_parse_presets_and_defaults() {
        assert_eq!(PigStrategy::parse("medium").unwrap(), PigStrategy::default());
        assert_eq!(PigStrategy::parse("x").unwrap(), PigStrategy::Rolls { rolls: 3 });
        assert_eq!(
            PigStrategy::parse("bpr=20").unwrap(),
            PigStrategy::BasePaceRace { base: 20, pace: 14, race: 31 }
        );
        assert_eq!(PigStrategy::parse("t").unwrap(), PigStrategy::ScoringTurns { turns: 4 });
        assert!(PigStrategy::parse("value=200").is_err());
        assert!(PigStrategy::parse("cheater").is_err());
        assert!(PigStrategy::parse("value=abc").is_err());
    }

    #[test]
    fn test_satan_name() {
        let mut rng = GameRng::new(6);
        let bot = PigBot::from_spec("satan", &[], &mut rng).unwrap();
        assert!(SATAN_NAMES.contains(&bot.name.as_str()));
    }

    #[test]
    fn test_name_initial() {
        let mut rng = GameRng::new(6);
        let bot = PigBot::from_spec("knizia", &[], &mut rng).unwrap();
        assert!(bot.name.starts_with('V'));
    }

    #[test]
    fn test_bots_finish_a_game() {
        let mut rng = GameRng::new(10);
        let mut bots = vec![
            PigBot::from_spec("medium", &[], &mut rng).unwrap(),
            PigBot::from_spec("easy", &[], &mut rng).unwrap(),
            PigBot::from_spec("hard", &[], &mut rng).unwrap(),
        ];
        let names = bots.iter().map(|b| b.name.clone()).collect();
        let mut pig = PigBuilder::new().players(names).build(10).unwrap();
        let mut actions = 0;
        while !pig.is_over() {
            let player = pig.current_player();
            let mv = bots[player.index()].decide(&pig, player);
            pig.apply_move(player, mv).unwrap();
            actions += 1;
            assert!(actions < 100_000);
        }
        assert!(pig.scores().max_value() >= Some(TARGET));
    }

    #[test]
    fn test_stop_when_winning() {
        let mut rng = GameRng::new(1);
        let mut bot = PigBot::new(PigStrategy::Value { value: 50 }, &[], &mut rng);
        let mut pig = PigBuilder::new().build(4).unwrap();
        let me = PlayerId::new(0);
        // Roll until there is a turn score, then pretend we are nearly home.
        while pig.turn_rolls() == 0 || pig.current_player() != me {
            let player = pig.current_player();
            let _ = pig.apply_move(player, PigMove::Roll);
        }
        pig.set_score(me, TARGET - 1);
        assert_eq!(bot.decide(&pig, me), PigMove::Stop);
    }
}
