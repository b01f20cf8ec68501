//! Pig game implementation.

use serde::{Deserialize, Serialize};

use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::dice::{Die, Roll, ShuffleDie};
use crate::rules::{CommandReply, Game, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Pig",
    aka: &[],
    categories: &[Category::Dice],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Traditional
Bot Design: Roger Johnson, Reiner Knizia, Todd Neller, Clifton Presser
";

const RULES: &str = "
On your turn, you roll one die. If you roll a one your turn is over and you
score nothing. Otherwise, you can choose to score what you rolled (ending your
turn) or to continue rolling. Any roll of a one ends your turn without scoring.

The first player to score 100 or more wins.

OPTIONS:
even-turns: Everyone gets the same number of turns.
shuffle=n: Use a shuffle die with n repeats of each face.
six-bad: Turns end with no score on a six instead of a one.
";

/// Score needed to win.
pub const TARGET: i64 = 100;

/// A Pig move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PigMove {
    Roll,
    Stop,
}

/// Rule options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PigOptions {
    /// Six ends the turn instead of one.
    pub six_bad: bool,
    /// Everyone gets the same number of turns.
    pub even_turns: bool,
    /// Repeats for a shuffle die; 0 uses a fair die.
    pub shuffle: u32,
}

/// Builder for creating a Pig game.
pub struct PigBuilder {
    names: Vec<String>,
    options: PigOptions,
    order: Option<Vec<PlayerId>>,
}

impl Default for PigBuilder {
    fn default() -> Self {
        Self {
            names: vec!["Player".to_string(), "Bot".to_string()],
            options: PigOptions::default(),
            order: None,
        }
    }
}

impl PigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat names, in play order.
    pub fn players(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    pub fn six_bad(mut self, six_bad: bool) -> Self {
        self.options.six_bad = six_bad;
        self
    }

    pub fn even_turns(mut self, even_turns: bool) -> Self {
        self.options.even_turns = even_turns;
        self
    }

    pub fn shuffle(mut self, repeats: u32) -> Self {
        self.options.shuffle = repeats;
        self
    }

    pub fn options(mut self, options: PigOptions) -> Self {
        self.options = options;
        self
    }

    /// Fix the order seats take their turns in. Shuffled when not given.
    pub fn play_order(mut self, order: Vec<PlayerId>) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the game.
    pub fn build(self, seed: u64) -> Result<Pig> {
        if !(2..=255).contains(&self.names.len()) {
            return Err(GameError::InvalidOption("Pig needs at least two players".to_string()));
        }
        let mut rng = GameRng::new(seed);
        let die: Box<dyn Roll> = if self.options.shuffle > 0 {
            Box::new(ShuffleDie::new(6, self.options.shuffle, &mut rng))
        } else {
            Box::new(Die::new(6, &mut rng))
        };
        let count = self.names.len();
        let order = match self.order {
            Some(order) => {
                let mut seats = order.clone();
                seats.sort_unstable();
                if !seats.iter().copied().eq(PlayerId::all(count)) {
                    return Err(GameError::InvalidOption("the play order must name every seat once".to_string()));
                }
                order
            }
            None => {
                let mut order: Vec<PlayerId> = PlayerId::all(count).collect();
                rng.shuffle(&mut order);
                order
            }
        };
        tracing::debug!(players = count, options = ?self.options, ?order, "pig set up");
        Ok(Pig {
            names: PlayerMap::from_vec(self.names),
            scores: PlayerMap::with_value(count, 0),
            turn_score: 0,
            turn_rolls: 0,
            current: order[0],
            order,
            turns: 0,
            bad: if self.options.six_bad { 6 } else { 1 },
            options: self.options,
            die,
            rng,
            messages: MessageLog::new(),
            finished: false,
            forfeited: None,
        })
    }
}

/// A game of Pig.
#[derive(Debug)]
pub struct Pig {
    names: PlayerMap<String>,
    scores: PlayerMap<i64>,
    turn_score: i64,
    turn_rolls: u32,
    current: PlayerId,
    /// Seats in the order they take turns.
    order: Vec<PlayerId>,
    turns: u32,
    bad: u32,
    options: PigOptions,
    die: Box<dyn Roll>,
    rng: GameRng,
    messages: MessageLog,
    finished: bool,
    forfeited: Option<PlayerId>,
}

impl Pig {
    /// Banked scores.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<i64> {
        &self.scores
    }

    /// Points rolled so far this turn.
    #[must_use]
    pub fn turn_score(&self) -> i64 {
        self.turn_score
    }

    /// Rolls made so far this turn.
    #[must_use]
    pub fn turn_rolls(&self) -> u32 {
        self.turn_rolls
    }

    /// The number that ends a turn.
    #[must_use]
    pub fn bad_number(&self) -> u32 {
        self.bad
    }

    #[must_use]
    pub fn options(&self) -> &PigOptions {
        &self.options
    }

    /// Seats in the order they take turns.
    #[must_use]
    pub fn play_order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Play order for a rematch: lowest score first.
    #[must_use]
    pub fn rematch_order(&self) -> Vec<PlayerId> {
        let mut order = self.order.clone();
        order.sort_by_key(|&p| self.scores[p]);
        order
    }

    /// A fresh game between the same seats, with the loser going first.
    pub fn rematch(&self, seed: u64) -> Result<Pig> {
        PigBuilder::new()
            .players(self.names.values().cloned().collect())
            .options(self.options.clone())
            .play_order(self.rematch_order())
            .build(seed)
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, player: PlayerId, score: i64) {
        self.scores[player] = score;
    }

    fn score_text(&self) -> String {
        let mut seats: Vec<(i64, &str)> = self.scores.iter().map(|(p, &s)| (s, self.names[p].as_str())).collect();
        seats.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));
        seats
            .iter()
            .map(|(score, name)| format!("{name}: {score}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn end_turn(&mut self) {
        let player = self.current;
        self.messages
            .say(format!("{}'s score is now {}.", self.names[player], self.scores[player]));
        self.turn_score = 0;
        self.turn_rolls = 0;
        self.turns += 1;

        let count = self.scores.player_count() as u32;
        let high = self.scores.max_value().unwrap_or(0);
        if high >= TARGET && (!self.options.even_turns || self.turns % count == 0) {
            self.finished = true;
            for (p, &score) in self.scores.iter() {
                if score == high {
                    self.messages.say(format!("{} won with {} points.", self.names[p], score));
                }
            }
            tracing::info!(turns = self.turns, high, "pig finished");
        } else {
            let index = self.order.iter().position(|&p| p == player).unwrap_or(0);
            self.current = self.order[(index + 1) % self.order.len()];
        }
    }

    fn check_turn(&self, player: PlayerId) -> Result<()> {
        if self.finished || self.forfeited.is_some() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::NotYourTurn(player));
        }
        Ok(())
    }
}

impl Game for Pig {
    type Move = PigMove;

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn player_count(&self) -> usize {
        self.names.player_count()
    }

    fn player_name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    fn current_player(&self) -> PlayerId {
        self.current
    }

    fn status(&self, player: PlayerId) -> String {
        let mut text = self.score_text();
        if !self.is_over() {
            if player == self.current {
                text.push_str(&format!("\nYour turn score is {}.", self.turn_score));
            } else {
                text.push_str(&format!("\nIt is {}'s turn.", self.names[self.current]));
            }
        }
        text
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "Would you like to roll or stop? ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<PigMove> {
        match text.trim().to_lowercase().as_str() {
            "roll" => Ok(PigMove::Roll),
            "stop" => Ok(PigMove::Stop),
            other => Err(GameError::Parse(other.to_string())),
        }
    }

    fn apply_move(&mut self, player: PlayerId, mv: PigMove) -> Result<TurnStatus> {
        self.check_turn(player)?;
        match mv {
            PigMove::Stop if self.turn_rolls == 0 => Err(GameError::illegal("You must roll at least once.")),
            PigMove::Stop => {
                self.scores[player] += self.turn_score;
                self.end_turn();
                Ok(TurnStatus::Done)
            }
            PigMove::Roll => {
                let roll = self.die.roll(&mut self.rng)?;
                self.turn_rolls += 1;
                if roll == self.bad {
                    self.messages
                        .say(format!("{} rolled a {}, the turn is over.", self.names[player], roll));
                    self.turn_score = 0;
                    self.end_turn();
                    Ok(TurnStatus::Done)
                } else {
                    self.turn_score += i64::from(roll);
                    self.messages.say(format!(
                        "{} rolled a {}, the turn score is {}.",
                        self.names[player], roll, self.turn_score
                    ));
                    Ok(TurnStatus::Continue)
                }
            }
        }
    }

    fn legal_moves(&self, _player: PlayerId) -> Vec<PigMove> {
        if self.turn_rolls == 0 {
            vec![PigMove::Roll]
        } else {
            vec![PigMove::Roll, PigMove::Stop]
        }
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("r", "roll"), ("go", "roll"), ("s", "stop"), ("whoa", "stop")]
    }

    fn help(&self, topic: &str) -> Option<String> {
        (topic == "scores").then(|| "scores: show everyone's banked score.".to_string())
    }

    fn game_command(&mut self, _player: PlayerId, verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        (verb == "scores").then(|| Ok(CommandReply::Text(self.score_text())))
    }

    fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        if let Some(quitter) = self.forfeited {
            let score = self.scores[player];
            return Some(if quitter == player {
                Outcome::forfeit(self.player_count() - 1, score)
            } else {
                Outcome::win(score)
            });
        }
        self.finished.then(|| Outcome::ranked(&self.scores, player))
    }

    fn forfeit(&mut self, player: PlayerId) {
        self.messages.say(format!("{} quit the game.", self.names[player]));
        self.forfeited = Some(player);
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}
