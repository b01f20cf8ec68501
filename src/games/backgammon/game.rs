//! Backgammon game implementation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::{Position, Side, Spot, CHECKERS, HOME, POINTS};
use super::moves::{dice_for_roll, legal_plays, sequences, Dice, Play};
use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::dice::Pool;
use crate::rules::{CommandReply, Game, GameResult, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Backgammon",
    aka: &["Bg"],
    categories: &[Category::Board],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Traditional
";

const RULES: &str = "
Each player has fifteen checkers. O moves from its 24 point down to its 1
point, X moves the same way from its own side of the board. Each turn you roll
two dice and move checkers that many points, one checker per die. Doubles are
played four times. You must use as many of the dice as you can, and if you can
only use one die you must use the larger one if possible.

You may not land on a point with two or more of your opponent's checkers. If
you land on a single opposing checker, it is sent to the bar. Checkers on the
bar must enter your opponent's home board before you move anything else.

Once all of your checkers are in your home board (points 1 to 6) you may bear
them off with an exact roll, or with a higher roll from your highest point.
The first player to bear off all fifteen checkers wins. The win counts double
(a gammon) if the loser has not borne off any checkers, and triple (a
backgammon) if the loser also still has a checker on the bar or in the
winner's home board.

Moves are entered as pairs of points, from your own perspective: '13 8 8 5'.
Use 'bar' to enter and 'off' to bear off. You may enter part of your move and
the rest later.
";

/// Checker movements entered at once, each as from and to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgammonMove {
    pub steps: SmallVec<[(Spot, Spot); 4]>,
}

impl From<&Play> for BackgammonMove {
    fn from(play: &Play) -> Self {
        Self { steps: play.steps.iter().map(|s| (s.from, s.to)).collect() }
    }
}

impl std::fmt::Display for BackgammonMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.steps.iter().map(|(from, to)| format!("{from}/{to}")).collect();
        f.write_str(&parts.join(" "))
    }
}

/// Builder for a backgammon game.
pub struct BackgammonBuilder {
    names: Vec<String>,
    layout: Option<Position>,
}

impl Default for BackgammonBuilder {
    fn default() -> Self {
        Self {
            names: vec!["Player".to_string(), "Bot".to_string()],
            layout: None,
        }
    }
}

impl BackgammonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names for O and X.
    pub fn players(mut self, o: impl Into<String>, x: impl Into<String>) -> Self {
        self.names = vec![o.into(), x.into()];
        self
    }

    /// Start from `position` instead of the standard layout.
    pub fn layout(mut self, position: Position) -> Self {
        self.layout = Some(position);
        self
    }

    /// Build the game; the opening roll decides who starts.
    pub fn build(self, seed: u64) -> Result<Backgammon> {
        let mut rng = GameRng::new(seed);
        let pool = Pool::new(&[6, 6], &mut rng);
        let mut game = Backgammon {
            names: PlayerMap::from_vec(self.names),
            position: self.layout.unwrap_or_default(),
            current: PlayerId::new(0),
            roll: [0; 2],
            dice: Dice::new(),
            goals: FxHashSet::default(),
            needed: 0,
            pool,
            rng,
            messages: MessageLog::new(),
            result: None,
            forfeited: None,
        };
        let (o, x) = loop {
            let (o, x) = game.roll_dice();
            if o != x {
                break (o, x);
            }
            game.messages.say(format!("Both players rolled {o}. Rolling again."));
        };
        game.current = if o > x { Side::O.player() } else { Side::X.player() };
        game.messages.say(format!(
            "{} rolled {o} and {} rolled {x}. {} goes first.",
            game.names[Side::O.player()],
            game.names[Side::X.player()],
            game.names[game.current]
        ));
        game.start_turn(o.max(x), o.min(x))?;
        tracing::debug!(first = %game.current, "backgammon set up");
        Ok(game)
    }
}

/// A game of backgammon.
#[derive(Debug)]
pub struct Backgammon {
    names: PlayerMap<String>,
    position: Position,
    current: PlayerId,
    roll: [u8; 2],
    /// Dice not yet used this turn.
    dice: Dice,
    /// Positions a complete legal play can end in.
    goals: FxHashSet<Position>,
    /// Steps left in the turn.
    needed: usize,
    pool: Pool,
    rng: GameRng,
    messages: MessageLog,
    result: Option<(Side, i64)>,
    forfeited: Option<PlayerId>,
}

impl Backgammon {
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The side whose turn it is.
    #[must_use]
    pub fn side(&self) -> Side {
        Side::of(self.current)
    }

    #[must_use]
    pub fn roll(&self) -> [u8; 2] {
        self.roll
    }

    /// Dice not yet used this turn.
    #[must_use]
    pub fn dice(&self) -> &[u8] {
        &self.dice
    }

    /// The winner and the points won, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<(Side, i64)> {
        self.result
    }

    /// Complete plays available from here to the end of the turn.
    #[must_use]
    pub fn plays(&self) -> Vec<Play> {
        if self.is_over() {
            return Vec::new();
        }
        let mut seen = FxHashSet::default();
        sequences(&self.position, self.side(), &self.dice)
            .into_iter()
            .filter(|play| play.steps.len() == self.needed && self.goals.contains(&play.result))
            .filter(|play| seen.insert(play.result))
            .collect()
    }

    fn roll_dice(&mut self) -> (u8, u8) {
        self.pool.roll(&mut self.rng);
        let values = self.pool.values();
        (values[0] as u8, values[1] as u8)
    }

    /// Set up the current player's turn, skipping players who cannot move.
    ///
    /// Fails when neither side has a legal play for any roll, since the
    /// position can then never change.
    fn start_turn(&mut self, first: u8, second: u8) -> Result<()> {
        let (mut first, mut second) = (first, second);
        let mut skipped = 0;
        loop {
            self.roll = [first, second];
            self.dice = dice_for_roll(first, second);
            let plays = legal_plays(&self.position, self.side(), &self.dice);
            let name = &self.names[self.current];
            if let Some(play) = plays.first() {
                self.needed = play.steps.len();
                self.goals = plays.iter().map(|p| p.result).collect();
                self.messages.say(format!("{name} rolled {first}-{second}."));
                return Ok(());
            }
            self.messages.say(format!("{name} rolled {first}-{second} and cannot move."));
            skipped += 1;
            if skipped >= 2 && frozen(&self.position, Side::O) && frozen(&self.position, Side::X) {
                return Err(GameError::InvalidOption("neither side can ever move from this position".to_string()));
            }
            self.current = self.current.next(2);
            (first, second) = self.roll_dice();
        }
    }

    /// Whether `position` can still reach a legal end of turn.
    fn can_finish(&self, position: &Position, dice: &[u8], needed: usize) -> bool {
        if needed == 0 {
            return self.goals.contains(position);
        }
        sequences(position, self.side(), dice)
            .iter()
            .any(|play| play.steps.len() == needed && self.goals.contains(&play.result))
    }

    /// Play one step on a scratch position, returning it and the die used.
    fn try_step(&self, position: &Position, dice: &Dice, needed: usize, from: Spot, to: Spot) -> Result<(Position, u8)> {
        let mut values: Vec<u8> = dice.to_vec();
        values.sort_unstable();
        values.dedup();
        let mut matched = false;
        for die in values {
            let Some((next, step)) = position.step(self.side(), from, die) else { continue };
            if step.to != to {
                continue;
            }
            matched = true;
            let mut rest = dice.clone();
            if let Some(index) = rest.iter().position(|&d| d == die) {
                rest.remove(index);
            }
            if self.can_finish(&next, &rest, needed - 1) {
                return Ok((next, die));
            }
        }
        let dice_text: Vec<String> = dice.iter().map(ToString::to_string).collect();
        if matched {
            Err(GameError::illegal(format!(
                "Moving {from} to {to} would not let you play as much of your roll as possible."
            )))
        } else {
            Err(GameError::illegal(format!(
                "You cannot move from {from} to {to} with {}.",
                dice_text.join(" and ")
            )))
        }
    }

    /// Points the winner scores: single, gammon or backgammon.
    fn win_points(&self, winner: Side) -> i64 {
        let loser = winner.other();
        if self.position.off(loser) > 0 {
            return 1;
        }
        let stranded = (POINTS + 1 - HOME..=POINTS).any(|p| self.position.count(loser, p) > 0);
        if self.position.bar(loser) > 0 || stranded {
            3
        } else {
            2
        }
    }

    fn check_turn(&self, player: PlayerId) -> Result<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::NotYourTurn(player));
        }
        Ok(())
    }
}

/// True when `side` has no legal play for any roll of the dice.
fn frozen(position: &Position, side: Side) -> bool {
    (1..=6).all(|first| (first..=6).all(|second| legal_plays(position, side, &dice_for_roll(first, second)).is_empty()))
}

impl Game for Backgammon {
    type Move = BackgammonMove;

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn player_count(&self) -> usize {
        2
    }

    fn player_name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    fn current_player(&self) -> PlayerId {
        self.current
    }

    fn status(&self, player: PlayerId) -> String {
        let side = Side::of(player);
        let mut text = format!("You are {side}.\n{}", self.position.render(side));
        if !self.is_over() {
            let dice: Vec<String> = self.dice.iter().map(ToString::to_string).collect();
            text.push_str(&format!(
                "\n{} ({}) has {} to play.",
                self.names[self.current],
                self.side(),
                dice.join(", ")
            ));
        }
        text
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "What is your move? ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<BackgammonMove> {
        let cleaned = text.replace(['/', ',', '-'], " ");
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        if words.is_empty() || words.len() % 2 != 0 {
            return Err(GameError::Parse(text.trim().to_string()));
        }
        let mut steps = SmallVec::new();
        for pair in words.chunks(2) {
            let from = Spot::parse(pair[0]).ok_or_else(|| GameError::Parse(pair[0].to_string()))?;
            let to = Spot::parse(pair[1]).ok_or_else(|| GameError::Parse(pair[1].to_string()))?;
            steps.push((from, to));
        }
        Ok(BackgammonMove { steps })
    }

    fn apply_move(&mut self, player: PlayerId, mv: BackgammonMove) -> Result<TurnStatus> {
        self.check_turn(player)?;
        let mut position = self.position;
        let mut dice = self.dice.clone();
        let mut needed = self.needed;
        for &(from, to) in &mv.steps {
            if needed == 0 {
                return Err(GameError::illegal("You have no dice left to play."));
            }
            let (next, die) = self.try_step(&position, &dice, needed, from, to)?;
            if let Some(index) = dice.iter().position(|&d| d == die) {
                dice.remove(index);
            }
            position = next;
            needed -= 1;
        }

        self.position = position;
        self.dice = dice;
        self.needed = needed;
        let side = self.side();
        tracing::debug!(%side, mv = %mv, "backgammon move");
        self.messages.say(format!("{} moved {mv}.", self.names[player]));

        if self.position.off(side) == CHECKERS {
            let points = self.win_points(side);
            self.result = Some((side, points));
            let kind = match points {
                1 => "the game",
                2 => "a gammon",
                _ => "a backgammon",
            };
            self.messages.say(format!("{} wins {kind}, worth {points}.", self.names[player]));
            tracing::info!(%side, points, "backgammon finished");
            return Ok(TurnStatus::Done);
        }
        if self.needed > 0 {
            return Ok(TurnStatus::Continue);
        }
        self.current = self.current.next(2);
        let (first, second) = self.roll_dice();
        self.start_turn(first, second)?;
        Ok(TurnStatus::Done)
    }

    fn legal_moves(&self, _player: PlayerId) -> Vec<BackgammonMove> {
        self.plays().iter().map(BackgammonMove::from).collect()
    }

    fn help(&self, topic: &str) -> Option<String> {
        match topic {
            "moves" | "move" => Some(
                "Enter pairs of points, such as '24 18 13 8'. Use 'bar' and 'off' for the bar and bearing off."
                    .to_string(),
            ),
            "pips" => Some("pips: show how many pips each side needs to bear off.".to_string()),
            _ => None,
        }
    }

    fn game_command(&mut self, _player: PlayerId, verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        (verb == "pips").then(|| {
            Ok(CommandReply::Text(format!(
                "O needs {} pips, X needs {} pips.",
                self.position.pips(Side::O),
                self.position.pips(Side::X)
            )))
        })
    }

    fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        if let Some(quitter) = self.forfeited {
            let points = self.win_points(Side::of(quitter).other());
            return Some(if quitter == player {
                Outcome::forfeit(1, -points)
            } else {
                Outcome::win(points)
            });
        }
        let (winner, points) = self.result?;
        let score = if winner.player() == player { points } else { -points };
        Some(GameResult::Winner(winner.player()).outcome_for(player, score))
    }

    fn forfeit(&mut self, player: PlayerId) {
        self.messages.say(format!("{} resigned.", self.names[player]));
        self.forfeited = Some(player);
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const O: PlayerId = PlayerId::new(0);

    /// A game where O is to play `first`-`second` from `position`.
    fn game_at(position: Position, first: u8, second: u8) -> Backgammon {
        let mut game = BackgammonBuilder::new().layout(position).build(1).unwrap();
        game.position = position;
        game.current = O;
        game.start_turn(first, second).unwrap();
        game
    }

    #[test]
    fn test_parse_pairs() {
        let game = BackgammonBuilder::new().build(5).unwrap();
        let mv = game.parse_move(O, "24/18, 13-8").unwrap();
        assert_eq!(mv.steps.as_slice(), &[(Spot::Point(24), Spot::Point(18)), (Spot::Point(13), Spot::Point(8))]);
        let mv = game.parse_move(O, "bar 22 6 off").unwrap();
        assert_eq!(mv.steps.as_slice(), &[(Spot::Bar, Spot::Point(22)), (Spot::Point(6), Spot::Off)]);
        assert!(game.parse_move(O, "24").is_err());
        assert!(game.parse_move(O, "24 x").is_err());
    }

    #[test]
    fn test_opening_roll_sets_dice() {
        let game = BackgammonBuilder::new().build(5).unwrap();
        let [high, low] = game.roll();
        assert!(high > low);
        assert_eq!(game.dice().len(), 2);
        assert_eq!(game.legal_moves(game.current_player()).len(), game.plays().len());
    }

    #[test]
    fn test_partial_move_continues_turn() {
        let mut game = game_at(Position::default(), 6, 5);
        let status = game.apply_move(O, game.parse_move(O, "24 18").unwrap()).unwrap();
        assert_eq!(status, TurnStatus::Continue);
        assert_eq!(game.dice(), &[5]);
        assert!(game.plays().iter().all(|play| play.steps.len() == 1));
        assert!(game.apply_move(O, game.parse_move(O, "6 1").unwrap()).is_err());
        let status = game.apply_move(O, game.parse_move(O, "18 13").unwrap()).unwrap();
        assert_eq!(status, TurnStatus::Done);
        assert_eq!(game.position().count(Side::O, 13), 6);
        assert_ne!(game.current_player(), O);
    }

    #[test]
    fn test_illegal_moves_change_nothing() {
        let mut game = game_at(Position::default(), 6, 5);
        let before = *game.position();
        assert!(game.apply_move(O, game.parse_move(O, "24 19").unwrap()).is_err());
        assert!(game.apply_move(O, game.parse_move(O, "13 8 8 7").unwrap()).is_err());
        assert!(game.apply_move(PlayerId::new(1), game.parse_move(O, "13 7").unwrap()).is_err());
        assert_eq!(game.position(), &before);
        assert_eq!(game.dice().len(), 2);
    }

    #[test]
    fn test_must_use_larger_die() {
        let mut position = Position::from_layout(&[(13, 1)]);
        position.set(Side::X, 13, 0);
        position.set(Side::X, 21, 2);
        let mut game = game_at(position, 5, 4);
        let err = game.apply_move(O, game.parse_move(O, "13 9").unwrap()).unwrap_err();
        assert!(err.to_string().contains("as possible"));
        assert_eq!(game.apply_move(O, game.parse_move(O, "13 8").unwrap()).unwrap(), TurnStatus::Done);
    }

    /// O has one checker left on its 1 point.
    fn last_checker() -> Position {
        let mut position = Position::empty();
        position.set(Side::O, 1, 1);
        position.set_off(Side::O, CHECKERS - 1);
        position
    }

    #[test]
    fn test_gammon_and_backgammon() {
        let mut position = last_checker();
        position.set(Side::X, 10, 15);
        let mut game = game_at(position, 2, 1);
        game.apply_move(O, game.parse_move(O, "1 off").unwrap()).unwrap();
        assert_eq!(game.winner(), Some((Side::O, 2)));
        assert_eq!(game.outcome(O), Some(Outcome::win(2)));
        assert_eq!(game.outcome(PlayerId::new(1)).unwrap().losses, 1);

        // X's 20 is in O's home board.
        let mut stranded = last_checker();
        stranded.set(Side::X, 10, 14);
        stranded.set(Side::X, 20, 1);
        let mut game = game_at(stranded, 2, 1);
        game.apply_move(O, game.parse_move(O, "1 off").unwrap()).unwrap();
        assert_eq!(game.winner(), Some((Side::O, 3)));
    }

    #[test]
    fn test_single_game() {
        let mut position = last_checker();
        position.set(Side::X, 2, 1);
        position.set_off(Side::X, CHECKERS - 1);
        let mut game = game_at(position, 3, 2);
        game.apply_move(O, game.parse_move(O, "1 off").unwrap()).unwrap();
        assert_eq!(game.winner(), Some((Side::O, 1)));
        assert!(game.is_over());
        assert!(game.apply_move(O, game.parse_move(O, "1 off").unwrap()).is_err());
    }

    #[test]
    fn test_pips_command() {
        let mut game = BackgammonBuilder::new().build(2).unwrap();
        let reply = game.game_command(O, "pips", "").unwrap().unwrap();
        assert_eq!(reply, CommandReply::Text("O needs 167 pips, X needs 167 pips.".to_string()));
    }

    #[test]
    fn test_mutual_closeout_is_rejected() {
        let mut position = Position::from_layout(&[(1, 2), (2, 2), (3, 2), (4, 2), (5, 2), (6, 2)]);
        for side in [Side::O, Side::X] {
            position.set_bar(side, 3);
            position.set_off(side, 0);
        }
        let result = BackgammonBuilder::new().layout(position).build(7);
        assert!(matches!(result, Err(GameError::InvalidOption(_))));
    }

    #[test]
    fn test_closed_out_side_is_skipped() {
        // O is stuck on the bar but X can still move, so play goes on.
        let mut position = Position::from_layout(&[(1, 2), (2, 2), (3, 2), (4, 2), (5, 2), (6, 2)]);
        position.set_bar(Side::O, 3);
        position.set_off(Side::O, 0);
        position.set(Side::X, 13, 3);
        position.set_off(Side::X, 0);
        let game = BackgammonBuilder::new().layout(position).build(7).unwrap();
        assert_eq!(game.side(), Side::X);
        assert!(!game.plays().is_empty());
    }

    #[test]
    fn test_forfeit() {
        let mut game = BackgammonBuilder::new().build(2).unwrap();
        game.forfeit(O);
        assert!(game.is_over());
        assert_eq!(game.outcome(PlayerId::new(1)).unwrap().wins, 1);
        assert_eq!(game.outcome(O).unwrap().losses, 1);
    }
}
