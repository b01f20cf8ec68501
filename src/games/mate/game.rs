//! Mate game implementation.

use serde::{Deserialize, Serialize};

use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::dice::Pool;
use crate::rules::{Game, GameResult, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Mate",
    aka: &[],
    categories: &[Category::Dice],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Craig \"Ichabod\" O'Brien
Game Programming: Craig \"Ichabod\" O'Brien
";

const RULES: &str = "
Mate is played with dice that have chess pieces on their faces. Each player
has five dice, set in a row opposite the other player's dice. Each piece has a
point value and a way to capture:

    * Queen: captures any opposing piece. Worth 5 points.
    * Rook: captures in the same or an adjacent column. Worth 3 points.
    * Bishop: captures in an adjacent column. Worth 2 points.
    * Knight: captures two or three columns away. Worth 2 points.
    * Pawn: captures the piece in its own column. Worth 1 point.

On your turn choose one of your pieces (the attacker) and one of your
opponent's pieces (the target). If the capture is valid you score the target's
points and both dice are rerolled. Enter moves as 'take <target> <attacker>'
or '<attacker> takes <target>', using column numbers or piece names.

The first player to 64 points wins. If the score is tied at 64 or higher, two
more turns are played. A tie after that is a draw.
";

/// Points needed to win.
pub const TARGET: u32 = 64;

/// Dice per side.
pub const COLUMNS: usize = 5;

/// Extra turns played after a tie at or above the target.
const TIE_TURNS: u32 = 2;

/// A chess piece on a die face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
}

/// Faces of a Mate die, indexed by die value minus one.
const FACES: [Piece; 6] = [Piece::Pawn, Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

impl Piece {
    /// The piece showing on a six-sided die.
    #[must_use]
    pub fn from_die(value: u32) -> Self {
        FACES[(value.clamp(1, 6) - 1) as usize]
    }

    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Piece::Pawn => 1,
            Piece::Knight | Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 5,
        }
    }

    /// Column offsets this piece can capture at.
    #[must_use]
    pub fn attacks(self) -> &'static [i32] {
        match self {
            Piece::Pawn => &[0],
            Piece::Knight => &[-3, -2, 2, 3],
            Piece::Bishop => &[-1, 1],
            Piece::Rook => &[-1, 0, 1],
            Piece::Queen => &[-4, -3, -2, -1, 0, 1, 2, 3, 4],
        }
    }

    /// Parse a piece name or its letter (`k` also means knight).
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "p" | "pawn" => Some(Piece::Pawn),
            "n" | "k" | "knight" => Some(Piece::Knight),
            "b" | "bishop" => Some(Piece::Bishop),
            "r" | "rook" => Some(Piece::Rook),
            "q" | "queen" => Some(Piece::Queen),
            _ => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A capture: attacking column and target column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MateMove {
    pub attacker: usize,
    pub target: usize,
}

/// Builder for creating a Mate game.
pub struct MateBuilder {
    names: [String; 2],
}

impl Default for MateBuilder {
    fn default() -> Self {
        Self {
            names: ["Player".to_string(), "Bot".to_string()],
        }
    }
}

impl MateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.names = [first.into(), second.into()];
        self
    }

    pub fn build(self, seed: u64) -> Mate {
        let mut rng = GameRng::new(seed);
        let dice = PlayerMap::new(2, |_| Pool::new(&[6; COLUMNS], &mut rng));
        Mate {
            names: PlayerMap::from_vec(self.names.into()),
            dice,
            scores: PlayerMap::with_value(2, 0),
            current: PlayerId::new(0),
            extra_turns: None,
            result: None,
            rng,
            messages: MessageLog::new(),
        }
    }
}

/// A game of Mate.
#[derive(Debug)]
pub struct Mate {
    names: PlayerMap<String>,
    dice: PlayerMap<Pool>,
    scores: PlayerMap<u32>,
    current: PlayerId,
    /// Turns left after a tie at or over the target.
    extra_turns: Option<u32>,
    result: Option<GameResult>,
    rng: GameRng,
    messages: MessageLog,
}

impl Mate {
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    /// The pieces showing for `player`, by column.
    #[must_use]
    pub fn pieces(&self, player: PlayerId) -> Vec<Piece> {
        self.dice[player].values().into_iter().map(Piece::from_die).collect()
    }

    /// Every capture `player` could make.
    #[must_use]
    pub fn moves_for(&self, player: PlayerId) -> Vec<MateMove> {
        let mut moves = Vec::new();
        for (attacker, piece) in self.pieces(player).into_iter().enumerate() {
            for offset in piece.attacks() {
                let target = attacker as i32 + offset;
                if (0..COLUMNS as i32).contains(&target) {
                    moves.push(MateMove { attacker, target: target as usize });
                }
            }
        }
        moves
    }

    /// Force the dice showing, for replaying positions.
    pub fn set_pieces(&mut self, player: PlayerId, values: &[u32; COLUMNS]) -> Result<()> {
        self.dice[player].set_values(values)
    }

    fn opponent(player: PlayerId) -> PlayerId {
        player.next(2)
    }

    fn dice_line(&self, player: PlayerId) -> String {
        self.pieces(player)
            .iter()
            .enumerate()
            .map(|(column, piece)| format!("{column}: {:<8}", piece.to_string()))
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Columns matching a column number or piece name.
    fn columns(spec: &str, pieces: &[Piece]) -> Vec<usize> {
        if let Ok(column) = spec.parse::<usize>() {
            return if column < COLUMNS { vec![column] } else { Vec::new() };
        }
        match Piece::parse(spec) {
            Some(wanted) => pieces
                .iter()
                .enumerate()
                .filter(|(_, piece)| **piece == wanted)
                .map(|(column, _)| column)
                .collect(),
            None => Vec::new(),
        }
    }

    fn check_end(&mut self) {
        let (first, second) = (PlayerId::new(0), PlayerId::new(1));
        let (a, b) = (self.scores[first], self.scores[second]);
        match self.extra_turns {
            Some(0) => {}
            Some(_) => return,
            None if a.max(b) < TARGET => return,
            None if a == b => {
                self.messages.say(format!("The score is tied at {a}. Two more turns will be played."));
                self.extra_turns = Some(TIE_TURNS);
                return;
            }
            None => {}
        }
        if a == b {
            self.messages.say(format!("The game is a draw at {a}."));
            self.result = Some(GameResult::Draw);
        } else {
            let winner = if a > b { first } else { second };
            self.messages.say(format!(
                "{} wins, {} to {}.",
                self.names[winner],
                a.max(b),
                a.min(b)
            ));
            self.result = Some(GameResult::Winner(winner));
        }
    }
}

impl Game for Mate {
    type Move = MateMove;

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
        let other = Self::opponent(player);
        [
            format!("{}: {}", self.names[other], self.scores[other]),
            self.dice_line(other),
            "-".repeat(53),
            self.dice_line(player),
            format!("{}: {}", self.names[player], self.scores[player]),
        ]
        .join("\n")
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "What is your move? ".to_string()
    }

    fn parse_move(&self, player: PlayerId, text: &str) -> Result<MateMove> {
        let words: Vec<String> = text
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|w| !matches!(w.as_str(), "with" | "w" | "w/" | "the" | "teh" | "a"))
            .collect();
        let is_take = |w: &str| matches!(w, "take" | "takes" | "t" | "x");
        let (target, attacker) = match words.as_slice() {
            [verb, target, attacker] if is_take(verb) => (target, attacker),
            [attacker, verb, target] if is_take(verb) => (target, attacker),
            [target, attacker] if !is_take(target) && !is_take(attacker) => (target, attacker),
            _ => return Err(GameError::Parse(text.trim().to_string())),
        };

        let opponent = Self::opponent(player);
        let attackers = Self::columns(attacker, &self.pieces(player));
        if attackers.is_empty() {
            return Err(GameError::illegal(format!("Invalid attack piece specification: {attacker:?}.")));
        }
        let targets = Self::columns(target, &self.pieces(opponent));
        if targets.is_empty() {
            return Err(GameError::illegal(format!("Invalid target piece specification: {target:?}.")));
        }
        let possible: Vec<MateMove> = self
            .moves_for(player)
            .into_iter()
            .filter(|m| attackers.contains(&m.attacker) && targets.contains(&m.target))
            .collect();
        match possible.as_slice() {
            [] => Err(GameError::illegal(format!("There is no legal move matching {:?}.", text.trim()))),
            [single] => Ok(*single),
            _ => Err(GameError::illegal(format!(
                "{:?} could mean more than one capture. Use column numbers.",
                text.trim()
            ))),
        }
    }

    fn apply_move(&mut self, player: PlayerId, mv: MateMove) -> Result<TurnStatus> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::NotYourTurn(player));
        }
        if !self.moves_for(player).contains(&mv) {
            return Err(GameError::illegal("That piece cannot capture that column."));
        }
        let opponent = Self::opponent(player);
        let attacker = Piece::from_die(self.dice[player].values()[mv.attacker]);
        let target = Piece::from_die(self.dice[opponent].values()[mv.target]);
        self.scores[player] += target.points();
        self.messages.say(format!(
            "{} captures the {} in column {} with the {} in column {}.",
            self.names[player], target, mv.target, attacker, mv.attacker
        ));
        self.dice[player].roll_index(mv.attacker, &mut self.rng)?;
        self.dice[opponent].roll_index(mv.target, &mut self.rng)?;

        if let Some(turns) = self.extra_turns.as_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.check_end();
        if self.result.is_none() {
            self.current = opponent;
        }
        Ok(TurnStatus::Done)
    }

    fn legal_moves(&self, player: PlayerId) -> Vec<MateMove> {
        self.moves_for(player)
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("t", "take"), ("x", "take"), ("takes", "take")]
    }

    fn help(&self, topic: &str) -> Option<String> {
        (topic == "take").then(|| {
            "take <target> <attacker>: capture with one of your pieces. Pieces are \
             column numbers or names (p, n, b, r, q). '<attacker> takes <target>' \
             also works."
                .to_string()
        })
    }

    fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        let result = self.result.as_ref()?;
        Some(result.outcome_for(player, i64::from(self.scores[player])))
    }

    fn forfeit(&mut self, player: PlayerId) {
        self.messages.say(format!("{} resigns.", self.names[player]));
        self.result = Some(GameResult::Winner(Self::opponent(player)));
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    // Pawn, Knight, Bishop, Rook, Queen.
    const LINEUP: [u32; COLUMNS] = [1, 3, 4, 5, 6];

    fn game() -> Mate {
        let mut mate = MateBuilder::new().players("Ann", "Bob").build(5);
        mate.set_pieces(P0, &LINEUP).unwrap();
        mate.set_pieces(P1, &LINEUP).unwrap();
        mate
    }

    #[test]
    fn test_move_generation() {
        let mate = game();
        let moves = mate.moves_for(P0);
        // Pawn 1, knight 2 (col 3, 4), bishop 2, rook 3, queen 5.
        assert_eq!(moves.len(), 1 + 2 + 2 + 3 + 5);
        assert!(moves.contains(&MateMove { attacker: 1, target: 4 }));
        assert!(!moves.contains(&MateMove { attacker: 1, target: 2 }));
        assert!(moves.contains(&MateMove { attacker: 4, target: 0 }));
    }

    #[test]
    fn test_parse_forms() {
        let mate = game();
        let expected = MateMove { attacker: 3, target: 2 };
        assert_eq!(mate.parse_move(P0, "take 2 3").unwrap(), expected);
        assert_eq!(mate.parse_move(P0, "rook takes bishop").unwrap(), expected);
        assert_eq!(mate.parse_move(P0, "take the b with the r").unwrap(), expected);
        assert_eq!(mate.parse_move(P0, "x 2 r").unwrap(), expected);
        assert_eq!(mate.parse_move(P0, "b 3").unwrap(), expected);
    }

    #[test]
    fn test_parse_errors() {
        let mate = game();
        assert!(matches!(mate.parse_move(P0, "take 2"), Err(GameError::Parse(_))));
        assert!(mate.parse_move(P0, "take 9 3").is_err());
        assert!(mate.parse_move(P0, "take queen pawn").is_err());
        assert!(mate.parse_move(P0, "take 2 knight").is_err());
    }

    #[test]
    fn test_take_missing_piece() {
        let mate = game();
        for text in ["take 2", "x 4", "2 takes", "take"] {
            assert!(matches!(mate.parse_move(P0, text), Err(GameError::Parse(_))), "{text}");
        }
    }

    #[test]
    fn test_ambiguous_piece() {
        let mut mate = game();
        // Two pawns facing each other's columns.
        mate.set_pieces(P0, &[1, 2, 4, 5, 6]).unwrap();
        mate.set_pieces(P1, &[1, 1, 4, 5, 6]).unwrap();
        assert!(mate.parse_move(P0, "queen takes pawn").is_err());
        assert_eq!(
            mate.parse_move(P0, "take 1 pawn").unwrap(),
            MateMove { attacker: 1, target: 1 }
        );
    }

    #[test]
    fn test_capture_scores_and_passes_turn() {
        let mut mate = game();
        mate.apply_move(P0, MateMove { attacker: 4, target: 4 }).unwrap();
        assert_eq!(mate.scores()[P0], 5);
        assert_eq!(mate.current_player(), P1);
        assert!(mate.apply_move(P0, MateMove { attacker: 0, target: 0 }).is_err());
    }

    #[test]
    fn test_illegal_capture() {
        let mut mate = game();
        let result = mate.apply_move(P0, MateMove { attacker: 0, target: 3 });
        assert!(matches!(result, Err(GameError::IllegalMove(_))));
        assert_eq!(mate.current_player(), P0);
    }

    #[test]
    fn test_win_at_target() {
        let mut mate = game();
        mate.scores[P0] = 60;
        mate.apply_move(P0, MateMove { attacker: 4, target: 4 }).unwrap();
        assert!(mate.is_over());
        assert_eq!(mate.outcome(P0).unwrap().wins, 1);
        assert_eq!(mate.outcome(P1).unwrap().losses, 1);
    }

    #[test]
    fn test_tie_plays_two_more_turns_then_draws() {
        let mut mate = game();
        mate.scores[P0] = 63;
        mate.scores[P1] = 64;
        mate.apply_move(P0, MateMove { attacker: 0, target: 0 }).unwrap();
        assert!(!mate.is_over());
        assert_eq!(mate.extra_turns, Some(TIE_TURNS));

        // Both sides score a pawn in the extra turns.
        mate.set_pieces(P0, &LINEUP).unwrap();
        mate.set_pieces(P1, &LINEUP).unwrap();
        mate.apply_move(P1, MateMove { attacker: 0, target: 0 }).unwrap();
        assert!(!mate.is_over());
        mate.set_pieces(P0, &LINEUP).unwrap();
        mate.set_pieces(P1, &LINEUP).unwrap();
        mate.apply_move(P0, MateMove { attacker: 0, target: 0 }).unwrap();
        assert!(mate.is_over());
        assert_eq!(mate.outcome(P0).unwrap().draws, 1);
    }

    #[test]
    fn test_forfeit() {
        let mut mate = game();
        mate.forfeit(P1);
        assert_eq!(mate.outcome(P0).unwrap().wins, 1);
    }

    #[test]
    fn test_status_shows_both_rows() {
        let mate = game();
        let status = mate.status(P0);
        assert!(status.starts_with("Bob: 0"));
        assert!(status.ends_with("Ann: 0"));
        assert!(status.contains("4: Queen"));
    }
}
