//! Sorter: put a shuffled sequence in order with as few swaps as possible.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardCell, Cell};
use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, Result};
use crate::rules::{Game, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Sorter",
    aka: &[],
    categories: &[Category::Test],
    credits: "\nDesign and programming by Craig \"Ichabod\" O'Brien.\n",
    rules: "\nEach turn, swap two numbers. If you can sort the list with a minimum of\nswaps, you win.\n\nOPTIONS:\nlength=n: The length of the sequence to sort (default 5).\n",
};

/// Swap the positions of two numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap(pub u32, pub u32);

type Slots = Board<BoardCell<usize, u32>>;

/// Builder for a game of Sorter.
pub struct SorterBuilder {
    name: String,
    length: usize,
}

impl Default for SorterBuilder {
    fn default() -> Self {
        Self { name: "Player".to_string(), length: 5 }
    }
}

impl SorterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn build(self, seed: u64) -> Result<Sorter> {
        if !(2..=100).contains(&self.length) {
            return Err(GameError::InvalidOption(format!("length must be 2 to 100, not {}", self.length)));
        }
        let mut rng = GameRng::new(seed);
        let mut sequence: Vec<u32> = (0..self.length as u32).collect();
        while sequence.windows(2).all(|w| w[0] < w[1]) {
            rng.shuffle(&mut sequence);
        }
        Sorter::with_sequence(self.name, &sequence)
    }
}

/// Swaps needed to sort a permutation of `0..n`, placing one number per swap.
#[must_use]
pub fn minimum_swaps(sequence: &[u32]) -> u32 {
    let mut check = sequence.to_vec();
    let mut swaps = 0;
    for index in 0..check.len() {
        if check[index] as usize != index {
            if let Some(target) = check.iter().position(|&n| n as usize == index) {
                check.swap(index, target);
                swaps += 1;
            }
        }
    }
    swaps
}

/// A game of Sorter.
#[derive(Debug)]
pub struct Sorter {
    name: String,
    slots: Slots,
    minimum: u32,
    turns: u32,
    quit: bool,
    messages: MessageLog,
}

impl Sorter {
    /// Start from a given permutation of `0..n`.
    pub fn with_sequence(name: impl Into<String>, sequence: &[u32]) -> Result<Self> {
        let mut sorted = sequence.to_vec();
        sorted.sort_unstable();
        if sorted.iter().enumerate().any(|(i, &n)| n as usize != i) {
            return Err(GameError::InvalidOption("the sequence must be the numbers 0 to n - 1".to_string()));
        }
        let mut slots = Slots::new(0..sequence.len());
        for (index, &number) in sequence.iter().enumerate() {
            slots.place(&index, number)?;
        }
        Ok(Self {
            name: name.into(),
            slots,
            minimum: minimum_swaps(sequence),
            turns: 0,
            quit: false,
            messages: MessageLog::new(),
        })
    }

    /// The numbers in their current order.
    #[must_use]
    pub fn sequence(&self) -> Vec<u32> {
        self.slots.cells().filter_map(|cell| cell.piece().copied()).collect()
    }

    #[must_use]
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    fn is_sorted(&self) -> bool {
        self.sequence().windows(2).all(|w| w[0] < w[1])
    }

    fn slot_of(&self, number: u32) -> Result<usize> {
        self.slots
            .cells()
            .find(|cell| cell.piece() == Some(&number))
            .map(|cell| *cell.location())
            .ok_or_else(|| GameError::illegal(format!("{number} is not in the sequence.")))
    }

    fn score(&self) -> i64 {
        i64::from(self.minimum) - i64::from(self.turns)
    }
}

impl Game for Sorter {
    type Move = Swap;

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn player_count(&self) -> usize {
        1
    }

    fn player_name(&self, _player: PlayerId) -> &str {
        &self.name
    }

    fn current_player(&self) -> PlayerId {
        PlayerId::new(0)
    }

    fn status(&self, _player: PlayerId) -> String {
        let numbers: Vec<String> = self.sequence().iter().map(u32::to_string).collect();
        format!("The current sequence is: {}", numbers.join(", "))
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "Pick two numbers to swap: ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<Swap> {
        let numbers: Vec<u32> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| GameError::Parse(text.trim().to_string()))?;
        match numbers.as_slice() {
            &[first, second] => Ok(Swap(first, second)),
            _ => Err(GameError::Parse(text.trim().to_string())),
        }
    }

    fn apply_move(&mut self, _player: PlayerId, mv: Swap) -> Result<TurnStatus> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let first = self.slot_of(mv.0)?;
        let second = self.slot_of(mv.1)?;
        if first == second {
            return Err(GameError::illegal("You must pick two different numbers."));
        }
        self.slots.place(&first, mv.1)?;
        self.slots.place(&second, mv.0)?;
        self.turns += 1;
        if self.is_sorted() {
            if self.turns == self.minimum {
                self.messages.say("You won!");
            } else {
                self.messages
                    .say(format!("You lost. The sequence could be sorted in {} swaps.", self.minimum));
            }
        }
        Ok(TurnStatus::Done)
    }

    fn legal_moves(&self, _player: PlayerId) -> Vec<Swap> {
        // Each swap that puts a number in its place.
        let sequence = self.sequence();
        sequence
            .iter()
            .enumerate()
            .filter(|&(index, &number)| number as usize != index)
            .map(|(index, &number)| Swap(number, index as u32))
            .collect()
    }

    fn outcome(&self, _player: PlayerId) -> Option<Outcome> {
        if self.quit {
            return Some(Outcome::forfeit(1, self.score()));
        }
        if !self.is_sorted() {
            return None;
        }
        Some(if self.turns == self.minimum { Outcome::win(self.score()) } else { Outcome::loss(self.score()) })
    }

    fn forfeit(&mut self, _player: PlayerId) {
        self.quit = true;
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);

    #[test]
    fn test_minimum_swaps() {
        assert_eq!(minimum_swaps(&[0, 1, 2]), 0);
        assert_eq!(minimum_swaps(&[1, 0, 2]), 1);
        assert_eq!(minimum_swaps(&[1, 2, 0]), 2);
        assert_eq!(minimum_swaps(&[3, 2, 1, 0]), 2);
    }

    #[test]
    fn test_built_unsorted() {
        for seed in 0..10 {
            let game = SorterBuilder::new().length(3).build(seed).unwrap();
            let sequence = game.sequence();
            assert_eq!(sequence.len(), 3);
            assert!(!game.is_sorted());
            assert!(game.minimum() >= 1);
        }
        assert!(SorterBuilder::new().length(1).build(0).is_err());
    }

    #[test]
    fn test_parse() {
        let game = Sorter::with_sequence("Sam", &[1, 0]).unwrap();
        assert_eq!(game.parse_move(P0, "1, 0").unwrap(), Swap(1, 0));
        assert_eq!(game.parse_move(P0, "1 0").unwrap(), Swap(1, 0));
        assert!(game.parse_move(P0, "1").is_err());
        assert!(game.parse_move(P0, "one two").is_err());
    }

    #[test]
    fn test_perfect_sort_wins() {
        let mut game = Sorter::with_sequence("Sam", &[1, 2, 0]).unwrap();
        game.apply_move(P0, Swap(1, 0)).unwrap();
        assert_eq!(game.sequence(), vec![0, 2, 1]);
        assert!(game.outcome(P0).is_none());
        game.apply_move(P0, Swap(2, 1)).unwrap();
        assert_eq!(game.outcome(P0), Some(Outcome::win(0)));
    }

    #[test]
    fn test_extra_swaps_lose() {
        let mut game = Sorter::with_sequence("Sam", &[1, 0, 2]).unwrap();
        game.apply_move(P0, Swap(1, 2)).unwrap();
        game.apply_move(P0, Swap(2, 1)).unwrap();
        game.apply_move(P0, Swap(1, 0)).unwrap();
        assert_eq!(game.outcome(P0), Some(Outcome::loss(-2)));
        assert!(game.apply_move(P0, Swap(1, 0)).is_err());
    }

    #[test]
    fn test_bad_swaps() {
        let mut game = Sorter::with_sequence("Sam", &[1, 0, 2]).unwrap();
        assert!(game.apply_move(P0, Swap(1, 7)).is_err());
        assert!(game.apply_move(P0, Swap(1, 1)).is_err());
        assert_eq!(game.turns(), 0);
        assert!(Sorter::with_sequence("Sam", &[1, 1]).is_err());
    }

    #[test]
    fn test_legal_moves_sort_perfectly() {
        let mut game = SorterBuilder::new().length(8).build(3).unwrap();
        while !game.is_over() {
            let mv = game.legal_moves(P0)[0];
            game.apply_move(P0, mv).unwrap();
        }
        assert_eq!(game.outcome(P0).map(|o| o.wins), Some(1));
    }
}
