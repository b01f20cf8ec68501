//! Ninety-Nine game implementation.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, Hand};
use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::rules::{CommandReply, Game, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Ninety-Nine",
    aka: &["99"],
    categories: &[Category::Card],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Traditional (Romani)
Game Programming: Craig \"Ichabod\" O'Brien
";

const RULES: &str = "
Each turn you play a card, adding its value to the running total. You must
correctly state the new total when you play a card. For example, if the total
to you is 81 and you want to play the five of diamonds, enter '5d 86'. If you
can't play a card without taking the total over 99, you must pass and lose one
of your three tokens. The hands are then redealt and the total is reset to
zero. If you lose all of your tokens you are out of the game. The last player
with tokens wins.

Cards are face value with face cards being 10, with these exceptions:
    A: 1 or 11
    4: 0
    9: the total goes straight to 99
    T: -10 or 10
    K: 0

A 4 reverses the order of play and a 3 skips the next player's turn.

The tokens command shows how many tokens each player has left.
";

/// The highest total allowed.
pub const LIMIT: i32 = 99;

const REVERSE_RANK: u8 = 4;
const SKIP_RANK: u8 = 3;

/// A Ninety-Nine move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NinetyNineMove {
    /// Play a card, stating the new total.
    Play { card: Card, total: i32 },
    /// Lose a token and force a redeal.
    Pass,
}

/// Rule options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinetyNineOptions {
    /// Tokens each seat starts with.
    pub tokens: i32,
    /// Cards in each hand.
    pub hand_size: usize,
    /// Nines take the total straight to 99 rather than adding nine.
    pub nine_to_99: bool,
}

impl Default for NinetyNineOptions {
    fn default() -> Self {
        Self { tokens: 3, hand_size: 3, nine_to_99: true }
    }
}

impl NinetyNineOptions {
    /// The amounts a card may add to the total.
    #[must_use]
    pub fn values(&self, card: Card) -> &'static [i32] {
        match card.rank() {
            1 => &[1, 11],
            2 => &[2],
            3 => &[3],
            4 => &[0],
            5 => &[5],
            6 => &[6],
            7 => &[7],
            8 => &[8],
            9 if self.nine_to_99 => &[99],
            9 => &[9],
            10 => &[-10, 10],
            11 | 12 => &[10],
            _ => &[0],
        }
    }

    /// Whether playing `card` on `total` may produce `new_total`.
    #[must_use]
    pub fn allows(&self, card: Card, total: i32, new_total: i32) -> bool {
        let values = self.values(card);
        (new_total <= LIMIT && values.contains(&(new_total - total))) || (new_total == LIMIT && values.contains(&99))
    }
}

/// Builder for creating a Ninety-Nine game.
pub struct NinetyNineBuilder {
    names: Vec<String>,
    options: NinetyNineOptions,
    shuffle_seats: bool,
}

impl Default for NinetyNineBuilder {
    fn default() -> Self {
        Self {
            names: ["Player", "Bot 1", "Bot 2", "Bot 3"].iter().map(|s| s.to_string()).collect(),
            options: NinetyNineOptions::default(),
            shuffle_seats: true,
        }
    }
}

impl NinetyNineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    pub fn tokens(mut self, tokens: i32) -> Self {
        self.options.tokens = tokens;
        self
    }

    pub fn nine_to_99(mut self, nine_to_99: bool) -> Self {
        self.options.nine_to_99 = nine_to_99;
        self
    }

    /// Play in seat order instead of a random order.
    pub fn fixed_seats(mut self) -> Self {
        self.shuffle_seats = false;
        self
    }

    pub fn build(self, seed: u64) -> Result<NinetyNine> {
        let count = self.names.len();
        if !(2..=8).contains(&count) {
            return Err(GameError::InvalidOption("Ninety-Nine needs two to eight players".to_string()));
        }
        if self.options.tokens < 1 || self.options.hand_size == 0 {
            return Err(GameError::InvalidOption("tokens and hand size must be positive".to_string()));
        }
        let mut rng = GameRng::new(seed);
        let mut order: Vec<PlayerId> = PlayerId::all(count).collect();
        if self.shuffle_seats {
            rng.shuffle(&mut order);
        }
        let mut game = NinetyNine {
            names: PlayerMap::from_vec(self.names),
            tokens: PlayerMap::with_value(count, self.options.tokens),
            hands: PlayerMap::with_default(count),
            deck: Deck::new(),
            total: 0,
            order,
            position: 0,
            options: self.options,
            rng,
            messages: MessageLog::new(),
            forfeited: None,
        };
        game.deal()?;
        tracing::debug!(players = count, "ninety-nine set up");
        Ok(game)
    }
}

/// A game of Ninety-Nine.
#[derive(Debug)]
pub struct NinetyNine {
    names: PlayerMap<String>,
    /// Tokens left; seats already out go further negative as others drop out.
    tokens: PlayerMap<i32>,
    hands: PlayerMap<Hand>,
    deck: Deck,
    total: i32,
    /// Seats still playing, in play order.
    order: Vec<PlayerId>,
    position: usize,
    options: NinetyNineOptions,
    rng: GameRng,
    messages: MessageLog,
    forfeited: Option<PlayerId>,
}

impl NinetyNine {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.total
    }

    #[must_use]
    pub fn tokens(&self) -> &PlayerMap<i32> {
        &self.tokens
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    /// Seats still in the game, in play order.
    #[must_use]
    pub fn active_players(&self) -> &[PlayerId] {
        &self.order
    }

    #[must_use]
    pub fn options(&self) -> &NinetyNineOptions {
        &self.options
    }

    /// Every card play open to `player`, as (new total, card).
    #[must_use]
    pub fn plays(&self, player: PlayerId) -> Vec<(i32, Card)> {
        let mut plays = Vec::new();
        for &card in self.hands[player].cards() {
            for &value in self.options.values(card) {
                let new_total = if value == 99 { LIMIT } else { self.total + value };
                if new_total <= LIMIT {
                    plays.push((new_total, card));
                }
            }
        }
        plays
    }

    fn deal(&mut self) -> Result<()> {
        for (_, hand) in self.hands.iter_mut() {
            hand.discard_all(&mut self.deck);
        }
        self.deck.shuffle(&mut self.rng);
        for _ in 0..self.options.hand_size {
            for &player in &self.order {
                self.hands[player].draw(&mut self.deck, &mut self.rng)?;
            }
        }
        self.total = 0;
        Ok(())
    }

    fn token_text(&self) -> String {
        self.order
            .iter()
            .map(|&p| format!("{} has {} tokens left.", self.names[p], self.tokens[p]))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn advance(&mut self) {
        self.position = (self.position + 1) % self.order.len();
    }

    fn play(&mut self, player: PlayerId, card: Card, total: i32) -> Result<()> {
        if !self.hands[player].contains(card) {
            return Err(GameError::illegal("You do not have that card."));
        }
        if !self.options.allows(card, self.total, total) {
            return Err(GameError::illegal("Incorrect or invalid total provided."));
        }
        self.hands[player].discard(card, &mut self.deck)?;
        self.total = total;
        self.messages
            .say(format!("{} played the {}, the total is {}.", self.names[player], card, total));
        if card.rank() == REVERSE_RANK {
            self.order.reverse();
            self.position = self.order.len() - 1 - self.position;
            self.messages.say("The order of play is reversed.");
        }
        if card.rank() == SKIP_RANK {
            self.advance();
            let skipped = self.order[self.position];
            self.messages.say(format!("{}'s turn is skipped.", self.names[skipped]));
        }
        self.hands[player].draw(&mut self.deck, &mut self.rng)?;
        self.advance();
        Ok(())
    }

    fn pass(&mut self, player: PlayerId) -> Result<()> {
        self.tokens[player] -= 1;
        self.messages.say(format!(
            "{} loses a token. They now have {} tokens.",
            self.names[player], self.tokens[player]
        ));
        if self.tokens[player] < 1 {
            for (out, tokens) in self.tokens.iter_mut() {
                if out != player && *tokens < 1 {
                    *tokens -= 1;
                }
            }
            self.order.remove(self.position);
            if self.position >= self.order.len() {
                self.position = 0;
            }
            self.messages.say(format!("{} is out of the game.", self.names[player]));
        } else {
            self.advance();
        }
        if self.order.len() > 1 {
            self.deal()?;
        } else {
            tracing::info!(winner = %self.names[self.order[0]], "ninety-nine finished");
            self.messages.say(format!("{} wins the game.", self.names[self.order[0]]));
        }
        Ok(())
    }
}

impl Game for NinetyNine {
    type Move = NinetyNineMove;

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
        self.order[self.position]
    }

    fn status(&self, player: PlayerId) -> String {
        format!(
            "The total to you is {}.\nYour hand is: {}",
            self.total, self.hands[player]
        )
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "What is your move? ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<NinetyNineMove> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("pass") {
            return Ok(NinetyNineMove::Pass);
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        let card = words.iter().find_map(|w| Card::parse(w).ok());
        let total = words.iter().rev().find_map(|w| w.parse::<i32>().ok());
        match (card, total) {
            (Some(card), Some(total)) => Ok(NinetyNineMove::Play { card, total }),
            _ => Err(GameError::Parse(text.to_string())),
        }
    }

    fn apply_move(&mut self, player: PlayerId, mv: NinetyNineMove) -> Result<TurnStatus> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if player != self.current_player() {
            return Err(GameError::NotYourTurn(player));
        }
        match mv {
            NinetyNineMove::Play { card, total } => self.play(player, card, total)?,
            NinetyNineMove::Pass => self.pass(player)?,
        }
        Ok(TurnStatus::Done)
    }

    fn legal_moves(&self, player: PlayerId) -> Vec<NinetyNineMove> {
        let mut moves: Vec<NinetyNineMove> = self
            .plays(player)
            .into_iter()
            .map(|(total, card)| NinetyNineMove::Play { card, total })
            .collect();
        moves.push(NinetyNineMove::Pass);
        moves
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("p", "pass")]
    }

    fn help(&self, topic: &str) -> Option<String> {
        match topic {
            "tokens" => Some("tokens: show how many tokens each player has left.".to_string()),
            "pass" => Some("pass: lose a token and redeal. Use it when you cannot play.".to_string()),
            _ => None,
        }
    }

    fn game_command(&mut self, _player: PlayerId, verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        (verb == "tokens").then(|| Ok(CommandReply::Text(self.token_text())))
    }

    fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        if let Some(quitter) = self.forfeited {
            let opponents = (self.player_count() - 1).max(1);
            return Some(if quitter == player {
                Outcome::forfeit(opponents, i64::from(self.tokens[player]))
            } else {
                Outcome::win(i64::from(self.tokens[player]))
            });
        }
        (self.order.len() == 1).then(|| Outcome::ranked(&self.tokens, player))
    }

    fn forfeit(&mut self, player: PlayerId) {
        self.messages.say(format!("{} quit the game.", self.names[player]));
        self.forfeited = Some(player);
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> Card {
        Card::parse(text).unwrap()
    }

    fn game(players: usize) -> NinetyNine {
        let names = (0..players).map(|i| format!("P{i}")).collect();
        NinetyNineBuilder::new().players(names).fixed_seats().build(11).unwrap()
    }

    fn give(game: &mut NinetyNine, player: PlayerId, cards: &[&str]) {
        let mut hand = Hand::new();
        let mut deck = Deck::new();
        for text in cards {
            deck.force(card(text)).unwrap();
            hand.draw(&mut deck, &mut GameRng::new(0)).unwrap();
        }
        game.hands[player] = hand;
    }

    #[test]
    fn test_card_values() {
        let options = NinetyNineOptions::default();
        assert!(options.allows(card("AS"), 80, 91));
        assert!(options.allows(card("AS"), 80, 81));
        assert!(!options.allows(card("AS"), 90, 101));
        assert!(options.allows(card("TS"), 50, 40));
        assert!(options.allows(card("9S"), 12, 99));
        assert!(!options.allows(card("9S"), 12, 21));
        assert!(options.allows(card("KS"), 99, 99));
        assert!(options.allows(card("4S"), 99, 99));

        let plain = NinetyNineOptions { nine_to_99: false, ..NinetyNineOptions::default() };
        assert!(plain.allows(card("9S"), 12, 21));
    }

    #[test]
    fn test_parse() {
        let game = game(2);
        let p0 = PlayerId::new(0);
        assert_eq!(
            game.parse_move(p0, "5d 86").unwrap(),
            NinetyNineMove::Play { card: card("5D"), total: 86 }
        );
        assert_eq!(
            game.parse_move(p0, "TS to -10").unwrap(),
            NinetyNineMove::Play { card: card("TS"), total: -10 }
        );
        assert_eq!(game.parse_move(p0, "PASS").unwrap(), NinetyNineMove::Pass);
        assert!(game.parse_move(p0, "five of diamonds").is_err());
    }

    #[test]
    fn test_play_and_draw() {
        let mut game = game(2);
        let p0 = PlayerId::new(0);
        give(&mut game, p0, &["5D", "KH", "2C"]);
        game.apply_move(p0, NinetyNineMove::Play { card: card("5D"), total: 5 }).unwrap();
        assert_eq!(game.total(), 5);
        assert_eq!(game.hand(p0).len(), 3);
        assert!(!game.hand(p0).contains(card("5D")));
        assert_eq!(game.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_wrong_total_rejected() {
        let mut game = game(2);
        let p0 = PlayerId::new(0);
        give(&mut game, p0, &["5D", "KH", "2C"]);
        let result = game.apply_move(p0, NinetyNineMove::Play { card: card("5D"), total: 6 });
        assert!(matches!(result, Err(GameError::IllegalMove(_))));
        let result = game.apply_move(p0, NinetyNineMove::Play { card: card("6D"), total: 6 });
        assert!(matches!(result, Err(GameError::IllegalMove(_))));
        assert_eq!(game.current_player(), p0);
    }

    #[test]
    fn test_skip_and_reverse() {
        let mut game = game(4);
        let p0 = PlayerId::new(0);
        give(&mut game, p0, &["3D", "4H", "2C"]);
        game.apply_move(p0, NinetyNineMove::Play { card: card("3D"), total: 3 }).unwrap();
        assert_eq!(game.current_player(), PlayerId::new(2));

        let p2 = PlayerId::new(2);
        give(&mut game, p2, &["4S", "KH", "2C"]);
        game.apply_move(p2, NinetyNineMove::Play { card: card("4S"), total: 3 }).unwrap();
        assert_eq!(game.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_pass_loses_token_and_redeals() {
        let mut game = game(3);
        let p0 = PlayerId::new(0);
        game.total = 95;
        game.apply_move(p0, NinetyNineMove::Pass).unwrap();
        assert_eq!(game.tokens()[p0], 2);
        assert_eq!(game.total(), 0);
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert!(game.active_players().iter().all(|&p| game.hand(p).len() == 3));
    }

    #[test]
    fn test_last_player_standing() {
        let mut game = game(3);
        let (p0, p1, p2) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));
        game.tokens[p0] = 1;
        game.tokens[p1] = 1;
        game.apply_move(p0, NinetyNineMove::Pass).unwrap();
        assert_eq!(game.active_players(), &[p1, p2]);
        assert_eq!(game.current_player(), p1);
        game.apply_move(p1, NinetyNineMove::Pass).unwrap();
        assert!(game.is_over());
        assert_eq!(game.tokens()[p0], -1);

        let first_out = game.outcome(p0).unwrap();
        assert_eq!((first_out.wins, first_out.losses), (0, 2));
        let second_out = game.outcome(p1).unwrap();
        assert_eq!((second_out.wins, second_out.losses), (1, 1));
        assert_eq!(game.outcome(p2).unwrap().wins, 2);
    }

    #[test]
    fn test_tokens_command() {
        let mut game = game(2);
        let reply = game.game_command(PlayerId::new(0), "tokens", "").unwrap().unwrap();
        assert_eq!(reply, CommandReply::Text("P0 has 3 tokens left.\nP1 has 3 tokens left.".to_string()));
    }

    #[test]
    fn test_plays_include_nine() {
        let mut game = game(2);
        let p0 = PlayerId::new(0);
        give(&mut game, p0, &["9D", "KH", "TC"]);
        game.total = 95;
        let plays = game.plays(p0);
        assert!(plays.contains(&(99, card("9D"))));
        assert!(plays.contains(&(95, card("KH"))));
        assert!(plays.contains(&(85, card("TC"))));
        assert!(!plays.contains(&(105, card("TC"))));
    }
}
