//! Yacht game implementation.

use serde::{Deserialize, Serialize};

use super::scoring::{standard_categories, Pattern, ScoreCategory, ScoreSpec, SCORE_KEYS};
use crate::core::{oxford, Category, GameError, GameInfo, GameRng, Outcome, PlayerId, PlayerMap, Result};
use crate::dice::{Pool, Roll};
use crate::rules::{CommandReply, Game, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Yacht",
    aka: &[],
    categories: &[Category::Dice],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Game Design: Traditional
";

const RULES: &str = "
You start by rolling five dice. You may set any number of the dice aside and
reroll the rest. You may set aside a second time and roll a third time. Dice
that are set aside may not be rerolled that turn. Once you get a final roll,
you choose a category to score it in. Each category may be scored only once.
If you do not meet the criteria for the category, you may still score it, but
it is worth zero points. The game is over when everyone has scored all of the
categories.

To set aside dice, use hold (h) followed by the values you want to set aside.
To roll again, use roll (r). To score, use score (s) followed by the name of
the category or the character before it on the score card.

The categories (and their scores) are:

Yacht: Five of a kind (50)
Big Straight: 2-3-4-5-6 (30)
Little Straight: 1-2-3-4-5 (30)
Four of a Kind: Four of the same number (sum of the four)
Full House: Two of one number and three of another (sum of the dice)
Chance: Any roll (sum of the dice)
Sixes through Ones: As many of the number as possible (sum of those dice)

OPTIONS:
extra-five=n: Later fives of a kind earn n bonus points each.
five-name=name: Rename the five of a kind category (underscores are spaces).
max-rolls=n: The most rolls allowed in a turn.
n-bonus=needed/bonus: A bonus for enough points in the number categories.
strict-four: Four of a kind cannot be scored with five of a kind.
strict-full: Full house cannot be scored with five of a kind.
super-five: Five of a kind without rerolling wins the game outright.
wild-straight: A one can stand in for a missing two in straights.

Score options (category=score) change what a category is worth. The score
can be total, sub-total, a number, first/normal for a bonus without rerolling,
or total+n. A score of 0 removes the category. The categories are five-kind,
big-straight, low-straight, four-kind, full-house, three-kind, chance, and
low-chance; three-kind and low-chance are only in play when given a score.
Low chance must score less than chance or the later of the two counts as 0.

VARIANTS: cheerio, general, hindenberg, yahtzee, yam.
";

/// Named groups of options.
const VARIANTS: [(&str, &str); 5] = [
    ("cheerio", "five-name=Cheerio big-straight=25 low-straight=20 four-kind=0 max-rolls=2"),
    (
        "general",
        "five-name=Small_General five-kind=60 four-kind=45/40 full-house=35/30 big-straight=25/20 \
         low-straight=0 chance=0 super-five wild-straight",
    ),
    ("hindenberg", "five-name=Hindenberg five-kind=30 big-straight=20 low-straight=15 four-kind=0 chance=0"),
    (
        "yahtzee",
        "five-name=Yahtzee big-straight=40 full-house=25 three-kind=total n-bonus=63/35 extra-five=100",
    ),
    (
        "yam",
        "five-name=Yam five-kind=total+40 big-straight=total+30 full-house=total+20 low-chance=total \
         low-straight=0 four-kind=0 n-bonus=60/30",
    ),
];

/// Characters that pick a category from the score card.
const LETTERS: &str = "123456ABCDEFGH";

/// A Yacht move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum YachtMove {
    /// Set aside one unheld die showing each value.
    Hold(Vec<u32>),
    /// Reroll the dice not set aside.
    Roll,
    /// Score the dice in the category at this index.
    Score(usize),
}

/// Rule options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YachtOptions {
    /// Name of the five of a kind category.
    pub five_name: String,
    pub max_rolls: u32,
    /// Bonus for each five of a kind after the first.
    pub extra_five: u32,
    /// Points needed in the number categories, and the bonus for them.
    pub number_bonus: Option<(u32, u32)>,
    pub strict_four: bool,
    pub strict_full: bool,
    /// Five of a kind on the first roll wins outright.
    pub super_five: bool,
    pub wild_straight: bool,
    /// Score specifications by option key, such as `full-house`.
    pub scores: Vec<(String, ScoreSpec)>,
}

impl Default for YachtOptions {
    fn default() -> Self {
        Self {
            five_name: "Yacht".to_string(),
            max_rolls: 3,
            extra_five: 0,
            number_bonus: None,
            strict_four: false,
            strict_full: false,
            super_five: false,
            wild_straight: false,
            scores: Vec::new(),
        }
    }
}

impl YachtOptions {
    /// Apply one option word, such as `max-rolls=2`, `strict-full`, or a
    /// variant name.
    ///
    /// ```
    /// use parlor::games::yacht::YachtOptions;
    ///
    /// let mut options = YachtOptions::default();
    /// options.apply("yahtzee").unwrap();
    /// assert_eq!(options.five_name, "Yahtzee");
    /// assert_eq!(options.number_bonus, Some((63, 35)));
    /// ```
    pub fn apply(&mut self, option: &str) -> Result<()> {
        let bad = |reason: &str| GameError::InvalidOption(format!("{reason}: {option:?}"));
        let number = |value: &str| value.trim().parse::<u32>().map_err(|_| bad("expected a number"));
        let Some((key, value)) = option.split_once('=') else {
            match option.trim().to_lowercase().as_str() {
                "strict-four" => self.strict_four = true,
                "strict-full" => self.strict_full = true,
                "super-five" => self.super_five = true,
                "wild-straight" => self.wild_straight = true,
                name => {
                    let (_, group) = VARIANTS
                        .iter()
                        .find(|(variant, _)| *variant == name)
                        .ok_or_else(|| bad("unknown Yacht option"))?;
                    for word in group.split_whitespace() {
                        self.apply(word)?;
                    }
                }
            }
            return Ok(());
        };
        let key = key.trim().to_lowercase();
        match key.as_str() {
            "five-name" => self.five_name = value.trim().replace('_', " "),
            "max-rolls" => {
                self.max_rolls = number(value)?;
                if self.max_rolls == 0 {
                    return Err(bad("at least one roll is needed"));
                }
            }
            "extra-five" => self.extra_five = number(value)?,
            "n-bonus" => {
                let (needed, bonus) = value.split_once('/').ok_or_else(|| bad("expected needed/bonus"))?;
                self.number_bonus = Some((number(needed)?, number(bonus)?)).filter(|&(needed, _)| needed > 0);
            }
            score if SCORE_KEYS.iter().any(|(option_key, _)| *option_key == score) => {
                let spec: ScoreSpec = value.parse()?;
                self.scores.retain(|(existing, _)| existing != score);
                self.scores.push((key.clone(), spec));
            }
            _ => return Err(bad("unknown Yacht option")),
        }
        Ok(())
    }

    fn score_spec(&self, key: &str) -> Option<ScoreSpec> {
        self.scores.iter().find(|(option_key, _)| option_key == key).map(|(_, spec)| *spec)
    }

    /// The categories in play under these options, in score card order.
    #[must_use]
    pub fn categories(&self) -> Vec<ScoreCategory> {
        let mut categories = Vec::new();
        for (mut category, default) in standard_categories() {
            let key = SCORE_KEYS.iter().find(|(_, name)| *name == category.name).map(|(key, _)| *key);
            let spec = key.and_then(|key| self.score_spec(key));
            let Some(scoring) = spec.map_or(default, |spec| spec.scoring) else {
                continue;
            };
            category.scoring = scoring;
            category.first = spec.map_or(0, |spec| spec.first);
            match &mut category.pattern {
                Pattern::FourKind { strict } => *strict = self.strict_four,
                Pattern::FullHouse { strict } => *strict = self.strict_full,
                Pattern::LittleStraight { wild } | Pattern::BigStraight { wild } => *wild = self.wild_straight,
                Pattern::FiveKind => category.name = self.five_name.clone(),
                _ => {}
            }
            categories.push(category);
        }
        let straights: Vec<usize> = categories
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.pattern, Pattern::LittleStraight { .. } | Pattern::BigStraight { .. }))
            .map(|(index, _)| index)
            .collect();
        if let [only] = straights[..] {
            let lone = &mut categories[only];
            lone.name = "Straight".to_string();
            lone.description = "Five in a row";
            lone.pattern = Pattern::Straight { wild: self.wild_straight };
        }
        categories
    }
}

/// Builder for creating a Yacht game.
pub struct YachtBuilder {
    names: Vec<String>,
    options: YachtOptions,
    order: Option<Vec<PlayerId>>,
}

impl Default for YachtBuilder {
    fn default() -> Self {
        Self {
            names: vec!["Player".to_string(), "Bot".to_string()],
            options: YachtOptions::default(),
            order: None,
        }
    }
}

impl YachtBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    pub fn options(mut self, options: YachtOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_rolls(mut self, rolls: u32) -> Self {
        self.options.max_rolls = rolls;
        self
    }

    /// Fix the order seats take their turns in. Shuffled when not given.
    pub fn play_order(mut self, order: Vec<PlayerId>) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the game.
    pub fn build(self, seed: u64) -> Result<Yacht> {
        if !(1..=255).contains(&self.names.len()) {
            return Err(GameError::InvalidOption("Yacht needs at least one player".to_string()));
        }
        if self.options.max_rolls == 0 {
            return Err(GameError::InvalidOption("at least one roll is needed".to_string()));
        }
        let categories = self.options.categories();
        if categories.len() > LETTERS.len() {
            return Err(GameError::InvalidOption("too many score categories".to_string()));
        }
        let mut rng = GameRng::new(seed);
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
        let dice = Pool::new(&[6; 5], &mut rng);
        tracing::debug!(players = count, categories = categories.len(), options = ?self.options, "yacht set up");
        Ok(Yacht {
            names: PlayerMap::from_vec(self.names),
            cards: PlayerMap::with_value(count, vec![None; categories.len()]),
            bonuses: PlayerMap::with_value(count, None),
            totals: PlayerMap::with_value(count, 0),
            five: categories.iter().position(|c| c.pattern == Pattern::FiveKind),
            categories,
            dice,
            roll_count: 1,
            current: order[0],
            order,
            turns: 0,
            options: self.options,
            rng,
            messages: MessageLog::new(),
            finished: false,
            instant_winner: None,
            forfeited: None,
        })
    }
}

/// A game of Yacht.
#[derive(Debug)]
pub struct Yacht {
    names: PlayerMap<String>,
    categories: Vec<ScoreCategory>,
    /// Points per category, `None` until scored.
    cards: PlayerMap<Vec<Option<u32>>>,
    bonuses: PlayerMap<Option<u32>>,
    totals: PlayerMap<u32>,
    five: Option<usize>,
    dice: Pool,
    roll_count: u32,
    current: PlayerId,
    order: Vec<PlayerId>,
    turns: u32,
    options: YachtOptions,
    rng: GameRng,
    messages: MessageLog,
    finished: bool,
    instant_winner: Option<PlayerId>,
    forfeited: Option<PlayerId>,
}

impl Yacht {
    #[must_use]
    pub fn categories(&self) -> &[ScoreCategory] {
        &self.categories
    }

    /// A seat's score card, by category index.
    #[must_use]
    pub fn card(&self, player: PlayerId) -> &[Option<u32>] {
        &self.cards[player]
    }

    #[must_use]
    pub fn totals(&self) -> &PlayerMap<u32> {
        &self.totals
    }

    /// The number category bonus, once every number category is scored.
    #[must_use]
    pub fn bonus(&self, player: PlayerId) -> Option<u32> {
        self.bonuses[player]
    }

    #[must_use]
    pub fn dice(&self) -> &Pool {
        &self.dice
    }

    /// Values of the dice set aside this turn.
    #[must_use]
    pub fn held_values(&self) -> Vec<u32> {
        self.dice.iter().filter(|d| d.held).map(Roll::value).collect()
    }

    /// Values of the dice that would be rerolled.
    #[must_use]
    pub fn free_values(&self) -> Vec<u32> {
        self.dice.iter().filter(|d| !d.held).map(Roll::value).collect()
    }

    /// Rolls made so far this turn, counting the first.
    #[must_use]
    pub fn roll_count(&self) -> u32 {
        self.roll_count
    }

    #[must_use]
    pub fn options(&self) -> &YachtOptions {
        &self.options
    }

    #[must_use]
    pub fn play_order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Whether another roll is allowed this turn.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.roll_count < self.options.max_rolls && self.dice.held() < self.dice.len()
    }

    /// Indexes of the categories `player` has not scored.
    pub fn open_categories(&self, player: PlayerId) -> impl Iterator<Item = usize> + '_ {
        self.cards[player].iter().enumerate().filter(|(_, s)| s.is_none()).map(|(index, _)| index)
    }

    /// What the dice would score for `player` in the category at `index`.
    ///
    /// Low chance must stay under chance: whichever is scored second is
    /// worth nothing if it breaks that order.
    #[must_use]
    pub fn score_for(&self, player: PlayerId, index: usize) -> u32 {
        let Some(category) = self.categories.get(index) else {
            return 0;
        };
        let points = category.score(&self.dice.values(), self.roll_count);
        let scored = |pattern: Pattern| {
            self.categories
                .iter()
                .position(|c| c.pattern == pattern)
                .and_then(|other| self.cards[player][other])
        };
        match category.pattern {
            Pattern::LowChance if scored(Pattern::Chance).is_some_and(|chance| chance <= points) => 0,
            Pattern::Chance if scored(Pattern::LowChance).is_some_and(|low| points <= low) => 0,
            _ => points,
        }
    }

    /// Find a category by name or by its score card character.
    #[must_use]
    pub fn find_category(&self, text: &str) -> Option<usize> {
        let text = text.trim();
        if let Some(index) = self.categories.iter().position(|c| c.name.eq_ignore_ascii_case(text)) {
            return Some(index);
        }
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => LETTERS.find(c.to_ascii_uppercase()).filter(|&index| index < self.categories.len()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_dice(&mut self, values: &[u32]) {
        self.dice.release();
        self.dice.set_values(values).unwrap();
    }

    #[cfg(test)]
    pub(crate) fn set_roll_count(&mut self, count: u32) {
        self.roll_count = count;
    }

    /// Whether scoring the five of a kind category again earns the extra bonus.
    fn extra_five_due(&self, player: PlayerId, index: usize) -> bool {
        self.options.extra_five > 0
            && self.five == Some(index)
            && self.cards[player][index].is_some_and(|points| points > 0)
            && Pattern::FiveKind.check(&self.dice.values()) > 0
    }

    /// The score card for every seat, one column per player.
    pub fn score_table(&self) -> String {
        let width = self.categories.iter().map(|c| c.name.len()).max().unwrap_or(0).max(10) + 3;
        let seats: Vec<(PlayerId, String)> =
            self.names.iter().map(|(p, name)| (p, name.chars().take(18).collect())).collect();
        let row = |label: &str, name: &str, cells: Vec<String>| {
            let mut line = format!("{label:<3}{name:<width$}");
            for ((_, seat), cell) in seats.iter().zip(cells) {
                line.push_str(&format!("  {cell:>w$}", w = seat.len()));
            }
            line
        };
        let show = |score: Option<u32>| score.map_or_else(|| "-".to_string(), |s| s.to_string());

        let mut lines = vec![row("", "Categories", seats.iter().map(|(_, name)| name.clone()).collect())];
        let rule = "-".repeat(lines[0].len());
        lines.push(rule.clone());
        for ((index, category), letter) in self.categories.iter().enumerate().zip(LETTERS.chars()) {
            let cells = seats.iter().map(|(p, _)| show(self.cards[*p][index])).collect();
            lines.push(row(&format!("{letter}:"), &category.name, cells));
            if category.pattern == Pattern::Number(6) && self.options.number_bonus.is_some() {
                lines.push(row("-:", "Bonus", seats.iter().map(|(p, _)| show(self.bonuses[*p])).collect()));
            }
        }
        lines.push(rule);
        lines.push(row("", "Total", seats.iter().map(|(p, _)| self.totals[*p].to_string()).collect()));
        lines.join("\n")
    }

    fn category_help(&self) -> String {
        self.categories
            .iter()
            .zip(LETTERS.chars())
            .map(|(category, letter)| format!("{letter}: {} ({})", category.name, category.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Award the number bonus once the number categories are all scored.
    fn check_number_bonus(&mut self, player: PlayerId) {
        let Some((needed, bonus)) = self.options.number_bonus else {
            return;
        };
        if self.bonuses[player].is_some() {
            return;
        }
        let numbers: Option<Vec<u32>> = self
            .categories
            .iter()
            .zip(&self.cards[player])
            .filter(|(category, _)| category.is_number())
            .map(|(_, score)| *score)
            .collect();
        let Some(numbers) = numbers else {
            return;
        };
        let earned = if numbers.iter().sum::<u32>() >= needed { bonus } else { 0 };
        self.bonuses[player] = Some(earned);
        self.totals[player] += earned;
        if earned > 0 {
            self.messages
                .say(format!("{} earned the {} point bonus for the numbers.", self.names[player], earned));
        }
    }

    fn end_turn(&mut self) {
        self.turns += 1;
        self.dice.release();
        self.dice.roll(&mut self.rng);
        self.roll_count = 1;
        if self.cards.values().all(|card| card.iter().all(Option::is_some)) {
            self.finish();
            return;
        }
        let index = self.order.iter().position(|&p| p == self.current).unwrap_or(0);
        for step in 1..=self.order.len() {
            let next = self.order[(index + step) % self.order.len()];
            if self.cards[next].iter().any(Option::is_none) {
                self.current = next;
                break;
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        let high = self.totals.max_value().unwrap_or(0);
        let winners: Vec<&str> = self
            .totals
            .iter()
            .filter(|(_, &total)| total == high)
            .map(|(p, _)| self.names[p].as_str())
            .collect();
        let announcement = match winners.as_slice() {
            [winner] => format!("The winner is {winner} with {high} points."),
            _ => format!("The winners are {} with {high} points.", oxford(&winners)),
        };
        self.messages.say(self.score_table());
        self.messages.say(announcement);
        tracing::info!(turns = self.turns, high, "yacht finished");
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

    fn score(&mut self, player: PlayerId, index: usize) -> Result<TurnStatus> {
        let Some(category) = self.categories.get(index) else {
            return Err(GameError::illegal("There is no such category."));
        };
        let name = category.name.clone();
        if self.cards[player][index].is_some() {
            if !self.extra_five_due(player, index) {
                return Err(GameError::illegal("You have already scored in that category."));
            }
            let bonus = self.options.extra_five;
            if let Some(points) = self.cards[player][index].as_mut() {
                *points += bonus;
            }
            self.totals[player] += bonus;
            self.messages
                .say(format!("{} scored another {name} for {bonus} bonus points.", self.names[player]));
            self.end_turn();
            return Ok(TurnStatus::Done);
        }

        let points = self.score_for(player, index);
        self.cards[player][index] = Some(points);
        self.totals[player] += points;
        self.messages
            .say(format!("{} scored {} in {name} with {}.", self.names[player], points, self.dice));
        self.check_number_bonus(player);

        if self.options.super_five && self.five == Some(index) && points > 0 && self.roll_count == 1 {
            self.messages
                .say(format!("{} rolled {name} without rerolling and wins outright!", self.names[player]));
            self.instant_winner = Some(player);
            self.finished = true;
            tracing::info!(turns = self.turns, winner = %player, "yacht won outright");
            return Ok(TurnStatus::Done);
        }
        self.end_turn();
        Ok(TurnStatus::Done)
    }
}

impl Game for Yacht {
    type Move = YachtMove;

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
        let mut text = self.score_table();
        if !self.is_over() {
            if player == self.current {
                let left = self.options.max_rolls - self.roll_count;
                text.push_str(&format!("\n\nThe roll to you is {}.\nYou have {left} rerolls left.", self.dice));
            } else {
                text.push_str(&format!("\n\nIt is {}'s turn. The dice show {}.", self.names[self.current], self.dice));
            }
        }
        text
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "What is your move? ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<YachtMove> {
        let text = text.trim().to_lowercase();
        let (verb, args) = text.split_once(' ').map_or((text.as_str(), ""), |(verb, args)| (verb, args.trim()));
        match verb {
            "roll" | "r" if args.is_empty() => Ok(YachtMove::Roll),
            "hold" | "h" => {
                let values = args
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|word| !word.is_empty())
                    .map(|word| word.parse::<u32>().map_err(|_| GameError::Parse(text.clone())))
                    .collect::<Result<Vec<u32>>>()?;
                if values.is_empty() {
                    return Err(GameError::Parse(text.clone()));
                }
                Ok(YachtMove::Hold(values))
            }
            "score" | "s" => self.find_category(args).map(YachtMove::Score).ok_or_else(|| {
                let known: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
                GameError::illegal(format!(
                    "I do not recognize that category. The categories I know are {}.",
                    oxford(&known)
                ))
            }),
            _ => Err(GameError::Parse(text.clone())),
        }
    }

    fn apply_move(&mut self, player: PlayerId, mv: YachtMove) -> Result<TurnStatus> {
        self.check_turn(player)?;
        match mv {
            YachtMove::Hold(values) => {
                self.dice.hold(&values)?;
                self.messages
                    .say(format!("{} set aside {}.", self.names[player], oxford(&values)));
                Ok(TurnStatus::Continue)
            }
            YachtMove::Roll if self.roll_count >= self.options.max_rolls => Err(GameError::illegal(format!(
                "You have already rolled {} times.",
                self.options.max_rolls
            ))),
            YachtMove::Roll if self.dice.held() == self.dice.len() => {
                Err(GameError::illegal("Every die is set aside; score the roll."))
            }
            YachtMove::Roll => {
                self.dice.roll(&mut self.rng);
                self.roll_count += 1;
                self.messages.say(format!("{} rolled {}.", self.names[player], self.dice));
                Ok(TurnStatus::Continue)
            }
            YachtMove::Score(index) => self.score(player, index),
        }
    }

    fn legal_moves(&self, player: PlayerId) -> Vec<YachtMove> {
        let mut moves: Vec<YachtMove> = self.open_categories(player).map(YachtMove::Score).collect();
        if let Some(five) = self.five.filter(|&five| self.extra_five_due(player, five)) {
            moves.push(YachtMove::Score(five));
        }
        if self.can_roll() {
            moves.push(YachtMove::Roll);
        }
        moves
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("h", "hold"), ("r", "roll"), ("s", "score")]
    }

    fn help(&self, topic: &str) -> Option<String> {
        match topic {
            "categories" => Some(self.category_help()),
            "scores" => Some("scores: show the score card.".to_string()),
            _ => None,
        }
    }

    fn game_command(&mut self, _player: PlayerId, verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        match verb {
            "scores" => Some(Ok(CommandReply::Text(self.score_table()))),
            "categories" => Some(Ok(CommandReply::Text(self.category_help()))),
            _ => None,
        }
    }

    fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        let score = i64::from(self.totals[player]);
        if let Some(quitter) = self.forfeited {
            return Some(if quitter == player {
                Outcome::forfeit(self.player_count() - 1, score)
            } else {
                Outcome::win(score)
            });
        }
        if let Some(winner) = self.instant_winner {
            if winner == player {
                return Some(Outcome { wins: (self.player_count() - 1) as u32, score, ..Outcome::default() });
            }
            // The outright winner beats everyone, whatever the points say.
            let mut outcome = Outcome::ranked(&self.totals, player);
            match self.totals[winner].cmp(&self.totals[player]) {
                std::cmp::Ordering::Less => outcome.wins -= 1,
                std::cmp::Ordering::Equal => outcome.draws -= 1,
                std::cmp::Ordering::Greater => return Some(outcome),
            }
            outcome.losses += 1;
            return Some(outcome);
        }
        self.finished.then(|| Outcome::ranked(&self.totals, player))
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

    fn game(options: YachtOptions) -> Yacht {
        YachtBuilder::new()
            .players(vec!["Ann".to_string(), "Bob".to_string()])
            .options(options)
            .play_order(vec![PlayerId::new(0), PlayerId::new(1)])
            .build(11)
            .unwrap()
    }

    fn options(words: &str) -> YachtOptions {
        let mut options = YachtOptions::default();
        for word in words.split_whitespace() {
            options.apply(word).unwrap();
        }
        options
    }

    fn names(yacht: &Yacht) -> Vec<&str> {
        yacht.categories().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_standard_card() {
        let yacht = game(YachtOptions::default());
        assert_eq!(yacht.categories().len(), 12);
        assert_eq!(yacht.categories()[11].name, "Yacht");
        assert!(!names(&yacht).contains(&"Three of a Kind"));
        assert_eq!(yacht.find_category("full house"), Some(9));
        assert_eq!(yacht.find_category("1"), Some(0));
        assert_eq!(yacht.find_category("f"), Some(11));
        assert_eq!(yacht.find_category("z"), None);
    }

    #[test]
    fn test_variants_reshape_the_card() {
        let yacht = game(options("general"));
        assert_eq!(
            names(&yacht)[6..],
            ["Straight", "Full House", "Four of a Kind", "Small General"]
        );
        assert!(yacht.options().super_five && yacht.options().wild_straight);
        assert_eq!(yacht.categories()[8].first, 5);

        let yacht = game(options("yahtzee"));
        assert_eq!(yacht.categories().len(), 13);
        assert_eq!(yacht.categories()[6].name, "Three of a Kind");

        let yacht = game(options("cheerio"));
        assert_eq!(yacht.options().max_rolls, 2);
        assert!(!names(&yacht).contains(&"Four of a Kind"));
    }

    #[test]
    fn test_bad_options() {
        let mut options = YachtOptions::default();
        assert!(options.apply("max-rolls=0").is_err());
        assert!(options.apply("n-bonus=63").is_err());
        assert!(options.apply("chance=lots").is_err());
        assert!(options.apply("triple-yacht").is_err());
    }

    #[test]
    fn test_hold_roll_score_turn() {
        let mut yacht = game(YachtOptions::default());
        let ann = PlayerId::new(0);
        yacht.set_dice(&[6, 6, 2, 3, 6]);
        yacht.apply_move(ann, YachtMove::Hold(vec![6, 6, 6])).unwrap();
        assert_eq!(yacht.held_values(), vec![6, 6, 6]);
        assert_eq!(yacht.apply_move(ann, YachtMove::Roll).unwrap(), TurnStatus::Continue);
        assert_eq!(yacht.held_values(), vec![6, 6, 6]);
        assert_eq!(yacht.roll_count(), 2);
        yacht.apply_move(ann, YachtMove::Roll).unwrap();
        assert!(yacht.apply_move(ann, YachtMove::Roll).is_err());

        let sixes = yacht.find_category("sixes").unwrap();
        let expected = yacht.score_for(ann, sixes);
        assert!(expected >= 18);
        assert_eq!(yacht.apply_move(ann, YachtMove::Score(sixes)).unwrap(), TurnStatus::Done);
        assert_eq!(yacht.card(ann)[sixes], Some(expected));
        assert_eq!(yacht.current_player(), PlayerId::new(1));
        assert_eq!(yacht.roll_count(), 1);
        assert!(yacht.held_values().is_empty());
    }

    #[test]
    fn test_hold_missing_dice() {
        let mut yacht = game(YachtOptions::default());
        yacht.set_dice(&[1, 2, 3, 4, 5]);
        assert!(yacht.apply_move(PlayerId::new(0), YachtMove::Hold(vec![6])).is_err());
        assert!(yacht.held_values().is_empty());
    }

    #[test]
    fn test_category_scored_once() {
        let mut yacht = game(YachtOptions::default());
        let (ann, bob) = (PlayerId::new(0), PlayerId::new(1));
        yacht.apply_move(ann, YachtMove::Score(0)).unwrap();
        yacht.apply_move(bob, YachtMove::Score(0)).unwrap();
        assert!(matches!(yacht.apply_move(ann, YachtMove::Score(0)), Err(GameError::IllegalMove(_))));
        assert!(yacht.apply_move(ann, YachtMove::Score(40)).is_err());
    }

    #[test]
    fn test_parse_moves() {
        let yacht = game(YachtOptions::default());
        let ann = PlayerId::new(0);
        assert_eq!(yacht.parse_move(ann, "hold 6 6 3").unwrap(), YachtMove::Hold(vec![6, 6, 3]));
        assert_eq!(yacht.parse_move(ann, "h 5,5").unwrap(), YachtMove::Hold(vec![5, 5]));
        assert_eq!(yacht.parse_move(ann, "roll").unwrap(), YachtMove::Roll);
        assert_eq!(yacht.parse_move(ann, "score Big Straight").unwrap(), YachtMove::Score(8));
        assert_eq!(yacht.parse_move(ann, "s 6").unwrap(), YachtMove::Score(5));
        assert!(matches!(yacht.parse_move(ann, "hold"), Err(GameError::Parse(_))));
        assert!(matches!(yacht.parse_move(ann, "hold six"), Err(GameError::Parse(_))));
        assert!(matches!(yacht.parse_move(ann, "score nothing"), Err(GameError::IllegalMove(_))));
    }

    #[test]
    fn test_low_chance_must_stay_low() {
        let mut yacht = game(options("low-chance=total"));
        let ann = PlayerId::new(0);
        let chance = yacht.find_category("chance").unwrap();
        let low = yacht.find_category("low chance").unwrap();
        yacht.cards[ann][chance] = Some(20);
        yacht.set_dice(&[6, 6, 5, 2, 1]);
        assert_eq!(yacht.score_for(ann, low), 0);
        yacht.set_dice(&[1, 1, 5, 2, 1]);
        assert_eq!(yacht.score_for(ann, low), 10);
    }

    #[test]
    fn test_number_bonus() {
        let mut yacht = game(options("n-bonus=63/35"));
        let ann = PlayerId::new(0);
        for index in 0..5 {
            yacht.cards[ann][index] = Some(12);
        }
        yacht.totals[ann] = 60;
        yacht.set_dice(&[6, 6, 6, 1, 2]);
        yacht.apply_move(ann, YachtMove::Score(5)).unwrap();
        assert_eq!(yacht.bonus(ann), Some(35));
        assert_eq!(yacht.totals()[ann], 60 + 18 + 35);
        assert!(yacht.score_table().contains("Bonus"));
    }

    #[test]
    fn test_extra_five_bonus() {
        let mut yacht = game(options("extra-five=100"));
        let (ann, bob) = (PlayerId::new(0), PlayerId::new(1));
        let five = yacht.find_category("yacht").unwrap();
        yacht.set_dice(&[4; 5]);
        yacht.apply_move(ann, YachtMove::Score(five)).unwrap();
        assert_eq!(yacht.card(ann)[five], Some(50));
        yacht.apply_move(bob, YachtMove::Score(0)).unwrap();

        yacht.set_dice(&[2, 2, 2, 2, 3]);
        assert!(yacht.apply_move(ann, YachtMove::Score(five)).is_err());
        yacht.set_dice(&[2; 5]);
        assert!(yacht.legal_moves(ann).contains(&YachtMove::Score(five)));
        yacht.apply_move(ann, YachtMove::Score(five)).unwrap();
        assert_eq!(yacht.card(ann)[five], Some(150));
        assert_eq!(yacht.totals()[ann], 150);
    }

    #[test]
    fn test_super_five_wins_outright() {
        let mut yacht = game(options("super-five"));
        let (ann, bob) = (PlayerId::new(0), PlayerId::new(1));
        yacht.totals[ann] = 90;
        let five = yacht.find_category("yacht").unwrap();
        yacht.apply_move(ann, YachtMove::Score(0)).unwrap();
        yacht.set_dice(&[3; 5]);
        yacht.apply_move(bob, YachtMove::Score(five)).unwrap();
        assert!(yacht.is_over());
        assert_eq!(yacht.outcome(bob).unwrap().wins, 1);
        assert_eq!(yacht.outcome(ann).unwrap().losses, 1);
        assert_eq!(yacht.outcome(ann).unwrap().wins, 0);
    }

    #[test]
    fn test_super_five_needs_first_roll() {
        let mut yacht = game(options("super-five"));
        let ann = PlayerId::new(0);
        let five = yacht.find_category("yacht").unwrap();
        yacht.set_dice(&[3; 5]);
        yacht.set_roll_count(2);
        yacht.apply_move(ann, YachtMove::Score(five)).unwrap();
        assert!(!yacht.is_over());
    }

    #[test]
    fn test_game_ends_when_cards_are_full() {
        let mut yacht = game(options("four-kind=0 low-straight=0 big-straight=0 full-house=0 chance=0 five-kind=0"));
        assert_eq!(yacht.categories().len(), 6);
        for index in 0..6 {
            for seat in [PlayerId::new(0), PlayerId::new(1)] {
                assert_eq!(yacht.current_player(), seat);
                yacht.apply_move(seat, YachtMove::Score(index)).unwrap();
            }
        }
        assert!(yacht.is_over());
        let messages = yacht.drain_messages();
        assert!(messages.iter().any(|m| m.starts_with("The winner") || m.starts_with("The winners")));
        let (ann, bob) = (PlayerId::new(0), PlayerId::new(1));
        assert_eq!(yacht.outcome(ann).unwrap().games(), 1);
        assert_eq!(yacht.outcome(ann).unwrap().wins, yacht.outcome(bob).unwrap().losses);
    }

    #[test]
    fn test_play_order_is_checked() {
        let bad = YachtBuilder::new().play_order(vec![PlayerId::new(1), PlayerId::new(1)]).build(1);
        assert!(bad.is_err());
        let solo = YachtBuilder::new().players(vec!["Ann".to_string()]).build(1).unwrap();
        assert_eq!(solo.current_player(), PlayerId::new(0));
    }
}
