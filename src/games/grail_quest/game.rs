//! The quest itself: provisioning, fortnights, and how it ends.

use serde::{Deserialize, Serialize};

use super::supplies::{Item, QuestDate, Supplies};
use crate::core::{Category, GameError, GameInfo, GameRng, Outcome, PlayerId, Result};
use crate::rules::{CommandReply, Game, MessageLog, TurnStatus};

pub const INFO: GameInfo = GameInfo {
    name: "Quest for the Grail",
    aka: &["Grail Quest", "I seek the Holy Grail!", "qftg"],
    categories: &[Category::Adventure],
    credits: CREDITS,
    rules: RULES,
};

const CREDITS: &str = "
Original Program and Design: Don Rawitsch, Bill Heinemann, and
    Paul Dillenberger with the Minnesota Educational Computing Consortium.
Arthurian Content: Monty Python
";

const MOOSE_CREDITS: &str = "
Original Program and Design: Don Rawik, Bill Heinemik, and Paul Dillenbik
    wik the Moose Educational Computing Consortium.
Arthurian Content: Moosey Python

No moose were harmed in the making of this game. A few of the programmers might
have gotten bit a little, though.
";

const SACKED_CREDITS: &str = "
We apologize for the problems with the credits. The people responsible have
been sacked.

And don't forget to try a loveli holiday in Sweden.
";

const SACKER_CREDITS: &str = "
We apologize again for the problems with the credits. The people responsible
for sacking the people who have just been sacked, have just been sacked.
";

const MOOSER_CREDITS: &str = "
Original Moose Choreography: Don Rawitsch, Bill Heinemann, and
    Paul Dillenberger with the Minnesota Educational Computing Consortium.
Moose Handlers: Monty Python
";

const SACKEST_CREDITS: &str = "
The programmers of the firm hired to continue the credits after the other
people had been sacked, wish it to be known that they have just been sacked.

The credits have been completed in an entirely different style at great
expense and at the last minute.
";

const LLAMA_CREDITS: &str = "
Original Program and Design: Don Llamaitsch, Bill Heinellama, and
    Paul Llamaberger with 40 specially trained Ecuadorian mountain llamas.
Arthurian Content: Llama Python and the Red Llama of Brixton.
";

const FINAL_CREDITS: &str = "
You're one of those guys who stays in the theatre until the final credits
are completely done, aren't you?
";

/// Each `credits` command shows the next of these.
pub const CREDITS_ORDER: [&str; 8] = [
    CREDITS,
    MOOSE_CREDITS,
    SACKED_CREDITS,
    SACKER_CREDITS,
    MOOSER_CREDITS,
    SACKEST_CREDITS,
    LLAMA_CREDITS,
    FINAL_CREDITS,
];

const RULES: &str = "
This game simulates a quest over England from Camelot to the Castle
Aaaaarrrrrrggghhh. Your team of five knights will complete the quest in five to
six months, if you make it alive.

At the beginning you will need to provision for the trip. You can spend all of
your money at the start of the quest, or you can save some of your gold to
spend at castles along the way when you run low on supplies. However, items
cost more at the castles. You can also go hunting along the way to get more
food.

Each fortnight you may stop at a castle (when one is in sight), hunt, or
continue. Then you choose how well to eat: poorly, moderately, or well. When
bandits attack, you may run, attack, continue, or circle your steeds.

You must reach the castle within twenty fortnights, or winter will finish
what the Black Knight started.
";

/// Gold the knights set out with.
pub const STARTING_GOLD: i64 = 700;

/// Miles from Camelot to the Castle Aaaaarrrrrrggghhh.
pub const QUEST_MILES: i64 = 2040;

/// Fortnights before winter ends the quest.
pub const MAX_FORTNIGHTS: u32 = 20;

/// Arrows needed to go hunting.
pub const HUNTING_ARROWS: i64 = 40;

/// Miles lost by stopping at a castle or hunting.
pub const DETOUR_MILES: i64 = 45;

const CASTLES: [&str; 5] =
    ["Castle of Camelot", "Swamp Castle", "Castle Anthrax", "Spam Castle", "Catapult Castle"];

/// How well the knights eat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eating {
    Poorly,
    Moderately,
    Well,
}

impl Eating {
    /// Spam eaten in a fortnight.
    #[must_use]
    pub fn cost(self) -> i64 {
        8 + 5 * self.level()
    }

    #[must_use]
    pub fn level(self) -> i64 {
        match self {
            Eating::Poorly => 1,
            Eating::Moderately => 2,
            Eating::Well => 3,
        }
    }
}

/// Ways of dealing with bandits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tactic {
    Run,
    Attack,
    Continue,
    Circle,
}

/// A Grail Quest move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrailMove {
    /// Spend gold on the item being offered.
    Buy(i64),
    /// Stop at the castle in sight.
    Stop,
    Hunt,
    Continue,
    Eat(Eating),
    Tactic(Tactic),
}

/// What the game is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Buying `item`; `percent` is the value received per gold spent.
    Buying { item: Item, percent: i64, in_camelot: bool },
    /// Choosing to stop, hunt or continue.
    Action,
    Eating,
    /// Bandits are coming.
    Bandits,
    Over,
}

/// How the quest ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    Arrived,
    Died(String),
    Winter,
    /// The credits ran out.
    Ejected,
    Quit,
}

/// Game options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrailOptions {
    /// Archery skill from 1 (ace) to 5 (shaky). Better archers hunt and
    /// fight better.
    pub skill: i64,
}

impl Default for GrailOptions {
    fn default() -> Self {
        Self { skill: 3 }
    }
}

/// Builder for a Grail Quest.
pub struct GrailQuestBuilder {
    name: String,
    options: GrailOptions,
}

impl Default for GrailQuestBuilder {
    fn default() -> Self {
        Self { name: "Arthur".to_string(), options: GrailOptions::default() }
    }
}

impl GrailQuestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn skill(mut self, skill: i64) -> Self {
        self.options.skill = skill;
        self
    }

    pub fn build(self, seed: u64) -> Result<GrailQuest> {
        if !(1..=5).contains(&self.options.skill) {
            return Err(GameError::InvalidOption(format!("skill must be 1 to 5, not {}", self.options.skill)));
        }
        let mut messages = MessageLog::new();
        messages.say(PROVISIONING);
        Ok(GrailQuest {
            name: self.name,
            options: self.options,
            phase: Phase::Buying { item: Item::Steeds, percent: 100, in_camelot: true },
            supplies: Supplies::starting(STARTING_GOLD),
            mileage: 0,
            fortnight: 0,
            date: QuestDate::START,
            castle: true,
            castles_visited: 0,
            eating: Eating::Moderately,
            illness: false,
            injury: false,
            gorge_cleared: false,
            bridge_cleared: false,
            hostile: false,
            credits_shown: 0,
            ending: None,
            rng: GameRng::new(seed),
            messages,
        })
    }
}

const PROVISIONING: &str = "You have 700 pieces of gold to spend on steeds (180 to 270), coconuts
(20 to 30), spam, arrows (1 gold buys 50), clothing, and miscellaneous
supplies.";

/// A quest for the Holy Grail.
#[derive(Debug)]
pub struct GrailQuest {
    name: String,
    pub(super) options: GrailOptions,
    pub(super) phase: Phase,
    pub(super) supplies: Supplies,
    pub(super) mileage: i64,
    fortnight: u32,
    date: QuestDate,
    /// A castle is in sight this fortnight.
    castle: bool,
    castles_visited: usize,
    pub(super) eating: Eating,
    pub(super) illness: bool,
    pub(super) injury: bool,
    pub(super) gorge_cleared: bool,
    pub(super) bridge_cleared: bool,
    pub(super) hostile: bool,
    credits_shown: usize,
    pub(super) ending: Option<Ending>,
    pub(super) rng: GameRng,
    pub(super) messages: MessageLog,
}

impl GrailQuest {
    #[must_use]
    pub fn supplies(&self) -> &Supplies {
        &self.supplies
    }

    #[must_use]
    pub fn mileage(&self) -> i64 {
        self.mileage
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn date(&self) -> QuestDate {
        self.date
    }

    #[must_use]
    pub fn fortnight(&self) -> u32 {
        self.fortnight
    }

    #[must_use]
    pub fn ending(&self) -> Option<&Ending> {
        self.ending.as_ref()
    }

    /// Final score: what is left of the provisions, if the knights arrived.
    #[must_use]
    pub fn score(&self) -> i64 {
        match self.ending {
            Some(Ending::Arrived) => self.supplies.value(),
            _ => 0,
        }
    }

    /// How bad a shot was: 0 is perfect, higher is worse.
    pub(super) fn shoot(&mut self) -> i64 {
        self.rng.gen_range(0..self.options.skill + 1)
    }

    pub(super) fn die(&mut self, cause: &str) {
        self.messages.say(format!("Your knights have died of {cause}."));
        self.messages.say("Now, go away or I shall taunt you a second time!");
        tracing::info!(cause, fortnight = self.fortnight, "grail quest lost");
        self.ending = Some(Ending::Died(cause.to_string()));
        self.phase = Phase::Over;
    }

    fn end(&mut self, ending: Ending) {
        self.ending = Some(ending);
        self.phase = Phase::Over;
    }

    fn buy(&mut self, item: Item, percent: i64, in_camelot: bool, amount: i64) -> Result<()> {
        let (low, high) = item.limits(self.supplies.gold, in_camelot);
        if amount < low || amount > high {
            return Err(GameError::illegal(format!(
                "You must spend between {low} and {high} gold on {}.",
                item.name()
            )));
        }
        self.supplies.gold -= amount;
        item.stock(&mut self.supplies, amount, percent);
        let next = item.next().filter(|_| self.supplies.gold > 0 || in_camelot);
        match next {
            Some(item) => self.phase = Phase::Buying { item, percent, in_camelot },
            None => {
                self.messages
                    .say(format!("After all of your purchases, you have {} pieces of gold left.", self.supplies.gold));
                if in_camelot {
                    self.begin_fortnight();
                } else {
                    self.phase = Phase::Eating;
                }
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if !self.castle {
            return Err(GameError::illegal(
                "The castle you thought you could get to turned out to only be a model.",
            ));
        }
        let castle = CASTLES[self.castles_visited % CASTLES.len()];
        self.castles_visited += 1;
        self.messages.say(format!("Welcome to {castle}!"));
        self.mileage = (self.mileage - DETOUR_MILES).max(0);
        let percent = self.rng.gen_range(50..101);
        self.phase = if self.supplies.gold > 0 {
            Phase::Buying { item: Item::Coconuts, percent, in_camelot: false }
        } else {
            self.messages.say("Unfortunately, you have no gold to spend.");
            Phase::Eating
        };
        Ok(())
    }

    fn hunt(&mut self) -> Result<()> {
        if self.supplies.arrows < HUNTING_ARROWS {
            return Err(GameError::illegal("Tough, you need more arrows to go hunting."));
        }
        self.mileage = (self.mileage - DETOUR_MILES).max(0);
        let shot = self.shoot();
        if shot <= 1 {
            self.messages.say("Right between the eyes! You got a big one. Full bellies tonight!");
            self.supplies.spam += 52 + i64::from(self.rng.roll(6));
            self.supplies.arrows -= 10 + i64::from(self.rng.roll(4));
        } else if self.rng.gen_range(0..100) < 13 * shot {
            self.messages.say("You missed, and your dinner got away.");
        } else {
            self.messages.say("Nice shot. Right on target. Good eating tonight!");
            self.supplies.spam += 48 - 2 * shot;
            self.supplies.arrows -= 10 + 3 * shot;
        }
        self.supplies.clamp();
        self.phase = Phase::Eating;
        Ok(())
    }

    fn eat(&mut self, eating: Eating) -> Result<()> {
        if self.supplies.spam < Eating::Poorly.cost() {
            self.die("starvation");
            return Ok(());
        }
        if self.supplies.spam < eating.cost() {
            return Err(GameError::illegal("You can't eat that well."));
        }
        self.supplies.spam -= eating.cost();
        self.eating = eating;
        let speed = 200 + (self.supplies.steeds - 220) / 5 + i64::from(self.rng.roll(10));
        self.mileage += speed.max(0);
        if self.random_event() {
            self.phase = Phase::Bandits;
        } else {
            self.finish_fortnight();
        }
        Ok(())
    }

    /// Wrap up the fortnight after events are resolved.
    pub(super) fn finish_fortnight(&mut self) {
        if self.ending.is_some() {
            return;
        }
        self.mountains();
        self.supplies.coconuts -= 1;
        self.supplies.clamp();
        if self.mileage >= QUEST_MILES {
            self.messages.say(format!(
                "You have found the Castle Aaaaarrrrrrggghhh! Your provisions are worth {} gold.",
                self.supplies.value()
            ));
            tracing::info!(fortnight = self.fortnight, score = self.supplies.value(), "grail quest won");
            self.end(Ending::Arrived);
            return;
        }
        self.fortnight += 1;
        if self.fortnight >= MAX_FORTNIGHTS {
            self.messages.say("You have been on the road so long that winter has set in. Your quest has failed.");
            self.end(Ending::Winter);
            return;
        }
        self.date = self.date.plus_days(14);
        self.castle = !self.castle;
        self.begin_fortnight();
    }

    /// Warnings and the apothecary's bill, then wait for an action.
    fn begin_fortnight(&mut self) {
        self.messages.say(format!("It is {}. You have travelled {} miles.", self.date, self.mileage));
        if self.supplies.spam < 12 {
            self.messages.say("You better do some hunting or buy food soon!");
        }
        if self.supplies.coconuts < 11 {
            self.messages.say("Your steeds have just about beaten those coconuts to death.");
        }
        if self.castle {
            self.messages.say("You can see a castle in the distance.");
        }
        let bill = match (self.illness, self.injury) {
            (true, true) => 40,
            (true, false) | (false, true) => 20,
            (false, false) => 0,
        };
        if bill > 0 {
            if bill > self.supplies.gold {
                self.messages.say("You can't afford the apothecary.");
                let cause = if self.illness { "illness" } else { "their injuries" };
                self.die(cause);
                return;
            }
            self.messages.say(format!("The apothecary's bill is {bill} gold."));
            self.supplies.gold -= bill;
            self.illness = false;
            self.injury = false;
        }
        self.phase = Phase::Action;
    }

    fn parse_eating(word: &str) -> Option<Eating> {
        match word {
            "poorly" | "1" => Some(Eating::Poorly),
            "moderately" | "2" => Some(Eating::Moderately),
            "well" | "3" => Some(Eating::Well),
            _ => None,
        }
    }

    fn parse_tactic(word: &str) -> Option<Tactic> {
        match word {
            "run" | "1" => Some(Tactic::Run),
            "attack" | "2" => Some(Tactic::Attack),
            "continue" | "3" => Some(Tactic::Continue),
            "circle" | "4" => Some(Tactic::Circle),
            _ => None,
        }
    }
}

impl Game for GrailQuest {
    type Move = GrailMove;

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
        format!(
            "Today is {}.\nYou have travelled {} miles.\n{}",
            self.date, self.mileage, self.supplies
        )
    }

    fn prompt(&self, _player: PlayerId) -> String {
        match self.phase {
            Phase::Buying { item, .. } => format!("How much would you like to spend on {}? ", item.name()),
            Phase::Action if self.castle => "Do you want to stop at the castle, hunt, or continue? ".to_string(),
            Phase::Action => "Do you want to hunt or continue? ".to_string(),
            Phase::Eating => "Do you want to eat poorly, moderately, or well? ".to_string(),
            Phase::Bandits => "Tactics: run, attack, continue, or circle? ".to_string(),
            Phase::Over => String::new(),
        }
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<GrailMove> {
        let text = text.trim().to_lowercase();
        let word = text.strip_prefix("eat ").unwrap_or(text.as_str()).trim();
        let mv = match self.phase {
            Phase::Buying { .. } => word.parse().ok().map(GrailMove::Buy),
            Phase::Action => match word {
                "stop" => Some(GrailMove::Stop),
                "hunt" => Some(GrailMove::Hunt),
                "continue" => Some(GrailMove::Continue),
                _ => None,
            },
            Phase::Eating => Self::parse_eating(word).map(GrailMove::Eat),
            Phase::Bandits => Self::parse_tactic(word).map(GrailMove::Tactic),
            Phase::Over => return Err(GameError::GameOver),
        };
        mv.ok_or(GameError::Parse(text))
    }

    fn apply_move(&mut self, player: PlayerId, mv: GrailMove) -> Result<TurnStatus> {
        if self.ending.is_some() {
            return Err(GameError::GameOver);
        }
        if player != PlayerId::new(0) {
            return Err(GameError::NotYourTurn(player));
        }
        let fortnight = self.fortnight;
        match (self.phase, mv) {
            (Phase::Buying { item, percent, in_camelot }, GrailMove::Buy(amount)) => {
                self.buy(item, percent, in_camelot, amount)?;
            }
            (Phase::Action, GrailMove::Stop) => self.stop()?,
            (Phase::Action, GrailMove::Hunt) => self.hunt()?,
            (Phase::Action, GrailMove::Continue) => self.phase = Phase::Eating,
            (Phase::Eating, GrailMove::Eat(eating)) => self.eat(eating)?,
            (Phase::Bandits, GrailMove::Tactic(tactic)) => {
                self.bandits(tactic);
                self.finish_fortnight();
            }
            _ => return Err(GameError::illegal("That is not something you can do right now.")),
        }
        if self.ending.is_some() || self.fortnight != fortnight {
            Ok(TurnStatus::Done)
        } else {
            Ok(TurnStatus::Continue)
        }
    }

    fn legal_moves(&self, _player: PlayerId) -> Vec<GrailMove> {
        match self.phase {
            Phase::Buying { item, in_camelot, .. } => {
                let (low, high) = item.limits(self.supplies.gold, in_camelot);
                let mut moves = vec![GrailMove::Buy(low)];
                if high > low {
                    moves.push(GrailMove::Buy((low + high) / 2));
                }
                moves
            }
            Phase::Action => {
                let mut moves = vec![GrailMove::Continue];
                if self.supplies.arrows >= HUNTING_ARROWS {
                    moves.push(GrailMove::Hunt);
                }
                if self.castle {
                    moves.push(GrailMove::Stop);
                }
                moves
            }
            Phase::Eating => {
                let affordable: Vec<GrailMove> = [Eating::Poorly, Eating::Moderately, Eating::Well]
                    .into_iter()
                    .filter(|e| e.cost() <= self.supplies.spam)
                    .map(GrailMove::Eat)
                    .collect();
                if affordable.is_empty() {
                    vec![GrailMove::Eat(Eating::Poorly)]
                } else {
                    affordable
                }
            }
            Phase::Bandits => [Tactic::Run, Tactic::Attack, Tactic::Continue, Tactic::Circle]
                .into_iter()
                .map(GrailMove::Tactic)
                .collect(),
            Phase::Over => Vec::new(),
        }
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("castle", "stop"), ("s", "stop"), ("h", "hunt"), ("c", "continue")]
    }

    fn help(&self, topic: &str) -> Option<String> {
        let text = match topic {
            "stop" => "stop: buy supplies at a castle in sight. Prices vary, and you lose 45 miles.",
            "hunt" => "hunt: hunt for food with your arrows (you need at least 40). You lose 45 miles.",
            "continue" => "continue: ride on.",
            "eat" => "eat poorly, eat moderately, or eat well. Eating poorly risks illness.",
            _ => return None,
        };
        Some(text.to_string())
    }

    fn game_command(&mut self, _player: PlayerId, verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        if verb != "credits" {
            return None;
        }
        let reply = match CREDITS_ORDER.get(self.credits_shown) {
            Some(text) => {
                self.credits_shown += 1;
                CommandReply::Text(text.trim().to_string())
            }
            None => {
                self.messages.say("Sorry, sir. The movie's over. You'll have to leave.");
                self.end(Ending::Ejected);
                CommandReply::Turn(TurnStatus::Done)
            }
        };
        Some(Ok(reply))
    }

    fn outcome(&self, _player: PlayerId) -> Option<Outcome> {
        match self.ending.as_ref()? {
            Ending::Arrived => Some(Outcome::win(self.score())),
            Ending::Quit => Some(Outcome::forfeit(1, 0)),
            _ => Some(Outcome::loss(0)),
        }
    }

    fn forfeit(&mut self, _player: PlayerId) {
        self.messages.say("Run away! Run away!");
        self.end(Ending::Quit);
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}
