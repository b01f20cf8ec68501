//! The shared solitaire game.
//!
//! Klondike, Canfield and their variants are all a `Solitaire` configured
//! with different `SolitaireRules`. Every move is tried on a copy of the
//! table and only committed if it succeeds, so a failed move never leaves a
//! half-moved stack behind.

use serde::{Deserialize, Serialize};

use super::checkers::{BuildRule, LaneRule, Mover, PairRule, SortRule};
use super::dealers::Dealer;
use super::table::{Location, Placed, Table};
use crate::cards::{Card, Deck};
use crate::core::{GameError, GameInfo, GameRng, Outcome, PlayerId, Result};
use crate::rules::{CommandReply, Game, MessageLog, TurnStatus};

/// Cards in a full deal.
pub const DECK_SIZE: usize = 52;

/// A solitaire move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolitaireMove {
    /// Turn cards from the stock to the waste, or recycle the waste.
    Turn,
    /// Move a card to its foundation.
    Sort(Card),
    /// Move a card, and any cards on it, onto a tableau card.
    Build { card: Card, target: Card },
    /// Move a card, and any cards on it, to an empty tableau pile.
    Lane(Card),
    /// Move a card to an empty free cell.
    Free(Card),
    /// Pick the foundation starter from a selective deal.
    Choose(Card),
    /// Sort everything that can be sorted.
    Auto,
    /// Take back the last move.
    Undo,
    /// Switch to turning one card for a last pass.
    Switch,
}

/// Everything that distinguishes one solitaire game from another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolitaireRules {
    pub build: Vec<BuildRule>,
    pub pair: Vec<PairRule>,
    pub lane: Vec<LaneRule>,
    pub sort: Vec<SortRule>,
    pub dealers: Vec<Dealer>,
    pub tableau: usize,
    pub reserve: usize,
    pub cells: usize,
    pub turn_count: usize,
    /// Passes through the stock, `None` for unlimited.
    pub max_passes: Option<u32>,
    /// Ranks wrap from king to ace.
    pub wrap_ranks: bool,
    /// The `switch` command is available.
    pub switch_one: bool,
}

impl Default for SolitaireRules {
    fn default() -> Self {
        Self {
            build: Vec::new(),
            pair: vec![PairRule::Down, PairRule::AltColor],
            lane: Vec::new(),
            sort: vec![SortRule::Ace, SortRule::Up],
            dealers: vec![Dealer::Klondike, Dealer::StockAll],
            tableau: 7,
            reserve: 0,
            cells: 0,
            turn_count: 3,
            max_passes: None,
            wrap_ranks: false,
            switch_one: false,
        }
    }
}

/// A solitaire deal in progress.
#[derive(Debug)]
pub struct Solitaire {
    info: &'static GameInfo,
    name: String,
    rules: SolitaireRules,
    table: Table,
    history: Vec<Table>,
    deal_number: u64,
    moves: u32,
    quit: bool,
    messages: MessageLog,
}

impl Solitaire {
    /// Shuffle with `deal_number` as the seed and lay out the cards.
    pub fn new(
        info: &'static GameInfo,
        name: impl Into<String>,
        rules: SolitaireRules,
        deal_number: u64,
    ) -> Result<Self> {
        if rules.tableau == 0 || rules.turn_count == 0 {
            return Err(GameError::InvalidOption("solitaire needs tableau piles and a turn count".to_string()));
        }
        let mut rng = GameRng::new(deal_number);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        let mut table = Table::new(rules.tableau, rules.reserve, rules.cells);
        table.turn_count = rules.turn_count;
        table.max_passes = rules.max_passes;
        table.switched = !rules.switch_one;
        for dealer in &rules.dealers {
            dealer.deal(&mut table, &mut deck)?;
        }
        tracing::debug!(game = info.name, deal_number, "solitaire dealt");
        Ok(Self {
            info,
            name: name.into(),
            rules,
            table,
            history: Vec::new(),
            deal_number,
            moves: 0,
            quit: false,
            messages: MessageLog::new(),
        })
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn rules(&self) -> &SolitaireRules {
        &self.rules
    }

    #[must_use]
    pub fn deal_number(&self) -> u64 {
        self.deal_number
    }

    /// Moves made, not counting undos.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Cards sorted to the foundations.
    #[must_use]
    pub fn score(&self) -> usize {
        self.table.sorted()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.table.sorted() == DECK_SIZE
    }

    #[cfg(test)]
    pub(crate) fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Check a move without making it.
    pub fn check(&self, mv: SolitaireMove) -> Result<()> {
        self.perform(&mut self.table.clone(), mv).map(|_| ())
    }

    /// The card and everything on it, if it may be picked up at all.
    fn mover(&self, table: &Table, card: Card) -> Result<Mover> {
        let (from, index) = table
            .find(card)
            .ok_or_else(|| GameError::illegal(format!("The {card} is not on the table.")))?;
        let pile = table.pile(from).map_or(0, |p| p.len());
        let count = pile - index;
        match from {
            Location::Stock => return Err(GameError::illegal(format!("The {card} is in the stock."))),
            Location::Foundation(_) => {
                return Err(GameError::illegal(format!("The {card} is already sorted.")));
            }
            Location::Tableau(_) => {}
            _ if count > 1 => return Err(GameError::illegal(format!("The {card} is not available."))),
            _ => {}
        }
        let up = table.pile(from).and_then(|p| p.get(index)).is_some_and(|p| p.up);
        if !up {
            return Err(GameError::illegal(format!("The {card} is not face up.")));
        }
        Ok(Mover { card, from, index, count })
    }

    fn check_sort(&self, table: &Table, card: Card) -> Result<Mover> {
        let mover = self.mover(table, card)?;
        if mover.count > 1 {
            return Err(GameError::illegal(format!("The {card} is not on top of its pile.")));
        }
        let top = table.top(Location::foundation_for(card.suit()));
        for rule in &self.rules.sort {
            rule.check(table, card, top, self.rules.wrap_ranks)?;
        }
        Ok(mover)
    }

    fn turn(&self, table: &mut Table) -> Result<Option<String>> {
        if table.stock.is_empty() {
            if table.waste.is_empty() {
                return Err(GameError::illegal("There are no cards left to turn."));
            }
            if table.max_passes.is_some_and(|max| table.passes >= max) {
                return Err(GameError::illegal("You have no more passes through the stock."));
            }
            let waste = std::mem::take(&mut table.waste);
            table.stock.extend(waste.into_iter().rev().map(|p| Placed::down(p.card)));
            table.passes += 1;
            return Ok(Some("The waste has been turned over to make a new stock.".to_string()));
        }
        for _ in 0..table.turn_count {
            match table.stock.pop_back() {
                Some(placed) => table.waste.push_back(Placed::up(placed.card)),
                None => break,
            }
        }
        Ok(None)
    }

    fn sort(&self, table: &mut Table, card: Card) -> Result<()> {
        let mover = self.check_sort(table, card)?;
        table.move_stack(mover.from, mover.index, Location::foundation_for(card.suit()));
        Ok(())
    }

    fn build(&self, table: &mut Table, card: Card, target: Card) -> Result<()> {
        let mover = self.mover(table, card)?;
        let to = match table.find(target) {
            Some((location @ Location::Tableau(_), _)) if table.top(location) == Some(target) => location,
            _ => return Err(GameError::illegal(format!("The {target} is not on top of a tableau pile."))),
        };
        if to == mover.from {
            return Err(GameError::illegal("You cannot build a card onto its own pile."));
        }
        for rule in &self.rules.build {
            rule.check(table, &mover)?;
        }
        for rule in &self.rules.pair {
            rule.check(card, target, self.rules.wrap_ranks)?;
        }
        table.move_stack(mover.from, mover.index, to);
        Ok(())
    }

    fn lane(&self, table: &mut Table, card: Card) -> Result<()> {
        let mover = self.mover(table, card)?;
        let to = table
            .empty_lane()
            .ok_or_else(|| GameError::illegal("There are no empty lanes."))?;
        if matches!(mover.from, Location::Tableau(_)) && mover.index == 0 {
            return Err(GameError::illegal(format!("The {card} is already at the bottom of a lane.")));
        }
        for rule in &self.rules.lane {
            rule.check(table, &mover)?;
        }
        table.move_stack(mover.from, mover.index, to);
        Ok(())
    }

    fn free(&self, table: &mut Table, card: Card) -> Result<()> {
        let mover = self.mover(table, card)?;
        if mover.count > 1 {
            return Err(GameError::illegal(format!("The {card} is not on top of its pile.")));
        }
        let cell = table
            .cells
            .iter()
            .position(|pile| pile.is_empty())
            .ok_or_else(|| GameError::illegal("There are no empty free cells."))?;
        table.move_stack(mover.from, mover.index, Location::Cell(cell));
        Ok(())
    }

    fn choose(&self, table: &mut Table, card: Card) -> Result<()> {
        let index = table
            .selection
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| GameError::illegal(format!("The {card} is not one of the cards to choose from.")))?;
        let mut rest = std::mem::take(&mut table.selection);
        rest.remove(index);
        table.base_rank = Some(card.rank());
        table.deal_to(Location::foundation_for(card.suit()), card, true);
        for (pile, other) in rest.into_iter().enumerate() {
            let location = Location::Tableau(pile % table.tableau.len());
            table.deal_to(location, other, true);
        }
        Ok(())
    }

    fn auto(&self, table: &mut Table) -> Result<usize> {
        let mut sorted = 0;
        loop {
            let candidate = table
                .locations()
                .into_iter()
                .filter(|l| !matches!(l, Location::Stock | Location::Foundation(_)))
                .filter_map(|l| table.top(l))
                .find(|&card| self.check_sort(table, card).is_ok());
            match candidate {
                Some(card) => {
                    self.sort(table, card)?;
                    sorted += 1;
                }
                None => break,
            }
        }
        if sorted == 0 {
            return Err(GameError::illegal("There are no cards that can be sorted."));
        }
        Ok(sorted)
    }

    fn switch(&self, table: &mut Table) -> Result<()> {
        if table.switched {
            return Err(GameError::illegal("You may not switch to one card at a time."));
        }
        table.switched = true;
        table.turn_count = 1;
        // The waste goes back on top of the stock in its original order.
        let waste = std::mem::take(&mut table.waste);
        table.stock.extend(waste.into_iter().rev().map(|p| Placed::down(p.card)));
        table.passes += 1;
        table.max_passes = Some(table.passes);
        Ok(())
    }

    /// Apply a move to `table`, returning a message for the player.
    fn perform(&self, table: &mut Table, mv: SolitaireMove) -> Result<Option<String>> {
        if !table.selection.is_empty() && !matches!(mv, SolitaireMove::Choose(_)) {
            return Err(GameError::illegal("You must choose a foundation card first."));
        }
        match mv {
            SolitaireMove::Turn => return self.turn(table),
            SolitaireMove::Sort(card) => self.sort(table, card)?,
            SolitaireMove::Build { card, target } => self.build(table, card, target)?,
            SolitaireMove::Lane(card) => self.lane(table, card)?,
            SolitaireMove::Free(card) => self.free(table, card)?,
            SolitaireMove::Choose(card) => self.choose(table, card)?,
            SolitaireMove::Auto => {
                let sorted = self.auto(table)?;
                return Ok(Some(format!("{sorted} cards were sorted.")));
            }
            SolitaireMove::Switch => self.switch(table)?,
            SolitaireMove::Undo => return Err(GameError::illegal("Undo cannot be replayed.")),
        }
        Ok(None)
    }

    /// Every move other than undo that would succeed now.
    fn candidates(&self) -> Vec<SolitaireMove> {
        let table = &self.table;
        if !table.selection.is_empty() {
            return table.selection.iter().map(|&c| SolitaireMove::Choose(c)).collect();
        }
        let face_up: Vec<Card> = table
            .locations()
            .into_iter()
            .filter(|l| !matches!(l, Location::Stock | Location::Foundation(_)))
            .filter_map(|l| table.pile(l))
            .flat_map(|pile| pile.iter().filter(|p| p.up).map(|p| p.card).collect::<Vec<_>>())
            .collect();
        let targets: Vec<Card> = (0..table.tableau.len())
            .filter_map(|i| table.top(Location::Tableau(i)))
            .collect();

        let mut moves = vec![SolitaireMove::Turn, SolitaireMove::Switch];
        for &card in &face_up {
            moves.push(SolitaireMove::Sort(card));
            moves.push(SolitaireMove::Lane(card));
            moves.push(SolitaireMove::Free(card));
            moves.extend(targets.iter().map(|&target| SolitaireMove::Build { card, target }));
        }
        moves
    }
}

impl Game for Solitaire {
    type Move = SolitaireMove;

    fn info(&self) -> &'static GameInfo {
        self.info
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
        let mut text = self.table.to_string();
        if !self.table.selection.is_empty() {
            let cards: Vec<String> = self.table.selection.iter().map(ToString::to_string).collect();
            text.push_str(&format!("\nChoose a foundation card from: {}", cards.join(" ")));
        }
        text
    }

    fn prompt(&self, _player: PlayerId) -> String {
        "What is your move? ".to_string()
    }

    fn parse_move(&self, _player: PlayerId, text: &str) -> Result<SolitaireMove> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let Some((verb, args)) = words.split_first() else {
            return Err(GameError::Parse(text.to_string()));
        };
        let cards: Vec<Card> = args.iter().map(|w| Card::parse(w)).collect::<Result<_>>()?;
        let mv = match (verb.to_lowercase().as_str(), cards.as_slice()) {
            ("turn", []) => SolitaireMove::Turn,
            ("auto", []) => SolitaireMove::Auto,
            ("undo", []) => SolitaireMove::Undo,
            ("switch", []) => SolitaireMove::Switch,
            ("sort", [card]) => SolitaireMove::Sort(*card),
            ("lane", [card]) => SolitaireMove::Lane(*card),
            ("free", [card]) => SolitaireMove::Free(*card),
            ("choose", [card]) => SolitaireMove::Choose(*card),
            ("build", [card, target]) => SolitaireMove::Build { card: *card, target: *target },
            _ => return Err(GameError::Parse(text.trim().to_string())),
        };
        Ok(mv)
    }

    fn apply_move(&mut self, player: PlayerId, mv: SolitaireMove) -> Result<TurnStatus> {
        if self.quit || self.is_won() {
            return Err(GameError::GameOver);
        }
        if player != PlayerId::new(0) {
            return Err(GameError::NotYourTurn(player));
        }
        if mv == SolitaireMove::Undo {
            self.table = self
                .history
                .pop()
                .ok_or_else(|| GameError::illegal("There are no moves to undo."))?;
            return Ok(TurnStatus::Done);
        }
        let mut next = self.table.clone();
        let message = self.perform(&mut next, mv)?;
        self.history.push(std::mem::replace(&mut self.table, next));
        self.moves += 1;
        if let Some(message) = message {
            self.messages.say(message);
        }
        if self.is_won() {
            self.messages.say(format!("You won in {} moves!", self.moves));
            tracing::info!(game = self.info.name, deal = self.deal_number, moves = self.moves, "solitaire won");
        }
        Ok(TurnStatus::Done)
    }

    fn legal_moves(&self, _player: PlayerId) -> Vec<SolitaireMove> {
        self.candidates()
            .into_iter()
            .filter(|&mv| self.check(mv).is_ok())
            .collect()
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("a", "auto"),
            ("b", "build"),
            ("c", "choose"),
            ("f", "free"),
            ("l", "lane"),
            ("s", "sort"),
            ("t", "turn"),
            ("u", "undo"),
        ]
    }

    fn help(&self, topic: &str) -> Option<String> {
        let text = match topic {
            "build" => "build <card> <target>: move a card and any cards on it onto a tableau card.",
            "lane" => "lane <card>: move a card and any cards on it to an empty tableau pile.",
            "sort" => "sort <card>: move a card to its foundation.",
            "turn" => "turn: turn cards from the stock to the waste.",
            "auto" => "auto: sort every card that can be sorted.",
            "undo" => "undo: take back the last move.",
            "score" => "score: show how many cards have been sorted.",
            _ => return None,
        };
        Some(text.to_string())
    }

    fn game_command(&mut self, _player: PlayerId, verb: &str, _args: &str) -> Option<Result<CommandReply>> {
        (verb == "score").then(|| {
            Ok(CommandReply::Text(format!(
                "You have sorted {} of {} cards.",
                self.score(),
                DECK_SIZE
            )))
        })
    }

    fn outcome(&self, _player: PlayerId) -> Option<Outcome> {
        let score = self.score() as i64;
        if self.is_won() {
            Some(Outcome::win(score))
        } else if self.quit {
            Some(Outcome::loss(score))
        } else {
            None
        }
    }

    fn forfeit(&mut self, _player: PlayerId) {
        self.quit = true;
    }

    fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }
}
