//! What the knights carry, what they can buy, and the calendar.

use serde::{Deserialize, Serialize};

/// Arrows bought per piece of gold.
pub const ARROWS_PER_GOLD: i64 = 50;

/// The knights' stores. Goods are measured in the gold they were worth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub gold: i64,
    pub steeds: i64,
    pub coconuts: i64,
    pub spam: i64,
    pub arrows: i64,
    pub clothing: i64,
    pub miscellaneous: i64,
}

impl Supplies {
    /// Nothing bought yet.
    #[must_use]
    pub fn starting(gold: i64) -> Self {
        Self { gold, ..Self::default() }
    }

    /// Stores can run out but never go negative.
    pub fn clamp(&mut self) {
        for value in [
            &mut self.steeds,
            &mut self.coconuts,
            &mut self.spam,
            &mut self.arrows,
            &mut self.clothing,
            &mut self.miscellaneous,
        ] {
            *value = (*value).max(0);
        }
    }

    /// Gold plus everything still worth something.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.gold + self.spam + self.clothing + self.miscellaneous + self.coconuts + self.arrows / ARROWS_PER_GOLD
    }
}

impl std::fmt::Display for Supplies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "You have:")?;
        writeln!(f, "{} cans of spam,", self.spam)?;
        writeln!(f, "{} arrows,", self.arrows)?;
        writeln!(f, "{} gold pieces worth of clothing,", self.clothing)?;
        writeln!(f, "{} gold pieces worth of miscellaneous supplies,", self.miscellaneous)?;
        writeln!(f, "{} coconuts, and", self.coconuts)?;
        write!(f, "{} pieces of gold.", self.gold)
    }
}

/// Things for sale, in the order they are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Steeds,
    Coconuts,
    Spam,
    Arrows,
    Clothing,
    Miscellaneous,
}

impl Item {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Item::Steeds => "steeds",
            Item::Coconuts => "coconuts",
            Item::Spam => "spam",
            Item::Arrows => "arrows",
            Item::Clothing => "clothing",
            Item::Miscellaneous => "miscellaneous supplies",
        }
    }

    /// The item offered after this one.
    #[must_use]
    pub fn next(self) -> Option<Item> {
        match self {
            Item::Steeds => Some(Item::Coconuts),
            Item::Coconuts => Some(Item::Spam),
            Item::Spam => Some(Item::Arrows),
            Item::Arrows => Some(Item::Clothing),
            Item::Clothing => Some(Item::Miscellaneous),
            Item::Miscellaneous => None,
        }
    }

    /// Lowest and highest spend allowed with `gold` in hand.
    ///
    /// Steeds and coconuts have fixed ranges when provisioning in Camelot.
    #[must_use]
    pub fn limits(self, gold: i64, in_camelot: bool) -> (i64, i64) {
        match (self, in_camelot) {
            (Item::Steeds, _) => (180, 270.min(gold)),
            (Item::Coconuts, true) => (20, 30.min(gold)),
            _ => (0, gold),
        }
    }

    /// Add what `spent` gold buys at `percent` of fair value.
    pub fn stock(self, supplies: &mut Supplies, spent: i64, percent: i64) {
        let worth = spent * percent / 100;
        match self {
            Item::Steeds => supplies.steeds += worth,
            Item::Coconuts => supplies.coconuts += worth,
            Item::Spam => supplies.spam += worth,
            Item::Arrows => supplies.arrows += worth * ARROWS_PER_GOLD,
            Item::Clothing => supplies.clothing += worth,
            Item::Miscellaneous => supplies.miscellaneous += worth,
        }
    }
}

const MONTHS: [(&str, u8); 12] = [
    ("January", 31),
    ("February", 29),
    ("March", 31),
    ("April", 30),
    ("May", 31),
    ("June", 30),
    ("July", 31),
    ("August", 31),
    ("September", 30),
    ("October", 31),
    ("November", 30),
    ("December", 31),
];

/// A day of the quest. 932 is a leap year, and the quest never sees
/// another February.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestDate {
    pub year: u32,
    /// 1 to 12.
    pub month: u8,
    pub day: u8,
}

impl QuestDate {
    /// The quest sets out on 12 April 932.
    pub const START: QuestDate = QuestDate { year: 932, month: 4, day: 12 };

    #[must_use]
    pub fn plus_days(self, days: u32) -> Self {
        let mut date = self;
        for _ in 0..days {
            let length = MONTHS[usize::from(date.month - 1)].1;
            if date.day < length {
                date.day += 1;
            } else if date.month < 12 {
                date.day = 1;
                date.month += 1;
            } else {
                date = QuestDate { year: date.year + 1, month: 1, day: 1 };
            }
        }
        date
    }
}

impl std::fmt::Display for QuestDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", MONTHS[usize::from(self.month - 1)].0, self.day, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() {
        assert_eq!(QuestDate::START.to_string(), "April 12, 932");
        assert_eq!(QuestDate::START.plus_days(14).to_string(), "April 26, 932");
        assert_eq!(QuestDate::START.plus_days(28).to_string(), "May 10, 932");
        let late = QuestDate { year: 932, month: 12, day: 25 };
        assert_eq!(late.plus_days(14).to_string(), "January 8, 933");
    }

    #[test]
    fn test_limits_and_stock() {
        assert_eq!(Item::Steeds.limits(700, true), (180, 270));
        assert_eq!(Item::Coconuts.limits(25, true), (20, 25));
        assert_eq!(Item::Coconuts.limits(25, false), (0, 25));
        let mut supplies = Supplies::starting(700);
        Item::Arrows.stock(&mut supplies, 10, 100);
        Item::Spam.stock(&mut supplies, 100, 50);
        assert_eq!(supplies.arrows, 500);
        assert_eq!(supplies.spam, 50);
        assert_eq!(supplies.value(), 700 + 50 + 10);
    }

    #[test]
    fn test_clamp() {
        let mut supplies = Supplies { arrows: -30, spam: 4, ..Supplies::default() };
        supplies.clamp();
        assert_eq!(supplies.arrows, 0);
        assert_eq!(supplies.spam, 4);
    }
}
