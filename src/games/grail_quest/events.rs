//! What happens on the road: random events, bandits, and the mountains.

use super::game::{Eating, GrailQuest, Tactic};

/// Miles where the first mountains begin.
pub const FIRST_MOUNTAINS: i64 = 950;

/// Miles where the second mountains begin.
pub const SECOND_MOUNTAINS: i64 = 1700;

/// Percentile thresholds for each event, checked in order.
const EVENTS: [(i64, Event); 10] = [
    (6, Event::WanderingSteeds),
    (11, Event::CoconutsCrack),
    (13, Event::Storm),
    (15, Event::TauntingFrench),
    (17, Event::BlackKnight),
    (22, Event::KillerRabbit),
    (32, Event::Bandits),
    (35, Event::HelpfulMonks),
    (55, Event::Illness),
    (100, Event::Blizzard),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    WanderingSteeds,
    CoconutsCrack,
    Storm,
    TauntingFrench,
    BlackKnight,
    KillerRabbit,
    Bandits,
    HelpfulMonks,
    Illness,
    Blizzard,
}

impl GrailQuest {
    /// Roll for this fortnight's event. Returns true if bandits attack and a
    /// tactic is needed.
    pub(super) fn random_event(&mut self) -> bool {
        let roll = self.rng.gen_range(1..101);
        let Some(&(_, event)) = EVENTS.iter().find(|(threshold, _)| roll <= *threshold) else {
            return false;
        };
        tracing::debug!(?event, roll, "grail quest event");
        match event {
            Event::WanderingSteeds => {
                self.messages.say("Some of your steeds wander off. You lose time looking for them.");
                self.mileage -= 17;
            }
            Event::CoconutsCrack => {
                self.messages.say("Your coconuts crack. You spend time and supplies fixing them.");
                self.mileage -= 15 + self.rng.gen_range(0..5);
                self.supplies.miscellaneous -= 8;
            }
            Event::Storm => {
                self.messages.say("A heavy storm sweeps across the moors. You lose time and supplies.");
                self.mileage -= 10 + self.rng.gen_range(0..10);
                self.supplies.arrows -= 400;
                self.supplies.miscellaneous -= self.rng.gen_range(0..8) + 3;
            }
            Event::TauntingFrench => {
                self.messages.say("Your mother was a hamster and your father smelt of elderberries!");
                self.messages.say("The French taunt you so badly that you lose a day and some supplies.");
                self.mileage -= 5;
                self.supplies.spam -= 10;
            }
            Event::BlackKnight => {
                self.messages.say("The Black Knight blocks your path. 'None shall pass!'");
                if self.shoot() <= 2 {
                    self.messages.say("You leave him armless and legless. 'All right, we'll call it a draw.'");
                } else {
                    self.messages.say("He's invincible! A knight is wounded before you get past.");
                    self.injury = true;
                    self.mileage -= 20;
                }
            }
            Event::KillerRabbit => {
                self.messages.say("That's no ordinary rabbit! It's the most foul, cruel, and bad-tempered rodent you ever set eyes on.");
                if self.supplies.arrows >= 150 && self.shoot() <= 1 {
                    self.messages.say("Your archers drive it off. Run away!");
                    self.supplies.arrows -= 150;
                } else {
                    self.messages.say("It leaps for a knight's throat. You flee, but he is badly hurt.");
                    self.injury = true;
                    self.supplies.spam -= 20;
                }
            }
            Event::Bandits => {
                self.messages.say("Bandits ahead!");
                self.hostile = self.rng.gen_bool(0.8);
                return true;
            }
            Event::HelpfulMonks => {
                self.messages.say("Some monks are kind enough to share their spam and their chanting.");
                self.supplies.spam += 14;
            }
            Event::Illness => {
                let chance = match self.eating {
                    Eating::Poorly => 0.7,
                    Eating::Moderately => 0.4,
                    Eating::Well => 0.15,
                };
                if self.rng.gen_bool(chance) {
                    self.messages.say("One of your knights has come down with the plague. Bring out your dead!");
                    self.illness = true;
                    self.supplies.miscellaneous -= 5;
                }
            }
            Event::Blizzard => {
                if self.mileage > FIRST_MOUNTAINS && self.rng.gen_bool(0.3) {
                    self.blizzard();
                }
            }
        }
        if self.supplies.spam < 0 {
            self.supplies.spam = 0;
        }
        false
    }

    fn blizzard(&mut self) {
        self.messages.say("A blizzard rolls down from the north. You lose time and supplies.");
        self.mileage -= 30 + self.rng.gen_range(0..10);
        self.supplies.spam -= 8;
        self.supplies.arrows -= 300;
        self.supplies.miscellaneous -= 15;
        if self.supplies.clothing < 18 + self.rng.gen_range(0..3) {
            self.messages.say("Your knights don't have enough clothing to stay warm.");
            self.illness = true;
        }
    }

    /// Deal with the bandits announced by the last event.
    pub(super) fn bandits(&mut self, tactic: Tactic) {
        let shot = self.shoot();
        if !self.hostile {
            match tactic {
                Tactic::Run => {
                    self.mileage += 15;
                    self.supplies.steeds -= 10;
                }
                Tactic::Attack => {
                    self.mileage -= 5;
                    self.supplies.arrows -= 100;
                }
                Tactic::Continue => {}
                Tactic::Circle => self.mileage -= 20,
            }
            self.messages.say("They turn out to be friendly monks on a pilgrimage.");
            return;
        }
        match tactic {
            Tactic::Run => {
                self.mileage += 20;
                self.supplies.miscellaneous -= 15;
                self.supplies.arrows -= 150;
                self.supplies.steeds -= 40;
            }
            Tactic::Attack => self.fight(shot),
            Tactic::Continue => {
                if self.rng.gen_bool(0.2) {
                    self.messages.say("The bandits did not attack.");
                    return;
                }
                self.supplies.arrows -= 150;
                self.supplies.miscellaneous -= 15;
            }
            Tactic::Circle => {
                self.mileage -= 25;
                self.fight(shot);
            }
        }
        if self.supplies.arrows <= 0 {
            self.messages.say("You ran out of arrows and the bandits took your gold.");
            self.supplies.arrows = 0;
            self.supplies.gold /= 3;
        }
        self.supplies.clamp();
        self.messages.say("The bandits have been driven off.");
    }

    fn fight(&mut self, shot: i64) {
        self.supplies.arrows -= shot * 40 + 80;
        match shot {
            0 | 1 => {
                self.messages.say("Nice shooting! You drove them off.");
            }
            2 | 3 => {
                self.messages.say("Kind of slow with your bow there.");
            }
            _ => {
                self.messages.say("Lousy shot! You got knifed. You have to see the apothecary.");
                self.injury = true;
            }
        }
    }

    /// The mountains take their toll past each stretch.
    pub(super) fn mountains(&mut self) {
        if self.ending.is_some() || self.mileage <= FIRST_MOUNTAINS {
            return;
        }
        let past_second = self.mileage > SECOND_MOUNTAINS;
        let rugged = 9.0 - ((self.mileage as f64 / 100.0 - 15.0).powi(2) + 72.0) / ((self.mileage as f64 / 100.0 - 15.0).powi(2) + 12.0);
        if self.rng.gen_f64() * 10.0 <= rugged {
            self.messages.say("Rugged mountains slow you down.");
            self.mileage -= 60;
            self.supplies.miscellaneous -= 5;
        }
        if !self.gorge_cleared {
            self.gorge_cleared = true;
            if self.rng.gen_bool(0.2) {
                self.messages.say("You were forced into the Gorge of Eternal Peril. You lose time.");
                self.mileage -= 40;
            } else {
                self.messages.say("You made it safely past the Gorge of Eternal Peril.");
            }
        }
        if past_second && !self.bridge_cleared {
            self.bridge_cleared = true;
            self.messages.say("Stop! Who would cross the Bridge of Death must answer me these questions three.");
            if self.rng.gen_bool(0.1) {
                self.messages.say("A knight is cast into the Gorge of Eternal Peril. You lose time searching for him.");
                self.injury = true;
                self.mileage -= 30;
            } else {
                self.messages.say("Your knights answer correctly and cross the bridge.");
            }
        }
        self.mileage = self.mileage.max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::grail_quest::{GrailMove, GrailQuestBuilder, Phase};
    use crate::core::PlayerId;
    use crate::rules::Game;

    const P0: PlayerId = PlayerId::new(0);

    fn provisioned(seed: u64) -> GrailQuest {
        let mut quest = GrailQuestBuilder::new().build(seed).unwrap();
        for amount in [220, 25, 200, 30, 100, 50] {
            quest.apply_move(P0, GrailMove::Buy(amount)).unwrap();
        }
        quest
    }

    #[test]
    fn test_events_table_is_ordered() {
        assert!(EVENTS.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert_eq!(EVENTS.last().map(|e| e.0), Some(100));
    }

    #[test]
    fn test_events_never_leave_negative_stores() {
        for seed in 0..50 {
            let mut quest = provisioned(seed);
            quest.random_event();
            assert!(quest.supplies.spam >= 0);
        }
    }

    #[test]
    fn test_hostile_bandits_cost_arrows() {
        let mut quest = provisioned(7);
        quest.hostile = true;
        let arrows = quest.supplies.arrows;
        quest.bandits(Tactic::Run);
        assert_eq!(quest.supplies.arrows, arrows - 150);
        assert_eq!(quest.supplies.steeds, 220 - 40);
    }

    #[test]
    fn test_bandits_take_gold_without_arrows() {
        let mut quest = provisioned(7);
        quest.hostile = true;
        quest.supplies.arrows = 50;
        let gold = quest.supplies.gold;
        quest.bandits(Tactic::Run);
        assert_eq!(quest.supplies.arrows, 0);
        assert_eq!(quest.supplies.gold, gold / 3);
    }

    #[test]
    fn test_mountains_pass_once() {
        let mut quest = provisioned(11);
        quest.mileage = 1800;
        quest.mountains();
        assert!(quest.gorge_cleared);
        assert!(quest.bridge_cleared);
        assert!(quest.mileage >= 1800 - 60 - 40 - 30);
        let mut early = provisioned(11);
        early.mileage = 900;
        early.mountains();
        assert!(!early.gorge_cleared);
        assert_eq!(early.phase(), Phase::Action);
    }

    #[test]
    fn test_bridge_reached_despite_rugged_terrain() {
        for seed in 0..40 {
            let mut quest = provisioned(seed);
            quest.mileage = SECOND_MOUNTAINS + 10;
            quest.mountains();
            assert!(quest.bridge_cleared, "seed {seed} skipped the bridge");
        }
        let mut short = provisioned(3);
        short.mileage = SECOND_MOUNTAINS;
        short.mountains();
        assert!(!short.bridge_cleared);
    }
}
