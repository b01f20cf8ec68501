//! Legal move generation.
//!
//! A play is every step a side makes with one roll. The generator walks all
//! orders of the dice depth first, keeps only plays that use as many dice
//! as possible (and the larger die when only one can be used), then drops
//! plays that end in a position another play already reaches.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::board::{Position, Side, Step};

/// Steps of one play; doubles use four.
pub type Steps = SmallVec<[Step; 4]>;

/// Dice still to be used.
pub type Dice = SmallVec<[u8; 4]>;

/// A complete play and the position it leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Play {
    pub steps: Steps,
    pub result: Position,
}

/// The dice to use for a roll: doubles are played four times.
#[must_use]
pub fn dice_for_roll(first: u8, second: u8) -> Dice {
    if first == second {
        SmallVec::from_elem(first, 4)
    } else {
        SmallVec::from_slice(&[first, second])
    }
}

/// Every distinct order the dice can be used in.
fn orders(dice: &[u8]) -> SmallVec<[Dice; 2]> {
    let mut orders: SmallVec<[Dice; 2]> = SmallVec::new();
    orders.push(dice.iter().copied().collect());
    if dice.len() == 2 && dice[0] != dice[1] {
        orders.push(dice.iter().rev().copied().collect());
    }
    orders
}

fn search(position: &Position, side: Side, dice: &[u8], steps: &mut Steps, found: &mut Vec<Play>) {
    let Some((&die, rest)) = dice.split_first() else {
        found.push(Play { steps: steps.clone(), result: *position });
        return;
    };
    let mut moved = false;
    for from in position.sources(side) {
        if let Some((next, step)) = position.step(side, from, die) {
            moved = true;
            steps.push(step);
            search(&next, side, rest, steps, found);
            steps.pop();
        }
    }
    if !moved {
        found.push(Play { steps: steps.clone(), result: *position });
    }
}

/// Every maximal sequence of steps, before the dice rules are applied.
#[must_use]
pub fn sequences(position: &Position, side: Side, dice: &[u8]) -> Vec<Play> {
    let mut found = Vec::new();
    for order in orders(dice) {
        search(position, side, &order, &mut Steps::new(), &mut found);
    }
    found
}

/// The legal plays for `side` with `dice`, one per resulting position.
///
/// Empty when no checker can move.
#[must_use]
pub fn legal_plays(position: &Position, side: Side, dice: &[u8]) -> Vec<Play> {
    let mut found = sequences(position, side, dice);
    let most = found.iter().map(|play| play.steps.len()).max().unwrap_or(0);
    if most == 0 {
        return Vec::new();
    }
    found.retain(|play| play.steps.len() == most);

    if most == 1 && dice.len() == 2 && dice[0] != dice[1] {
        let high = dice[0].max(dice[1]);
        if found.iter().any(|play| play.steps[0].die == high) {
            found.retain(|play| play.steps[0].die == high);
        }
    }

    let mut seen = FxHashSet::default();
    found.retain(|play| seen.insert(play.result));
    found
}
