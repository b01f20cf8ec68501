//! Ninety-Nine bots.

use super::game::{NinetyNine, NinetyNineMove};
use crate::core::{bot_name, GameRng, PlayerId};
use crate::interface::{Agent, Response};

/// Plays whichever card leaves the highest legal total, passing when stuck.
#[derive(Clone, Debug)]
pub struct Bot99 {
    name: String,
}

impl Bot99 {
    pub fn new(taken: &[String], rng: &mut GameRng) -> Self {
        Self { name: bot_name('n', taken, rng) }
    }

    pub fn choose(&self, game: &NinetyNine, me: PlayerId) -> NinetyNineMove {
        game.plays(me)
            .into_iter()
            .max()
            .map_or(NinetyNineMove::Pass, |(total, card)| NinetyNineMove::Play { card, total })
    }
}

impl Agent<NinetyNine> for Bot99 {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &NinetyNine, player: PlayerId) -> Response<NinetyNineMove> {
        Response::Move(self.choose(game, player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ninety_nine::NinetyNineBuilder;
    use crate::rules::Game;

    #[test]
    fn test_bots_play_to_the_end() {
        let mut rng = GameRng::new(4);
        let mut taken = Vec::new();
        let bots: Vec<Bot99> = (0..4)
            .map(|_| {
                let bot = Bot99::new(&taken, &mut rng);
                taken.push(bot.name.clone());
                bot
            })
            .collect();
        let mut game = NinetyNineBuilder::new().players(taken.clone()).build(4).unwrap();
        let mut turns = 0;
        while !game.is_over() {
            let player = game.current_player();
            let mv = bots[player.index()].choose(&game, player);
            game.apply_move(player, mv).unwrap();
            turns += 1;
            assert!(turns < 10_000);
        }
        assert_eq!(game.active_players().len(), 1);
        let winner = game.active_players()[0];
        assert!(game.tokens()[winner] > 0);
    }

    #[test]
    fn test_bot_takes_highest_total() {
        let mut rng = GameRng::new(4);
        let bot = Bot99::new(&[], &mut rng);
        let game = NinetyNineBuilder::new().fixed_seats().build(8).unwrap();
        let me = game.current_player();
        let best = game.plays(me).into_iter().map(|(total, _)| total).max().unwrap();
        match bot.choose(&game, me) {
            NinetyNineMove::Play { total, .. } => assert_eq!(total, best),
            NinetyNineMove::Pass => panic!("a play is always open at zero"),
        }
    }
}
