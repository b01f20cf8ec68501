//! Property tests for conservation rules that every move must keep.

use proptest::prelude::*;

use parlor::cards::{Card, Deck};
use parlor::games::backgammon::{legal_plays, Position, Side, CHECKERS};
use parlor::games::canfield::{CanfieldBuilder, CanfieldVariant};
use parlor::games::klondike::KlondikeBuilder;
use parlor::games::solitaire::{Solitaire, DECK_SIZE};
use parlor::games::sorter::{minimum_swaps, Sorter};
use parlor::{Game, GameRng, PlayerId};

const P0: PlayerId = PlayerId::new(0);

fn conserved(position: &Position) -> bool {
    [Side::O, Side::X]
        .into_iter()
        .all(|side| position.on_board(side) + position.bar(side) + position.off(side) == CHECKERS)
}

fn wander(mut game: Solitaire, choices: &[usize]) -> Solitaire {
    for &choice in choices {
        let moves = game.legal_moves(P0);
        if moves.is_empty() {
            break;
        }
        game.apply_move(P0, moves[choice % moves.len()]).unwrap();
        assert_eq!(game.table().card_count(), DECK_SIZE);
    }
    game
}

proptest! {
    #[test]
    fn test_shuffle_keeps_every_card(seed in any::<u64>()) {
        let mut deck = Deck::new();
        deck.shuffle(&mut GameRng::new(seed));
        let mut cards = deck.cards().to_vec();
        cards.sort();
        let mut fresh: Vec<Card> = Card::all().collect();
        fresh.sort();
        prop_assert_eq!(cards, fresh);
    }

    #[test]
    fn test_klondike_moves_keep_the_deck(deal in 0u64..10_000, choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let game = KlondikeBuilder::new().build(deal).unwrap();
        let game = wander(game, &choices);
        prop_assert_eq!(game.table().card_count(), DECK_SIZE);
        prop_assert!(game.table().sorted() <= DECK_SIZE);
    }

    #[test]
    fn test_canfield_moves_keep_the_deck(deal in 0u64..10_000, variant in 0usize..6, choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let variant = CanfieldVariant::ALL[variant];
        let game = CanfieldBuilder::new().variant(variant).build(deal).unwrap();
        let game = wander(game, &choices);
        prop_assert_eq!(game.table().card_count(), DECK_SIZE);
    }

    #[test]
    fn test_backgammon_plays_keep_fifteen_checkers(
        rolls in prop::collection::vec((1u8..=6, 1u8..=6, any::<usize>()), 1..40),
    ) {
        let mut position = Position::default();
        let mut side = Side::O;
        for (first, second, choice) in rolls {
            let dice = if first == second { vec![first; 4] } else { vec![first, second] };
            let plays = legal_plays(&position, side, &dice);
            for play in &plays {
                prop_assert!(conserved(&play.result));
                prop_assert!(play.steps.len() <= dice.len());
            }
            if let Some(play) = plays.get(choice % plays.len().max(1)) {
                position = play.result;
            }
            if position.off(side) == CHECKERS {
                break;
            }
            side = side.other();
        }
        prop_assert!(conserved(&position));
    }

    #[test]
    fn test_sorter_minimum_is_reachable(seed in any::<u64>(), length in 2usize..12) {
        let mut sequence: Vec<u32> = (0..length as u32).collect();
        GameRng::new(seed).shuffle(&mut sequence);
        let minimum = minimum_swaps(&sequence);
        prop_assert!(minimum < length as u32);
        let mut game = Sorter::with_sequence("Ichabod", &sequence).unwrap();
        while !game.is_over() {
            let mv = game.legal_moves(P0)[0];
            game.apply_move(P0, mv).unwrap();
        }
        prop_assert_eq!(game.turns(), minimum);
    }
}
