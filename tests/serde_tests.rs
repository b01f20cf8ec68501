//! Moves, positions and results survive a trip through JSON, so games can be
//! logged and replayed.

use parlor::cards::Card;
use parlor::games::backgammon::{BackgammonBuilder, Position, Side};
use parlor::games::grail_quest::{Eating, GrailMove, Supplies};
use parlor::games::klondike::KlondikeOptions;
use parlor::games::pig::PigOptions;
use parlor::games::solitaire::SolitaireMove;
use parlor::games::yacht::{YachtBuilder, YachtOptions};
use parlor::interface::ResultRecord;
use parlor::{Game, GameRng, Outcome, PlayerId};

#[test]
fn test_outcome_json_fields() {
    let outcome = Outcome::win(12);
    let json = serde_json::to_value(outcome).unwrap();
    assert_eq!(json["wins"], 1);
    assert_eq!(json["score"], 12);
    let back: Outcome = serde_json::from_value(json).unwrap();
    assert_eq!(back, outcome);
}

#[test]
fn test_solitaire_move_log() {
    let card = Card::parse("QH").unwrap();
    let target = Card::parse("KS").unwrap();
    let log = vec![SolitaireMove::Turn, SolitaireMove::Build { card, target }, SolitaireMove::Undo];
    let json = serde_json::to_string(&log).unwrap();
    let back: Vec<SolitaireMove> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}

#[test]
fn test_backgammon_position_snapshot() {
    let game = BackgammonBuilder::new().build(8).unwrap();
    let json = serde_json::to_string(game.position()).unwrap();
    let back: Position = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, game.position());
    assert_eq!(back.pips(Side::O), 167);
    assert_eq!(back.pips(Side::X), 167);
}

#[test]
fn test_options_from_config_json() {
    let pig: PigOptions = serde_json::from_str(r#"{"six_bad":true,"even_turns":false,"shuffle":2}"#).unwrap();
    assert!(pig.six_bad);
    assert_eq!(pig.shuffle, 2);
    let klondike: KlondikeOptions = serde_json::from_str(r#"{"turn_one":true,"switch_one":false}"#).unwrap();
    assert!(klondike.turn_one);
}

#[test]
fn test_yacht_variant_saved_as_config() {
    let mut options = YachtOptions::default();
    options.apply("yahtzee").unwrap();
    options.apply("strict-full").unwrap();
    let json = serde_json::to_string(&options).unwrap();
    let back: YachtOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);
    let yacht = YachtBuilder::new().options(back).build(4).unwrap();
    assert_eq!(yacht.categories().len(), 13);
    assert_eq!(yacht.categories()[12].name, "Yahtzee");
}

#[test]
fn test_grail_state_round_trip() {
    let supplies = Supplies { gold: 75, spam: 200, arrows: 1500, ..Supplies::default() };
    let json = serde_json::to_string(&supplies).unwrap();
    assert_eq!(serde_json::from_str::<Supplies>(&json).unwrap(), supplies);
    let mv = GrailMove::Eat(Eating::Well);
    let json = serde_json::to_string(&mv).unwrap();
    assert_eq!(serde_json::from_str::<GrailMove>(&json).unwrap(), mv);
}

#[test]
fn test_rng_state_resumes() {
    let mut rng = GameRng::new(99);
    rng.roll(6);
    let state = serde_json::to_string(&rng.state()).unwrap();
    let mut resumed = GameRng::from_state(&serde_json::from_str(&state).unwrap());
    let expected: Vec<u32> = (0..10).map(|_| rng.roll(6)).collect();
    let actual: Vec<u32> = (0..10).map(|_| resumed.roll(6)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_result_record_json() {
    let record = ResultRecord { game: "Pig".to_string(), outcome: Outcome::loss(40), flags: 3 };
    let json = serde_json::to_string(&record).unwrap();
    let back: ResultRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
    let game = BackgammonBuilder::new().build(1).unwrap();
    assert_eq!(game.player_count(), 2);
    assert!(game.outcome(PlayerId::new(0)).is_none());
}
