use criterion::{black_box, criterion_group, criterion_main, Criterion};

use parlor::games::backgammon::{evaluate, legal_plays, Position, Side, Weights};
use parlor::games::klondike::KlondikeBuilder;
use parlor::{Game, PlayerId};

fn backgammon_benchmark(c: &mut Criterion) {
    let position = Position::default();

    c.bench_function("backgammon plays 6-5", |b| {
        b.iter(|| legal_plays(black_box(&position), Side::O, &[6, 5]))
    });
    c.bench_function("backgammon plays double fours", |b| {
        b.iter(|| legal_plays(black_box(&position), Side::O, &[4, 4, 4, 4]))
    });
    c.bench_function("backgammon evaluation", |b| {
        b.iter(|| evaluate(black_box(&position), Side::O, &Weights::default()))
    });
}

fn solitaire_benchmark(c: &mut Criterion) {
    let game = KlondikeBuilder::new().build(7).unwrap();

    c.bench_function("klondike legal moves", |b| b.iter(|| black_box(&game).legal_moves(PlayerId::new(0))));
    c.bench_function("klondike snapshot", |b| b.iter(|| black_box(game.table()).clone()));
}

criterion_group!(benches, backgammon_benchmark, solitaire_benchmark);
criterion_main!(benches);
