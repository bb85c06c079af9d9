//! Move-generation benchmarks.
//!
//! The generator is the hot path under bulk self-play; these track the
//! opening roll, the worst-case double, and a full move cycle.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gammon_core::{legal_sequences, Board, Dice, DiceRng, GameState, GameVariant, Player};

fn bench_opening_roll(c: &mut Criterion) {
    let board = Board::standard();

    c.bench_function("legal_sequences_opening_6_5", |b| {
        b.iter(|| black_box(legal_sequences(&board, Player::White, &[6, 5])))
    });
}

fn bench_double_from_start(c: &mut Criterion) {
    let board = Board::standard();

    c.bench_function("legal_sequences_double_3", |b| {
        b.iter(|| black_box(legal_sequences(&board, Player::White, &[3, 3, 3, 3])))
    });
}

fn bench_full_move_cycle(c: &mut Criterion) {
    c.bench_function("full_move_cycle", |b| {
        b.iter(|| {
            let mut rng = DiceRng::new(42);
            let state = GameState::from_position(
                GameVariant::Standard,
                None,
                Board::standard(),
                Player::White,
                Dice::new(6, 5).unwrap(),
            )
            .unwrap();
            let sequence = state.legal_moves().into_iter().next().unwrap();
            black_box(state.make_move(&sequence, &mut rng).unwrap())
        })
    });
}

fn bench_board_clone(c: &mut Criterion) {
    let board = Board::standard();

    c.bench_function("board_copy", |b| b.iter(|| black_box(board)));
}

criterion_group!(
    benches,
    bench_opening_roll,
    bench_double_from_start,
    bench_full_move_cycle,
    bench_board_clone
);
criterion_main!(benches);
