use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_chess_rules::board::Board;
use rust_chess_rules::castling::CastlingRights;
use rust_chess_rules::game::GameState;
use rust_chess_rules::perft::{perft, perft_parallel};
use rust_chess_rules::types::Color;

const KIWIPETE: [&str; 8] = [
    "bR -- -- -- bK -- -- bR",
    "bp -- bp bp bQ bp bB --",
    "bB bN -- -- bp bN bp --",
    "-- -- -- wp wN -- -- --",
    "-- bp -- -- wp -- -- --",
    "-- -- wN -- -- wQ -- bp",
    "wp wp wp wB wB wp wp wp",
    "wR -- -- -- wK -- -- wR",
];

fn kiwipete() -> GameState {
    let board = Board::from_rows(&KIWIPETE).unwrap();
    GameState::from_board(board, Color::White, CastlingRights::ALL, None).unwrap()
}

pub fn bench_legal_moves_from_start(c: &mut Criterion) {
    let mut game = GameState::new();
    c.bench_function("legal moves from start", |b| {
        b.iter(|| black_box(&mut game).legal_moves())
    });
}

pub fn bench_legal_moves_from_kiwipete(c: &mut Criterion) {
    let mut game = kiwipete();
    c.bench_function("legal moves from kiwipete", |b| {
        b.iter(|| black_box(&mut game).legal_moves())
    });
}

pub fn bench_perft_3(c: &mut Criterion) {
    let mut game = GameState::new();
    c.bench_function("perft from start 3 ply", |b| {
        b.iter(|| perft(black_box(&mut game), black_box(3)))
    });
}

pub fn bench_perft_3_kiwipete(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat-sampling");
    group.sample_size(10);

    let game = kiwipete();
    group.bench_function("parallel perft from kiwipete 3 ply", |b| {
        b.iter(|| perft_parallel(black_box(&game), black_box(3)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves_from_start,
    bench_legal_moves_from_kiwipete,
    bench_perft_3,
    bench_perft_3_kiwipete,
);
criterion_main!(benches);
