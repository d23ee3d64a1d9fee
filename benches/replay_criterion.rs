use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use san_chess::game_state::game::Game;

/// Italian game into a quiet middlegame; both sides castle and several moves
/// need origin disambiguation.
const GAME_TEXT: &str = "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. c3 Nf6 5. d4 exd4 6. cxd4 Bb4+ \
    7. Bd2 Bxd2+ 8. Nbxd2 d5 9. exd5 Nxd5 10. Qb3 Nce7 11. O-O O-O 12. Rfe1 c6 \
    13. a4 a5 14. h3 h6 15. Ne4 b6 16. Nc3 Be6 17. Nxd5 Nxd5 18. Bxd5 Bxd5";

fn bench_replay(c: &mut Criterion) {
    c.bench_function("replay_italian_game", |b| {
        b.iter(|| {
            let mut game = Game::new();
            let played = game
                .try_play_move_sequence(black_box(GAME_TEXT))
                .expect("benchmark game should replay");
            black_box(played)
        })
    });
}

fn bench_status(c: &mut Criterion) {
    let mut game = Game::new();
    game.try_play_move_sequence(GAME_TEXT)
        .expect("benchmark game should replay");
    let board = *game.board();

    c.bench_function("has_valid_moves_middlegame", |b| {
        b.iter(|| black_box(board).has_valid_moves(black_box(game.turn())))
    });
    c.bench_function("is_draw_middlegame", |b| b.iter(|| black_box(&game).is_draw()));
}

criterion_group!(benches, bench_replay, bench_status);
criterion_main!(benches);
