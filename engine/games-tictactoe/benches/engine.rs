use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::Game;
use games_tictactoe::{State, TicTacToe};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn bench_legal_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_legal_actions");
    let game = TicTacToe::new();
    let midgame = game.play(&[0, 4, 8, 2]).unwrap();

    group.bench_function("opening", |b| {
        let state = State::new();
        b.iter(|| black_box(game.legal_actions(&state)));
    });
    group.bench_function("midgame", |b| {
        b.iter(|| black_box(game.legal_actions(&midgame)));
    });
    group.finish();
}

fn bench_apply_action(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_apply_action");
    group.bench_function("apply_center", |b| {
        let game = TicTacToe::new();
        b.iter_batched(
            State::new,
            |state| {
                let _ = game.apply_action(&state, 4);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_playout");
    group.bench_function("random_to_terminal", |b| {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter(|| {
            let mut state = State::new();
            while !state.is_terminal() {
                let legal = state.legal_actions();
                let action = legal[rng.gen_range(0..legal.len())];
                state = game.apply_action(&state, action).unwrap().state;
            }
            black_box(state.outcome())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_actions,
    bench_apply_action,
    bench_random_playout
);
criterion_main!(benches);
