//! Benchmarks for MCTS decisions and the rule primitives they lean on.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jass_engine::mcts::Perspective;
use jass_engine::{CardSet, GameRng, MctsConfig, MctsSearch, PlayerId, Score, Suit, TurnState};

fn opening() -> (TurnState, CardSet) {
    let state = TurnState::initial(Suit::Heart, Score::INITIAL, PlayerId::PLAYER_1);
    let hand = CardSet::ALL_CARDS.iter().step_by(4).collect();
    (state, hand)
}

/// One opening decision at several iteration counts.
fn benchmark_decision(c: &mut Criterion) {
    let (state, hand) = opening();
    let view = Perspective::new(PlayerId::PLAYER_1, hand);

    let mut group = c.benchmark_group("Decision");
    group.sample_size(10);
    for iterations in [1_000u32, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("opening", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::default()
                    .with_iterations(iterations)
                    .with_seed(1);
                let mut search = MctsSearch::new(config).unwrap();
                b.iter(|| black_box(search.search(black_box(&state), &view).unwrap()));
            },
        );
    }
    group.finish();
}

/// A full random turn, the unit of work of one simulation.
fn benchmark_random_turn(c: &mut Criterion) {
    let (state, _) = opening();
    let mut rng = GameRng::new(7);

    c.bench_function("random_turn", |b| {
        b.iter(|| {
            let mut state = state;
            while !state.is_terminal() {
                let playable = state.trick().playable_cards(state.unplayed_cards());
                let card = playable.get(rng.gen_index(playable.len())).unwrap();
                state = state.play_card_and_collect(card).unwrap();
            }
            black_box(state.score())
        });
    });
}

criterion_group!(benches, benchmark_decision, benchmark_random_turn);
criterion_main!(benches);
