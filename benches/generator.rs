//! Benchmarks for puzzle generation and correctness checks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use verity::generator::candidates;
use verity::rules::is_correct;
use verity::{Action, GameConfig, GenerationMode, Generator, PuzzleSession, Shuffler, Strategy};

/// Benchmark generating starting volumes in both modes.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for mode in [GenerationMode::Pooled, GenerationMode::Paired] {
        let generator = Generator::new(mode, 64);
        let mut shuffler = Shuffler::seeded(1);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| {
                let shapes = shuffler.shapes();
                generator.generate(&mut shuffler, Some(black_box(&shapes)), Strategy::IdealLeft)
            })
        });
    }
    group.finish();
}

/// Benchmark evaluating every strategy against every pooled candidate.
fn bench_is_correct(c: &mut Criterion) {
    let all = candidates(GenerationMode::Pooled, None);
    let shapes = Shuffler::seeded(2).shapes();

    c.bench_function("is_correct_all_candidates", |b| {
        b.iter(|| {
            let mut solved = 0;
            for volumes in &all {
                for strategy in Strategy::ALL {
                    solved += is_correct(black_box(&shapes), volumes, strategy) as usize;
                }
            }
            solved
        })
    });
}

/// Benchmark enumerating the pooled candidate space.
fn bench_candidates(c: &mut Criterion) {
    c.bench_function("pooled_candidates", |b| {
        b.iter(|| candidates(black_box(GenerationMode::Pooled), None))
    });
}

/// Benchmark a full hard reset of a session.
fn bench_hard_reset(c: &mut Criterion) {
    let mut session = match PuzzleSession::new(GameConfig::default().with_seed(3)) {
        Ok(session) => session,
        Err(e) => panic!("failed to start session: {e}"),
    };

    c.bench_function("hard_reset", |b| {
        b.iter(|| session.apply(black_box(Action::ResetAndRandomize)))
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_is_correct,
    bench_candidates,
    bench_hard_reset
);
criterion_main!(benches);
