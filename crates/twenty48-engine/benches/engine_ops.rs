use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;
use twenty48_engine::engine::{Direction, Grid, GridEngine};

fn corpus() -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut grids = Vec::new();
    // Empty and two-tile starts
    grids.push(Grid::EMPTY);
    let mut g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    grids.push(g);
    // Derive a variety of densities deterministically
    for i in 0..40 {
        let (ng, _) = g.shift(Direction::ALL[i % 4]);
        if ng != g {
            g = ng.with_random_tile(&mut rng);
        }
        grids.push(g);
    }
    grids
}

fn bench_shift(c: &mut Criterion) {
    for dir in Direction::ALL {
        let name = format!("shift/{dir:?}").to_lowercase();
        c.bench_function(&name, |bch| {
            let grids = corpus();
            bch.iter(|| {
                let mut acc = 0u64;
                for &g in &grids {
                    acc = acc.wrapping_add(g.shift(dir).1);
                }
                black_box(acc)
            })
        });
    }
}

fn bench_engine_turns(c: &mut Criterion) {
    c.bench_function("engine/spawn_fill", |bch| {
        bch.iter_batched(
            || GridEngine::with_grid(Grid::EMPTY, StdRng::seed_from_u64(7)),
            |mut game| {
                while game.spawn_tile().is_some() {}
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("engine/make_move_cycle", |bch| {
        bch.iter_batched(
            || GridEngine::from_seed(9),
            |mut game| {
                for i in 0..64 {
                    game.make_move(Direction::ALL[i % 4]);
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(engine_ops, bench_shift, bench_engine_turns);
criterion_main!(engine_ops);
