use std::hint::black_box;

use arcade_core::minefield::{MineGrid, MinefieldConfig};
use arcade_core::sudoku::{SudokuGrid, generate_puzzle};
use arcade_core::{Difficulty, SeededRandom};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_sudoku(c: &mut Criterion) {
    let mut group = c.benchmark_group("sudoku");

    group.bench_function("complete_grid", |b| {
        let mut rng = SeededRandom::new(1);
        b.iter(|| black_box(SudokuGrid::generate_complete(&mut rng)));
    });

    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::new("puzzle", difficulty),
            &difficulty,
            |b, &difficulty| {
                let mut rng = SeededRandom::new(2);
                b.iter(|| black_box(generate_puzzle(difficulty, &mut rng)));
            },
        );
    }

    group.finish();
}

fn bench_minefield(c: &mut Criterion) {
    let mut group = c.benchmark_group("minefield");

    for difficulty in Difficulty::ALL {
        let config = MinefieldConfig::for_difficulty(difficulty);
        let empty = MineGrid::new(config);
        let center = (config.size.0 / 2, config.size.1 / 2);

        group.bench_with_input(
            BenchmarkId::new("place_mines", difficulty),
            &config,
            |b, config| {
                let mut rng = SeededRandom::new(3);
                b.iter(|| black_box(empty.place_mines(config, center, &mut rng)));
            },
        );

        let mined = empty.place_mines(&config, center, &mut SeededRandom::new(4));
        group.bench_with_input(
            BenchmarkId::new("flood_reveal", difficulty),
            &mined,
            |b, grid| b.iter(|| black_box(grid.reveal(center))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sudoku, bench_minefield);
criterion_main!(benches);
