use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use segsweep::{
    generators::{checkerboard, grid, slanted_checkerboard, slanties, star},
    naive, sweep, Segments,
};

fn just_the_sweep(c: &mut Criterion) {
    let segs = checkerboard(10);
    c.bench_function("just the sweep", |b| {
        b.iter(|| black_box(sweep::sweep(&segs)))
    });
}

fn patterns(c: &mut Criterion) {
    let inputs: [(&str, Segments); 4] = [
        ("slanted checkerboard", slanted_checkerboard(10)),
        ("slanties", slanties(50)),
        ("grid", grid(30)),
        ("star", star(64)),
    ];

    let mut group = c.benchmark_group("patterns");
    for (name, segs) in &inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), segs, |b, segs| {
            b.iter(|| black_box(sweep::sweep(segs)))
        });
    }
    group.finish();
}

fn sweep_vs_naive(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep vs naive");
    for n in [4, 8, 16] {
        let segs = slanties(n * 4);
        group.bench_with_input(BenchmarkId::new("sweep", n), &segs, |b, segs| {
            b.iter(|| black_box(sweep::sweep(segs)))
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &segs, |b, segs| {
            b.iter(|| black_box(naive::intersections(segs)))
        });
    }
    group.finish();
}

criterion_group!(benches, just_the_sweep, patterns, sweep_vs_naive);
criterion_main!(benches);
