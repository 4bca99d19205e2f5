use std::thread::available_parallelism;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use challenger_engine::fen::Fen;
use challenger_engine::perft::*;
use challenger_engine::*;

pub fn criterion_perft_small_benchmark(c: &mut Criterion) {
    // Setup
    let starting_position = Position::start_position();
    let num_threads = available_parallelism()
        .map(|inner| inner.get())
        .unwrap_or(1);

    // Benchmarks

    for (ply, nodes) in [(1, 20), (2, 400), (3, 8_902)] {
        c.bench_function(&format!("start_position: perft({ply}) threads: 1"), |b| {
            b.iter(|| {
                let info = perft(black_box(&starting_position), black_box(ply), black_box(1));
                assert_eq!(info.nodes, nodes);
            })
        });
    }

    c.bench_function(
        &format!("start_position: perft(3) threads: {num_threads}"),
        |b| {
            b.iter(|| {
                let info = perft(
                    black_box(&starting_position),
                    black_box(3),
                    black_box(num_threads),
                );
                assert_eq!(info.nodes, 8_902);
            })
        },
    );
}

pub fn criterion_perft_kiwipete_benchmark(c: &mut Criterion) {
    let kiwipete = Position::parse_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();

    c.bench_function("kiwipete: perft(3) threads: 1", |b| {
        b.iter(|| {
            let info = perft(black_box(&kiwipete), black_box(3), black_box(1));
            assert_eq!(info.nodes, 97_862);
        })
    });
}

criterion_group!(
    benches,
    criterion_perft_small_benchmark,
    criterion_perft_kiwipete_benchmark
);
criterion_main!(benches);
