use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use slate_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use slate_chess::game_state::chess_types::Board;
use slate_chess::search::minimax::{search_best_move, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    ("start", STARTING_POSITION_FEN),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).expect("benchmark FEN should parse");
        for depth in 1..=3u8 {
            let config = SearchConfig { depth };
            group.bench_with_input(
                BenchmarkId::new(*name, format!("d{depth}")),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result = search_best_move(black_box(&board), black_box(config))
                            .expect("search should find a move");
                        black_box(result.best_move)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
