use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_engine::core::{Board, Engine, PieceCatalog};
use tetris_engine::types::Action;

fn bench_step_down(c: &mut Criterion) {
    let mut engine = Engine::new(10, 20, PieceCatalog::classic(), 12345).unwrap();

    c.bench_function("step_down", |b| {
        b.iter(|| {
            if engine.step(black_box(Action::Down)).game_over {
                engine.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..10 {
                    board.set_cell(row, col, 7).unwrap();
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = Engine::new(10, 20, PieceCatalog::classic(), 12345).unwrap();
    engine.move_down();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            black_box(engine.move_left());
            black_box(engine.move_right());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(10, 20, PieceCatalog::classic(), 12345).unwrap();
    for _ in 0..5 {
        engine.move_down();
    }

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(engine.rotate());
        })
    });
}

fn bench_score(c: &mut Criterion) {
    let mut engine = Engine::new(10, 20, PieceCatalog::classic(), 12345).unwrap();
    for _ in 0..120 {
        if engine.step(Action::Down).game_over {
            break;
        }
    }

    c.bench_function("gaps_in_lines", |b| {
        b.iter(|| black_box(engine.gaps_in_lines()))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let engine = Engine::new(10, 20, PieceCatalog::classic(), 12345).unwrap();
    let mut snap = tetris_engine::core::GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_step_down,
    bench_line_clear,
    bench_move,
    bench_rotate,
    bench_score,
    bench_snapshot
);
criterion_main!(benches);
