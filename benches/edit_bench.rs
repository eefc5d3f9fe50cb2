use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slate::{EditFile, PieceTable, Viewport};
use std::time::Duration;

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {} with some sample text to edit", i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn typing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    group.measurement_time(Duration::from_secs(10));

    let text = sample_text(1_000);

    // Each keystroke recomputes the cursor offset from the lines
    group.bench_function("insert_100_chars_mid_document", |b| {
        let viewport = Viewport::new(120, 40, 5);
        b.iter(|| {
            let mut file = EditFile::from_text("bench.txt", &text);
            file.cursor_mut().set_position(500, 10);
            for _ in 0..100 {
                viewport.insert_char(&mut file, 'x').unwrap();
            }
            black_box(file.file_len())
        })
    });

    group.bench_function("backspace_100_chars", |b| {
        let viewport = Viewport::new(120, 40, 5);
        b.iter(|| {
            let mut file = EditFile::from_text("bench.txt", &text);
            file.cursor_mut().set_position(500, 30);
            for _ in 0..100 {
                viewport.backspace(&mut file).unwrap();
            }
            black_box(file.file_len())
        })
    });

    group.finish();
}

fn piece_table_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("piece_table");

    for edits in [10, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("scattered_inserts", edits), edits, |b, &edits| {
            let text = sample_text(1_000);
            b.iter(|| {
                let mut table = PieceTable::from_text(&text);
                for i in 0..edits {
                    table.insert((i * 7919) % table.len(), &['#']);
                }
                black_box(table.piece_count())
            })
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let mut file = EditFile::from_text("bench.txt", &sample_text(10_000));
    file.cursor_mut().set_position(5_000, 0);
    file.cursor_mut().scroll_row = 4_990;

    for height in [10, 20, 40, 80].iter() {
        group.bench_with_input(BenchmarkId::new("visible_lines", height), height, |b, &height| {
            let viewport = Viewport::new(120, height, 5);
            b.iter(|| black_box(viewport.render(&file)))
        });
    }

    group.finish();
}

criterion_group!(benches, typing_benchmark, piece_table_benchmark, render_benchmark);
criterion_main!(benches);
