//! Trace loading and figure composition benchmark
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench trace_parse
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gpu_timeline::plot::Figure;
use gpu_timeline::trace::TraceTable;

/// Benchmark-shaped trace with `per_lane` rows per lane and group
fn bench_trace(per_lane: i64) -> String {
    let mut text =
        String::from("# run device event [0=kernel,1=read] queued submitted start end\n");
    for (mode, gpu) in [(0, 0), (1, 0), (1, 1)] {
        for lane in 0..2 {
            for i in 0..per_lane {
                let t = 1_503_221_000_000 + i * 40_000 + lane * 31_000;
                text.push_str(&format!(
                    "{mode} {gpu} {lane} {} {} {} {}\n",
                    t,
                    t + 900,
                    t + 4_000,
                    t + 30_000
                ));
            }
        }
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_parse");

    for per_lane in [5, 30, 1_000] {
        let text = bench_trace(per_lane);
        group.bench_with_input(BenchmarkId::from_parameter(per_lane), &text, |b, text| {
            b.iter(|| TraceTable::parse(black_box(text)));
        });
    }

    group.finish();
}

fn bench_figure(c: &mut Criterion) {
    let table = TraceTable::parse(&bench_trace(30)).expect("valid trace");

    c.bench_function("figure_from_table", |b| {
        b.iter(|| Figure::from_table(black_box(&table)));
    });
}

criterion_group!(benches, bench_parse, bench_figure);
criterion_main!(benches);
