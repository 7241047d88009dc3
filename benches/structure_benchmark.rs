//! Benchmarks for structure inference performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise the structurer with synthetic span sets.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docshape::analyze::{joined_text, structure};
use docshape::model::{BBox, TextSpan};

/// Creates a synthetic document: `pages` pages of `spans_per_page` spans,
/// with a large title span and a heading per page.
fn create_test_spans(pages: u32, spans_per_page: u32) -> Vec<TextSpan> {
    let mut spans = Vec::with_capacity((pages * spans_per_page) as usize);

    spans.push(TextSpan::new(
        "Synthetic Benchmark Document",
        BBox::new(72.0, 40.0, 400.0, 68.0),
        1,
        "Helvetica-Bold",
        28.0,
    ));

    for page in 1..=pages {
        spans.push(TextSpan::new(
            format!("Section {}", page),
            BBox::new(72.0, 80.0, 200.0, 100.0),
            page,
            "Helvetica-Bold",
            18.0,
        ));

        for i in 0..spans_per_page {
            let y0 = 110.0 + i as f64 * 14.0;
            spans.push(TextSpan::new(
                format!("Body line {} on page {} with some filler words.", i, page),
                BBox::new(72.0, y0, 540.0, y0 + 12.0),
                page,
                "Helvetica",
                11.0,
            ));
        }
    }

    spans
}

fn bench_structure(c: &mut Criterion) {
    let small = create_test_spans(5, 40);
    let large = create_test_spans(100, 80);

    c.bench_function("structure_5_pages", |b| {
        b.iter(|| structure(black_box(&small), black_box(&[])));
    });

    c.bench_function("structure_100_pages", |b| {
        b.iter(|| structure(black_box(&large), black_box(&[])));
    });
}

fn bench_joined_text(c: &mut Criterion) {
    let spans = create_test_spans(20, 60);

    c.bench_function("joined_text_20_pages", |b| {
        b.iter(|| joined_text(black_box(&spans)));
    });
}

fn bench_ingest(c: &mut Criterion) {
    use docshape::extract::{ExtractOptions, JsonSource, SpanSource};

    let spans = create_test_spans(20, 60);
    let dump = serde_json::to_vec(&spans).unwrap();
    let source = JsonSource::new();
    let options = ExtractOptions::default();

    c.bench_function("ingest_json_20_pages", |b| {
        b.iter(|| source.extract_bytes(black_box(&dump), &options).unwrap());
    });
}

criterion_group!(benches, bench_structure, bench_joined_text, bench_ingest);
criterion_main!(benches);
