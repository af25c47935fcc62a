//! Core benchmarks for tokenization and the tally pipeline.

use std::fs;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

use corpus_index::index::tokens;
use corpus_index::{Chunking, Options, pipeline};

fn sample_text() -> String {
    "The quick (brown) fox, jumps over the LAZY dog! Again and again, quickly. ".repeat(2_000)
}

/// Benchmarks the byte-level tokenizer.
fn bench_tokenize(c: &mut Criterion) {
    let text = sample_text();

    c.bench_function("core/tokenize", |b| {
        b.iter(|| tokens(black_box(text.as_bytes())));
    });
}

/// Benchmarks end-to-end tallying across chunk sizes.
fn bench_tally_pipeline(c: &mut Criterion) {
    let dir = TempDir::new().expect("create bench dir");
    let input = dir.path().join("corpus.txt");
    fs::write(&input, sample_text()).expect("write bench input");

    let mut group = c.benchmark_group("core/tally");
    for chunk_size in [4 * 1024_usize, 64 * 1024] {
        let options = Options::default()
            .with_chunking(Chunking::default().with_chunk_size(chunk_size))
            .with_quiet(true);

        group.bench_function(format!("chunk_{chunk_size}"), |b| {
            b.iter(|| {
                let output = dir.path().join("out.txt");
                pipeline::tally(black_box(&input), &output, &options).expect("bench tally");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_tally_pipeline);
criterion_main!(benches);
