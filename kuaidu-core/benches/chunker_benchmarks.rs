//! Performance benchmarks for the chunker
//!
//! Run with: cargo bench --bench chunker_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kuaidu_core::{ChunkingOptions, Chunker};
use std::hint::black_box;

/// Generate test text of roughly `size` bytes
fn generate_text(size: usize) -> String {
    let base = "今天天气很好，我们在公园里散步了三个小时。明天也不错！\n";
    let repeat_count = size / base.len() + 1;
    base.repeat(repeat_count)
}

/// Benchmark different text sizes
fn bench_text_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_sizes");
    let chunker = Chunker::new(ChunkingOptions::default());

    for size in [1024, 10_240, 102_400] {
        let text = generate_text(size);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("chunk", size), &text, |b, text| {
            b.iter(|| chunker.chunk_text(black_box(text)));
        });
    }

    group.finish();
}

/// Benchmark target sizes with stopword elision on
fn bench_target_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("target_sizes");
    let text = generate_text(10_240);

    for target in [2, 4, 8] {
        let chunker = Chunker::new(ChunkingOptions {
            target_size: target,
            skip_stopwords: true,
            ..Default::default()
        });

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("target", target), &text, |b, text| {
            b.iter(|| chunker.chunk_text(black_box(text)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_text_sizes, bench_target_sizes);
criterion_main!(benches);
