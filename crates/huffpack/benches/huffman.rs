//! Huffman codec benchmarks.
//!
//! Benchmarks cover:
//! - Frequency counting
//! - Tree build and code table generation
//! - Full compress / decompress on text-like and random buffers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffpack::code::CodeTable;
use huffpack::frequency::FrequencyTable;
use huffpack::tree::HuffmanTree;
use huffpack::{compress_with, decompress, HuffmanConfig, LeafPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1024, 64 * 1024, 1024 * 1024];

fn generate_text(size: usize) -> Vec<u8> {
    let words = [
        "the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dog ", "and ", "a ",
        "huffman ", "tree\n",
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let mut out = Vec::with_capacity(size + 16);
    while out.len() < size {
        out.extend_from_slice(words[rng.gen_range(0..words.len())].as_bytes());
    }
    out.truncate(size);
    out
}

fn generate_random(size: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut out = vec![0u8; size];
    rng.fill(out.as_mut_slice());
    out
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let data = generate_text(64 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("frequency_table", |b| {
        b.iter(|| FrequencyTable::build(black_box(&data)))
    });

    let frequencies = FrequencyTable::build(&data);
    for policy in [LeafPolicy::AllSymbols, LeafPolicy::ObservedOnly] {
        group.bench_with_input(
            BenchmarkId::new("tree_and_codes", policy),
            &frequencies,
            |b, freq| {
                b.iter(|| {
                    let tree = HuffmanTree::build(black_box(freq), policy);
                    CodeTable::generate(&tree)
                })
            },
        );
    }
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let config = HuffmanConfig::default();
    for (name, generate) in [
        ("text", generate_text as fn(usize) -> Vec<u8>),
        ("random", generate_random),
    ] {
        let mut group = c.benchmark_group(format!("huffman_{}", name));
        for size in SIZES {
            let data = generate(size);
            let container = compress_with(&data, &config).expect("compress");
            group.throughput(Throughput::Bytes(size as u64));

            group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, data| {
                b.iter(|| compress_with(black_box(data), &config))
            });

            group.bench_with_input(
                BenchmarkId::new("decompress", size),
                &container,
                |b, container| b.iter(|| decompress(black_box(container))),
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_stages, bench_roundtrip);
criterion_main!(benches);
