//! Benchmarks for the reverse IoC search.
//!
//! # Benchmarks
//!
//! - **`search_all`**: Drains the whole solution sequence for uniform
//!   alphabets, measuring the full staged traversal.
//! - **`search_first`**: Pulls only the first solution of a larger message,
//!   measuring how quickly the lazy sequence produces output.
//! - **`combinations`**: Enumerates `k`-of-`n` masks.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench search
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ioclab_core::{CandidateSets, combinations};
use ioclab_search::{ReverseSearch, TargetRange};

fn bench_search_all(c: &mut Criterion) {
    let cases = [("3x6", 3_u8, 6), ("4x7", 4, 7), ("5x8", 5, 8)];
    let search = ReverseSearch::new(TargetRange::new(0.2, 0.05).unwrap());

    for (param, alphabet, len) in cases {
        let candidates = CandidateSets::uniform(0..alphabet, len);
        c.bench_with_input(
            BenchmarkId::new("search_all", param),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    let count = search.search(hint::black_box(candidates)).unwrap().count();
                    hint::black_box(count)
                });
            },
        );
    }
}

fn bench_search_first(c: &mut Criterion) {
    let text = b"attackatdawnandholdthebridge";
    let candidates = CandidateSets::uniform(b'a'..=b'z', text.len());
    let search = ReverseSearch::matching(text, 0.0, ioclab_core::Normalization::PairCount).unwrap();

    c.bench_function("search_first", |b| {
        b.iter(|| {
            let first = search.search(hint::black_box(&candidates)).unwrap().next();
            hint::black_box(first)
        });
    });
}

fn bench_combinations(c: &mut Criterion) {
    for (n, k) in [(16, 4), (24, 3), (32, 2)] {
        c.bench_with_input(
            BenchmarkId::new("combinations", format!("{k}_of_{n}")),
            &(n, k),
            |b, &(n, k)| {
                b.iter(|| hint::black_box(combinations(n, k).fold(0, |acc, mask| acc ^ mask)));
            },
        );
    }
}

criterion_group!(
    benches,
    bench_search_all,
    bench_search_first,
    bench_combinations
);
criterion_main!(benches);
