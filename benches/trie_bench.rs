use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use saca::Trie;

fn generate_words(count: usize) -> Vec<(String, f64)> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let len = rng.random_range(3..10);
            let word: String = (0..len)
                .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
                .collect();
            (word, rng.random_range(0.0..1000.0))
        })
        .collect()
}

fn build_trie(words: &[(String, f64)]) -> Trie {
    let mut trie = Trie::new(true);
    for (word, weight) in words {
        trie.insert(word, *weight);
    }
    trie
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie Insert");
    group.sample_size(10);

    for count in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let words = generate_words(count);
            b.iter(|| build_trie(&words))
        });
    }
    group.finish();
}

fn bench_top_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie TopN");
    let trie = build_trie(&generate_words(50_000));

    for prefix in ["", "a", "ab"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(prefix), prefix, |b, prefix| {
            b.iter(|| trie.top_n(prefix, 10))
        });
    }
    group.finish();
}

fn bench_best_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie BestMatch");
    group.sample_size(10);
    let trie = build_trie(&generate_words(50_000));

    for target in ["hello", "trie", "searching"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(target), target, |b, target| {
            b.iter(|| trie.best_match(target, 50))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_top_n, bench_best_match);
criterion_main!(benches);
