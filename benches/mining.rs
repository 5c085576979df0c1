use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use freqmine::{fp_growth, Apriori, MiningConfig, PrefixJoin, Transaction};

/// Basket-like transactions: a few popular items plus a long tail.
fn generate_transactions(count: usize, num_items: usize) -> Vec<Transaction> {
    let mut seed = 12345u64;
    let mut next = || {
        // Simple LCG random
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        (seed >> 16) as usize
    };

    (0..count)
        .map(|_| {
            let len = 2 + next() % 6;
            let mut transaction: Transaction = (0..len)
                .map(|_| {
                    let popular = next() % 3 != 0;
                    if popular {
                        next() % 8
                    } else {
                        next() % num_items
                    }
                })
                .collect();
            transaction.sort_unstable();
            transaction.dedup();
            transaction
        })
        .collect()
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines");
    let config = MiningConfig::new(0.05).unwrap();

    for &size in &[500, 2000] {
        let transactions = generate_transactions(size, 64);

        group.bench_with_input(BenchmarkId::new("apriori", size), &transactions, |b, t| {
            let apriori = Apriori::new(&config).unwrap();
            b.iter(|| apriori.run(black_box(t)).unwrap());
        });

        group.bench_with_input(
            BenchmarkId::new("apriori_prefix_join", size),
            &transactions,
            |b, t| {
                let apriori = Apriori::new(&config).unwrap().with_join(PrefixJoin);
                b.iter(|| apriori.run(black_box(t)).unwrap());
            },
        );

        group.bench_with_input(BenchmarkId::new("fp_growth", size), &transactions, |b, t| {
            b.iter(|| fp_growth(black_box(t), &config).unwrap());
        });
    }

    group.finish();
}

fn bench_max_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("fp_growth_max_depth");
    let transactions = generate_transactions(2000, 64);

    for &depth in &[2, 4, 8] {
        let config = MiningConfig::new(0.02).unwrap().with_max_depth(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &transactions, |b, t| {
            b.iter(|| fp_growth(black_box(t), &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engines, bench_max_depth);
criterion_main!(benches);
