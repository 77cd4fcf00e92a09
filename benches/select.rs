use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gaqc::libs::interval::ScoredInterval;
use gaqc::libs::pile::piles;
use gaqc::libs::resolve::resolve;
use gaqc::libs::select::best_chain;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn generate_models(n: usize, span: u64) -> Vec<ScoredInterval> {
    let mut rng = SmallRng::seed_from_u64(11);

    (0..n)
        .map(|i| {
            let start = rng.gen_range(1..=span);
            let end = start + rng.gen_range(300..5000);
            let aed = rng.gen_range(0.0..1.0);
            let length = rng.gen_range(300..3000);
            ScoredInterval::from_aed(&format!("g{}", i), "chr1", start, end, aed, length)
        })
        .collect()
}

fn bench_best_chain(c: &mut Criterion) {
    // one dense locus
    let pile = generate_models(500, 20_000);

    c.bench_function("best_chain_500", |b| {
        b.iter(|| black_box(best_chain(black_box(&pile))).score)
    });
}

fn bench_piles(c: &mut Criterion) {
    let models = generate_models(20_000, 50_000_000);

    c.bench_function("piles_20k", |b| {
        b.iter(|| black_box(piles(black_box(models.clone()))).len())
    });
}

fn bench_resolve(c: &mut Criterion) {
    let models = generate_models(20_000, 50_000_000);

    c.bench_function("resolve_20k", |b| {
        b.iter(|| black_box(resolve(black_box(models.clone()))).kept.len())
    });
}

criterion_group!(benches, bench_best_chain, bench_piles, bench_resolve);
criterion_main!(benches);
