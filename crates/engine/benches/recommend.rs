//! Benchmarks for similar-title lookup
//!
//! Run with: cargo bench --package engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Catalog, CatalogEntry, SimilarityMatrix};
use engine::RecommendationEngine;

/// Catalog the size of a typical TMDB 5000 export
fn build_engine(n: usize) -> RecommendationEngine {
    let entries = (0..n)
        .map(|i| CatalogEntry::new(i as u32, format!("Movie {}", i)))
        .collect();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| ((i * 31 + j * 17) % 1000) as f32 / 1000.0)
                .collect()
        })
        .collect();
    RecommendationEngine::new(
        Catalog::new(entries).unwrap(),
        SimilarityMatrix::from_rows(rows).unwrap(),
    )
    .unwrap()
}

fn bench_recommend(c: &mut Criterion) {
    let engine = build_engine(4800);

    c.bench_function("recommend_top5", |b| {
        b.iter(|| {
            let recs = engine.recommend(black_box("Movie 2400")).unwrap();
            black_box(recs)
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let engine = build_engine(4800);

    c.bench_function("search_titles", |b| {
        b.iter(|| black_box(engine.search(black_box("movie 12"), 20)))
    });
}

criterion_group!(benches, bench_recommend, bench_search);
criterion_main!(benches);
