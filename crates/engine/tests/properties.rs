//! Ranking properties checked over every title of a synthetic catalog.

use data_loader::{Catalog, CatalogEntry, SimilarityMatrix};
use engine::{EngineError, RecommendationEngine};

/// Symmetric matrix with plenty of tied scores
fn create_test_engine(n: usize) -> RecommendationEngine {
    let entries = (0..n)
        .map(|i| CatalogEntry::new(1000 + i as u32, format!("Title {}", i)))
        .collect();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else {
                        ((i * j + i + j) % 7) as f32 / 7.0
                    }
                })
                .collect()
        })
        .collect();

    RecommendationEngine::new(
        Catalog::new(entries).unwrap(),
        SimilarityMatrix::from_rows(rows).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_every_title_gets_valid_recommendations() {
    let engine = create_test_engine(12);
    let titles: Vec<String> = engine.titles().map(str::to_string).collect();

    for title in &titles {
        let recs = engine.recommend(title).unwrap();
        let query = engine.index_of(title).unwrap();

        assert!(recs.len() <= 5);
        assert_eq!(recs.len(), 5, "12 titles leave at least 5 candidates");
        assert!(recs.iter().all(|r| r.index != query && &r.title != title));

        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score, "scores must not increase");
            if pair[0].score == pair[1].score {
                assert!(pair[0].index < pair[1].index, "ties keep catalog order");
            }
        }
    }
}

#[test]
fn test_recommend_is_deterministic() {
    let engine = create_test_engine(9);
    let first = engine.recommend("Title 4").unwrap();
    for _ in 0..10 {
        assert_eq!(engine.recommend("Title 4").unwrap(), first);
    }
}

#[test]
fn test_recommend_unknown_title() {
    let engine = create_test_engine(3);
    assert!(matches!(
        engine.recommend("unknown title"),
        Err(EngineError::NotFound(_))
    ));
    assert!(!engine.contains("unknown title"));
}

#[test]
fn test_small_catalog_returns_what_exists() {
    let engine = create_test_engine(3);
    assert_eq!(engine.recommend("Title 0").unwrap().len(), 2);
}
