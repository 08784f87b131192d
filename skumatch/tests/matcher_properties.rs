//! Properties every ranking must have, whatever the catalog.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use skumatch::{SkuMatchError, SkuMatcher, SkuRecord};
use std::fs;
use tempfile::TempDir;

const BRANDS: &[&str] = &[
    "OKF Sparkling Zero 350ml",
    "Lotte Hershey's Kisses 146g",
    "Starbucks Frappuccino 281ml",
    "PepsiCo Pepsi Zero Sugar 355ml",
    "Lotte Chilsung Milkis Sparkling 250ml",
];

const FLAVORS: &[&str] = &[
    "Grape", "Peach", "Lime", "Yuzu", "Mocha", "Vanilla", "Caramel", "Milk Chocolate",
    "Green Tea", "Melon",
];

fn random_catalog(rng: &mut StdRng, len: usize) -> Vec<SkuRecord> {
    (0..len)
        .map(|i| {
            let brand = BRANDS.choose(rng).unwrap();
            let flavor = FLAVORS.choose(rng).unwrap();
            SkuRecord::new(format!("SKU{:04}", i), *brand, *flavor)
        })
        .collect()
}

fn random_query(rng: &mut StdRng) -> String {
    let words = [
        "okf", "스파클링", "샤인머스캣", "포도", "hershey", "kisses", "350ml", "146g",
        "starbucks", "바닐라", "zero", "sugar", "mocha", "!!", "유자", "milk",
    ];
    let n = rng.gen_range(0..6);
    (0..n)
        .map(|_| *words.choose(rng).unwrap())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_catalog(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("catalog.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn scores_stay_in_unit_interval_and_ranking_is_sorted() {
    let mut rng = StdRng::seed_from_u64(7);
    let matcher = SkuMatcher::from_records(random_catalog(&mut rng, 60));

    for _ in 0..50 {
        let query = random_query(&mut rng);
        let ranked = matcher.rank(&query).unwrap();
        assert_eq!(ranked.len(), 60);
        assert!(ranked.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert!(
            ranked.windows(2).all(|w| w[0].score >= w[1].score),
            "ranking not sorted for {:?}",
            query
        );
    }
}

#[test]
fn repeated_queries_give_identical_results() {
    let mut rng = StdRng::seed_from_u64(42);
    let matcher = SkuMatcher::from_records(random_catalog(&mut rng, 40));

    for _ in 0..20 {
        let query = random_query(&mut rng);
        let first = matcher.match_sku(&query).unwrap();
        let second = matcher.match_sku(&query).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn match_is_head_of_full_ranking() {
    let mut rng = StdRng::seed_from_u64(3);
    let matcher = SkuMatcher::from_records(random_catalog(&mut rng, 25));
    let query = "OKF Sparkling Zero 350ml Grape";

    let ranked = matcher.rank(query).unwrap();
    let m = matcher.match_sku(query).unwrap();

    assert_eq!(m.best.as_ref(), ranked.first());
    assert_eq!(m.alternatives.as_slice(), &ranked[1..4]);
}

#[test]
fn noise_only_text_still_ranks_everything() {
    let mut rng = StdRng::seed_from_u64(11);
    let matcher = SkuMatcher::from_records(random_catalog(&mut rng, 10));

    let m = matcher.match_sku("!!! ... ### ---").unwrap();
    assert!(m.best.is_some());
    assert_eq!(m.alternatives.len(), 3);
    assert_eq!(m.best.as_ref().unwrap().score, 0.0);
    // All zero, so catalog order decides
    assert_eq!(m.codes(), vec!["SKU0000", "SKU0001", "SKU0002", "SKU0003"]);
}

#[test]
fn empty_catalog_file_gives_no_match() {
    let dir = TempDir::new().unwrap();
    let matcher = SkuMatcher::from_path(write_catalog(&dir, "[]"));

    let m = matcher.match_sku("OKF Grape 350ml").unwrap();
    assert!(m.best.is_none());
    assert!(m.alternatives.is_empty());
}

#[test]
fn malformed_catalog_is_reported() {
    let dir = TempDir::new().unwrap();
    let matcher = SkuMatcher::from_path(write_catalog(&dir, r#"[{"code": "A""#));

    let err = matcher.match_sku("anything").unwrap_err();
    assert!(matches!(err, SkuMatchError::CatalogMalformed(_)));
}

#[test]
fn duplicate_codes_are_rejected() {
    let dir = TempDir::new().unwrap();
    let json = r#"[
        {"code": "A", "brand_line": "Acme Soda", "flavor": "Plain"},
        {"code": "A", "brand_line": "Acme Soda", "flavor": "Lime"}
    ]"#;
    let matcher = SkuMatcher::from_path(write_catalog(&dir, json));

    match matcher.index() {
        Err(SkuMatchError::InvalidCatalog(msg)) => assert!(msg.contains('A')),
        other => panic!("expected InvalidCatalog, got {:?}", other.map(|i| i.len())),
    }
}

#[test]
fn optional_catalog_fields_are_accepted() {
    let dir = TempDir::new().unwrap();
    let json = r#"[
        {"code": "OKFSZGRA", "brand_line": "OKF Sparkling Zero 350ml", "flavor": "Grape",
         "units_per_box": "24", "shelf_life": "12 months"},
        {"code": "OKFSZPEA", "brand_line": "OKF Sparkling Zero 350ml", "flavor": "Peach"}
    ]"#;
    let matcher = SkuMatcher::from_path(write_catalog(&dir, json));

    let m = matcher.match_sku("okf 포도").unwrap();
    assert_eq!(m.best.unwrap().code, "OKFSZGRA");
}
