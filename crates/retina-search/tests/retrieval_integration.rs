//! Integration tests for the full build / save / load / query pipeline.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use retina_core::{FeatureKind, FeatureVector};
use retina_search::RetrievalEngine;

/// Write a flat-colored PNG into `dir`.
fn write_image(dir: &Path, name: &str, color: [u8; 3]) {
    RgbImage::from_pixel(16, 16, Rgb(color)).save(dir.join(name)).expect("save image");
}

#[test]
fn test_build_save_load_query_histogram() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_image(dir.path(), "red.png", [220, 20, 20]);
    write_image(dir.path(), "green.png", [20, 220, 20]);
    write_image(dir.path(), "blue.png", [20, 20, 220]);

    let mut builder = RetrievalEngine::new();
    let indexed = builder.build_database(dir.path(), FeatureKind::Histogram).expect("build");
    assert_eq!(indexed, 3);

    let csv = dir.path().join("features.csv");
    builder.save_features(&csv).expect("save");

    let mut engine = RetrievalEngine::new();
    let loaded = engine.load_features(&csv).expect("load");
    assert_eq!(loaded, 3);
    assert_eq!(engine.kind(), FeatureKind::Histogram);

    // Query with a fresh image of the same color as one of the indexed ones.
    let target = dir.path().join("probe.png");
    write_image(dir.path(), "probe.png", [220, 20, 20]);

    let matches = engine.query_path(&target, 2).expect("query");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].path, "red.png");
    // Identical color histograms intersect fully.
    assert!((matches[0].distance - (-1.0)).abs() < 1e-5);
    assert!(matches[0].distance <= matches[1].distance);
}

#[test]
fn test_each_pixel_kind_builds_expected_dimensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_image(dir.path(), "a.png", [120, 60, 200]);

    for kind in [
        FeatureKind::Baseline,
        FeatureKind::Histogram,
        FeatureKind::MultiHistogram,
        FeatureKind::TextureColor,
        FeatureKind::Custom,
    ] {
        let mut engine = RetrievalEngine::new();
        engine.build_database(dir.path(), kind).expect("build");
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.features()[0].len(), kind.default_dimension(), "kind {kind}");
    }
}

#[test]
fn test_embedding_table_build_and_query() {
    let dir = tempfile::tempdir().expect("tempdir");

    // A tiny embedding table; rows shorter than 512 values are zero-padded.
    let table = dir.path().join("embeddings.csv");
    fs::write(&table, "cat.png,1.0,0.0\ndog.png,0.0,1.0\n").expect("write table");

    // The query image only needs to decode; its pixels are not used.
    write_image(dir.path(), "cat.png", [128, 128, 128]);

    let mut engine = RetrievalEngine::new();
    engine.set_embedding_table(&table);
    let indexed = engine.build_database(dir.path(), FeatureKind::DnnEmbedding).expect("build");
    assert_eq!(indexed, 2);
    assert_eq!(engine.features()[0].len(), 512);

    let matches = engine.query_path(&dir.path().join("cat.png"), 2).expect("query");
    assert_eq!(matches[0].path, "cat.png");
    // Cosine distance of a vector with itself is zero.
    assert!(matches[0].distance.abs() < 1e-6);
    // Orthogonal embeddings sit at distance 1.
    assert!((matches[1].distance - 1.0).abs() < 1e-6);
}

#[test]
fn test_query_vector_without_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_image(dir.path(), "a.png", [10, 10, 10]);
    write_image(dir.path(), "b.png", [250, 250, 250]);

    let mut engine = RetrievalEngine::new();
    engine.build_database(dir.path(), FeatureKind::Baseline).expect("build");

    let target = FeatureVector::new(FeatureKind::Baseline, "", vec![10.0; 147]);
    let matches = engine.query_vector(&target, 1);
    assert_eq!(matches.len(), 1);
    assert!(matches[0].path.ends_with("a.png"));
}

#[test]
fn test_rebuild_replaces_database() {
    let first = tempfile::tempdir().expect("tempdir");
    write_image(first.path(), "one.png", [1, 2, 3]);
    write_image(first.path(), "two.png", [4, 5, 6]);

    let second = tempfile::tempdir().expect("tempdir");
    write_image(second.path(), "three.png", [7, 8, 9]);

    let mut engine = RetrievalEngine::new();
    engine.build_database(first.path(), FeatureKind::Histogram).expect("first build");
    assert_eq!(engine.len(), 2);

    engine.build_database(second.path(), FeatureKind::Baseline).expect("second build");
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.kind(), FeatureKind::Baseline);
    assert!(engine.paths()[0].ends_with("three.png"));
}
