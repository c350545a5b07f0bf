//! Conformance tests that run YAML fixtures against waypost
//!
//! Run with: cargo test -p waypost-test --test conformance --features waypost-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use waypost_test::fixture::Fixture;

/// The fixtures directory beside this crate's manifest
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run every fixture in one file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    println!("Running fixture file: {}", path.display());

    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} holds no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_tokenizer() {
    run_fixture_file("01_tokenizer.yaml");
}

#[test]
fn test_schemas() {
    run_fixture_file("02_schemas.yaml");
}

#[test]
fn test_wildcards() {
    run_fixture_file("03_wildcards.yaml");
}

#[test]
fn test_predicates() {
    run_fixture_file("04_predicates.yaml");
}

#[test]
fn test_load_errors() {
    run_fixture_file("05_load_errors.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let mut names: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "01_tokenizer.yaml",
            "02_schemas.yaml",
            "03_wildcards.yaml",
            "04_predicates.yaml",
            "05_load_errors.yaml",
        ]
    );
}
