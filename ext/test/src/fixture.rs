//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the waypost router.
//!
//! ```yaml
//! name: exact_beats_wildcard
//! description: A fixed-length schema is tried before any wildcard
//! routes:
//!   - path: /match/*
//!     handler: wild
//!   - path: /match/:id
//!     handler: exact
//! cases:
//!   - name: two segments
//!     path: /match/42
//!     expect: exact
//!     bundle: { id: "42" }
//!   - name: miss
//!     path: /game/42
//!     expect: null
//! ```

use crate::{label_bindings, LabelHandler};
use serde::Deserialize;
use std::collections::HashMap;
use waypost::prelude::*;
use waypost::RouteConfig;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub routes: Vec<RouteConfig>,
    /// If set, loading the table must fail with this error kind and
    /// `cases` are not run.
    #[serde(default)]
    pub load_error: Option<ErrorKind>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Error kinds a fixture can expect from loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadSchema,
    UnknownHandler,
    InvalidPattern,
    DepthExceeded,
    TooManyGuards,
    PatternTooLong,
}

impl ErrorKind {
    fn of(err: &RouterError) -> Option<Self> {
        match err {
            RouterError::BadSchema(_) => Some(Self::BadSchema),
            RouterError::UnknownHandler { .. } => Some(Self::UnknownHandler),
            RouterError::InvalidPattern { .. } => Some(Self::InvalidPattern),
            RouterError::DepthExceeded { .. } => Some(Self::DepthExceeded),
            RouterError::TooManyGuards { .. } => Some(Self::TooManyGuards),
            RouterError::PatternTooLong { .. } => Some(Self::PatternTooLong),
            RouterError::SchemaMismatch(_) | RouterError::InvalidConfig { .. } => None,
        }
    }
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub path: String,
    /// Expected handler label, `None` for no match.
    pub expect: Option<String>,
    /// Expected captured parameters; unchecked when absent.
    #[serde(default)]
    pub bundle: Option<HashMap<String, String>>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub expected_bundle: Option<HashMap<String, String>>,
    pub actual_bundle: Option<HashMap<String, String>>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// The fixture's routes as a route table.
    #[must_use]
    pub fn table(&self) -> RouteTableConfig {
        RouteTableConfig {
            routes: self.routes.clone(),
        }
    }

    /// Load the fixture's routes into a router.
    ///
    /// # Errors
    ///
    /// Whatever [`Router::load`] reports.
    pub fn load(&self) -> Result<Router, RouterError> {
        let table = self.table();
        Router::load(&table, &label_bindings(&table))
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns the load error if the route table does not load.
    pub fn run(&self) -> Result<Vec<CaseResult>, RouterError> {
        let router = self.load()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let handler = router.dispatch(&case.path);
                let produced = handler.as_deref().and_then(LabelHandler::from_handler);
                let actual = produced.map(|h| h.label().to_owned());
                let actual_bundle = produced.and_then(|h| h.bundle().cloned());

                let bundle_ok = case
                    .bundle
                    .as_ref()
                    .map_or(true, |expected| actual_bundle.as_ref() == Some(expected));

                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect && bundle_ok,
                    expected: case.expect.clone(),
                    actual,
                    expected_bundle: case.bundle.clone(),
                    actual_bundle,
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        if let Some(expected) = self.load_error {
            match self.load() {
                Ok(_) => panic!(
                    "Fixture '{}' loaded, expected {:?} error",
                    self.name, expected
                ),
                Err(err) => assert_eq!(
                    ErrorKind::of(&err),
                    Some(expected),
                    "Fixture '{}' failed with unexpected error: {err}",
                    self.name
                ),
            }
            return;
        }

        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to load: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?} {:?}, got {:?} {:?}",
                self.name,
                result.case_name,
                result.expected,
                result.expected_bundle,
                result.actual,
                result.actual_bundle
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: first
routes:
  - path: /match/:id
    handler: match
cases:
  - name: hit
    path: /match/1
    expect: match
    bundle: { id: "1" }
  - name: miss
    path: /other
    expect: null
---
name: second
description: broken table
routes:
  - path: /:/x
    handler: h
load_error: bad_schema
"#;

    #[test]
    fn parses_multi_document_files() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases.len(), 2);
        assert_eq!(fixtures[1].load_error, Some(ErrorKind::BadSchema));
    }

    #[test]
    fn runs_cases() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        let results = fixtures[0].run().unwrap();
        assert!(results.iter().all(|r| r.passed));
        fixtures[1].run_and_assert();
    }

    #[test]
    fn wrong_bundle_fails_the_case() {
        let fixture = Fixture::from_yaml(
            "name: x\nroutes:\n  - path: /a/:id\n    handler: a\ncases:\n  - name: c\n    path: /a/1\n    expect: a\n    bundle: { id: \"2\" }\n",
        )
        .unwrap();
        let results = fixture.run().unwrap();
        assert!(!results[0].passed);
    }
}
