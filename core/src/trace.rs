//! Lookup trace types for debugging routing decisions.
//!
//! A [`LookupTrace`] replays [`Router::lookup`](crate::Router::lookup) and
//! records each step it takes: the schemas it tried (and in which phase),
//! whether they matched structurally, and each entry's predicate results.
//!
//! # Example
//!
//! ```
//! use waypost::Router;
//!
//! let router = Router::from_patterns(["/match/:id", "/match/*"]).unwrap();
//! let trace = router.lookup_with_trace("/match/42");
//! let matched = trace.matched.as_ref().unwrap();
//! assert_eq!(matched.pattern, "/match/:id");
//! println!("{trace}");
//! ```
//!
//! # INV: `matched` == `lookup()` result
//!
//! The trace walks candidates in the same order as `lookup` and stops at the
//! same place, so `matched` names the same schema and entry sequence.

use crate::RouteBundle;
use std::fmt;

/// Which lookup phase a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    /// Fixed-length schemas with as many components as the path has tokens.
    Exact,
    /// Open-wildcard schemas with this floor.
    WildcardFloor(usize),
}

impl fmt::Display for LookupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::WildcardFloor(n) => write!(f, "wildcard>={n}"),
        }
    }
}

/// One predicate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateTrace {
    /// The predicate's name.
    pub name: String,
    /// What it returned.
    pub passed: bool,
}

/// Evaluation of one entry of a structurally matched schema.
///
/// `predicates` stops at the first failure, exactly where evaluation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTrace {
    /// The entry's registration sequence.
    pub sequence: u64,
    /// Predicate results, in evaluation order.
    pub predicates: Vec<PredicateTrace>,
    /// Whether every predicate passed.
    pub passed: bool,
}

/// One candidate schema tried during lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupStep {
    /// The phase the candidate came from.
    pub phase: LookupPhase,
    /// The schema's pattern.
    pub pattern: String,
    /// The schema's fingerprint.
    pub fingerprint: String,
    /// Whether the path matched the schema structurally.
    pub matched: bool,
    /// Entry evaluations (empty when `matched` is false).
    pub entries: Vec<EntryTrace>,
}

/// The selected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    /// The schema's pattern.
    pub pattern: String,
    /// The schema's fingerprint.
    pub fingerprint: String,
    /// The winning entry's sequence.
    pub sequence: u64,
    /// Captured parameters.
    pub bundle: RouteBundle,
}

/// Full trace of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTrace {
    /// The path as given.
    pub path: String,
    /// Its tokens.
    pub tokens: Vec<String>,
    /// Candidates tried, in order.
    pub steps: Vec<LookupStep>,
    /// The selected route, if any.
    pub matched: Option<MatchedRoute>,
}

impl LookupTrace {
    /// Number of candidate schemas that were tried.
    #[must_use]
    pub fn candidates_tried(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for LookupTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lookup \"{}\" tokens={:?}", self.path, self.tokens)?;
        for step in &self.steps {
            writeln!(
                f,
                "  [{}] {} ({}) {}",
                step.phase,
                step.pattern,
                step.fingerprint,
                if step.matched { "matched" } else { "no match" }
            )?;
            for entry in &step.entries {
                write!(
                    f,
                    "    entry #{}: {}",
                    entry.sequence,
                    if entry.passed { "passed" } else { "rejected" }
                )?;
                for p in &entry.predicates {
                    write!(f, " {}={}", p.name, p.passed)?;
                }
                writeln!(f)?;
            }
        }
        match &self.matched {
            Some(m) => {
                let mut params: Vec<_> = m.bundle.iter().collect();
                params.sort();
                write!(f, "  => {} #{} {:?}", m.pattern, m.sequence, params)
            }
            None => write!(f, "  => (no match)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(matched: bool) -> LookupTrace {
        LookupTrace {
            path: "/match/42".into(),
            tokens: vec!["match".into(), "42".into()],
            steps: vec![LookupStep {
                phase: LookupPhase::Exact,
                pattern: "/match/:id".into(),
                fingerprint: "/match/$".into(),
                matched: true,
                entries: vec![EntryTrace {
                    sequence: 0,
                    predicates: vec![PredicateTrace {
                        name: "numeric".into(),
                        passed: matched,
                    }],
                    passed: matched,
                }],
            }],
            matched: matched.then(|| MatchedRoute {
                pattern: "/match/:id".into(),
                fingerprint: "/match/$".into(),
                sequence: 0,
                bundle: RouteBundle::from([("id".to_owned(), "42".to_owned())]),
            }),
        }
    }

    #[test]
    fn phase_display() {
        assert_eq!(LookupPhase::Exact.to_string(), "exact");
        assert_eq!(LookupPhase::WildcardFloor(3).to_string(), "wildcard>=3");
    }

    #[test]
    fn display_reports_entries_and_outcome() {
        let hit = trace(true).to_string();
        assert!(hit.contains("[exact] /match/:id (/match/$) matched"));
        assert!(hit.contains("entry #0: passed numeric=true"));
        assert!(hit.ends_with("=> /match/:id #0 [(\"id\", \"42\")]"));

        let miss = trace(false).to_string();
        assert!(miss.contains("entry #0: rejected numeric=false"));
        assert!(miss.ends_with("=> (no match)"));
        assert_eq!(trace(false).candidates_tried(), 1);
    }
}
