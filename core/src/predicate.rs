//! Predicates — side-effect-free gates evaluated against a provisional match.
//!
//! When several routes share one schema, predicates decide which of them
//! wins. Entries are tried in registration order and an entry's predicates
//! are evaluated in order, stopping at the first `false`.
//!
//! Two ways to write one:
//!
//! - [`FnPredicate`] wraps a closure.
//! - [`Guard`] is a declarative tree over captured parameters
//!   (`Param`, `All`, `Any`, `Not`), the form route tables compile to.

use crate::{RouteMatch, StringMatch};
use std::fmt;

/// A pure boolean gate over a provisional [`RouteMatch`].
///
/// Implementations must not mutate shared state and must not call back into
/// the router that is evaluating them.
pub trait Predicate: Send + Sync {
    /// Decide whether the entry under evaluation may take this match.
    fn evaluate(&self, route: &RouteMatch<'_>) -> bool;

    /// A descriptive name for traces and debugging.
    fn name(&self) -> &str {
        "predicate"
    }
}

impl fmt::Debug for dyn Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name()).finish()
    }
}

/// A named closure predicate.
///
/// # Example
///
/// ```
/// use waypost::FnPredicate;
///
/// let numeric_id = FnPredicate::new("numeric_id", |route| {
///     route.param("id").is_some_and(|id| id.bytes().all(|b| b.is_ascii_digit()))
/// });
/// ```
pub struct FnPredicate<F> {
    name: String,
    func: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&RouteMatch<'_>) -> bool + Send + Sync,
{
    /// Wrap `func` under `name`.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> FnPredicate<F>
where
    F: Fn(&RouteMatch<'_>) -> bool + Send + Sync + 'static,
{
    /// Wrap `func` and box it, ready for a predicate list.
    pub fn boxed(name: impl Into<String>, func: F) -> Box<dyn Predicate> {
        Box::new(Self::new(name, func))
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&RouteMatch<'_>) -> bool + Send + Sync,
{
    fn evaluate(&self, route: &RouteMatch<'_>) -> bool {
        (self.func)(route)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate")
            .field("name", &self.name)
            .finish()
    }
}

/// Matches a captured parameter against a [`StringMatch`].
///
/// # INV: missing parameter → false
///
/// If the matched schema has no parameter of this name the guard fails.
#[derive(Debug, Clone)]
pub struct ParamGuard {
    name: String,
    matcher: StringMatch,
}

impl ParamGuard {
    /// Guard parameter `name` with `matcher`.
    pub fn new(name: impl Into<String>, matcher: StringMatch) -> Self {
        Self {
            name: name.into(),
            matcher,
        }
    }

    /// The guarded parameter name.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.name
    }

    /// Evaluate against the captured value, if any.
    #[must_use]
    pub fn check(&self, route: &RouteMatch<'_>) -> bool {
        route
            .param(&self.name)
            .is_some_and(|value| self.matcher.matches(value))
    }
}

/// Declarative predicate tree.
///
/// `All` and `Any` short-circuit. An empty `All` passes and an empty `Any`
/// fails, as with [`Iterator::all`] and [`Iterator::any`].
#[derive(Debug, Clone)]
pub enum Guard {
    /// A single parameter check.
    Param(ParamGuard),
    /// Every child must pass.
    All(Vec<Guard>),
    /// At least one child must pass.
    Any(Vec<Guard>),
    /// Inverts the inner guard.
    Not(Box<Guard>),
}

impl Guard {
    /// Shorthand for `Guard::Param(ParamGuard::new(name, matcher))`.
    pub fn param(name: impl Into<String>, matcher: StringMatch) -> Self {
        Self::Param(ParamGuard::new(name, matcher))
    }

    /// Evaluate the tree.
    #[must_use]
    pub fn check(&self, route: &RouteMatch<'_>) -> bool {
        match self {
            Self::Param(p) => p.check(route),
            Self::All(guards) => guards.iter().all(|g| g.check(route)),
            Self::Any(guards) => guards.iter().any(|g| g.check(route)),
            Self::Not(g) => !g.check(route),
        }
    }

    /// Depth of the tree; a lone `Param` has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Param(_) => 1,
            Self::All(gs) | Self::Any(gs) => 1 + gs.iter().map(Guard::depth).max().unwrap_or(0),
            Self::Not(g) => 1 + g.depth(),
        }
    }
}

impl Predicate for Guard {
    fn evaluate(&self, route: &RouteMatch<'_>) -> bool {
        self.check(route)
    }

    fn name(&self) -> &str {
        match self {
            Self::Param(p) => p.param(),
            Self::All(_) => "all",
            Self::Any(_) => "any",
            Self::Not(_) => "not",
        }
    }
}
