//! Route entries, matches, and typed registration records.

use crate::{Handler, HandlerBinding, Predicate, RouteBundle, Router, Schema};
use std::fmt;
use std::sync::Arc;

/// One registration: a schema, its predicates, and its handler binding.
///
/// Many entries may share one interned [`Schema`]. The sequence number is
/// assigned at registration, is monotonic, and is never reused.
pub struct RouteEntry {
    pub(crate) schema: Arc<Schema>,
    pub(crate) predicates: Vec<Box<dyn Predicate>>,
    pub(crate) binding: Option<Arc<dyn HandlerBinding>>,
    pub(crate) sequence: u64,
}

impl RouteEntry {
    /// The schema this entry was registered against.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Predicates in evaluation order.
    #[must_use]
    pub fn predicates(&self) -> &[Box<dyn Predicate>] {
        &self.predicates
    }

    /// The handler binding, absent for parameter-parsing entries.
    #[must_use]
    pub fn binding(&self) -> Option<&Arc<dyn HandlerBinding>> {
        self.binding.as_ref()
    }

    /// Registration sequence number.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Evaluate predicates in order, stopping at the first `false`.
    pub(crate) fn passes(&self, route: &RouteMatch<'_>) -> bool {
        self.predicates.iter().all(|p| p.evaluate(route))
    }
}

impl PartialEq for RouteEntry {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence && self.schema == other.schema
    }
}

impl Eq for RouteEntry {}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.schema.pattern())
            .field("sequence", &self.sequence)
            .field("predicates", &self.predicates)
            .field("binding", &self.binding.as_ref().map(|b| b.name()))
            .finish()
    }
}

/// The result of a successful lookup.
///
/// Borrows the router that produced it, so predicates and handlers can
/// perform nested read-only lookups through [`router`](Self::router).
#[derive(Clone)]
pub struct RouteMatch<'r> {
    pub(crate) path: String,
    pub(crate) tokens: Vec<String>,
    pub(crate) bundle: RouteBundle,
    pub(crate) schema: Arc<Schema>,
    pub(crate) entry: &'r RouteEntry,
    pub(crate) router: &'r Router,
}

impl<'r> RouteMatch<'r> {
    /// The path as given to lookup.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path's tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Captured parameters.
    #[must_use]
    pub fn bundle(&self) -> &RouteBundle {
        &self.bundle
    }

    /// A single captured parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.bundle.get(name).map(String::as_str)
    }

    /// The matched schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Sequence number of the winning entry.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.entry.sequence
    }

    /// The winning entry.
    #[must_use]
    pub fn entry(&self) -> &'r RouteEntry {
        self.entry
    }

    /// The router that produced this match.
    #[must_use]
    pub fn router(&self) -> &'r Router {
        self.router
    }

    /// Consume the match, keeping only the captured parameters.
    #[must_use]
    pub fn into_bundle(self) -> RouteBundle {
        self.bundle
    }

    /// Run the winning entry's binding.
    ///
    /// `None` if the entry has no binding or the binding produced nothing.
    #[must_use]
    pub fn instantiate(&self) -> Option<Box<dyn Handler>> {
        let Some(binding) = self.entry.binding.as_ref() else {
            tracing::warn!(
                path = %self.path,
                pattern = %self.schema.pattern(),
                "matched route has no handler binding"
            );
            return None;
        };
        binding.instantiate(self)
    }
}

impl fmt::Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("path", &self.path)
            .field("tokens", &self.tokens)
            .field("bundle", &self.bundle)
            .field("pattern", &self.schema.pattern())
            .field("sequence", &self.entry.sequence)
            .finish_non_exhaustive()
    }
}

/// A typed registration record for [`Router::register_all`].
pub struct RouteSpec {
    pub(crate) path: String,
    pub(crate) predicates: Vec<Box<dyn Predicate>>,
    pub(crate) binding: Arc<dyn HandlerBinding>,
}

impl RouteSpec {
    /// A route for `path` bound to `binding`, without predicates.
    pub fn new(path: impl Into<String>, binding: impl HandlerBinding + 'static) -> Self {
        Self {
            path: path.into(),
            predicates: Vec::new(),
            binding: Arc::new(binding),
        }
    }

    /// Append a predicate.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Predicate + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// The pattern string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("path", &self.path)
            .field("predicates", &self.predicates)
            .field("binding", &self.binding.name())
            .finish()
    }
}
