//! The router: registration and two-phase lookup.

use crate::index::RouteIndex;
use crate::route::{RouteEntry, RouteMatch, RouteSpec};
use crate::tokenizer::tokenize;
use crate::trace::{EntryTrace, LookupPhase, LookupStep, LookupTrace, MatchedRoute, PredicateTrace};
use crate::{Handler, HandlerBinding, Predicate, RouteBundle, RouterError, Schema};
use std::sync::Arc;

/// Maps paths to route entries.
///
/// Registration takes `&mut self`; lookup takes `&self`. Once fully
/// registered, a router can be shared read-only (for instance behind an
/// [`Arc`]) and looked up from any thread.
///
/// # Lookup
///
/// 1. Tokenize the path.
/// 2. **Exact phase**: fixed-length schemas with as many components as there
///    are tokens, in registration order.
/// 3. **Wildcard phase**: open-wildcard schemas by floor, from the token
///    count down to 1, in registration order within a floor.
///
/// For each structurally matching schema, its entries are tried in
/// registration order; the first entry whose predicates all pass wins and
/// lookup stops.
///
/// # Example
///
/// ```
/// use waypost::Router;
///
/// let router = Router::from_patterns(["/match/:id", "/match/*"]).unwrap();
///
/// let route = router.lookup("/match/42").unwrap();
/// assert_eq!(route.schema().pattern(), "/match/:id");
/// assert_eq!(route.param("id"), Some("42"));
///
/// let route = router.lookup("/match/42/comments").unwrap();
/// assert_eq!(route.schema().pattern(), "/match/*");
///
/// assert!(router.lookup("/game/1").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Router {
    index: RouteIndex<RouteEntry>,
    next_sequence: u64,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router for parameter extraction only: its entries have no
    /// predicates and no binding.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::BadSchema`] if any pattern fails to compile;
    /// nothing is registered in that case.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let schemas = patterns
            .into_iter()
            .map(|p| Schema::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut router = Self::new();
        for schema in schemas {
            router.insert(schema, Vec::new(), None);
        }
        Ok(router)
    }

    /// Register `pattern` with predicates and a binding.
    ///
    /// Returns the interned schema, which is shared with earlier
    /// registrations of structurally identical patterns.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::BadSchema`] if the pattern fails to compile.
    pub fn register(
        &mut self,
        pattern: &str,
        predicates: Vec<Box<dyn Predicate>>,
        binding: impl HandlerBinding + 'static,
    ) -> Result<Arc<Schema>, RouterError> {
        let schema = Schema::compile(pattern)?;
        Ok(self.insert(schema, predicates, Some(Arc::new(binding))))
    }

    /// Register `pattern` with a binding and no predicates.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::BadSchema`] if the pattern fails to compile.
    pub fn route(
        &mut self,
        pattern: &str,
        binding: impl HandlerBinding + 'static,
    ) -> Result<Arc<Schema>, RouterError> {
        self.register(pattern, Vec::new(), binding)
    }

    /// Register `pattern` with no predicates and no binding.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::BadSchema`] if the pattern fails to compile.
    pub fn register_pattern(&mut self, pattern: &str) -> Result<Arc<Schema>, RouterError> {
        let schema = Schema::compile(pattern)?;
        Ok(self.insert(schema, Vec::new(), None))
    }

    /// Register a batch of routes in order.
    ///
    /// Every pattern is compiled before anything is inserted, so a failure
    /// leaves the router unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouterError::BadSchema`] encountered.
    pub fn register_all(
        &mut self,
        specs: impl IntoIterator<Item = RouteSpec>,
    ) -> Result<Vec<Arc<Schema>>, RouterError> {
        let compiled = specs
            .into_iter()
            .map(|spec| Schema::compile(&spec.path).map(|schema| (schema, spec)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(compiled
            .into_iter()
            .map(|(schema, spec)| self.insert(schema, spec.predicates, Some(spec.binding)))
            .collect())
    }

    pub(crate) fn insert(
        &mut self,
        schema: Schema,
        predicates: Vec<Box<dyn Predicate>>,
        binding: Option<Arc<dyn HandlerBinding>>,
    ) -> Arc<Schema> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let schema = self.index.add_with(schema, |interned| RouteEntry {
            schema: Arc::clone(interned),
            predicates,
            binding,
            sequence,
        });

        tracing::debug!(
            pattern = %schema.pattern(),
            fingerprint = %schema.fingerprint(),
            sequence,
            wildcard = schema.ends_in_wildcard(),
            "registered route"
        );
        schema
    }

    /// Candidate schemas for a path of `n` tokens, in lookup order.
    fn candidates(&self, n: usize) -> impl Iterator<Item = (LookupPhase, &Arc<Schema>)> + '_ {
        let exact = self
            .index
            .candidates_for_exact_length(n)
            .iter()
            .map(|schema| (LookupPhase::Exact, schema));

        let wildcard = (1..=n).rev().flat_map(move |floor| {
            self.index
                .candidates_for_wildcard_floor(floor)
                .iter()
                .map(move |schema| (LookupPhase::WildcardFloor(floor), schema))
        });

        exact.chain(wildcard)
    }

    /// Find the route for `path`.
    ///
    /// Returns `None` if no schema matches or every matching entry is
    /// rejected by its predicates.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<'_>> {
        let tokens = tokenize(path);

        let found = self.candidates(tokens.len()).find_map(|(_, schema)| {
            let bundle = schema.match_tokens(&tokens)?;
            self.index.entries_for(schema).iter().find_map(|entry| {
                let route = self.provisional(path, &tokens, &bundle, schema, entry);
                entry.passes(&route).then_some(route)
            })
        });

        tracing::trace!(
            path,
            tokens = tokens.len(),
            matched = found.as_ref().map(|r| r.schema.pattern()),
            "lookup"
        );
        found
    }

    /// Look up `path` and instantiate the winning entry's handler.
    ///
    /// `None` if nothing matches or the binding produced nothing.
    #[must_use]
    pub fn dispatch(&self, path: &str) -> Option<Box<dyn Handler>> {
        let Some(route) = self.lookup(path) else {
            tracing::debug!(path, "no route matched");
            return None;
        };
        route.instantiate()
    }

    /// Look up `path`, recording every step.
    #[must_use]
    pub fn lookup_with_trace(&self, path: &str) -> LookupTrace {
        let tokens = tokenize(path);
        let mut steps = Vec::new();
        let mut matched = None;

        'candidates: for (phase, schema) in self.candidates(tokens.len()) {
            let mut step = LookupStep {
                phase,
                pattern: schema.pattern().to_owned(),
                fingerprint: schema.fingerprint().to_owned(),
                matched: false,
                entries: Vec::new(),
            };

            let Some(bundle) = schema.match_tokens(&tokens) else {
                steps.push(step);
                continue;
            };
            step.matched = true;

            for entry in self.index.entries_for(schema) {
                let route = self.provisional(path, &tokens, &bundle, schema, entry);
                let mut predicates = Vec::new();
                let mut passed = true;
                for predicate in entry.predicates() {
                    let result = predicate.evaluate(&route);
                    predicates.push(PredicateTrace {
                        name: predicate.name().to_owned(),
                        passed: result,
                    });
                    if !result {
                        passed = false;
                        break;
                    }
                }
                step.entries.push(EntryTrace {
                    sequence: entry.sequence(),
                    predicates,
                    passed,
                });

                if passed {
                    matched = Some(MatchedRoute {
                        pattern: schema.pattern().to_owned(),
                        fingerprint: schema.fingerprint().to_owned(),
                        sequence: entry.sequence(),
                        bundle: route.into_bundle(),
                    });
                    steps.push(step);
                    break 'candidates;
                }
            }
            steps.push(step);
        }

        LookupTrace {
            path: path.to_owned(),
            tokens,
            steps,
            matched,
        }
    }

    fn provisional<'r>(
        &'r self,
        path: &str,
        tokens: &[String],
        bundle: &RouteBundle,
        schema: &Arc<Schema>,
        entry: &'r RouteEntry,
    ) -> RouteMatch<'r> {
        RouteMatch {
            path: path.to_owned(),
            tokens: tokens.to_vec(),
            bundle: bundle.clone(),
            schema: Arc::clone(schema),
            entry,
            router: self,
        }
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Interned schemas in first-registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.index.schemas()
    }

    /// Number of distinct schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.index.schema_count()
    }

    /// Entries registered against `schema` (by fingerprint), in order.
    #[must_use]
    pub fn entries_for(&self, schema: &Schema) -> &[RouteEntry] {
        self.index.entries_for(schema)
    }
}
