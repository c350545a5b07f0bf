//! Route index — schemas grouped by length, entries grouped by schema.
//!
//! All state is append-only. Schemas are interned by fingerprint so that
//! structurally identical patterns share one [`Schema`] and accumulate their
//! entries against it in registration order.

use crate::Schema;
use std::collections::HashMap;
use std::sync::Arc;

/// Schemas indexed for two-phase lookup, plus the entries registered
/// against each schema.
///
/// - Fixed-length schemas are grouped by component count.
/// - Open-wildcard schemas are grouped by their *floor*, the minimum token
///   count they accept. Callers scan floors from high to low themselves.
///
/// Generic over the entry type `E` so the index knows nothing of
/// predicates or handlers.
#[derive(Debug, Clone)]
pub struct RouteIndex<E> {
    by_length: HashMap<usize, Vec<Arc<Schema>>>,
    by_wildcard_floor: HashMap<usize, Vec<Arc<Schema>>>,
    slots: HashMap<String, Slot<E>>,
    /// Interned schemas in first-registration order.
    order: Vec<Arc<Schema>>,
}

#[derive(Debug, Clone)]
struct Slot<E> {
    schema: Arc<Schema>,
    entries: Vec<E>,
}

impl<E> Default for RouteIndex<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RouteIndex<E> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_length: HashMap::new(),
            by_wildcard_floor: HashMap::new(),
            slots: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Intern `schema`, returning the shared instance.
    ///
    /// The first schema with a given fingerprint is stored and placed in its
    /// length group. Later structurally equal schemas resolve to that first
    /// instance (so its pattern string is the one reported).
    pub fn intern(&mut self, schema: Schema) -> Arc<Schema> {
        if let Some(slot) = self.slots.get(schema.fingerprint()) {
            return Arc::clone(&slot.schema);
        }

        let schema = Arc::new(schema);
        let group = if schema.ends_in_wildcard() {
            &mut self.by_wildcard_floor
        } else {
            &mut self.by_length
        };
        group
            .entry(schema.len())
            .or_default()
            .push(Arc::clone(&schema));

        self.slots.insert(
            schema.fingerprint().to_owned(),
            Slot {
                schema: Arc::clone(&schema),
                entries: Vec::new(),
            },
        );
        self.order.push(Arc::clone(&schema));
        schema
    }

    /// Intern `schema` and append `entry` to its entry list.
    ///
    /// Returns the interned schema.
    pub fn add(&mut self, schema: Schema, entry: E) -> Arc<Schema> {
        self.add_with(schema, |_| entry)
    }

    /// Like [`add`](Self::add), but builds the entry from the interned schema.
    pub fn add_with<F>(&mut self, schema: Schema, make: F) -> Arc<Schema>
    where
        F: FnOnce(&Arc<Schema>) -> E,
    {
        let schema = self.intern(schema);
        let entry = make(&schema);
        if let Some(slot) = self.slots.get_mut(schema.fingerprint()) {
            slot.entries.push(entry);
        }
        schema
    }

    /// Fixed-length schemas with exactly `n` components, in registration order.
    #[must_use]
    pub fn candidates_for_exact_length(&self, n: usize) -> &[Arc<Schema>] {
        self.by_length.get(&n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Open-wildcard schemas whose floor is exactly `n`, in registration order.
    #[must_use]
    pub fn candidates_for_wildcard_floor(&self, n: usize) -> &[Arc<Schema>] {
        self.by_wildcard_floor.get(&n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries registered against `schema`, in registration order.
    ///
    /// Looks up by fingerprint, so any structurally equal schema works.
    #[must_use]
    pub fn entries_for(&self, schema: &Schema) -> &[E] {
        self.slots
            .get(schema.fingerprint())
            .map(|slot| slot.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Interned schemas in first-registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.order.iter()
    }

    /// Number of interned schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.order.len()
    }

    /// Total number of entries across all schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.values().map(|slot| slot.entries.len()).sum()
    }

    /// Returns `true` if no entries have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
