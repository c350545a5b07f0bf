//! waypost - declarative path routing
//!
//! Maps slash-separated paths (in-app deep links, URL paths) to handlers.
//! Patterns carry named parameters (`:id`) and wildcards (`*`); several
//! routes may share one pattern shape and be told apart by predicates.
//!
//! # Architecture
//!
//! - [`tokenize`] - path string to ordered segment tokens
//! - [`Schema`] - compiled pattern with a structural fingerprint
//! - [`Schema::match_tokens`] - structural match, capturing a [`RouteBundle`]
//! - [`RouteIndex`] - schemas grouped by length and by wildcard floor
//! - [`Router`] - two-phase lookup with predicate-gated entries
//! - [`HandlerBinding`] - turns a [`RouteMatch`] into a [`Handler`]
//!
//! # Key Design Insights
//!
//! 1. **Fingerprint identity**: `/match/:id` and `/match/:slug` are the same
//!    schema. Their entries accumulate against one interned [`Schema`] and
//!    are tried in registration order.
//!
//! 2. **Exact before wildcard**: fixed-length schemas are tried first; only
//!    then open wildcards, from the longest floor down.
//!
//! 3. **First passing entry wins**: predicates short-circuit, and the first
//!    entry whose predicates all pass ends the lookup.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use waypost::prelude::*;
//!
//! #[derive(Default)]
//! struct MatchScreen {
//!     id: Option<String>,
//! }
//!
//! impl Handler for MatchScreen {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!
//!     fn as_match_aware(&mut self) -> Option<&mut dyn MatchAware> {
//!         Some(self)
//!     }
//! }
//!
//! impl MatchAware for MatchScreen {
//!     fn on_match(&mut self, route: &RouteMatch<'_>) {
//!         self.id = route.param("id").map(str::to_owned);
//!     }
//! }
//!
//! let mut router = Router::new();
//! router
//!     .register(
//!         "/match/:id",
//!         vec![Box::new(Guard::param("id", StringMatch::regex("^[0-9]+$").unwrap()))],
//!         construct(MatchScreen::default),
//!     )
//!     .unwrap();
//!
//! let handler = router.dispatch("/match/42").unwrap();
//! let screen = handler.as_any().downcast_ref::<MatchScreen>().unwrap();
//! assert_eq!(screen.id.as_deref(), Some("42"));
//!
//! assert!(router.dispatch("/match/abc").is_none());
//! ```
//!
//! # Features
//!
//! - `config` - serde-deserializable route tables ([`RouteTableConfig`],
//!   [`Router::load`])

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod binding;
mod error;
mod index;
mod matching;
mod navigator;
mod predicate;
mod route;
mod router;
mod schema;
mod string_match;
mod tokenizer;
mod trace;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use error::RouterError;
pub use index::RouteIndex;
pub use matching::RouteBundle;
pub use navigator::Navigator;
pub use route::{RouteEntry, RouteMatch, RouteSpec};
pub use router::Router;
pub use schema::{Component, Parameter, Schema};
pub use tokenizer::{tokenize, OPEN_WILDCARD_SENTINEL, WILDCARD};

// Predicates
pub use predicate::{FnPredicate, Guard, ParamGuard, Predicate};
pub use string_match::{StringMatch, StringMatchSpec};

// Handler binding
pub use binding::{
    construct, from_template, notify, template, Construct, FnBinding, FromTemplate, Handler,
    HandlerBinding, MatchAware, Template, TemplateCatalog, TemplateRegistry,
    TemplateRegistryBuilder,
};

// Trace types
pub use trace::{EntryTrace, LookupPhase, LookupStep, LookupTrace, MatchedRoute, PredicateTrace};

// Config (feature-gated)
#[cfg(feature = "config")]
pub use config::{BindingRegistry, BindingRegistryBuilder, GuardConfig, RouteConfig, RouteTableConfig};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        construct, from_template, template, FnPredicate, FromTemplate, Guard, Handler,
        HandlerBinding, MatchAware, Navigator, Predicate, RouteBundle, RouteMatch, RouteSpec,
        Router, RouterError, Schema, StringMatch, StringMatchSpec, TemplateCatalog,
        TemplateRegistry,
    };

    #[cfg(feature = "config")]
    pub use crate::{BindingRegistry, RouteTableConfig};
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum nesting depth of a guard tree loaded from a route table.
pub const MAX_GUARD_DEPTH: usize = 32;

/// Maximum number of children of a single `all` or `any` guard.
pub const MAX_GUARDS_PER_COMPOUND: usize = 256;

/// Maximum length for non-regex guard values (exact, prefix, suffix, contains).
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for guard regexes.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;
