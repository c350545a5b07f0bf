//! Declarative route tables.
//!
//! These types mirror [`Router`] registration but are serde-deserializable,
//! so a route table can live in YAML or JSON and be loaded with
//! [`Router::load`]. Handler names resolve through a [`BindingRegistry`].
//!
//! | Config type | Runtime type |
//! |-------------|--------------|
//! | [`RouteTableConfig`] | [`Router`] |
//! | [`RouteConfig`] | one [`RouteEntry`](crate::RouteEntry) |
//! | [`GuardConfig`] | [`Guard`] |
//!
//! ```yaml
//! routes:
//!   - path: /match/:id
//!     handler: match
//!     where:
//!       - type: param
//!         name: id
//!         value_match: { regex: "^[0-9]+$" }
//!   - path: /match/*
//!     handler: fallback
//! ```

use crate::{
    Guard, HandlerBinding, Predicate, Router, RouterError, Schema, StringMatchSpec,
    MAX_GUARDS_PER_COMPOUND, MAX_GUARD_DEPTH, MAX_PATTERN_LENGTH, MAX_REGEX_PATTERN_LENGTH,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A whole route table.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteTableConfig {
    /// Routes in registration order.
    pub routes: Vec<RouteConfig>,
}

/// One route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// The pattern, e.g. `/match/:id`.
    pub path: String,

    /// Name of a binding in the [`BindingRegistry`].
    pub handler: String,

    /// Guards evaluated in order; all must pass.
    #[serde(default, rename = "where")]
    pub guards: Vec<GuardConfig>,
}

/// Configuration for a [`Guard`].
///
/// ```json
/// { "type": "param", "name": "id", "value_match": { "exact": "1" } }
/// { "type": "all", "guards": [...] }
/// { "type": "any", "guards": [...] }
/// { "type": "not", "guard": { ... } }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuardConfig {
    /// A captured parameter must match.
    Param {
        /// Parameter name.
        name: String,
        /// How to match its value.
        value_match: StringMatchSpec,
    },
    /// Every child must pass.
    All {
        /// Children.
        guards: Vec<GuardConfig>,
    },
    /// At least one child must pass.
    Any {
        /// Children.
        guards: Vec<GuardConfig>,
    },
    /// The inner guard must fail.
    Not {
        /// The guard to negate.
        guard: Box<GuardConfig>,
    },
}

impl GuardConfig {
    /// Compile into a runtime [`Guard`], enforcing load-time limits.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPattern`] for an invalid regex
    /// - [`RouterError::PatternTooLong`] for an oversized match value
    /// - [`RouterError::TooManyGuards`] for an oversized `all`/`any`
    /// - [`RouterError::DepthExceeded`] past [`MAX_GUARD_DEPTH`]
    pub fn compile(&self) -> Result<Guard, RouterError> {
        self.compile_at(1)
    }

    fn compile_at(&self, depth: usize) -> Result<Guard, RouterError> {
        if depth > MAX_GUARD_DEPTH {
            return Err(RouterError::DepthExceeded {
                depth,
                max: MAX_GUARD_DEPTH,
            });
        }
        match self {
            Self::Param { name, value_match } => {
                check_pattern_length(value_match)?;
                Ok(Guard::param(name.as_str(), value_match.compile()?))
            }
            Self::All { guards } => Ok(Guard::All(compile_children(guards, depth)?)),
            Self::Any { guards } => Ok(Guard::Any(compile_children(guards, depth)?)),
            Self::Not { guard } => Ok(Guard::Not(Box::new(guard.compile_at(depth + 1)?))),
        }
    }
}

fn compile_children(guards: &[GuardConfig], depth: usize) -> Result<Vec<Guard>, RouterError> {
    if guards.len() > MAX_GUARDS_PER_COMPOUND {
        return Err(RouterError::TooManyGuards {
            count: guards.len(),
            max: MAX_GUARDS_PER_COMPOUND,
        });
    }
    guards.iter().map(|g| g.compile_at(depth + 1)).collect()
}

fn check_pattern_length(spec: &StringMatchSpec) -> Result<(), RouterError> {
    let (len, max) = match spec {
        StringMatchSpec::Regex(pattern) => (pattern.len(), MAX_REGEX_PATTERN_LENGTH),
        StringMatchSpec::Exact(v)
        | StringMatchSpec::Prefix(v)
        | StringMatchSpec::Suffix(v)
        | StringMatchSpec::Contains(v) => (v.len(), MAX_PATTERN_LENGTH),
    };
    if len > max {
        return Err(RouterError::PatternTooLong { len, max });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Binding registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Named handler bindings that route tables refer to.
///
/// Constructed via [`BindingRegistry::builder`]; immutable afterwards.
#[derive(Default)]
pub struct BindingRegistry {
    bindings: HashMap<String, Arc<dyn HandlerBinding>>,
}

impl BindingRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> BindingRegistryBuilder {
        BindingRegistryBuilder::default()
    }

    /// The binding registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn HandlerBinding>> {
        self.bindings.get(name)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn resolve(&self, name: &str) -> Result<Arc<dyn HandlerBinding>, RouterError> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| RouterError::UnknownHandler {
                name: name.to_owned(),
                available: self.names().into_iter().map(str::to_owned).collect(),
            })
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Builder for [`BindingRegistry`].
#[derive(Default)]
pub struct BindingRegistryBuilder {
    bindings: HashMap<String, Arc<dyn HandlerBinding>>,
}

impl BindingRegistryBuilder {
    /// Register `binding` under `name`. A repeated name replaces the
    /// earlier binding.
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, binding: impl HandlerBinding + 'static) -> Self {
        self.bindings.insert(name.into(), Arc::new(binding));
        self
    }

    /// Freeze into a [`BindingRegistry`].
    #[must_use]
    pub fn build(self) -> BindingRegistry {
        BindingRegistry {
            bindings: self.bindings,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

impl Router {
    /// Build a router from a route table.
    ///
    /// # Errors
    ///
    /// See [`extend_from_config`](Self::extend_from_config).
    pub fn load(config: &RouteTableConfig, bindings: &BindingRegistry) -> Result<Self, RouterError> {
        let mut router = Self::new();
        router.extend_from_config(config, bindings)?;
        Ok(router)
    }

    /// Register every route of `config`, in order.
    ///
    /// All patterns, guards and handler names are resolved before anything
    /// is inserted, so on error the router is unchanged.
    ///
    /// # Errors
    ///
    /// - [`RouterError::BadSchema`] for a pattern that does not compile
    /// - [`RouterError::UnknownHandler`] for an unregistered handler name
    /// - any error from [`GuardConfig::compile`]
    pub fn extend_from_config(
        &mut self,
        config: &RouteTableConfig,
        bindings: &BindingRegistry,
    ) -> Result<(), RouterError> {
        let resolved = config
            .routes
            .iter()
            .map(|route| -> Result<_, RouterError> {
                let schema = Schema::compile(&route.path)?;
                let binding = bindings.resolve(&route.handler)?;
                let predicates = route
                    .guards
                    .iter()
                    .map(|g| g.compile().map(|guard| Box::new(guard) as Box<dyn Predicate>))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((schema, predicates, binding))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (schema, predicates, binding) in resolved {
            self.insert(schema, predicates, Some(binding));
        }
        Ok(())
    }
}
