//! waypost-test: Test domain for conformance testing
//!
//! Provides label handlers that record the match they were built for, and
//! a binding registry that resolves every handler name in a route table to
//! such a label.
//!
//! # Example
//!
//! ```
//! use waypost_test::prelude::*;
//!
//! let config: RouteTableConfig = serde_yaml::from_str(
//!     "routes:\n  - path: /match/:id\n    handler: match\n",
//! )
//! .unwrap();
//!
//! let router = Router::load(&config, &label_bindings(&config)).unwrap();
//! let handler = router.dispatch("/match/42").unwrap();
//!
//! let label = LabelHandler::from_handler(handler.as_ref()).unwrap();
//! assert_eq!(label.label(), "match");
//! assert_eq!(label.param("id"), Some("42"));
//! ```

use std::any::Any;
use waypost::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// A handler identified by a label, recording the bundle it was notified
/// with.
#[derive(Debug, Clone, Default)]
pub struct LabelHandler {
    label: String,
    bundle: Option<RouteBundle>,
    notifications: usize,
}

impl LabelHandler {
    /// Create an un-notified handler.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Downcast a produced handler.
    #[must_use]
    pub fn from_handler(handler: &dyn Handler) -> Option<&Self> {
        handler.as_any().downcast_ref::<Self>()
    }

    /// The label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The bundle received via notification, if any.
    #[must_use]
    pub fn bundle(&self) -> Option<&RouteBundle> {
        self.bundle.as_ref()
    }

    /// A parameter from the received bundle.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.bundle.as_ref()?.get(name).map(String::as_str)
    }

    /// How many times the handler was notified.
    #[must_use]
    pub fn notifications(&self) -> usize {
        self.notifications
    }
}

impl Handler for LabelHandler {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_match_aware(&mut self) -> Option<&mut dyn MatchAware> {
        Some(self)
    }
}

impl MatchAware for LabelHandler {
    fn on_match(&mut self, route: &RouteMatch<'_>) {
        self.bundle = Some(route.bundle().clone());
        self.notifications += 1;
    }
}

/// Binding that produces a notified [`LabelHandler`].
#[derive(Debug, Clone)]
pub struct LabelBinding {
    label: String,
}

impl LabelBinding {
    /// Bind to handlers labelled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl HandlerBinding for LabelBinding {
    fn instantiate(&self, route: &RouteMatch<'_>) -> Option<Box<dyn Handler>> {
        let mut handler: Box<dyn Handler> = Box::new(LabelHandler::new(self.label.as_str()));
        waypost::notify(handler.as_mut(), route);
        Some(handler)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// A registry binding every handler name in `config` to a [`LabelBinding`]
/// of the same name.
#[must_use]
pub fn label_bindings(config: &RouteTableConfig) -> BindingRegistry {
    config
        .routes
        .iter()
        .fold(BindingRegistry::builder(), |builder, route| {
            builder.binding(route.handler.as_str(), LabelBinding::new(route.handler.as_str()))
        })
        .build()
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{label_bindings, LabelBinding, LabelHandler};
    pub use waypost::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> RouteTableConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn label_handler_records_bundle_once() {
        let mut router = Router::new();
        router.route("/match/:id", LabelBinding::new("match")).unwrap();

        let handler = router.dispatch("/match/7").unwrap();
        let label = LabelHandler::from_handler(handler.as_ref()).unwrap();
        assert_eq!(label.label(), "match");
        assert_eq!(label.param("id"), Some("7"));
        assert_eq!(label.notifications(), 1);
    }

    #[test]
    fn label_bindings_cover_every_handler_name() {
        let table = config(
            "routes:\n  - path: /a\n    handler: alpha\n  - path: /b\n    handler: beta\n  - path: /c\n    handler: alpha\n",
        );
        let registry = label_bindings(&table);
        assert_eq!(registry.names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn un_notified_handler_has_no_bundle() {
        let handler = LabelHandler::new("plain");
        assert!(handler.bundle().is_none());
        assert_eq!(handler.param("id"), None);
    }
}
