//! Handler binding — how a match becomes a handler instance.
//!
//! The router never constructs handlers itself. Each route carries a
//! [`HandlerBinding`] that produces a [`Handler`] for a [`RouteMatch`] and
//! then *notifies* it: if the handler exposes the [`MatchAware`] capability,
//! its [`on_match`](MatchAware::on_match) hook receives the match.
//!
//! Two standard strategies:
//!
//! | Strategy | Constructor | Produces the handler by |
//! |----------|-------------|-------------------------|
//! | Direct | [`construct`] | calling a constructor closure |
//! | Declarative | [`template`], [`from_template`] | asking a [`TemplateCatalog`] for `(group, id)` |
//!
//! Any closure `Fn(&RouteMatch) -> Option<Box<dyn Handler>>` can be wrapped
//! with [`FnBinding`] for everything else.

use crate::RouteMatch;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// An object produced for a matched route.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use waypost::{Handler, MatchAware, RouteMatch};
///
/// #[derive(Default)]
/// struct MatchScreen {
///     id: Option<String>,
/// }
///
/// impl Handler for MatchScreen {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_match_aware(&mut self) -> Option<&mut dyn MatchAware> {
///         Some(self)
///     }
/// }
///
/// impl MatchAware for MatchScreen {
///     fn on_match(&mut self, route: &RouteMatch<'_>) {
///         self.id = route.param("id").map(str::to_owned);
///     }
/// }
/// ```
pub trait Handler: Any {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Capability query: `Some` if this handler wants match notifications.
    fn as_match_aware(&mut self) -> Option<&mut dyn MatchAware> {
        None
    }
}

impl dyn Handler {
    /// Downcast to a concrete handler type.
    #[must_use]
    pub fn downcast_ref<T: Handler>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the handler is a `T`.
    #[must_use]
    pub fn is<T: Handler>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("type_id", &self.as_any().type_id())
            .finish_non_exhaustive()
    }
}

/// Post-construction hook for handlers that consume the match.
pub trait MatchAware {
    /// Receive the match that produced this handler.
    fn on_match(&mut self, route: &RouteMatch<'_>);
}

/// Deliver `route` to `handler` if it is [`MatchAware`]; otherwise do nothing.
pub fn notify(handler: &mut dyn Handler, route: &RouteMatch<'_>) {
    if let Some(aware) = handler.as_match_aware() {
        aware.on_match(route);
    }
}

/// Produces a handler for a match.
///
/// Returning `None` means the binding could not produce a handler (for
/// instance an unknown template); dispatch then yields `None`.
pub trait HandlerBinding: Send + Sync {
    /// Produce (and notify) a handler for `route`.
    fn instantiate(&self, route: &RouteMatch<'_>) -> Option<Box<dyn Handler>>;

    /// A descriptive name for debugging.
    fn name(&self) -> &str {
        "binding"
    }
}

impl fmt::Debug for dyn HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerBinding").field(&self.name()).finish()
    }
}

impl<B: HandlerBinding + ?Sized> HandlerBinding for Arc<B> {
    fn instantiate(&self, route: &RouteMatch<'_>) -> Option<Box<dyn Handler>> {
        (**self).instantiate(route)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Closure binding
// ═══════════════════════════════════════════════════════════════════════════════

/// A binding backed by a closure. The closure is responsible for notifying.
pub struct FnBinding<F> {
    name: String,
    func: F,
}

impl<F> FnBinding<F>
where
    F: Fn(&RouteMatch<'_>) -> Option<Box<dyn Handler>> + Send + Sync,
{
    /// Wrap `func` under `name`.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> HandlerBinding for FnBinding<F>
where
    F: Fn(&RouteMatch<'_>) -> Option<Box<dyn Handler>> + Send + Sync,
{
    fn instantiate(&self, route: &RouteMatch<'_>) -> Option<Box<dyn Handler>> {
        (self.func)(route)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Direct construction
// ═══════════════════════════════════════════════════════════════════════════════

/// Binding that constructs a handler directly. See [`construct`].
pub struct Construct<F, T> {
    ctor: F,
    type_name: &'static str,
    _handler: PhantomData<fn() -> T>,
}

/// Bind a route to a handler built by `ctor`, then notified.
///
/// ```ignore
/// router.route("/match/:id", construct(MatchScreen::default))?;
/// ```
pub fn construct<T, F>(ctor: F) -> Construct<F, T>
where
    T: Handler,
    F: Fn() -> T + Send + Sync,
{
    Construct {
        ctor,
        type_name: std::any::type_name::<T>(),
        _handler: PhantomData,
    }
}

impl<T, F> HandlerBinding for Construct<F, T>
where
    T: Handler,
    F: Fn() -> T + Send + Sync,
{
    fn instantiate(&self, route: &RouteMatch<'_>) -> Option<Box<dyn Handler>> {
        let mut handler: Box<dyn Handler> = Box::new((self.ctor)());
        notify(handler.as_mut(), route);
        Some(handler)
    }

    fn name(&self) -> &str {
        self.type_name
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Declarative (template) construction
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of pre-declared handlers, addressed by group and identifier.
///
/// The embedding application implements this over whatever declarative
/// resources it has; [`TemplateRegistry`] is an in-memory implementation.
pub trait TemplateCatalog: Send + Sync {
    /// Instantiate the handler declared as `id` inside `group`.
    fn instantiate(&self, group: &str, id: &str) -> Option<Box<dyn Handler>>;
}

/// A handler type that declares its own template address.
pub trait FromTemplate: Handler {
    /// Identifier of the template inside its group.
    const TEMPLATE_ID: &'static str;
    /// Group holding the template.
    const TEMPLATE_GROUP: &'static str;
}

/// Binding that instantiates a template from a catalog. See [`template`].
pub struct Template {
    catalog: Arc<dyn TemplateCatalog>,
    id: String,
    group: String,
    name: String,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Bind a route to template `id` in `group` of `catalog`, then notified.
pub fn template(
    catalog: Arc<dyn TemplateCatalog>,
    id: impl Into<String>,
    group: impl Into<String>,
) -> Template {
    let id = id.into();
    let group = group.into();
    Template {
        name: format!("{group}/{id}"),
        catalog,
        id,
        group,
    }
}

/// Bind a route to the template `T` declares for itself.
pub fn from_template<T: FromTemplate>(catalog: Arc<dyn TemplateCatalog>) -> Template {
    template(catalog, T::TEMPLATE_ID, T::TEMPLATE_GROUP)
}

impl HandlerBinding for Template {
    fn instantiate(&self, route: &RouteMatch<'_>) -> Option<Box<dyn Handler>> {
        let mut handler = TemplateCatalog::instantiate(&*self.catalog, &self.group, &self.id)?;
        notify(handler.as_mut(), route);
        Some(handler)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

type TemplateCtor = Box<dyn Fn() -> Box<dyn Handler> + Send + Sync>;

/// In-memory [`TemplateCatalog`].
///
/// ```
/// # use std::any::Any;
/// # use waypost::{Handler, TemplateCatalog, TemplateRegistry};
/// # #[derive(Default)] struct Settings;
/// # impl Handler for Settings { fn as_any(&self) -> &dyn Any { self } }
/// let catalog = TemplateRegistry::builder()
///     .template("Main", "settings", || Box::new(Settings))
///     .build();
/// assert!(catalog.instantiate("Main", "settings").is_some());
/// assert!(catalog.instantiate("Main", "missing").is_none());
/// ```
#[derive(Default)]
pub struct TemplateRegistry {
    templates: HashMap<(String, String), TemplateCtor>,
}

impl TemplateRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> TemplateRegistryBuilder {
        TemplateRegistryBuilder::default()
    }

    /// Returns `true` if `(group, id)` is declared.
    #[must_use]
    pub fn contains(&self, group: &str, id: &str) -> bool {
        self.templates
            .contains_key(&(group.to_owned(), id.to_owned()))
    }

    /// Number of declared templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateCatalog for TemplateRegistry {
    fn instantiate(&self, group: &str, id: &str) -> Option<Box<dyn Handler>> {
        self.templates
            .get(&(group.to_owned(), id.to_owned()))
            .map(|ctor| ctor())
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .templates
            .keys()
            .map(|(group, id)| format!("{group}/{id}"))
            .collect();
        keys.sort();
        f.debug_struct("TemplateRegistry")
            .field("templates", &keys)
            .finish()
    }
}

/// Builder for [`TemplateRegistry`].
#[derive(Default)]
pub struct TemplateRegistryBuilder {
    templates: HashMap<(String, String), TemplateCtor>,
}

impl TemplateRegistryBuilder {
    /// Declare template `id` in `group`. A repeated declaration replaces the
    /// earlier one.
    #[must_use]
    pub fn template<F>(mut self, group: impl Into<String>, id: impl Into<String>, ctor: F) -> Self
    where
        F: Fn() -> Box<dyn Handler> + Send + Sync + 'static,
    {
        self.templates
            .insert((group.into(), id.into()), Box::new(ctor));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> TemplateRegistry {
        TemplateRegistry {
            templates: self.templates,
        }
    }
}
