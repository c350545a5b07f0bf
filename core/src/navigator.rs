//! Navigator — owns a router and the current root handler.

use crate::{Handler, Router};

/// Opens paths and URLs by dispatching them through a [`Router`], keeping
/// the most recently produced handler as the root.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use waypost::{construct, Handler, Navigator, Router};
///
/// struct Home;
/// impl Handler for Home {
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// let mut router = Router::new();
/// router.route("/", construct(|| Home)).unwrap();
///
/// let mut nav = Navigator::new(router);
/// assert!(nav.launch());
/// assert!(nav.root().is_some_and(|h| h.as_any().is::<Home>()));
/// assert!(!nav.open("/missing"));
/// ```
#[derive(Debug)]
pub struct Navigator {
    router: Router,
    root: Option<Box<dyn Handler>>,
}

impl Navigator {
    /// Wrap `router`. There is no root until something is opened.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self { router, root: None }
    }

    /// Dispatch `path`; on success the produced handler becomes the root.
    ///
    /// Returns whether the root was replaced. On a miss the current root is
    /// kept.
    pub fn open(&mut self, path: &str) -> bool {
        match self.router.dispatch(path) {
            Some(handler) => {
                tracing::debug!(path, "navigator root replaced");
                self.root = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Open the root path `/`.
    pub fn launch(&mut self) -> bool {
        self.open("/")
    }

    /// Open the path component of `url`.
    ///
    /// Scheme, host, query and fragment play no part in routing.
    pub fn open_url(&mut self, url: &url::Url) -> bool {
        self.open(url.path())
    }

    /// The current root handler.
    #[must_use]
    pub fn root(&self) -> Option<&dyn Handler> {
        self.root.as_deref()
    }

    /// Take the current root handler, leaving none.
    pub fn take_root(&mut self) -> Option<Box<dyn Handler>> {
        self.root.take()
    }

    /// The underlying router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }
}
