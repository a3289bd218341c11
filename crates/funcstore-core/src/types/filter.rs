//! Filters for listing applications and routes.

use std::fmt;
use std::sync::Arc;

use super::Route;

/// Filter for listing applications.
///
/// Application listing always returns every application; the filter is
/// accepted so both listings share a shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFilter {
    /// Application name, reserved.
    pub name: Option<String>,
}

impl AppFilter {
    /// A filter that selects every application.
    pub fn all() -> Self {
        Self::default()
    }
}

type RoutePredicate = Arc<dyn Fn(&Route) -> bool + Send + Sync>;

/// Filter for listing the routes of one application.
///
/// A route matches when every criterion that is set holds.
///
/// ```
/// use funcstore_core::{Route, RouteFilter};
///
/// let filter = RouteFilter::new("myapp").with_predicate(|r| r.memory > 256);
///
/// assert!(filter.matches(&Route::new("myapp", "/big").with_memory(512)));
/// assert!(!filter.matches(&Route::new("myapp", "/small")));
/// ```
#[derive(Clone)]
pub struct RouteFilter {
    /// Application whose routes are listed.
    pub app_name: String,
    /// Exact route name.
    pub path: Option<String>,
    /// Exact image.
    pub image: Option<String>,
    predicate: Option<RoutePredicate>,
}

impl RouteFilter {
    /// A filter selecting every route of `app_name`.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self { app_name: app_name.into(), path: None, image: None, predicate: None }
    }

    /// Only match the route with this name.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Only match routes running this image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Only match routes for which `predicate` returns `true`.
    #[must_use]
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Route) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Check a route against every criterion of the filter.
    pub fn matches(&self, route: &Route) -> bool {
        route.app_name == self.app_name
            && self.path.as_ref().map_or(true, |path| &route.name == path)
            && self.image.as_ref().map_or(true, |image| &route.image == image)
            && self.predicate.as_ref().map_or(true, |predicate| predicate(route))
    }
}

impl fmt::Debug for RouteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteFilter")
            .field("app_name", &self.app_name)
            .field("path", &self.path)
            .field("image", &self.image)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
