//! Router core: ordered first-match dispatch and name-based reverse lookup.

use crate::error::{BuildError, TemplateError};
use crate::handler::HandlerRef;
use crate::params::ParamMap;
use crate::router::Route;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (`Arc` to avoid expensive clones).
    pub route: Arc<Route>,
    /// Merged parameter map: route defaults overlaid with captured values.
    pub params: ParamMap,
}

impl RouteMatch {
    /// Get a merged parameter by name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Get a merged parameter by name as a string slice.
    #[inline]
    #[must_use]
    pub fn get_param_str(&self, name: &str) -> Option<&str> {
        self.params.get_str(name)
    }
}

/// Ordered collection of routes with forward and reverse resolution.
///
/// Priority is declaration order: `match_path` tests routes in the order
/// they were added and returns the first hit, regardless of specificity.
/// Routes are never merged or reordered. The name index maps logical names
/// to routes for reverse URL building; a later route registered under an
/// existing name silently takes over that name (last wins).
///
/// The router is intended to be fully populated during single-threaded
/// startup and shared read-only afterwards; matching and building never
/// mutate it.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Arc<Route>>,
    names: HashMap<String, Arc<Route>>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a template and append the resulting route.
    ///
    /// Convenience over [`add_route`](Self::add_route) mirroring the
    /// declarative route-table shape: path, handler, optional name,
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the path template is malformed.
    pub fn add(
        &mut self,
        path: &str,
        handler: HandlerRef,
        name: Option<&str>,
        defaults: ParamMap,
    ) -> Result<(), TemplateError> {
        let mut route = Route::new(path, handler)?.with_defaults(defaults);
        if let Some(name) = name {
            route = route.named(name);
        }
        self.add_route(route);
        Ok(())
    }

    /// Append an already constructed route.
    ///
    /// Routes are matched in the order they are added; the first route added
    /// always wins ties. If the route carries a logical name that is already
    /// indexed, the index entry is overwritten (last wins) with a warning.
    pub fn add_route(&mut self, route: Route) {
        let route = Arc::new(route);
        if let Some(name) = route.name() {
            if self
                .names
                .insert(name.to_string(), route.clone())
                .is_some()
            {
                warn!(
                    route_name = %name,
                    path = %route.path(),
                    "Replaced existing route name - reverse lookups now resolve to the later route"
                );
            }
        }
        debug!(
            path = %route.path(),
            route_name = route.name(),
            total_routes = self.routes.len() + 1,
            "Route registered"
        );
        self.routes.push(route);
    }

    /// Match a request path against all routes in registration order.
    ///
    /// Short-circuits on the first hit. Returns `None` when no route
    /// matches; that is a normal result (the caller's 404), not an error.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        debug!(path = %path, routes_count = self.routes.len(), "Route match attempt");

        for route in &self.routes {
            if let Some(params) = route.matches(path) {
                info!(
                    path = %path,
                    route_pattern = %route.path(),
                    route_name = route.name(),
                    params = ?params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    route: route.clone(),
                    params,
                });
            }
        }

        debug!(path = %path, "No route matched");
        None
    }

    /// Build a URL for a named route.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownRoute`] when the name was never registered;
    /// otherwise whatever [`Route::build`] reports.
    pub fn build(&self, name: &str, params: ParamMap) -> Result<String, BuildError> {
        let route = self
            .names
            .get(name)
            .ok_or_else(|| BuildError::UnknownRoute(name.to_string()))?;
        route.build(params)
    }

    /// Look up a route by logical name.
    #[must_use]
    pub fn route_by_name(&self, name: &str) -> Option<&Arc<Route>> {
        self.names.get(name)
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print all registered routes to stdout.
    ///
    /// Useful for verifying the route table loaded in the intended order.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} -> {:?} (name: {})",
                route.path(),
                route.handler(),
                route.name().unwrap_or("-")
            );
        }
    }
}
