//! Dispatch front: path in, handler response out.
//!
//! The dispatcher owns a [`Router`] and a [`HandlerRegistry`]. For each
//! request it matches the path, resolves the matched route's handler
//! reference (running a deferred factory on first use), and invokes the
//! handler operation for the request verb.

use crate::handler::HandlerResponse;
use crate::registry::HandlerRegistry;
use crate::router::Router;
use http::Method;
use tracing::{debug, error};

/// Routes requests to resolved handlers.
///
/// Immutable after construction; safe to share across concurrent
/// request-handling units without locking.
#[derive(Debug)]
pub struct Dispatcher {
    router: Router,
    registry: HandlerRegistry,
}

impl Dispatcher {
    /// Create a dispatcher from a populated router and registry.
    #[must_use]
    pub fn new(router: Router, registry: HandlerRegistry) -> Self {
        Self { router, registry }
    }

    /// The underlying router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The underlying handler registry.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Match a path and invoke the handler operation for `method`.
    ///
    /// Returns `None` when no route matches (the caller's 404) or when the
    /// matched route's deferred handler name is not registered; the latter
    /// is a configuration bug and is logged as an error. A verb the handler
    /// does not implement yields its 405 default response.
    #[must_use]
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<HandlerResponse> {
        let route_match = self.router.match_path(path)?;

        debug!(
            path = %path,
            route_pattern = %route_match.route.path(),
            handler = ?route_match.route.handler(),
            "Handler lookup"
        );

        let handler = match route_match.route.handler().resolve(&self.registry) {
            Some(handler) => handler,
            None => {
                error!(
                    path = %path,
                    route_pattern = %route_match.route.path(),
                    handler = ?route_match.route.handler(),
                    registered_handlers = self.registry.len(),
                    "Handler not registered"
                );
                return None;
            }
        };

        Some(handler.handle(method, &route_match.params))
    }
}
