//! Handler interface and responses.
//!
//! A handler exposes one operation per allowed HTTP method (get, post, head,
//! options, put, delete, trace). Every operation has a default implementation
//! returning a 405 "method not allowed" response, so a handler only implements
//! the verbs it actually supports; there is no dynamic method lookup anywhere.

use crate::params::ParamMap;
use crate::registry::HandlerRegistry;
use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum inline response headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 8;

/// Stack-allocated response header storage.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Response produced by a handler operation.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// Response headers (stack-allocated for ≤8 headers)
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    /// Create a response with the given status and body, no headers.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body,
        }
    }

    /// Create a JSON response with a content-type header.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create an error response with a JSON `{"error": message}` body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// The response every unimplemented handler operation returns.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::error(405, "method not allowed")
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// A request handler with one operation per allowed HTTP method.
///
/// Implementations override the verbs they support; everything else answers
/// 405. Handlers are shared read-only across concurrent matchers, hence
/// `Send + Sync`.
#[allow(unused_variables)]
pub trait Handler: Send + Sync {
    /// Handle a GET request.
    fn get(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Handle a POST request.
    fn post(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Handle a HEAD request.
    fn head(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Handle an OPTIONS request.
    fn options(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Handle a PUT request.
    fn put(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Handle a DELETE request.
    fn delete(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Handle a TRACE request.
    fn trace(&self, params: &ParamMap) -> HandlerResponse {
        HandlerResponse::method_not_allowed()
    }

    /// Route a request to the operation for `method`.
    ///
    /// Verbs outside the allowed set answer 405, same as an unimplemented
    /// operation.
    fn handle(&self, method: &Method, params: &ParamMap) -> HandlerResponse {
        match method.as_str() {
            "GET" => self.get(params),
            "POST" => self.post(params),
            "HEAD" => self.head(params),
            "OPTIONS" => self.options(params),
            "PUT" => self.put(params),
            "DELETE" => self.delete(params),
            "TRACE" => self.trace(params),
            _ => HandlerResponse::method_not_allowed(),
        }
    }
}

/// Reference to a route's handler.
///
/// Routes either carry a live handler or the name of one registered with a
/// [`HandlerRegistry`], resolved on first dispatch and reused for the process
/// lifetime.
#[derive(Clone)]
pub enum HandlerRef {
    /// A handler supplied directly at route-definition time.
    Direct(Arc<dyn Handler>),
    /// A registry key resolved lazily through [`HandlerRegistry::resolve`].
    Deferred(Arc<str>),
}

impl HandlerRef {
    /// Wrap a live handler.
    pub fn direct(handler: impl Handler + 'static) -> Self {
        Self::Direct(Arc::new(handler))
    }

    /// Refer to a handler by registry key.
    pub fn deferred(name: impl Into<Arc<str>>) -> Self {
        Self::Deferred(name.into())
    }

    /// Resolve to a live handler, consulting the registry for deferred refs.
    ///
    /// Returns `None` when a deferred name is not registered.
    #[must_use]
    pub fn resolve(&self, registry: &HandlerRegistry) -> Option<Arc<dyn Handler>> {
        match self {
            Self::Direct(handler) => Some(handler.clone()),
            Self::Deferred(name) => registry.resolve(name),
        }
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("Direct(..)"),
            Self::Deferred(name) => write!(f, "Deferred({name:?})"),
        }
    }
}
