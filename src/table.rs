//! Declarative route tables.
//!
//! A route table is an ordered sequence of route specifications supplied by
//! the surrounding application at startup, either built in code or loaded
//! from a YAML/JSON file. Each spec carries a path template, a handler
//! registry key, an optional logical name, and optional defaults; the order
//! of the sequence is the match priority.

use crate::error::TemplateError;
use crate::handler::HandlerRef;
use crate::params::ParamMap;
use crate::router::{Route, Router};
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// One declarative route specification.
///
/// Mirrors the tuple forms of the route table: `(path, handler)`,
/// `(path, handler, name)`, and `(path, handler, name, defaults)`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSpec {
    /// Path template, e.g. `/blog/archive/{year:\d\d\d\d}/{slug}`.
    pub path: String,
    /// Handler registry key, resolved lazily on first dispatch.
    pub handler: String,
    /// Optional logical name for reverse URL building.
    #[serde(default)]
    pub name: Option<String>,
    /// Default parameter values.
    #[serde(default)]
    pub defaults: serde_json::Map<String, Value>,
}

impl RouteSpec {
    /// `(path, handler)` form.
    #[must_use]
    pub fn new(path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: handler.into(),
            name: None,
            defaults: serde_json::Map::new(),
        }
    }

    /// Add a logical name: the `(path, handler, name)` form.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a default value: the `(path, handler, name, defaults)` form.
    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }
}

/// Translate an ordered list of route specs into a populated [`Router`].
///
/// Declaration order is preserved: the first spec in the list is the first
/// route tried on every match.
///
/// # Errors
///
/// Returns [`TemplateError`] for the first malformed path template; the
/// table is fixed configuration, so this is fatal at startup.
pub fn build_router(specs: impl IntoIterator<Item = RouteSpec>) -> Result<Router, TemplateError> {
    let mut router = Router::new();
    for spec in specs {
        let mut route = Route::new(&spec.path, HandlerRef::deferred(spec.handler.as_str()))?;
        if let Some(name) = spec.name {
            route = route.named(name);
        }
        if !spec.defaults.is_empty() {
            let defaults: ParamMap = spec.defaults.into_iter().collect();
            route = route.with_defaults(defaults);
        }
        router.add_route(route);
    }
    info!(routes_count = router.len(), "Route table loaded");
    Ok(router)
}

/// Load a route table from a YAML or JSON file.
///
/// The extension picks the format: `.yaml`/`.yml` parse as YAML, anything
/// else as JSON. The file holds an ordered list of specs:
///
/// ```yaml
/// - path: /blog/archive/{year:\d\d\d\d}/{slug}
///   handler: blog_item
///   name: blog/item
/// - path: /docs/{page}
///   handler: docs
///   defaults:
///     lang: en
/// ```
///
/// # Errors
///
/// I/O and parse failures, with the file path attached for context.
pub fn load_table(path: impl AsRef<Path>) -> anyhow::Result<Vec<RouteSpec>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let specs: Vec<RouteSpec> = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid route table {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid route table {}", path.display()))?
    };

    Ok(specs)
}

/// Load a route table file and build a router from it in one step.
///
/// # Errors
///
/// File-level failures from [`load_table`] or compilation failures from
/// [`build_router`].
pub fn load_router(path: impl AsRef<Path>) -> anyhow::Result<Router> {
    let specs = load_table(path)?;
    Ok(build_router(specs)?)
}
