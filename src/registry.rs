//! Lazy handler registry.
//!
//! Routes may refer to handlers by name instead of holding a live instance,
//! so expensive handler construction can be deferred until a route actually
//! dispatches. The registry owns the name → factory mapping explicitly; there
//! is no ambient global table. Resolution is memoized: the factory runs once,
//! on first lookup, and the resolved handler is reused for the rest of the
//! process lifetime.

use crate::handler::Handler;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type HandlerFactory = Box<dyn Fn() -> Arc<dyn Handler> + Send + Sync>;

struct Entry {
    factory: HandlerFactory,
    resolved: OnceCell<Arc<dyn Handler>>,
}

/// Registry mapping handler names to lazily constructed handlers.
///
/// Populated at startup, read-only afterwards; the only mutation after
/// startup is the publish-once memoization inside each entry, which is safe
/// under concurrent lookups.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: HashMap<String, Entry>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for the given name.
    ///
    /// The factory runs at most once, on the first [`resolve`](Self::resolve)
    /// for this name. Registering a name twice replaces the earlier entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn Handler> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .entries
            .insert(
                name.clone(),
                Entry {
                    factory: Box::new(factory),
                    resolved: OnceCell::new(),
                },
            )
            .is_some();
        if replaced {
            warn!(handler_name = %name, "Replaced existing handler registration");
        }
    }

    /// Register an already constructed handler under the given name.
    pub fn register_instance(&mut self, name: impl Into<String>, handler: Arc<dyn Handler>) {
        self.register(name, move || handler.clone());
    }

    /// Resolve a name to a handler, running its factory on first use.
    ///
    /// Returns `None` when the name was never registered.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Handler>> {
        let entry = self.entries.get(name)?;
        let handler = entry.resolved.get_or_init(|| {
            debug!(handler_name = %name, "Resolving handler on first use");
            (entry.factory)()
        });
        Some(handler.clone())
    }

    /// True if a handler is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
