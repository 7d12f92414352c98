//! # waymark
//!
//! Declarative request routing: path templates compiled to regex matchers,
//! ordered first-match dispatch, and reverse URL building from logical route
//! names.
//!
//! ## Overview
//!
//! A route table maps path templates like `/blog/archive/{year:\d\d\d\d}/{slug}`
//! to handlers. At startup each template is compiled into an anchored matcher
//! with named capture groups plus a build template for the reverse direction.
//! An incoming path resolves to the first matching route (declaration order,
//! never specificity) together with a merged parameter map; a logical name
//! plus parameter values resolve back to a validated, encoded path string.
//! The bidirectional contract holds: parameters extracted by matching rebuild
//! the same path.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Path template compilation (matcher, build template,
//!   per-variable constraints)
//! - **[`router`]** - `Route` and `Router`: first-match resolution and
//!   reverse URL building
//! - **[`params`]** - Insertion-ordered parameter maps shared by both
//!   directions
//! - **[`handler`]** - Capability-set handler trait (one operation per HTTP
//!   verb) and handler references
//! - **[`registry`]** - Lazy name → handler registry, resolve-once semantics
//! - **[`dispatcher`]** - Glue: match a path, resolve the handler, invoke
//!   the verb operation
//! - **[`table`]** - Declarative route tables, in code or from YAML/JSON
//! - **[`error`]** - Template compilation and URL building errors
//!
//! ## Quick start
//!
//! ```rust
//! use waymark::{HandlerRef, ParamMap, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.add(
//!     r"/blog/archive/{year:\d\d\d\d}/{slug}",
//!     HandlerRef::deferred("blog_item"),
//!     Some("blog/item"),
//!     ParamMap::new(),
//! )?;
//!
//! // Forward: path -> route + params.
//! let m = router.match_path("/blog/archive/2024/my-post").ok_or("no match")?;
//! assert_eq!(m.get_param_str("year"), Some("2024"));
//!
//! // Reverse: name + params -> path.
//! let params: ParamMap = [("year", "2024"), ("slug", "my-post")].into_iter().collect();
//! assert_eq!(router.build("blog/item", params)?, "/blog/archive/2024/my-post");
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Routers, routes, and resolved handlers are immutable after startup and
//! are shared read-only across request-handling units without locking.
//! Matching and building are pure, synchronous, CPU-bound operations; the
//! only post-startup mutation is the registry's publish-once handler
//! memoization.

pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod params;
pub mod pattern;
pub mod registry;
pub mod router;
pub mod table;

pub use dispatcher::Dispatcher;
pub use error::{BuildError, TemplateError};
pub use handler::{Handler, HandlerRef, HandlerResponse};
pub use params::ParamMap;
pub use registry::HandlerRegistry;
pub use router::{Route, RouteMatch, Router};
pub use table::{build_router, load_router, load_table, RouteSpec};
