//! # Router Module
//!
//! Path matching and route resolution. Routes compile their path templates
//! into regex-based matchers at startup; incoming request paths are tested
//! against the compiled patterns in declaration order and the first hit wins.
//!
//! ## Two-phase approach
//!
//! 1. **Compilation**: at startup, templates like `/pets/{id}` become
//!    anchored regex patterns with named capture groups, plus a build
//!    template for the reverse direction.
//!
//! 2. **Matching**: for each request, the router tests the path against the
//!    routes in registration order and returns the first match with its
//!    merged parameter map.
//!
//! Reverse resolution goes through the logical-name index: a route's name
//! plus parameter values produce a validated, encoded URL path.
//!
//! ## Example
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
//! let m = router.match_path("/blog/archive/2024/my-post").ok_or("no match")?;
//! assert_eq!(m.get_param_str("year"), Some("2024"));
//! assert_eq!(m.get_param_str("slug"), Some("my-post"));
//!
//! let params: ParamMap = [("year", "2024"), ("slug", "my-post")].into_iter().collect();
//! assert_eq!(router.build("blog/item", params)?, "/blog/archive/2024/my-post");
//! # Ok(())
//! # }
//! ```

mod core;
mod route;
#[cfg(test)]
mod tests;

pub use core::{RouteMatch, Router};
pub use route::Route;
