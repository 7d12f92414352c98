//! Error types for template compilation and URL building.
//!
//! A path that matches no route is *not* an error: [`crate::Router::match_path`]
//! returns `None` and the caller decides what a miss means (usually a 404).
//! Everything in here is either a startup-time configuration failure
//! ([`TemplateError`]) or a caller bug surfaced synchronously ([`BuildError`]).
//! None of these conditions are retryable; the route table or the caller's
//! arguments have to change.

use thiserror::Error;

/// Failure while compiling a path template into a matcher.
///
/// The route table is fixed configuration, so these are fatal at startup.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A `{` opened a placeholder that never closes.
    #[error("unterminated placeholder at byte {position} in template `{template}`")]
    UnterminatedPlaceholder { template: String, position: usize },

    /// A placeholder with no identifier, e.g. `{}` or `{:\d+}`.
    #[error("placeholder at byte {position} in template `{template}` has no name")]
    EmptyName { template: String, position: usize },

    /// A placeholder with a `:` but nothing after it, e.g. `{id:}`.
    #[error("placeholder `{name}` in template `{template}` has an empty pattern")]
    EmptyPattern { template: String, name: String },

    /// The assembled matcher or a variable constraint failed to compile.
    /// Covers invalid regex fragments and duplicate placeholder names
    /// (the regex engine rejects duplicate named groups).
    #[error("template `{template}` produced an invalid pattern: {source}")]
    Pattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure while building a URL from a route.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The requested logical route name was never registered.
    #[error("route `{0}` is not defined")]
    UnknownRoute(String),

    /// A path variable had no supplied value and no usable default.
    /// Empty or falsy values (empty string, zero, null, false) count as
    /// missing; a required variable never renders as nothing.
    #[error("missing parameter `{name}` to build `{template}`")]
    MissingParameter { template: String, name: String },

    /// A supplied value, after encoding, does not conform to the variable's
    /// pattern.
    #[error("value `{value}` is not allowed for parameter `{name}`")]
    InvalidParameter { name: String, value: String },
}
