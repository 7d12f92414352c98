//! A single route: compiled template, handler reference, defaults, and the
//! match/build operations.

use crate::error::{BuildError, TemplateError};
use crate::handler::HandlerRef;
use crate::params::ParamMap;
use crate::pattern::{BuildSegment, CompiledTemplate};
use serde_json::Value;
use std::collections::HashMap;
use url::form_urlencoded;

/// One compiled mapping from a path template to a handler.
///
/// Immutable after construction. A route owns its compiled matcher, the
/// build template derived from the same source, per-variable validation
/// patterns, default parameter values, and an optional logical name for
/// reverse URL building.
#[derive(Debug)]
pub struct Route {
    template: CompiledTemplate,
    handler: HandlerRef,
    name: Option<String>,
    defaults: ParamMap,
}

impl Route {
    /// Compile a path template into a route.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed; the route
    /// table is fixed configuration, so treat this as fatal at startup.
    pub fn new(path: &str, handler: HandlerRef) -> Result<Self, TemplateError> {
        Ok(Self {
            template: CompiledTemplate::compile(path)?,
            handler,
            name: None,
            defaults: ParamMap::new(),
        })
    }

    /// Set the logical name used for reverse URL building.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set default parameter values.
    ///
    /// Defaults fill unmatched-but-required variables during building, and
    /// keys that are not template variables are injected into every match
    /// result as extra context.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ParamMap) -> Self {
        self.defaults = defaults;
        self
    }

    /// The original path template.
    #[must_use]
    pub fn path(&self) -> &str {
        self.template.template()
    }

    /// The logical name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The handler reference.
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// The route's default parameter values.
    #[must_use]
    pub fn defaults(&self) -> &ParamMap {
        &self.defaults
    }

    /// Match a request path against this route.
    ///
    /// Returns the parameter map on a full-string match: a copy of the
    /// defaults overlaid with the captured groups. Captured values win over
    /// defaults on key collision. Static routes match with an empty capture
    /// set and still return their defaults.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ParamMap> {
        let captures = self.template.matcher().captures(path)?;
        let mut params = self.defaults.clone();
        for name in self.template.matcher().capture_names().flatten() {
            if let Some(value) = captures.name(name) {
                params.insert(name, value.as_str());
            }
        }
        Some(params)
    }

    /// Build a URL path from parameter values.
    ///
    /// Every template variable is taken from `params` (consuming it) or from
    /// the route defaults. Resolved values are stringified, percent-encoded,
    /// and re-checked against the variable's pattern before substitution.
    /// Whatever keys remain in `params` afterwards are appended as a
    /// `?`-prefixed query string, in the order the caller inserted them.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingParameter`] when a variable has no supplied or
    /// default value, or the value is falsy (null, empty string, zero,
    /// false); [`BuildError::InvalidParameter`] when the encoded value does
    /// not conform to the variable's pattern.
    pub fn build(&self, mut params: ParamMap) -> Result<String, BuildError> {
        let mut values: HashMap<&str, String> = HashMap::new();
        for name in self.template.variables() {
            let value = params
                .remove(name)
                .or_else(|| self.defaults.get(name).cloned())
                .filter(|v| !is_falsy(v))
                .ok_or_else(|| BuildError::MissingParameter {
                    template: self.path().to_string(),
                    name: name.to_string(),
                })?;

            let encoded: String =
                form_urlencoded::byte_serialize(stringify(&value).as_bytes()).collect();
            let conforms = self
                .template
                .constraint(name)
                .is_some_and(|pattern| pattern.is_match(&encoded));
            if !conforms {
                return Err(BuildError::InvalidParameter {
                    name: name.to_string(),
                    value: encoded,
                });
            }
            values.insert(name.as_ref(), encoded);
        }

        let mut url = String::with_capacity(self.path().len());
        for segment in self.template.segments() {
            match segment {
                BuildSegment::Literal(text) => url.push_str(text),
                BuildSegment::Variable(name) => {
                    if let Some(value) = values.get(name.as_ref()) {
                        url.push_str(value);
                    }
                }
            }
        }

        // Leftover keys become the query string, insertion order preserved.
        if !params.is_empty() {
            let mut query = form_urlencoded::Serializer::new(String::new());
            for (key, value) in params.iter() {
                query.append_pair(key, &stringify(value));
            }
            url.push('?');
            url.push_str(&query.finish());
        }

        Ok(url)
    }
}

/// Stringify a parameter value without JSON quoting around strings.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Values rejected as "required but empty" during building.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
