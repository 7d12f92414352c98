//! Path template compilation.
//!
//! A template is literal text interspersed with placeholders:
//!
//! ```text
//! /blog/archive/{year:\d\d\d\d}/{slug}
//! ```
//!
//! Each placeholder is `{name}` or `{name:regex}` where `name` is
//! `[A-Za-z0-9_]+` and `regex` is any brace-free regular expression fragment
//! (`[^/]+` when omitted). Compilation produces three views of the same
//! template:
//!
//! 1. a full-string-anchored matcher where every placeholder is a named
//!    capture group and the surrounding literals are regex-escaped,
//! 2. a build template: the ordered literal/variable segments with literals
//!    kept verbatim (output is never matched, so nothing is escaped),
//! 3. per-variable constraint patterns used to validate values during URL
//!    building.
//!
//! Compilation happens once at startup; templates that fail to compile are
//! fatal configuration errors.

use crate::error::TemplateError;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Pattern a placeholder falls back to when no regex fragment is given:
/// one or more non-slash characters.
pub const DEFAULT_FRAGMENT: &str = "[^/]+";

/// One piece of the build template, in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSegment {
    /// Literal text, reproduced verbatim in built URLs.
    Literal(String),
    /// A substitution slot for the named variable.
    Variable(Arc<str>),
}

/// A compiled path template: matcher, build segments, and constraints.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: String,
    matcher: Regex,
    segments: Vec<BuildSegment>,
    constraints: HashMap<Arc<str>, Regex>,
    variables: Vec<Arc<str>>,
}

impl CompiledTemplate {
    /// Compile a path template.
    ///
    /// Scans left to right for placeholders; literal text between them is
    /// escaped into the matcher and preserved verbatim in the build segments.
    /// The matcher is wrapped in `^`/`$` anchors so only full-path matches
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for an unterminated placeholder, a
    /// placeholder with no name, an empty regex fragment, or a fragment the
    /// regex engine rejects (duplicate placeholder names end up here too,
    /// since named capture groups must be unique).
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let bytes = template.as_bytes();
        let mut pattern = String::with_capacity(template.len() + 2);
        pattern.push('^');
        let mut segments = Vec::new();
        let mut constraints = HashMap::new();
        let mut variables: Vec<Arc<str>> = Vec::new();

        let mut last = 0usize;
        let mut i = 0usize;
        while i < bytes.len() {
            if bytes[i] != b'{' {
                i += 1;
                continue;
            }
            let start = i;

            // Variable name: one or more of [A-Za-z0-9_].
            let mut j = start + 1;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
                j += 1;
            }
            if j == start + 1 {
                return Err(TemplateError::EmptyName {
                    template: template.to_string(),
                    position: start,
                });
            }
            let name = &template[start + 1..j];

            // Optional `:regex` part, running to the closing brace.
            let fragment = match bytes.get(j) {
                Some(b'}') => DEFAULT_FRAGMENT,
                Some(b':') => {
                    let frag_start = j + 1;
                    let mut k = frag_start;
                    while k < bytes.len() && bytes[k] != b'}' {
                        k += 1;
                    }
                    if k == bytes.len() {
                        return Err(TemplateError::UnterminatedPlaceholder {
                            template: template.to_string(),
                            position: start,
                        });
                    }
                    if k == frag_start {
                        return Err(TemplateError::EmptyPattern {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    j = k;
                    &template[frag_start..k]
                }
                _ => {
                    return Err(TemplateError::UnterminatedPlaceholder {
                        template: template.to_string(),
                        position: start,
                    });
                }
            };

            let literal = &template[last..start];
            pattern.push_str(&regex::escape(literal));
            pattern.push_str(&format!("(?P<{name}>{fragment})"));
            if !literal.is_empty() {
                segments.push(BuildSegment::Literal(literal.to_string()));
            }

            let name: Arc<str> = Arc::from(name);
            segments.push(BuildSegment::Variable(name.clone()));
            let constraint =
                Regex::new(&format!("^{fragment}$")).map_err(|source| TemplateError::Pattern {
                    template: template.to_string(),
                    source,
                })?;
            if !variables.contains(&name) {
                variables.push(name.clone());
            }
            // Last occurrence wins on duplicate names.
            constraints.insert(name, constraint);

            last = j + 1;
            i = last;
        }

        let trailing = &template[last..];
        pattern.push_str(&regex::escape(trailing));
        pattern.push('$');
        if !trailing.is_empty() {
            segments.push(BuildSegment::Literal(trailing.to_string()));
        }

        let matcher = Regex::new(&pattern).map_err(|source| TemplateError::Pattern {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            matcher,
            segments,
            constraints,
            variables,
        })
    }

    /// The original template string.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The anchored matcher regex.
    #[must_use]
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Build segments in template order.
    #[must_use]
    pub fn segments(&self) -> &[BuildSegment] {
        &self.segments
    }

    /// Distinct variable names in first-occurrence order.
    #[must_use]
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    /// The validation pattern for a variable.
    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&Regex> {
        self.constraints.get(name)
    }
}

impl fmt::Display for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_template_matches_itself_only() {
        let t = CompiledTemplate::compile("/blog/archive").unwrap();
        assert!(t.matcher().is_match("/blog/archive"));
        assert!(!t.matcher().is_match("/blog/archive/"));
        assert!(!t.matcher().is_match("/blog"));
        assert!(t.variables().is_empty());
    }

    #[test]
    fn default_fragment_stops_at_slash() {
        let t = CompiledTemplate::compile("/users/{id}").unwrap();
        assert!(t.matcher().is_match("/users/42"));
        assert!(!t.matcher().is_match("/users/42/posts"));
        assert_eq!(t.variables().len(), 1);
        assert_eq!(t.variables()[0].as_ref(), "id");
    }

    #[test]
    fn custom_fragment_is_honored() {
        let t = CompiledTemplate::compile(r"/archive/{year:\d\d\d\d}").unwrap();
        assert!(t.matcher().is_match("/archive/2024"));
        assert!(!t.matcher().is_match("/archive/24"));
        assert!(!t.matcher().is_match("/archive/abcd"));
    }

    #[test]
    fn literals_are_escaped_in_matcher_only() {
        // `.` must match literally, not as a regex wildcard.
        let t = CompiledTemplate::compile("/files/v1.0/{name}").unwrap();
        assert!(t.matcher().is_match("/files/v1.0/report"));
        assert!(!t.matcher().is_match("/files/v1x0/report"));
        assert_eq!(
            t.segments()[0],
            BuildSegment::Literal("/files/v1.0/".to_string())
        );
    }

    #[test]
    fn trailing_literal_appended() {
        let t = CompiledTemplate::compile("/posts/{id}/edit").unwrap();
        assert!(t.matcher().is_match("/posts/7/edit"));
        assert!(!t.matcher().is_match("/posts/7"));
        assert_eq!(
            t.segments().last(),
            Some(&BuildSegment::Literal("/edit".to_string()))
        );
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        match CompiledTemplate::compile("/users/{id") {
            Err(TemplateError::UnterminatedPlaceholder { position, .. }) => {
                assert_eq!(position, 7);
            }
            other => panic!("expected UnterminatedPlaceholder, got {other:?}"),
        }
    }

    #[test]
    fn nameless_placeholder_is_rejected() {
        assert!(matches!(
            CompiledTemplate::compile("/users/{}"),
            Err(TemplateError::EmptyName { .. })
        ));
        assert!(matches!(
            CompiledTemplate::compile(r"/users/{:\d+}"),
            Err(TemplateError::EmptyName { .. })
        ));
    }

    #[test]
    fn empty_fragment_is_rejected() {
        assert!(matches!(
            CompiledTemplate::compile("/users/{id:}"),
            Err(TemplateError::EmptyPattern { .. })
        ));
    }

    #[test]
    fn duplicate_names_fail_at_compile() {
        // The regex engine rejects duplicate named groups.
        assert!(matches!(
            CompiledTemplate::compile("/{x}/{x}"),
            Err(TemplateError::Pattern { .. })
        ));
    }

    #[test]
    fn invalid_fragment_is_rejected() {
        assert!(matches!(
            CompiledTemplate::compile("/users/{id:[}"),
            Err(TemplateError::Pattern { .. })
        ));
    }

    #[test]
    fn constraint_anchors_the_fragment() {
        let t = CompiledTemplate::compile(r"/archive/{year:\d\d\d\d}").unwrap();
        let constraint = t.constraint("year").unwrap();
        assert!(constraint.is_match("2024"));
        assert!(!constraint.is_match("2024x"));
        assert!(!constraint.is_match("x2024"));
    }
}
