/// Pattern parsing for route segments
///
/// Pure parsing of file-based route segments into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use std::fmt;

/// Parameter name used for a catch-all segment written as `[...]`
pub const DEFAULT_WILDCARD_NAME: &str = "wildcard";

/// A single compiled segment of a route pattern
///
/// # Examples
///
/// ```
/// use rssr_router::route::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("about"), Segment::Literal("about".into()));
/// assert_eq!(classify_segment("[id]"), Segment::Param("id".into()));
/// assert_eq!(classify_segment("[...slug]"), Segment::Wildcard("slug".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Static text, compared for exact equality
    Literal(String),
    /// `[name]` / `:name`, consumes exactly one path segment
    Param(String),
    /// `[...name]` / `*name`, consumes all remaining path segments
    Wildcard(String),
}

impl Segment {
    /// Returns the parameter name for dynamic segments
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) | Segment::Wildcard(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, ":{name}"),
            Segment::Wildcard(name) => write!(f, "*{name}"),
        }
    }
}

/// Classifies a file-system segment (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Catch-all**: `[...name]` (`[...]` is named `wildcard`)
/// 2. **Param**: `[name]`
/// 3. **Literal**: anything else, including malformed brackets such as
///    `[id`, `post-[id]`, `[]` or `[[id]]`
pub fn classify_segment(segment: &str) -> Segment {
    let Some(inner) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return Segment::Literal(segment.to_string());
    };

    if let Some(name) = inner.strip_prefix("...") {
        if has_bracket(name) {
            return Segment::Literal(segment.to_string());
        }
        let name = if name.is_empty() { DEFAULT_WILDCARD_NAME } else { name };
        return Segment::Wildcard(name.to_string());
    }

    if inner.is_empty() || has_bracket(inner) {
        return Segment::Literal(segment.to_string());
    }

    Segment::Param(inner.to_string())
}

/// Classifies a segment written in pattern syntax (`:name`, `*name`)
///
/// ```
/// use rssr_router::route::pattern::{classify_pattern_segment, Segment};
///
/// assert_eq!(classify_pattern_segment(":slug"), Segment::Param("slug".into()));
/// assert_eq!(classify_pattern_segment("*"), Segment::Wildcard("wildcard".into()));
/// ```
pub fn classify_pattern_segment(segment: &str) -> Segment {
    if let Some(name) = segment.strip_prefix('*') {
        let name = if name.is_empty() { DEFAULT_WILDCARD_NAME } else { name };
        return Segment::Wildcard(name.to_string());
    }
    match segment.strip_prefix(':') {
        Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
        _ => Segment::Literal(segment.to_string()),
    }
}

/// Returns true when a file-system segment contains brackets but did not
/// classify as a dynamic segment
pub fn is_malformed(segment: &str, classified: &Segment) -> bool {
    matches!(classified, Segment::Literal(_)) && has_bracket(segment)
}

fn has_bracket(text: &str) -> bool {
    text.contains(['[', ']'])
}

/// A compiled route pattern
///
/// Keeps both the display form (`/blog/:slug`, `/users/`) and the ordered
/// non-empty segments used for matching. At most one [`Segment::Wildcard`]
/// exists and it is always the last segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a pattern written in `/blog/:slug` / `/docs/*rest` syntax
    ///
    /// ```
    /// use rssr_router::PathPattern;
    ///
    /// let pattern = PathPattern::parse("/blog/:slug");
    /// assert_eq!(pattern.as_str(), "/blog/:slug");
    /// assert_eq!(pattern.segments().len(), 2);
    /// ```
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(classify_pattern_segment)
            .collect();
        Self::from_parts(pattern, segments)
    }

    /// Builds a pattern from its display form and compiled segments,
    /// enforcing the trailing-wildcard invariant
    pub(crate) fn from_parts(raw: &str, segments: Vec<Segment>) -> Self {
        let raw = if raw.starts_with('/') {
            raw.to_string()
        } else {
            format!("/{raw}")
        };

        let last = segments.len().saturating_sub(1);
        let segments = segments
            .into_iter()
            .enumerate()
            .map(|(idx, segment)| match segment {
                Segment::Wildcard(name) if idx != last => {
                    tracing::warn!(
                        pattern = %raw,
                        "catch-all segment `{name}` is not last; treating it as a literal"
                    );
                    Segment::Literal(format!("*{name}"))
                }
                other => other,
            })
            .collect();

        Self { raw, segments }
    }

    /// Display form of the pattern
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Compiled, non-empty segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern has no dynamic segments
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.last().is_some_and(Segment::is_wildcard)
    }

    /// Names of all `Param`/`Wildcard` segments in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_static() {
        assert_eq!(classify_segment("about"), Segment::Literal("about".to_string()));
    }

    #[test]
    fn test_classify_param() {
        assert_eq!(classify_segment("[id]"), Segment::Param("id".to_string()));
    }

    #[test]
    fn test_classify_catch_all() {
        assert_eq!(
            classify_segment("[...segments]"),
            Segment::Wildcard("segments".to_string())
        );
    }

    #[test]
    fn test_classify_unnamed_catch_all() {
        assert_eq!(
            classify_segment("[...]"),
            Segment::Wildcard(DEFAULT_WILDCARD_NAME.to_string())
        );
    }

    #[test]
    fn test_classify_malformed_brackets() {
        for raw in ["[id", "id]", "post-[id]", "[]", "[[id]]", "[...[x]]"] {
            let seg = classify_segment(raw);
            assert_eq!(seg, Segment::Literal(raw.to_string()), "segment {raw}");
            assert!(is_malformed(raw, &seg));
        }
        assert!(!is_malformed("about", &classify_segment("about")));
    }

    #[test]
    fn test_classify_pattern_segment() {
        assert_eq!(classify_pattern_segment("blog"), Segment::Literal("blog".to_string()));
        assert_eq!(classify_pattern_segment(":"), Segment::Literal(":".to_string()));
        assert_eq!(
            classify_pattern_segment("*rest"),
            Segment::Wildcard("rest".to_string())
        );
    }

    #[test]
    fn test_parse_pattern_display() {
        let pattern = PathPattern::parse("/catchall/*segments");
        assert_eq!(pattern.to_string(), "/catchall/*segments");
        assert!(pattern.has_wildcard());
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["segments"]);
    }

    #[test]
    fn test_wildcard_must_be_last() {
        let pattern = PathPattern::parse("/a/*rest/b");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("a".to_string()),
                Segment::Literal("*rest".to_string()),
                Segment::Literal("b".to_string()),
            ]
        );
        assert!(!pattern.has_wildcard());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.segments().is_empty());
        assert!(pattern.is_static());
        assert_eq!(pattern.as_str(), "/");
    }
}
