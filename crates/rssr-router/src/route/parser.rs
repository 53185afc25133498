/// File path → route pattern conversion
///
/// Rules, applied in order:
///
/// 1. Strip the routes-root prefix and the file extension
/// 2. Collapse a trailing `index` segment to an empty segment
/// 3. Rewrite `[...name]` to a catch-all and `[name]` to a parameter
/// 4. Ensure the pattern begins with `/`

use super::pattern::{classify_segment, is_malformed, PathPattern};

/// Converts a route module's file path into a compiled pattern
///
/// # Examples
///
/// ```
/// use rssr_router::route::parser::parse_file_path;
///
/// assert_eq!(parse_file_path("routes/index.rs", "routes").as_str(), "/");
/// assert_eq!(parse_file_path("routes/users/index.rs", "routes").as_str(), "/users/");
/// assert_eq!(parse_file_path("./routes/blog/[slug].rs", "routes").as_str(), "/blog/:slug");
/// assert_eq!(
///     parse_file_path("routes/catchall/[...segments].rs", "routes").as_str(),
///     "/catchall/*segments"
/// );
/// ```
pub fn parse_file_path(file_path: &str, routes_root: &str) -> PathPattern {
    let normalized = file_path.replace('\\', "/");
    let relative = strip_routes_root(&normalized, routes_root);
    let without_ext = strip_extension(relative);

    let mut raw_segments: Vec<&str> = without_ext.split('/').collect();
    if raw_segments.last() == Some(&"index") {
        if let Some(last) = raw_segments.last_mut() {
            *last = "";
        }
    }

    let mut segments = Vec::new();
    let mut display = Vec::with_capacity(raw_segments.len());
    for raw in raw_segments {
        if raw.is_empty() {
            display.push(String::new());
            continue;
        }
        let segment = classify_segment(raw);
        if is_malformed(raw, &segment) {
            tracing::warn!(
                file = %file_path,
                segment = %raw,
                "malformed bracket segment; matching it literally"
            );
        }
        display.push(segment.to_string());
        segments.push(segment);
    }

    PathPattern::from_parts(&display.join("/"), segments)
}

/// Strips `./`, the routes root and any leading `/` from a file path
fn strip_routes_root<'a>(path: &'a str, routes_root: &str) -> &'a str {
    let path = path.trim_start_matches("./");
    let root = routes_root.trim_start_matches("./").trim_matches('/');

    let relative = if root.is_empty() {
        path.trim_start_matches('/')
    } else {
        let unrooted = path.trim_start_matches('/');
        match unrooted.strip_prefix(root) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => unrooted,
        }
    };

    relative.trim_start_matches('/')
}

/// Strips the extension of the final path segment
///
/// Only a plain alphanumeric suffix counts as an extension, so a bare
/// `[...rest]` segment keeps its dots.
fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    let file_name = &path[file_start..];

    match file_name.rfind('.') {
        Some(dot)
            if dot > 0
                && dot + 1 < file_name.len()
                && file_name[dot + 1..].chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            &path[..file_start + dot]
        }
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::pattern::Segment;

    #[test]
    fn test_strip_routes_root() {
        assert_eq!(strip_routes_root("./routes/about.rs", "routes"), "about.rs");
        assert_eq!(strip_routes_root("routes/about.rs", "./routes/"), "about.rs");
        assert_eq!(strip_routes_root("/routes/a/b.rs", "routes"), "a/b.rs");
        assert_eq!(strip_routes_root("about.rs", ""), "about.rs");
        // only whole-segment prefixes are stripped
        assert_eq!(strip_routes_root("routes-old/a.rs", "routes"), "routes-old/a.rs");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("about.rs"), "about");
        assert_eq!(strip_extension("blog/[slug].tsx"), "blog/[slug]");
        assert_eq!(strip_extension("catchall/[...segments].rs"), "catchall/[...segments]");
        assert_eq!(strip_extension("catchall/[...segments]"), "catchall/[...segments]");
        assert_eq!(strip_extension("v1.2/about"), "v1.2/about");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn test_index_collapses_to_parent() {
        assert_eq!(parse_file_path("routes/index.rs", "routes").as_str(), "/");
        assert_eq!(parse_file_path("routes/docs/index.rs", "routes").as_str(), "/docs/");
        assert_eq!(
            parse_file_path("routes/docs/index.rs", "routes").segments(),
            &[Segment::Literal("docs".to_string())]
        );
    }

    #[test]
    fn test_index_only_when_trailing() {
        let pattern = parse_file_path("routes/index/about.rs", "routes");
        assert_eq!(pattern.as_str(), "/index/about");
    }

    #[test]
    fn test_unnamed_catch_all() {
        let pattern = parse_file_path("routes/files/[...].rs", "routes");
        assert_eq!(pattern.as_str(), "/files/*wildcard");
    }

    #[test]
    fn test_malformed_bracket_is_literal() {
        let pattern = parse_file_path("routes/blog/[slug.rs", "routes");
        assert_eq!(pattern.as_str(), "/blog/[slug");
        assert!(pattern.is_static());
    }

    #[test]
    fn test_windows_separators() {
        let pattern = parse_file_path("routes\\blog\\[slug].rs", "routes");
        assert_eq!(pattern.as_str(), "/blog/:slug");
    }
}
