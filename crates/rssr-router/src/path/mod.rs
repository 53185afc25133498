/// Path utilities for request normalization and segment decoding
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Trims a single trailing `/` from a request path
///
/// The root path `/` is never trimmed, so `/about/` and `/about` normalize to
/// the same value while `/` stays `/`.
///
/// # Examples
///
/// ```
/// use rssr_router::path::normalize_path;
///
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("/about"), "/about");
/// assert_eq!(normalize_path("/"), "/");
/// ```
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Splits a path on `/`, discarding empty segments
///
/// Both `/a/b` and `a/b/` yield `["a", "b"]`.
///
/// ```
/// use rssr_router::path::split_segments;
///
/// let segments: Vec<&str> = split_segments("/a//b/").collect();
/// assert_eq!(segments, vec!["a", "b"]);
/// ```
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Percent-decodes a single path segment
///
/// Never fails: a segment whose decoded bytes are not valid UTF-8 is decoded
/// lossily instead of being rejected.
///
/// ```
/// use rssr_router::path::decode_segment;
///
/// assert_eq!(decode_segment("hello%20world"), "hello world");
/// assert_eq!(decode_segment("plain"), "plain");
/// ```
pub fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => match urlencoding::decode_binary(segment.as_bytes()) {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        },
    }
}
