//! # rssr Router
//!
//! A file-system-based route table with support for:
//! - Static routes (`/about`)
//! - Dynamic parameters (`/blog/:slug` from `blog/[slug].rs`)
//! - Catch-all routes (`/catchall/*segments` from `catchall/[...segments].rs`)
//! - Index files (`users/index.rs` → `/users/`)
//!
//! ## Ordering
//!
//! The table keeps routes in registration order and the **first** structural
//! match wins. Routes are never reordered by specificity: register
//! `/blog/featured` before `/blog/:slug` if the literal should take
//! precedence.
//!
//! ## Path Normalization
//!
//! A single trailing slash is trimmed before matching (`/about/` ≡ `/about`);
//! the root `/` is left alone. Empty segments are ignored on both sides.
//!
//! ## Example
//!
//! ```
//! use rssr_router::{ParamValue, Router};
//!
//! let router = Router::from_files(
//!     "routes",
//!     [("routes/about.rs", "about"), ("routes/blog/[slug].rs", "post")],
//! );
//!
//! let route_match = router.match_route("/blog/hello%20world").unwrap();
//! assert_eq!(*route_match.route.handler(), "post");
//! assert_eq!(route_match.params.get("slug"), Some(&ParamValue::from("hello world")));
//! ```

use std::fmt;

// ============================================================================
// Module Declarations
// ============================================================================

mod params;
pub mod path;
pub mod route;

pub use params::{ParamValue, Params};
pub use path::{decode_segment, normalize_path, split_segments};
pub use route::{parse_file_path, PathPattern, Segment};

// ============================================================================
// Core Types
// ============================================================================

/// A single entry of the route table: a compiled pattern bound to a handler
#[derive(Clone)]
pub struct Route<T> {
    /// Compiled URL pattern like "/users/:id"
    pub pattern: PathPattern,
    /// File path the route was derived from (empty for programmatic routes)
    pub file_path: String,
    handler: T,
}

/// Result of matching a route against a path
pub struct RouteMatch<'a, T> {
    /// The matched route
    pub route: &'a Route<T>,
    /// Extracted parameters from the path
    pub params: Params,
}

impl<T> Route<T> {
    /// Creates a route from an already compiled pattern
    pub fn new(pattern: PathPattern, handler: T) -> Self {
        Self {
            pattern,
            file_path: String::new(),
            handler,
        }
    }

    /// Creates a route from a file system path
    ///
    /// Converts file paths like `routes/users/[id].rs` into route patterns like `/users/:id`.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path of the route module, as discovered
    /// * `routes_root` - Base directory to strip from the path
    /// * `handler` - Payload bound to the route
    ///
    /// # Examples
    ///
    /// ```
    /// use rssr_router::Route;
    ///
    /// let route = Route::from_path("routes/users/[id].rs", "routes", ());
    /// assert_eq!(route.pattern.as_str(), "/users/:id");
    /// assert_eq!(route.file_path, "routes/users/[id].rs");
    /// ```
    pub fn from_path(file_path: &str, routes_root: &str, handler: T) -> Self {
        Self {
            pattern: parse_file_path(file_path, routes_root),
            file_path: file_path.to_string(),
            handler,
        }
    }

    /// The payload bound to this route
    pub fn handler(&self) -> &T {
        &self.handler
    }

    /// Matches this route against a request path
    ///
    /// Applies trailing-slash normalization and returns the extracted
    /// parameters on success.
    ///
    /// ```
    /// use rssr_router::{ParamValue, Route};
    ///
    /// let route = Route::from_path("routes/catchall/[...segments].rs", "routes", ());
    /// let params = route.matches("/catchall/a/b").unwrap();
    /// assert_eq!(params["segments"], ParamValue::from(["a", "b"]));
    /// ```
    pub fn matches(&self, path: &str) -> Option<Params> {
        let segments: Vec<&str> = split_segments(normalize_path(path)).collect();
        self.match_segments(&segments)
    }

    /// Walks the pattern against pre-split path segments
    fn match_segments(&self, path_segments: &[&str]) -> Option<Params> {
        fn walk(pattern: &[Segment], path: &[&str], mut params: Params) -> Option<Params> {
            match (pattern.split_first(), path.split_first()) {
                // Both sequences consumed
                (None, None) => Some(params),
                // Catch-all: binds every remaining segment (zero or more)
                (Some((Segment::Wildcard(name), _)), _) => {
                    let rest = path.iter().map(|s| decode_segment(s)).collect();
                    params.insert(name.clone(), ParamValue::Multiple(rest));
                    Some(params)
                }
                // Required parameter: exactly one segment
                (Some((Segment::Param(name), pattern_rest)), Some((segment, path_rest))) => {
                    params.insert(name.clone(), ParamValue::Single(decode_segment(segment)));
                    walk(pattern_rest, path_rest, params)
                }
                // Static segment: exact equality, short-circuit on mismatch
                (Some((Segment::Literal(literal), pattern_rest)), Some((segment, path_rest)))
                    if literal == segment =>
                {
                    walk(pattern_rest, path_rest, params)
                }
                _ => None,
            }
        }

        walk(self.pattern.segments(), path_segments, Params::new())
    }
}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for RouteMatch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", self.route)
            .field("params", &self.params)
            .finish()
    }
}

// ============================================================================
// Router Implementation
// ============================================================================

/// Ordered route table
///
/// Built once at startup and read-only afterwards; matching takes `&self`
/// and keeps no state between calls, so a shared router can serve concurrent
/// requests without synchronization.
#[derive(Clone)]
pub struct Router<T> {
    routes: Vec<Route<T>>,
}

impl<T> Router<T> {
    /// Creates an empty router
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Builds the route table from discovered route modules
    ///
    /// Routes keep the iteration order of `files`.
    ///
    /// ```
    /// use rssr_router::Router;
    ///
    /// let router = Router::from_files(
    ///     "routes",
    ///     vec![("routes/index.rs", 1), ("routes/about.rs", 2)],
    /// );
    /// let patterns: Vec<&str> = router.routes().iter().map(|r| r.pattern.as_str()).collect();
    /// assert_eq!(patterns, vec!["/", "/about"]);
    /// ```
    pub fn from_files<I, P>(routes_root: &str, files: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
    {
        let routes = files
            .into_iter()
            .map(|(file_path, handler)| Route::from_path(file_path.as_ref(), routes_root, handler))
            .collect();
        Self { routes }
    }

    /// Appends a route to the end of the table
    pub fn add_route(&mut self, route: Route<T>) {
        tracing::debug!(pattern = %route.pattern, "registered route");
        self.routes.push(route);
    }

    /// Appends a route written in pattern syntax (`/blog/:slug`)
    ///
    /// ```
    /// use rssr_router::Router;
    ///
    /// let router = Router::new().route("/blog/:slug", ()).route("/blog/featured", ());
    /// let m = router.match_route("/blog/featured").unwrap();
    /// assert_eq!(m.route.pattern.as_str(), "/blog/:slug");
    /// ```
    pub fn route(mut self, pattern: &str, handler: T) -> Self {
        self.add_route(Route::new(PathPattern::parse(pattern), handler));
        self
    }

    /// Finds the first route matching `path`
    ///
    /// Returns `None` when no route matches, which callers treat as a 404.
    pub fn match_route(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        let segments: Vec<&str> = split_segments(normalize_path(path)).collect();

        self.routes.iter().find_map(|route| {
            route
                .match_segments(&segments)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// All routes in table order
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}
