use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Header set whenever an action ran and the page was rendered
pub const ACTION_HEADER: &str = "x-action";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

// -- Shared helpers --

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) {
    if let (Ok(name), Ok(val)) = (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        headers.insert(name, val);
    }
}

// ============================================================================
// PageResponse
// ============================================================================

/// Fully materialized response produced by the orchestrator or returned by a
/// handler to short-circuit the pipeline.
///
/// ```ignore
/// PageResponse::redirect("/login").status(StatusCode::SEE_OTHER)
/// ```
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl PageResponse {
    /// Empty 200 response
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    /// Rendered HTML document
    pub fn html(body: impl Into<String>) -> Self {
        Self::new()
            .header(header::CONTENT_TYPE.as_str(), HTML_CONTENT_TYPE)
            .body(body)
    }

    /// JSON body with the matching content type
    pub fn json<T: serde::Serialize>(value: &T) -> serde_json::Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(Self::new()
            .header(header::CONTENT_TYPE.as_str(), "application/json")
            .body(body))
    }

    /// Redirect to `location` (302 Found unless overridden with [`status`](Self::status))
    pub fn redirect(location: impl AsRef<str>) -> Self {
        Self::new()
            .status(StatusCode::FOUND)
            .header(header::LOCATION.as_str(), location.as_ref())
    }

    /// Set the HTTP status code
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a header; invalid names or values are ignored
    pub fn header(mut self, key: &str, value: &str) -> Self {
        insert_header(&mut self.headers, key, value);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Header value as a string, if present and visible ASCII
    pub fn header_str(&self, key: &str) -> Option<&str> {
        self.headers.get(key)?.to_str().ok()
    }

    /// Redirect target, if any
    pub fn location(&self) -> Option<&str> {
        self.header_str(header::LOCATION.as_str())
    }

    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }
}

impl Default for PageResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response() {
        let response = PageResponse::html("<p>hi</p>");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.header_str("content-type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body, "<p>hi</p>");
    }

    #[test]
    fn test_redirect_defaults_to_found() {
        let response = PageResponse::redirect("/login");
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.location(), Some("/login"));
        assert!(response.is_redirect());
    }

    #[test]
    fn test_redirect_custom_status() {
        let response = PageResponse::redirect("/done").status(StatusCode::SEE_OTHER);
        assert_eq!(response.status, StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_invalid_header_ignored() {
        let response = PageResponse::new().header("bad header", "x");
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_into_response_keeps_status_and_headers() {
        let response = PageResponse::redirect("/next").into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(&b"/next"[..])
        );
    }
}
