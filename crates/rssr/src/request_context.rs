// File: src/request_context.rs
// Purpose: Transport-neutral request handle and the per-request handler context

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use rssr_router::{ParamValue, Params};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Incoming request as handed over by the transport
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: Method,

    /// Request target: path plus optional query (`/blog/x?draft=1`)
    pub uri: String,

    /// Request headers
    pub headers: HeaderMap,

    /// Raw request body
    pub body: Bytes,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Shorthand for a GET request
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Shorthand for a POST request
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a urlencoded form body and its content type
    pub fn with_form(mut self, fields: &[(&str, &str)]) -> Self {
        let encoded = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.headers.insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self.body = Bytes::from(encoded);
        self
    }

    /// True for methods that carry create/replace/update/delete semantics
    pub fn is_mutation(&self) -> bool {
        matches!(
            self.method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Parse cookies from Cookie header
    pub fn cookies(&self) -> HashMap<String, String> {
        let mut cookies = HashMap::new();

        if let Some(cookie_str) = self.header("cookie") {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some((key, value)) = cookie.split_once('=') {
                    cookies.insert(key.to_string(), value.to_string());
                }
            }
        }

        cookies
    }

    /// Decode the body as form data (urlencoded or JSON)
    ///
    /// Bodies with any other content type yield empty form data.
    pub fn form(&self) -> FormData {
        let Some(content_type) = self.header("content-type") else {
            return FormData::new();
        };

        if content_type.contains("application/json") {
            serde_json::from_slice::<JsonValue>(&self.body)
                .map(FormData::from_json)
                .unwrap_or_else(|_| FormData::new())
        } else if content_type.contains("application/x-www-form-urlencoded") {
            let form_str = String::from_utf8_lossy(&self.body);
            let fields = form_str
                .split('&')
                .filter_map(|pair| {
                    pair.split_once('=').map(|(k, v)| {
                        (decode_form_component(k), decode_form_component(v))
                    })
                })
                .collect();
            FormData::from_fields(fields)
        } else {
            FormData::new()
        }
    }
}

fn decode_form_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Context passed to loader, action and meta handlers
///
/// Created fresh per request and never mutated afterwards; handlers only
/// receive shared references.
#[derive(Debug, Clone)]
pub struct RequestContext {
    url: Url,
    params: Params,
    request: Arc<Request>,
}

impl RequestContext {
    pub fn new(url: Url, params: Params, request: Arc<Request>) -> Self {
        Self {
            url,
            params,
            request,
        }
    }

    /// Absolute request URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Parameters extracted by the matched route (empty for root handlers)
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Scalar value of a `[name]` parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(ParamValue::as_str)
    }

    /// Segments bound by a `[...name]` parameter
    pub fn segments(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).and_then(ParamValue::as_slice)
    }

    /// The underlying request
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn method(&self) -> &Method {
        &self.request.method
    }

    /// Query parameters from URL (?key=value)
    pub fn query(&self) -> QueryParams {
        QueryParams::new(self.url.query_pairs().into_owned().collect())
    }

    /// Form data from the request body
    pub fn form(&self) -> FormData {
        self.request.form()
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a query parameter as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    /// Check if a parameter exists
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get as HashMap
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// Form data from POST/PUT/PATCH/DELETE requests
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    raw_json: Option<JsonValue>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from form fields with automatic trimming
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let trimmed_fields = fields
            .into_iter()
            .map(|(k, v)| (k, v.trim().to_string()))
            .collect();

        Self {
            fields: trimmed_fields,
            raw_json: None,
        }
    }

    /// Create from JSON
    pub fn from_json(json: JsonValue) -> Self {
        let mut fields = HashMap::new();

        if let JsonValue::Object(map) = &json {
            for (key, value) in map {
                if let Some(s) = value.as_str() {
                    fields.insert(key.clone(), s.trim().to_string());
                } else {
                    fields.insert(key.clone(), value.to_string());
                }
            }
        }

        Self {
            fields,
            raw_json: Some(json),
        }
    }

    /// Get a form field value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.fields.get(key)
    }

    /// Get a form field as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.fields.get(key)?.parse().ok()
    }

    /// Check if a field exists
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get raw JSON if available
    pub fn json(&self) -> Option<&JsonValue> {
        self.raw_json.as_ref()
    }

    /// Check if form is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw_json.is_none()
    }
}
