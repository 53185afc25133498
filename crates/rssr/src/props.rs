// File: src/props.rs
// Purpose: Per-request prop bag shared by the renderer and the hydration codec

use rssr_router::Params;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use url::Url;

/// Location parts exposed to components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    pub pathname: String,
    /// Query string including the leading `?`, or empty
    #[serde(default)]
    pub search: String,
}

impl UrlParts {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }
}

impl From<&Url> for UrlParts {
    fn from(url: &Url) -> Self {
        let search = match url.query() {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        };
        Self::new(url.path(), search)
    }
}

impl Default for UrlParts {
    fn default() -> Self {
        Self::new("/", "")
    }
}

/// Document metadata produced by a route's `meta` handler
///
/// Serializes as a plain JSON object. Unset keys are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(BTreeMap<String, String>);

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Shallow merge; keys from `other` win
    pub fn merge(&mut self, other: Meta) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    pub fn robots(&self) -> Option<&str> {
        self.get("robots")
    }

    pub fn canonical(&self) -> Option<&str> {
        self.get("canonical")
    }

    pub fn og_title(&self) -> Option<&str> {
        self.get("ogTitle")
    }

    pub fn og_image(&self) -> Option<&str> {
        self.get("ogImage")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Everything a page component needs to render, and everything the client
/// needs to resume
///
/// `loader_data`/`action_data` of `Null` stand for "undefined" and are left
/// out of the serialized form. `children` never crosses the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub url: UrlParts,

    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub loader_data: JsonValue,

    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub action_data: JsonValue,

    #[serde(default)]
    pub params: Params,

    #[serde(default)]
    pub meta: Meta,

    /// Pre-rendered markup shown instead of the page (client-side fallback)
    #[serde(skip)]
    pub children: Option<String>,
}

impl PageProps {
    /// Field of the merged loader data
    pub fn loader(&self, key: &str) -> Option<&JsonValue> {
        self.loader_data.get(key)
    }

    /// Field of the action result
    pub fn action(&self, key: &str) -> Option<&JsonValue> {
        self.action_data.get(key)
    }

    /// Scalar route parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_url_parts_from_url() {
        let url = Url::parse("http://localhost/blog/x?draft=1").unwrap();
        assert_eq!(UrlParts::from(&url), UrlParts::new("/blog/x", "?draft=1"));

        let url = Url::parse("http://localhost/about").unwrap();
        assert_eq!(UrlParts::from(&url).search, "");
    }

    #[test]
    fn test_undefined_data_is_omitted() {
        let props = PageProps {
            url: UrlParts::new("/", ""),
            ..Default::default()
        };
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(
            value,
            json!({ "url": { "pathname": "/", "search": "" }, "params": {}, "meta": {} })
        );
    }

    #[test]
    fn test_camel_case_keys() {
        let props = PageProps {
            loader_data: json!({ "a": 1 }),
            action_data: json!({}),
            ..Default::default()
        };
        let value = serde_json::to_value(&props).unwrap();
        assert!(value.get("loaderData").is_some());
        assert!(value.get("actionData").is_some());
        assert!(value.get("children").is_none());
    }

    #[test]
    fn test_meta_merge_and_accessors() {
        let mut meta: Meta = [("title", "Home"), ("robots", "index")].into_iter().collect();
        meta.merge(Meta::new().with("title", "Blog"));
        assert_eq!(meta.title(), Some("Blog"));
        assert_eq!(meta.robots(), Some("index"));
        assert_eq!(meta.description(), None);
        assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"robots":"index","title":"Blog"}"#);
    }
}
