//! Integration tests for the hydration codec
//!
//! Server-side encoding must survive embedding in a document and decode
//! back into identical props; broken payloads fall back without panicking.

use pretty_assertions::assert_eq;
use rssr::hydration::{self, HYDRATION_FAILED};
use rssr::{document, json, Meta, PageProps, ParamValue, Params, UrlParts};
use rstest::rstest;

fn sample_props() -> PageProps {
    let mut params = Params::new();
    params.insert("slug".to_string(), ParamValue::from("hello world"));
    params.insert("segments".to_string(), ParamValue::from(["a", "b"]));

    PageProps {
        url: UrlParts::new("/blog/hello%20world", "?draft=1"),
        loader_data: json!({
            "appName": "rssr",
            "post": {
                "title": "a < b && c > d",
                "body": "</script><script>alert(1)</script>",
                "tags": ["rust", "<ssr>"],
                "stats": { "views": 12, "ratio": 0.5, "published": true, "editor": null }
            }
        }),
        action_data: json!({}),
        params,
        meta: Meta::new()
            .with("title", "Hello <World>")
            .with("description", "nested maps"),
        children: None,
    }
}

#[test]
fn test_round_trip() {
    let props = sample_props();
    let payload = hydration::encode(&props).unwrap();
    let decoded = hydration::decode(Some(&payload), UrlParts::default());
    assert_eq!(decoded, props);
}

#[test]
fn test_round_trip_through_document() {
    let props = sample_props();
    let payload = hydration::encode(&props).unwrap();
    let html = document::finalize("<html><body><p>page</p></body></html>", &payload);

    // The payload must not terminate its own script element
    assert_eq!(html.matches("</script>").count(), 1);

    let decoded = hydration::hydrate(&html, UrlParts::default());
    assert_eq!(decoded, props);
}

#[test]
fn test_undefined_data_round_trips() {
    let props = PageProps {
        url: UrlParts::new("/", ""),
        ..Default::default()
    };
    let payload = hydration::encode(&props).unwrap();
    assert!(!payload.contains("loaderData"));
    assert_eq!(hydration::decode(Some(&payload), UrlParts::default()), props);
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(""))]
#[case::whitespace(Some("   "))]
#[case::truncated(Some(r#"{"url":{"pathname":"/""#))]
#[case::wrong_shape(Some(r#"{"url":42}"#))]
#[case::not_json(Some("<div>"))]
fn test_fallback(#[case] text: Option<&str>) {
    let location = UrlParts::new("/somewhere", "?q=1");
    let props = hydration::decode(text, location.clone());

    assert_eq!(props.url, location);
    assert_eq!(props.children.as_deref(), Some(HYDRATION_FAILED));
    assert!(props.loader_data.is_null());
    assert!(props.action_data.is_null());
    assert!(props.params.is_empty());
    assert!(props.meta.is_empty());
}

#[test]
fn test_hydrate_without_payload_element() {
    let props = hydration::hydrate("<!doctype html><html><body></body></html>", UrlParts::default());
    assert_eq!(props.children.as_deref(), Some(HYDRATION_FAILED));
}

#[test]
fn test_payload_found_by_id_not_position() {
    let payload = hydration::encode(&sample_props()).unwrap();
    let html = format!(
        r#"<html><head><script type="application/json">{{"decoy":true}}</script></head><body>{}<script src="/app.js"></script></body></html>"#,
        hydration::script_tag(&payload)
    );
    assert_eq!(hydration::read_payload(&html), Some(payload.as_str()));
}
