//! Hydration codec
//!
//! The server embeds the request's [`PageProps`] as JSON inside
//! `<script id="__DATA" type="application/json">`; the client reads that
//! element back and rebuilds identical props before resuming the page.
//!
//! Every `<` in the payload is written as the JSON escape `\u003c`, so no
//! string value can close the script element early. JSON parsers read the
//! escape back as `<`, which keeps the round trip lossless.

use crate::error::Result;
use crate::props::{Meta, PageProps, UrlParts};
use serde_json::Value as JsonValue;

/// DOM id of the payload element
pub const DATA_SCRIPT_ID: &str = "__DATA";

/// Markup shown when the payload cannot be recovered
pub const HYDRATION_FAILED: &str = "<div>Hydration failed</div>";

/// Serialize props into a string safe to place inside a script element
pub fn encode(props: &PageProps) -> Result<String> {
    let json = serde_json::to_string(props)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Wrap an encoded payload in its script element
pub fn script_tag(payload: &str) -> String {
    format!(r#"<script id="{DATA_SCRIPT_ID}" type="application/json">{payload}</script>"#)
}

/// Text content of the payload element in a rendered document
///
/// Looks the element up by id, wherever it sits in the document.
pub fn read_payload(document: &str) -> Option<&str> {
    let id_attr = format!(r#"id="{DATA_SCRIPT_ID}""#);
    let mut search_from = 0;

    while let Some(offset) = document[search_from..].find("<script") {
        let tag_start = search_from + offset;
        let tag_end = tag_start + document[tag_start..].find('>')?;
        let open_tag = &document[tag_start..=tag_end];

        if open_tag.contains(&id_attr) {
            let content_start = tag_end + 1;
            let content_len = document[content_start..].find("</script>")?;
            return Some(&document[content_start..content_start + content_len]);
        }
        search_from = tag_end + 1;
    }

    None
}

/// Rebuild props from the payload text
///
/// Missing, empty or unparseable payloads never panic: the error is logged
/// and a fallback carrying `location` and a failure placeholder is returned.
pub fn decode(text: Option<&str>, location: UrlParts) -> PageProps {
    let text = match text.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => {
            tracing::error!(id = DATA_SCRIPT_ID, "hydration payload missing");
            return fallback(location);
        }
    };

    match serde_json::from_str::<PageProps>(text) {
        Ok(props) => props,
        Err(err) => {
            tracing::error!(error = %err, "failed to parse hydration payload");
            fallback(location)
        }
    }
}

/// Read and decode the payload of a whole document
pub fn hydrate(document: &str, location: UrlParts) -> PageProps {
    decode(read_payload(document), location)
}

fn fallback(location: UrlParts) -> PageProps {
    PageProps {
        url: location,
        loader_data: JsonValue::Null,
        action_data: JsonValue::Null,
        params: Default::default(),
        meta: Meta::new(),
        children: Some(HYDRATION_FAILED.to_string()),
    }
}
