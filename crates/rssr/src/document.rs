// File: src/document.rs
// Purpose: Compose root layout, wrapper and page into the final HTML document

use crate::error::{Error, Result};
use crate::hydration;
use crate::page::{RenderFn, RootModule};
use crate::props::PageProps;

const DOCTYPE: &str = "<!doctype html>";

/// Render `layout(wrapper(leaf))` (or `layout(leaf)` without a wrapper) to a string
pub fn render(root: &RootModule, leaf: &RenderFn, props: &PageProps) -> Result<String> {
    let layout = root.layout.as_ref().ok_or(Error::MissingRootLayout)?;

    let page = leaf(props);
    let content = match &root.wrapper {
        Some(wrapper) => wrapper(props, page),
        None => page,
    };

    Ok(layout(props, content).into_string())
}

/// Prefix the doctype and inject the hydration script before `</body>`
///
/// Markup without a closing body tag gets the script appended at the end.
pub fn finalize(markup: &str, payload: &str) -> String {
    let script = hydration::script_tag(payload);
    let mut html = String::with_capacity(DOCTYPE.len() + markup.len() + script.len());
    html.push_str(DOCTYPE);

    match markup.find("</body>") {
        Some(index) => {
            html.push_str(&markup[..index]);
            html.push_str(&script);
            html.push_str(&markup[index..]);
        }
        None => {
            html.push_str(markup);
            html.push_str(&script);
        }
    }

    html
}

/// Render and finalize in one step
pub fn render_document(root: &RootModule, leaf: &RenderFn, props: &PageProps) -> Result<String> {
    let markup = render(root, leaf, props)?;
    let payload = hydration::encode(props)?;
    Ok(finalize(&markup, &payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn leaf() -> RenderFn {
        Arc::new(|_| html! { p { "leaf" } })
    }

    fn layout_root() -> RootModule {
        RootModule::new().layout(|_, children| html! { html { body { (children) } } })
    }

    #[test]
    fn test_layout_wraps_leaf() {
        let markup = render(&layout_root(), &leaf(), &PageProps::default()).unwrap();
        assert_eq!(markup, "<html><body><p>leaf</p></body></html>");
    }

    #[test]
    fn test_wrapper_sits_between_layout_and_leaf() {
        let root = layout_root().wrapper(|_, children| html! { main { (children) } });
        let markup = render(&root, &leaf(), &PageProps::default()).unwrap();
        assert_eq!(markup, "<html><body><main><p>leaf</p></main></body></html>");
    }

    #[test]
    fn test_missing_layout() {
        let err = render(&RootModule::new(), &leaf(), &PageProps::default()).unwrap_err();
        assert!(matches!(err, Error::MissingRootLayout));
    }

    #[test]
    fn test_finalize_injects_before_body_close() {
        let html = finalize("<html><body><p>x</p></body></html>", "{}");
        assert_eq!(
            html,
            r#"<!doctype html><html><body><p>x</p><script id="__DATA" type="application/json">{}</script></body></html>"#
        );
    }

    #[test]
    fn test_finalize_appends_without_body() {
        let html = finalize("<p>x</p>", "{}");
        assert!(html.starts_with("<!doctype html><p>x</p><script"));
        assert!(html.ends_with("</script>"));
    }
}
