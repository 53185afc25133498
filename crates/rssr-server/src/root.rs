// Application shell: global data, document layout and the page wrapper

use rssr::{html, json, Markup, Outcome, PageProps, RootModule};

pub const APP_NAME: &str = "rssr • Rust SSR";

pub fn module() -> RootModule {
    RootModule::new()
        .loader(|_ctx| Box::pin(async { Ok(Outcome::from(json!({ "appName": APP_NAME }))) }))
        .layout(layout)
        .wrapper(wrapper)
}

fn app_name(props: &PageProps) -> &str {
    props
        .loader("appName")
        .and_then(|v| v.as_str())
        .unwrap_or(APP_NAME)
}

fn layout(props: &PageProps, children: Markup) -> Markup {
    let tags = &props.meta;
    html! {
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width,initial-scale=1,viewport-fit=cover";
                title { (tags.title().unwrap_or(app_name(props))) }
                @if let Some(description) = tags.description() {
                    meta name="description" content=(description);
                }
                @if let Some(robots) = tags.robots() {
                    meta name="robots" content=(robots);
                }
                @if let Some(canonical) = tags.canonical() {
                    link rel="canonical" href=(canonical);
                }
                @if let Some(og_title) = tags.og_title() {
                    meta property="og:title" content=(og_title);
                }
                @if let Some(og_image) = tags.og_image() {
                    meta property="og:image" content=(og_image);
                }
                link rel="stylesheet" href="/static/styles.css";
            }
            body {
                div id="__doc" { (children) }
            }
        }
    }
}

fn wrapper(props: &PageProps, children: Markup) -> Markup {
    html! {
        div.container {
            h1.h1 { (app_name(props)) }
            p.sub {
                "Hello from " strong { (props.url.pathname) }
            }
            (children)
        }
    }
}
