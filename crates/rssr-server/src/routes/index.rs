use rssr::{html, json, Meta, PageModule, PageProps};

pub fn page() -> PageModule {
    PageModule::new(render)
        .loader(|_ctx| Box::pin(async { Ok(json!({ "greeting": "Hello, world 👋" }).into()) }))
        .meta(|_ctx| {
            Box::pin(async {
                Ok(Meta::new()
                    .with("title", "Hello World • rssr")
                    .with("description", "Minimal full-stack rendering with loaders, actions and hydration"))
            })
        })
}

fn render(props: &PageProps) -> rssr::Markup {
    let greeting = props.loader("greeting").and_then(|v| v.as_str()).unwrap_or_default();
    html! {
        div {
            p.sub { (greeting) ", this is a server-rendered page, hydrated on the client." }
            a.button href="/actions" { "Actions →" }
            a.button href="/nested/example" { "Nested route example →" }
            a.button href="/blog/helloworld" { "Dynamic route example →" }
            a.button href="/catchall/hello/world/test" { "Catch-all route example →" }
        }
    }
}
