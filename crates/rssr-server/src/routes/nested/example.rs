use rssr::{html, Meta, PageModule};

pub fn page() -> PageModule {
    PageModule::new(|_| {
        html! {
            div {
                p.sub { "Nested route example." }
                a.button href="/" { "← Home" }
            }
        }
    })
    .meta(|_ctx| Box::pin(async { Ok(Meta::new().with("title", "Nested route example • rssr")) }))
}
