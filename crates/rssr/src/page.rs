// File: src/page.rs
// Purpose: Page and root module capability sets plus the handler outcome type

use crate::props::{Meta, PageProps};
use crate::request_context::RequestContext;
use crate::response::PageResponse;
use futures::future::BoxFuture;
use maud::{html, Markup};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Future returned by loader, action and meta handlers
pub type HandlerFuture<'a, T> = BoxFuture<'a, anyhow::Result<T>>;

/// Loader or action: reads the request context, returns data or a response
pub type HandlerFn =
    Arc<dyn for<'a> Fn(&'a RequestContext) -> HandlerFuture<'a, Outcome> + Send + Sync>;

/// Produces document metadata for the matched route
pub type MetaFn = Arc<dyn for<'a> Fn(&'a RequestContext) -> HandlerFuture<'a, Meta> + Send + Sync>;

/// Page component
pub type RenderFn = Arc<dyn Fn(&PageProps) -> Markup + Send + Sync>;

/// Root layout or page wrapper: receives the props and the inner markup
pub type LayoutFn = Arc<dyn Fn(&PageProps, Markup) -> Markup + Send + Sync>;

/// What a loader or action hands back to the orchestrator
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Data merged into the prop bag
    Data(JsonValue),
    /// Raw response returned verbatim, skipping the rest of the pipeline
    Response(PageResponse),
}

impl Outcome {
    /// Serialize any value into a data outcome
    pub fn data<T: Serialize>(value: T) -> anyhow::Result<Self> {
        Ok(Outcome::Data(serde_json::to_value(value)?))
    }

    /// Short-circuit with a 302 redirect
    pub fn redirect(location: impl AsRef<str>) -> Self {
        Outcome::Response(PageResponse::redirect(location))
    }
}

impl From<JsonValue> for Outcome {
    fn from(value: JsonValue) -> Self {
        Outcome::Data(value)
    }
}

impl From<PageResponse> for Outcome {
    fn from(response: PageResponse) -> Self {
        Outcome::Response(response)
    }
}

/// A routable page: a required component plus optional handlers
///
/// ```ignore
/// PageModule::new(|props| html! { h1 { (props.param("slug").unwrap_or_default()) } })
///     .loader(|ctx| Box::pin(async move { Ok(json!({ "slug": ctx.param("slug") }).into()) }))
/// ```
#[derive(Clone)]
pub struct PageModule {
    pub(crate) render: RenderFn,
    pub(crate) loader: Option<HandlerFn>,
    pub(crate) action: Option<HandlerFn>,
    pub(crate) meta: Option<MetaFn>,
}

impl PageModule {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&PageProps) -> Markup + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
            loader: None,
            action: None,
            meta: None,
        }
    }

    /// Read-only data fetch run on every render of the route
    pub fn loader<F>(mut self, loader: F) -> Self
    where
        F: for<'a> Fn(&'a RequestContext) -> HandlerFuture<'a, Outcome> + Send + Sync + 'static,
    {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Mutation handler run for POST, PUT, PATCH and DELETE
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: for<'a> Fn(&'a RequestContext) -> HandlerFuture<'a, Outcome> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn meta<F>(mut self, meta: F) -> Self
    where
        F: for<'a> Fn(&'a RequestContext) -> HandlerFuture<'a, Meta> + Send + Sync + 'static,
    {
        self.meta = Some(Arc::new(meta));
        self
    }

    pub fn render_fn(&self) -> &RenderFn {
        &self.render
    }

    pub fn has_loader(&self) -> bool {
        self.loader.is_some()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModule")
            .field("loader", &self.has_loader())
            .field("action", &self.has_action())
            .field("meta", &self.has_meta())
            .finish_non_exhaustive()
    }
}

/// Application shell: root data loader, document layout and page wrapper
///
/// A layout is required to render anything; it is checked per request so a
/// misconfigured shell surfaces as [`Error::MissingRootLayout`](crate::Error::MissingRootLayout).
#[derive(Clone, Default)]
pub struct RootModule {
    pub(crate) loader: Option<HandlerFn>,
    pub(crate) layout: Option<LayoutFn>,
    pub(crate) wrapper: Option<LayoutFn>,
}

impl RootModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data loaded for every request, matched or not
    pub fn loader<F>(mut self, loader: F) -> Self
    where
        F: for<'a> Fn(&'a RequestContext) -> HandlerFuture<'a, Outcome> + Send + Sync + 'static,
    {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Outer document (`html`, `head`, `body`)
    pub fn layout<F>(mut self, layout: F) -> Self
    where
        F: Fn(&PageProps, Markup) -> Markup + Send + Sync + 'static,
    {
        self.layout = Some(Arc::new(layout));
        self
    }

    /// Markup placed between the layout and the page
    pub fn wrapper<F>(mut self, wrapper: F) -> Self
    where
        F: Fn(&PageProps, Markup) -> Markup + Send + Sync + 'static,
    {
        self.wrapper = Some(Arc::new(wrapper));
        self
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }
}

impl fmt::Debug for RootModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootModule")
            .field("loader", &self.loader.is_some())
            .field("layout", &self.layout.is_some())
            .field("wrapper", &self.wrapper.is_some())
            .finish()
    }
}

/// Leaf rendered when no route matches
pub fn not_found(_props: &PageProps) -> Markup {
    html! { div { "Page Not Found" } }
}
