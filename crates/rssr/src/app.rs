// File: src/app.rs
// Purpose: Per-request orchestration: match, load, act, render, hydrate

use crate::config::Config;
use crate::document;
use crate::error::{Error, Result, Stage};
use crate::hydration;
use crate::page::{not_found, HandlerFn, Outcome, PageModule, RenderFn, RootModule};
use crate::props::{Meta, PageProps, UrlParts};
use crate::request_context::{Request, RequestContext};
use crate::response::{PageResponse, ACTION_HEADER};
use axum::http::StatusCode;
use rssr_router::{Params, Router};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use url::Url;

/// Base used to resolve request targets when none is configured
pub const DEFAULT_APP_URL: &str = "http://localhost";

/// Key holding a root loader result that is not an object
const ROOT_LOADER_KEY: &str = "rootLoaderData";

/// Key holding a route loader result that is not an object
const ROUTE_LOADER_KEY: &str = "routeLoaderData";

/// Immutable application: route table, root module and URL base
///
/// Built once at startup and shared behind an `Arc`; every request gets its
/// own context and prop bag.
pub struct App {
    router: Router<PageModule>,
    root: RootModule,
    app_url: String,
    not_found: RenderFn,
}

impl App {
    /// Build the route table from `(file path, module)` registrations
    ///
    /// Registration order is table order: the first matching route wins.
    pub fn new<I, P>(root: RootModule, routes_root: &str, modules: I) -> Self
    where
        I: IntoIterator<Item = (P, PageModule)>,
        P: AsRef<str>,
    {
        Self::with_router(root, Router::from_files(routes_root, modules))
    }

    /// Use an already built route table
    pub fn with_router(root: RootModule, router: Router<PageModule>) -> Self {
        for route in router.routes() {
            tracing::debug!(
                pattern = %route.pattern,
                file = %route.file_path,
                module = ?route.handler(),
                "route registered"
            );
        }

        Self {
            router,
            root,
            app_url: DEFAULT_APP_URL.to_string(),
            not_found: Arc::new(not_found),
        }
    }

    /// Build from configuration (`routing.routes_root`, `server.app_url`)
    pub fn from_config<I, P>(config: &Config, root: RootModule, modules: I) -> Self
    where
        I: IntoIterator<Item = (P, PageModule)>,
        P: AsRef<str>,
    {
        Self::new(root, &config.routing.routes_root, modules).app_url(&config.server.app_url)
    }

    /// Base URL joined with each request target
    pub fn app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = app_url.into();
        self
    }

    /// Replace the leaf rendered for unmatched paths
    pub fn not_found<F>(mut self, render: F) -> Self
    where
        F: Fn(&PageProps) -> maud::Markup + Send + Sync + 'static,
    {
        self.not_found = Arc::new(render);
        self
    }

    pub fn router(&self) -> &Router<PageModule> {
        &self.router
    }

    pub fn root(&self) -> &RootModule {
        &self.root
    }

    /// Run the full pipeline for one request
    ///
    /// Handler failures propagate as [`Error::Handler`]; the first handler
    /// returning [`Outcome::Response`] ends the pipeline with that response.
    pub async fn handle(&self, request: Request) -> Result<PageResponse> {
        let request = Arc::new(request);
        let url = self.request_url(&request.uri)?;
        let route_match = self.router.match_route(url.path());

        // Root data is loaded for every request, matched or not
        let root_data = match &self.root.loader {
            Some(loader) => {
                let ctx = RequestContext::new(url.clone(), Params::new(), Arc::clone(&request));
                match invoke(loader, &ctx, Stage::RootLoader).await? {
                    Outcome::Response(response) => return Ok(response),
                    Outcome::Data(data) => into_root_data(data),
                }
            }
            None => Map::new(),
        };

        let (module, params, status) = match route_match {
            Some(route_match) => {
                tracing::debug!(
                    path = %url.path(),
                    pattern = %route_match.route.pattern,
                    params = ?route_match.params,
                    "route matched"
                );
                (Some(route_match.route.handler()), route_match.params, StatusCode::OK)
            }
            None => {
                tracing::warn!(method = %request.method, path = %url.path(), "no route matched");
                (None, Params::new(), StatusCode::NOT_FOUND)
            }
        };

        let ctx = RequestContext::new(url.clone(), params, Arc::clone(&request));
        let mut loader_data = JsonValue::Null;
        let mut action_data = JsonValue::Object(Map::new());
        let mut action_ran = false;
        let mut meta = Meta::new();

        if let Some(module) = module {
            if let Some(action) = module.action.as_ref().filter(|_| request.is_mutation()) {
                match invoke(action, &ctx, Stage::Action).await? {
                    Outcome::Response(response) => return Ok(response),
                    Outcome::Data(data) => action_data = data,
                }
                action_ran = true;
            }

            // Runs alone for reads, and again after an action to refresh data
            if let Some(loader) = &module.loader {
                match invoke(loader, &ctx, Stage::Loader).await? {
                    Outcome::Response(response) => return Ok(response),
                    Outcome::Data(data) => loader_data = data,
                }
            }

            if let Some(meta_fn) = &module.meta {
                tracing::debug!(stage = %Stage::Meta, "invoking handler");
                let route_meta = meta_fn(&ctx)
                    .await
                    .map_err(|err| Error::handler(Stage::Meta, err))?;
                meta.merge(route_meta);
            }
        }

        let props = PageProps {
            url: UrlParts::from(&url),
            loader_data: merge_loader_data(root_data, loader_data),
            action_data,
            params: ctx.params().clone(),
            meta,
            children: None,
        };

        let leaf = module.map_or(&self.not_found, PageModule::render_fn);
        let html = document::render_document(&self.root, leaf, &props)?;

        let mut response = PageResponse::html(html).status(status);
        if action_ran {
            response = response.header(ACTION_HEADER, "1");
        }
        Ok(response)
    }

    /// Render a request and decode its hydration payload, as a client would
    pub async fn handle_and_hydrate(&self, request: Request) -> Result<(PageResponse, PageProps)> {
        let location = self
            .request_url(&request.uri)
            .map(|url| UrlParts::from(&url))?;
        let response = self.handle(request).await?;
        let props = hydration::hydrate(&response.body, location);
        Ok((response, props))
    }

    fn request_url(&self, uri: &str) -> Result<Url> {
        Url::parse(&self.app_url)
            .and_then(|base| base.join(uri))
            .map_err(|source| Error::InvalidUrl {
                uri: uri.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("router", &self.router)
            .field("root", &self.root)
            .field("app_url", &self.app_url)
            .finish_non_exhaustive()
    }
}

async fn invoke(handler: &HandlerFn, ctx: &RequestContext, stage: Stage) -> Result<Outcome> {
    tracing::debug!(%stage, path = %ctx.url().path(), "invoking handler");
    let outcome = handler(ctx)
        .await
        .map_err(|err| Error::handler(stage, err))?;

    if let Outcome::Response(response) = &outcome {
        tracing::debug!(%stage, status = %response.status, "handler short-circuited");
    }
    Ok(outcome)
}

fn into_root_data(data: JsonValue) -> Map<String, JsonValue> {
    match data {
        JsonValue::Object(map) => map,
        JsonValue::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert(ROOT_LOADER_KEY.to_string(), other);
            map
        }
    }
}

/// Root data first, route data on top (route keys win)
fn merge_loader_data(mut root: Map<String, JsonValue>, route: JsonValue) -> JsonValue {
    match route {
        JsonValue::Object(map) => root.extend(map),
        JsonValue::Null => {}
        other => {
            root.insert(ROUTE_LOADER_KEY.to_string(), other);
        }
    }
    JsonValue::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_data_wrapping() {
        assert_eq!(JsonValue::Object(into_root_data(json!({"a": 1}))), json!({"a": 1}));
        assert_eq!(JsonValue::Object(into_root_data(json!("x"))), json!({"rootLoaderData": "x"}));
        assert!(into_root_data(JsonValue::Null).is_empty());
    }

    #[test]
    fn test_route_data_wins() {
        let root = into_root_data(json!({"appName": "rssr", "title": "root"}));
        let merged = merge_loader_data(root, json!({"title": "page"}));
        assert_eq!(merged, json!({"appName": "rssr", "title": "page"}));
    }

    #[test]
    fn test_non_object_route_data() {
        let merged = merge_loader_data(Map::new(), json!([1, 2]));
        assert_eq!(merged, json!({"routeLoaderData": [1, 2]}));
    }

    #[test]
    fn test_request_url_join() {
        let app = App::new(RootModule::new(), "routes", Vec::<(&str, PageModule)>::new())
            .app_url("https://example.com");
        let url = app.request_url("/blog/x?y=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/blog/x?y=1");
    }

    #[test]
    fn test_invalid_base_url() {
        let app = App::new(RootModule::new(), "routes", Vec::<(&str, PageModule)>::new())
            .app_url("not a url");
        assert!(matches!(app.request_url("/"), Err(Error::InvalidUrl { .. })));
    }

    #[test]
    fn test_app_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<App>();
    }
}
