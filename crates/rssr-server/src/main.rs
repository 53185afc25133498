mod hot_reload;
mod root;
mod routes;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use rssr::{discovery, App, Config, Mode};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_livereload::LiveReloadLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    app: Arc<App>,
    mode: Mode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });
    config.apply_env()?;

    info!(
        name = %config.project.name,
        mode = ?config.server.mode,
        routes = %config.routing.routes_dir,
        "rssr starting"
    );

    let app = Arc::new(App::from_config(&config, root::module(), routes::modules()));
    for route in app.router().routes() {
        info!("  {} -> {}", route.pattern, route.file_path);
    }
    report_unregistered(&config, &app);

    let state = AppState {
        app,
        mode: config.server.mode,
    };
    let router = build_router(state, &config.build.static_dir);

    let hot_reload_enabled = config.is_development() && config.dev.hot_reload;
    let router = if hot_reload_enabled {
        let livereload = LiveReloadLayer::new();
        match hot_reload::spawn(&config.dev.watch_paths, livereload.reloader()) {
            Ok(()) => info!("Hot reload: enabled (full page reload, recompile required for .rs changes)"),
            Err(e) => error!("Failed to create file watcher: {:#}", e),
        }
        router.layer(livereload)
    } else {
        router
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(render_handler)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Warn about route files on disk that have no registered module
fn report_unregistered(config: &Config, app: &App) {
    match discovery::scan_routes(&config.routing.routes_dir, &config.routing.extensions) {
        Ok(files) => {
            for file in discovery::unregistered(&files, app.router()) {
                warn!(file = %file, "route file is not registered; it will not be served");
            }
        }
        Err(e) => warn!("Skipping route discovery: {:#}", e),
    }
}

/// Every path not served as a static asset goes through the page pipeline
async fn render_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let request = rssr::Request::new(method, target)
        .with_headers(headers)
        .with_body(body);

    match state.app.handle(request).await {
        Ok(page) => page.into_response(),
        Err(err) => error_response(err, state.mode),
    }
}

/// Development shows the whole error chain; production hides it
fn error_response(err: rssr::Error, mode: Mode) -> Response {
    let err = anyhow::Error::new(err);
    error!("Request failed: {:?}", err);

    let body = if mode.is_development() {
        format!("{:?}", err)
    } else {
        "Internal Server Error".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    fn test_router(mode: Mode) -> Router {
        let app = App::new(root::module(), "routes", routes::modules());
        build_router(
            AppState {
                app: Arc::new(app),
                mode,
            },
            "static",
        )
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case("/", "Hello, world")]
    #[case("/blog/helloworld", "Slug: helloworld")]
    #[case("/catchall/hello/world/test", r#"Segments: [&quot;hello&quot;,&quot;world&quot;,&quot;test&quot;]"#)]
    #[case("/nested/example", "Nested route example.")]
    #[case("/nested/example/", "Nested route example.")]
    #[tokio::test]
    async fn test_demo_pages(#[case] uri: &str, #[case] expected: &str) {
        let (status, _, body) = send(test_router(Mode::Development), get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(expected), "{uri}: {body}");
        assert!(body.contains(r#"<script id="__DATA" type="application/json">"#));
    }

    #[tokio::test]
    async fn test_blog_meta_title() {
        let (_, _, body) = send(test_router(Mode::Development), get("/blog/hello%20world")).await;
        assert!(body.contains("<title>Blog Post example: hello world • rssr</title>"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, _, body) = send(test_router(Mode::Development), get("/does/not/exist")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("<div>Page Not Found</div>"));
    }

    #[tokio::test]
    async fn test_form_action() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/actions")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("name=Ada+Lovelace"))
            .unwrap();

        let (status, headers, body) = send(test_router(Mode::Development), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get("x-action").and_then(|v| v.to_str().ok()), Some("1"));
        assert!(body.contains("Thanks, Ada Lovelace!"));
    }

    #[tokio::test]
    async fn test_error_body_by_mode() {
        let dev = error_response(rssr::Error::MissingRootLayout, Mode::Development);
        assert_eq!(dev.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(dev.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("root layout is not registered"));

        let prod = error_response(rssr::Error::MissingRootLayout, Mode::Production);
        let body = to_bytes(prod.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }

    #[test]
    fn test_every_route_file_is_registered() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/src/routes");
        let files = discovery::scan_routes(dir, &["rs".to_string()]).unwrap();
        let app = App::new(root::module(), "routes", routes::modules());
        assert!(discovery::unregistered(&files, app.router()).is_empty());
        assert_eq!(files.len(), app.router().len());
    }
}
