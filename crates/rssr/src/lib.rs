// rssr - file-routed server-side rendering
// Loaders, actions and meta per page, one root layout, JSON hydration payload

pub mod app;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod hydration;
pub mod page;
pub mod props;
pub mod request_context;
pub mod response;

// Re-export Maud for components
pub use maud::{html, Markup, PreEscaped};

// Re-export framework types
pub use app::App;
pub use config::{Config, Mode};
pub use error::{Error, Result, Stage};
pub use page::{HandlerFuture, Outcome, PageModule, RootModule};
pub use props::{Meta, PageProps, UrlParts};
pub use request_context::{FormData, QueryParams, Request, RequestContext};
pub use response::PageResponse;

// Re-export routing types
pub use rssr_router::{ParamValue, Params, Router};

// Re-export commonly used types from dependencies
pub use axum::http::{Method, StatusCode};
pub use serde_json::json;
