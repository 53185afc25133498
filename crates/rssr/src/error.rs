// File: src/error.rs
// Purpose: Error taxonomy for request handling

use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Handler slot that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RootLoader,
    Loader,
    Action,
    Meta,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RootLoader => "root loader",
            Stage::Loader => "loader",
            Stage::Action => "action",
            Stage::Meta => "meta",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by [`App::handle`](crate::App::handle)
///
/// None of these are recovered by the orchestrator; the transport maps
/// them to a 500 response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No root layout registered; no valid document can be produced
    #[error("root layout is not registered")]
    MissingRootLayout,

    #[error("invalid request url `{uri}`")]
    InvalidUrl {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// A loader, action or meta handler returned an error
    #[error("{stage} failed")]
    Handler {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    #[error("failed to serialize hydration payload")]
    Payload(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn handler(stage: Stage, source: anyhow::Error) -> Self {
        Error::Handler {
            stage,
            source: source.into(),
        }
    }
}

/// Result alias for request handling
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_chain() {
        let err = Error::handler(Stage::Action, anyhow::anyhow!("database is down"));
        assert_eq!(err.to_string(), "action failed");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("database is down"));
    }
}
