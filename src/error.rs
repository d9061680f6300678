//! Error handling types and utilities.

use crate::doc::VersionKey;
use std::sync::Arc;

/// A specialized Result type for binary and configuration code.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Failure to fetch or ingest a documentation dump.
///
/// Any of these aborts graph construction for that attempt; nothing partial is
/// cached.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("no documentation at {url}")]
    NotFound { url: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed documentation dump: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Coarse classification used by the HTTP and MCP boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Upstream,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Upstream => "upstream",
        }
    }
}

/// Errors surfaced to callers of the query layer.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("unknown project '{project}'{}", did_you_mean(.suggestions))]
    UnknownProject {
        project: String,
        suggestions: Vec<String>,
    },
    #[error("no documentation for {0}")]
    VersionNotFound(VersionKey),
    #[error("nothing in {key} matches '{query}'")]
    NoMatch { key: VersionKey, query: String },
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("failed to load documentation: {0}")]
    Upstream(Arc<FetchError>),
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    format!(". Did you mean: {}?", suggestions.join(", "))
}

impl DocsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownProject { .. } | Self::VersionNotFound(_) | Self::NoMatch { .. } => {
                ErrorKind::NotFound
            }
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Upstream(err) => match err.as_ref() {
                FetchError::NotFound { .. } => ErrorKind::NotFound,
                _ => ErrorKind::Upstream,
            },
        }
    }
}
