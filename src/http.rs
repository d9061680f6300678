//! HTTP routes over the version cache.
//!
//! `search` and `embed` are reserved third segments, so top-level elements
//! with those names cannot be looked up by path.

use crate::cache::VersionCache;
use crate::doc::DocGraph;
use crate::error::{DocsError, ErrorKind};
use crate::render::{ElementDocument, ElementSummary, Embed, resolve_embed};
use crate::search::SearchOutcome;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    cache: Arc<VersionCache>,
}

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(DocsError);

impl From<DocsError> for ApiError {
    fn from(err: DocsError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("{}", self.0);
        }
        let body = ErrorBody {
            error: self.0.kind().as_str(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct RawParams {
    /// Present (with any value) to request unmodified source records
    raw: Option<String>,
}

impl RawParams {
    const fn wants_raw(&self) -> bool {
        self.raw.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    q: Option<String>,
}

impl QueryParams {
    fn query(&self) -> Result<&str, DocsError> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(DocsError::BadRequest("missing required query parameter 'q'"))
    }
}

pub fn router(cache: Arc<VersionCache>) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/{project}/{branch}", get(list_roots))
        .route("/{project}/{branch}/search", get(search))
        .route("/{project}/{branch}/embed", get(embed))
        .route("/{project}/{branch}/{parent}", get(lookup_parent))
        .route("/{project}/{branch}/{parent}/{child}", get(lookup_child))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { cache })
}

/// Serve until ctrl-c.
pub async fn serve(cache: Arc<VersionCache>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(cache))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

async fn greeting() -> &'static str {
    "Hello World!"
}

async fn list_roots(
    State(state): State<AppState>,
    Path((project, branch)): Path<(String, String)>,
    Query(params): Query<RawParams>,
) -> ApiResult<Response> {
    let graph = state.cache.get(&project, &branch).await?;

    if params.wants_raw() {
        return Ok(Json(graph.raw_roots()).into_response());
    }
    let summaries: Vec<ElementSummary> = graph.roots().map(ElementSummary::from).collect();
    Ok(Json(summaries).into_response())
}

async fn search(
    State(state): State<AppState>,
    Path((project, branch)): Path<(String, String)>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Vec<ElementSummary>>> {
    let query = params.query()?;
    let graph = state.cache.get(&project, &branch).await?;

    let summaries = match graph.search(query) {
        SearchOutcome::NoResults => Vec::new(),
        SearchOutcome::Matches(hits) => hits
            .into_iter()
            .map(|hit| ElementSummary::from(hit.element))
            .collect(),
    };
    Ok(Json(summaries))
}

async fn embed(
    State(state): State<AppState>,
    Path((project, branch)): Path<(String, String)>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Embed>> {
    let query = params.query()?;
    let graph = state.cache.get(&project, &branch).await?;

    let embed = resolve_embed(&graph, query, &state.cache.config().icon_url)
        .ok_or_else(|| no_match(&graph, query))?;
    Ok(Json(embed))
}

async fn lookup_parent(
    State(state): State<AppState>,
    Path((project, branch, parent)): Path<(String, String, String)>,
    Query(params): Query<RawParams>,
) -> ApiResult<Response> {
    lookup(&state, &project, &branch, &parent, &params).await
}

async fn lookup_child(
    State(state): State<AppState>,
    Path((project, branch, parent, child)): Path<(String, String, String, String)>,
    Query(params): Query<RawParams>,
) -> ApiResult<Response> {
    let path = format!("{parent}.{child}");
    lookup(&state, &project, &branch, &path, &params).await
}

async fn lookup(
    state: &AppState,
    project: &str,
    branch: &str,
    path: &str,
    params: &RawParams,
) -> ApiResult<Response> {
    let graph = state.cache.get(project, branch).await?;
    let element = graph.get(path).ok_or_else(|| no_match(&graph, path))?;

    if params.wants_raw() {
        return Ok(Json(element.raw()).into_response());
    }
    Ok(Json(ElementDocument::from(element)).into_response())
}

fn no_match(graph: &DocGraph, query: &str) -> ApiError {
    ApiError(DocsError::NoMatch {
        key: graph.key().clone(),
        query: query.to_string(),
    })
}
