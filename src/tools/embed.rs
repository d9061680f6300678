use crate::cache::VersionCache;
use crate::error::DocsError;
use crate::render::resolve_embed;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EmbedRequest {
    /// Project name, e.g. "discord.js"
    pub project: String,
    /// Branch or version of the documentation (default: "stable")
    #[serde(default = "super::default_branch")]
    pub branch: String,
    /// Element path, or free text to search for when the path does not resolve
    pub query: String,
}

/// Render the element the query names, or a list of search results.
pub async fn handle_embed(cache: &VersionCache, request: EmbedRequest) -> Result<String, String> {
    let graph = cache
        .get(&request.project, &request.branch)
        .await
        .map_err(|e| e.to_string())?;

    resolve_embed(&graph, &request.query, &cache.config().icon_url)
        .map(|embed| embed.to_markdown())
        .ok_or_else(|| {
            DocsError::NoMatch {
                key: graph.key().clone(),
                query: request.query.clone(),
            }
            .to_string()
        })
}
