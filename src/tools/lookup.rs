//! Resolve one element path and render its documentation.

use crate::cache::VersionCache;
use crate::error::DocsError;
use crate::render::element_embed;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupRequest {
    /// Project name, e.g. "discord.js", "commando" or "rpc"
    pub project: String,
    /// Branch or version of the documentation (default: "stable")
    #[serde(default = "super::default_branch")]
    pub branch: String,
    /// Element path such as "Client", "Client#login" or "Message.edit.content"
    pub path: String,
}

pub async fn handle_lookup(cache: &VersionCache, request: LookupRequest) -> Result<String, String> {
    let graph = cache
        .get(&request.project, &request.branch)
        .await
        .map_err(|e| e.to_string())?;

    let Some(element) = graph.get(&request.path) else {
        let err = DocsError::NoMatch {
            key: graph.key().clone(),
            query: request.path,
        };
        return Err(format!("{err}. Try the search tool for fuzzy matches."));
    };

    Ok(element_embed(element, &cache.config().icon_url).to_markdown())
}
