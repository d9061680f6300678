//! Fuzzy search handler over element names.

use crate::cache::VersionCache;
use crate::search::SearchOutcome;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Project name, e.g. "discord.js"
    pub project: String,
    /// Branch or version of the documentation (default: "stable")
    #[serde(default = "super::default_branch")]
    pub branch: String,
    /// Search text; typos are tolerated
    pub query: String,
}

/// List up to ten matches, best first, one per line.
pub async fn handle_search(cache: &VersionCache, request: SearchRequest) -> Result<String, String> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err("Search query must not be empty".to_string());
    }

    let graph = cache
        .get(&request.project, &request.branch)
        .await
        .map_err(|e| e.to_string())?;

    let hits = match graph.search(query) {
        SearchOutcome::NoResults => {
            return Ok(format!("No results for '{}' in {}", query, graph.key()));
        }
        SearchOutcome::Matches(hits) => hits,
    };

    let mut output = format!("Search results for '{}' in {}:\n\n", query, graph.key());
    for hit in &hits {
        let _ = writeln!(
            output,
            "- **{}** ({}, score {:.3})",
            hit.element.link(),
            hit.element.kind(),
            hit.score
        );
    }
    Ok(output)
}
