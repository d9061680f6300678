use anyhow::Context;
use docs_graph::{
    Config, Mode, VersionCache, server::DocsServer, source::HttpDocSource,
};
use rmcp::{ServiceExt, transport::stdio};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays free for the MCP protocol
    docs_graph::tracing::init();

    let config = Arc::new(Config::load().context("Failed to load configuration")?);
    let source = HttpDocSource::new(Duration::from_secs(config.fetch_timeout_secs))
        .context("Failed to build HTTP client")?;
    let cache = Arc::new(VersionCache::new(Arc::clone(&config), Arc::new(source)));

    match config.mode {
        Mode::Http => {
            let addr: SocketAddr = format!("{}:{}", config.host, config.port)
                .parse()
                .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
            tracing::info!("Starting docs-graph HTTP server");
            docs_graph::http::serve(cache, addr).await?;
        }
        Mode::Mcp => {
            tracing::info!("Starting docs-graph MCP server");
            let service = DocsServer::new(cache).serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;
            service.waiting().await?;
        }
    }

    Ok(())
}
