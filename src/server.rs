//! MCP server exposing documentation lookups as tools.

use crate::cache::VersionCache;
use crate::tools::{
    EmbedRequest, LookupRequest, SearchRequest, handle_embed, handle_lookup, handle_search,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for JavaScript library documentation
#[derive(Clone)]
pub struct DocsServer {
    /// Shared version cache, also used by the HTTP surface when both run
    cache: Arc<VersionCache>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("cache", &self.cache)
            .finish()
    }
}

#[tool_router]
impl DocsServer {
    pub fn new(cache: Arc<VersionCache>) -> Self {
        Self {
            cache,
            tool_router: Self::tool_router(),
        }
    }

    pub fn cache(&self) -> &Arc<VersionCache> {
        &self.cache
    }

    #[tool(
        description = "Look up one documented element by path, e.g. 'Client', 'Client#login' or 'Message.edit.content'. Paths are case-insensitive and accept '.' or '#' as separators. Returns the formatted documentation with properties, methods, events, params, type, return value and examples.",
        input_schema = inline_schema_for_type::<LookupRequest>()
    )]
    async fn lookup(
        &self,
        Parameters(request): Parameters<LookupRequest>,
    ) -> std::result::Result<String, String> {
        handle_lookup(&self.cache, request).await
    }

    #[tool(
        description = "Fuzzy search element names in a project's documentation. Tolerates typos and prefers matches near the start of a name. Returns up to 10 results, best first.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.cache, request).await
    }

    #[tool(
        description = "Render documentation for a query: the element itself when the query is a valid path, otherwise a list of search results.",
        input_schema = inline_schema_for_type::<EmbedRequest>()
    )]
    async fn embed(
        &self,
        Parameters(request): Parameters<EmbedRequest>,
    ) -> std::result::Result<String, String> {
        handle_embed(&self.cache, request).await
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        let projects: Vec<&str> = self
            .cache
            .config()
            .projects
            .keys()
            .map(String::as_str)
            .collect();

        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(format!(
                "docs-graph: documentation lookup for JavaScript libraries. \
                 Known projects: {}. Branch defaults to 'stable'. \
                 Use lookup for exact paths and search when unsure of a name.",
                projects.join(", ")
            ))
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this sets `inline_subschemas = true`
/// so enums render as dropdowns in MCP Inspector instead of `$ref` patterns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let serde_json::Value::Object(json_object) = object else {
        panic!("Schema serialization produced non-object value");
    };

    Arc::new(json_object)
}
