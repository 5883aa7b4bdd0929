//! MCP Server implementation and lifecycle management.
//!
//! This module contains the server handler that implements the MCP protocol by
//! delegating to the tools router and the resource service.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines a params struct, an `execute()` function and its route.
//! The ToolRouter is built in `domains/tools/router.rs`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::database::{PgClient, SqlClient};
use super::error::Result;
use crate::domains::{
    resources::ResourceService,
    tools::{ToolError, ToolRegistry, build_tool_router},
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by Postgres.
    ///
    /// The pool is lazy, so this succeeds without a reachable database; only a
    /// malformed database URL is rejected.
    pub fn new(config: Config) -> Result<Self> {
        let client = PgClient::from_config(&config.database)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a server that runs SQL through the given client.
    pub fn with_client(config: Config, client: Arc<dyn SqlClient>) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone(), client),
            resource_service: Arc::new(ResourceService::new()),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

/// Error result for a tool name outside the registry.
fn unknown_tool(name: &str) -> Option<CallToolResult> {
    if ToolRegistry::contains(name) {
        return None;
    }
    warn!("Unknown tool requested: {}", name);
    Some(CallToolResult::error(vec![Content::text(
        ToolError::not_found(name).to_string(),
    )]))
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "TMS database server. Use list_tables and describe_table to explore the schema, \
                 query_database to run SQL, and generate_migration to draft migration files. \
                 Resources under tms:// expose role document configurations and load status tables."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if let Some(result) = unknown_tool(&request.name) {
            return Ok(result);
        }
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_without_database_url() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "tms-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(server.tool_router.list_all().len(), 4);
    }

    #[test]
    fn test_unknown_tool_is_flagged() {
        let result = unknown_tool("drop_everything").unwrap();
        assert_eq!(result.is_error, Some(true));
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "Unknown tool: drop_everything"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_registered_tools_pass_through() {
        for name in ToolRegistry::tool_names() {
            assert!(unknown_tool(name).is_none());
        }
    }

    #[test]
    fn test_capabilities() {
        let server = McpServer::with_client(Config::default(), Arc::new(PgClient::unconfigured()));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
    }
}
