//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module wires them to the
//! shared configuration and SQL client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::core::database::SqlClient;

use super::definitions::{DescribeTableTool, GenerateMigrationTool, ListTablesTool, QueryDatabaseTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>, client: Arc<dyn SqlClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(QueryDatabaseTool::create_route(client.clone()))
        .with_route(ListTablesTool::create_route(config.clone(), client.clone()))
        .with_route(DescribeTableTool::create_route(config.clone(), client))
        .with_route(GenerateMigrationTool::create_route(config))
}
