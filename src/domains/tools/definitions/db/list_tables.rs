//! List tables tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::query_result;
use crate::core::config::Config;
use crate::core::database::SqlClient;

const LIST_TABLES_SQL: &str = r#"
    SELECT table_name::text AS table_name
    FROM information_schema.tables
    WHERE table_schema = $1
      AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

/// The tool takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTablesParams {}

/// List tables tool - lists the base tables of the configured schema.
pub struct ListTablesTool;

impl ListTablesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_tables";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List all tables in the TMS database schema, ordered by name.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(schema = %config.database.schema))]
    pub async fn execute(config: &Config, client: &dyn SqlClient) -> CallToolResult {
        info!("List tables tool called");

        let schema = serde_json::Value::from(config.database.schema.as_str());
        query_result(client.query(LIST_TABLES_SQL, &[schema]).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListTablesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(config: Arc<Config>, client: Arc<dyn SqlClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            let client = client.clone();
            async move {
                let _: ListTablesParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&config, client.as_ref()).await)
            }
            .boxed()
        })
    }
}
