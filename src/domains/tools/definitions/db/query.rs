//! Query database tool definition.
//!
//! Forwards a SQL statement verbatim to the database and returns the rows.

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
use crate::core::database::SqlClient;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the query database tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryDatabaseParams {
    /// SQL statement to execute.
    pub query: String,

    /// Positional parameters bound to $1, $2, ... Strings bind as text; cast
    /// in SQL for other column types (e.g. `$1::date`).
    #[serde(default)]
    pub params: Option<Vec<serde_json::Value>>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Query database tool - runs arbitrary SQL against the TMS database.
pub struct QueryDatabaseTool;

impl QueryDatabaseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "query_database";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Execute a SQL query against the TMS database. Returns rows, rowCount and field metadata as JSON. Pass values through 'params' ($1, $2, ...) instead of inlining them. Without 'params' the text may hold several ';'-separated statements and their rows are concatenated; with 'params' it must be a single statement.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(params = params.params.as_ref().map_or(0, Vec::len)))]
    pub async fn execute(params: &QueryDatabaseParams, client: &dyn SqlClient) -> CallToolResult {
        info!("Query database tool called");

        let bound = params.params.as_deref().unwrap_or_default();
        query_result(client.query(&params.query, bound).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QueryDatabaseParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(client: Arc<dyn SqlClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: QueryDatabaseParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, client.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::common::testing::StubClient;
    use super::*;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn params(query: &str) -> QueryDatabaseParams {
        QueryDatabaseParams {
            query: query.to_string(),
            params: None,
        }
    }

    #[tokio::test]
    async fn test_query_returns_rows_as_json() {
        let client = StubClient::with_loads_schema();
        let result = QueryDatabaseTool::execute(&params("SELECT 1 AS one"), &client).await;
        assert_eq!(result.is_error, Some(false));

        let body: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(body["rowCount"], 1);
        assert_eq!(body["rows"][0]["one"], 1);
        assert_eq!(body["fields"][0]["name"], "one");
    }

    #[tokio::test]
    async fn test_query_forwards_sql_and_params_verbatim() {
        let client = StubClient::with_loads_schema();
        let p = QueryDatabaseParams {
            query: "SELECT * FROM loads WHERE status = $1 AND id > $2".to_string(),
            params: Some(vec![json!("posted"), json!(10)]),
        };
        QueryDatabaseTool::execute(&p, &client).await;

        let (sql, bound) = client.last_call().unwrap();
        assert_eq!(sql, p.query);
        assert_eq!(bound, vec![json!("posted"), json!(10)]);
    }

    #[tokio::test]
    async fn test_invalid_sql_is_flagged_and_server_keeps_serving() {
        let client = StubClient::with_loads_schema();

        let bad = QueryDatabaseTool::execute(&params("SELEC * FROM loads"), &client).await;
        assert_eq!(bad.is_error, Some(true));
        assert!(text_of(&bad).contains("syntax error"));

        let good = QueryDatabaseTool::execute(&params("SELECT 1"), &client).await;
        assert_eq!(good.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_unconfigured_database_is_flagged() {
        let client = crate::core::database::PgClient::unconfigured();
        let result = QueryDatabaseTool::execute(&params("SELECT 1"), &client).await;
        assert_eq!(result.is_error, Some(true));
        assert!(!text_of(&result).is_empty());
    }

    #[test]
    fn test_params_are_optional() {
        let parsed: QueryDatabaseParams =
            serde_json::from_value(json!({ "query": "SELECT 1" })).unwrap();
        assert!(parsed.params.is_none());
    }
}
