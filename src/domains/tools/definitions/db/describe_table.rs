//! Describe table tool definition.

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

const DESCRIBE_TABLE_SQL: &str = r#"
    SELECT column_name::text AS column_name,
           data_type::text AS data_type,
           is_nullable::text AS is_nullable,
           column_default::text AS column_default
    FROM information_schema.columns
    WHERE table_schema = $1
      AND table_name = $2
    ORDER BY ordinal_position
"#;

/// Parameters for the describe table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTableParams {
    /// Name of the table to describe.
    pub table_name: String,
}

/// Describe table tool - column names, types, nullability and defaults.
pub struct DescribeTableTool;

impl DescribeTableTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "describe_table";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Describe the columns of a table: name, data type, nullability and default. An unknown table yields zero rows.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(table = %params.table_name))]
    pub async fn execute(
        params: &DescribeTableParams,
        config: &Config,
        client: &dyn SqlClient,
    ) -> CallToolResult {
        info!("Describe table tool called for '{}'", params.table_name);

        let bound = [
            serde_json::Value::from(config.database.schema.as_str()),
            serde_json::Value::from(params.table_name.as_str()),
        ];
        query_result(client.query(DESCRIBE_TABLE_SQL, &bound).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DescribeTableParams>(),
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
                let params: DescribeTableParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config, client.as_ref()).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::testing::StubClient;
    use super::*;

    fn body(result: &CallToolResult) -> serde_json::Value {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            _ => panic!("Expected text content"),
        }
    }

    fn params(table: &str) -> DescribeTableParams {
        DescribeTableParams {
            table_name: table.to_string(),
        }
    }

    #[tokio::test]
    async fn test_describe_existing_table() {
        let client = StubClient::with_loads_schema();
        let result = DescribeTableTool::execute(&params("loads"), &Config::default(), &client).await;
        assert_eq!(result.is_error, Some(false));

        let body = body(&result);
        assert_eq!(body["rowCount"], 3);
        assert_eq!(body["rows"][0]["column_name"], "id");
        assert_eq!(body["rows"][1]["data_type"], "text");
    }

    #[tokio::test]
    async fn test_describe_nonexistent_table_is_empty_not_error() {
        let client = StubClient::with_loads_schema();
        let result =
            DescribeTableTool::execute(&params("no_such_table"), &Config::default(), &client).await;
        assert_eq!(result.is_error, Some(false));

        let body = body(&result);
        assert_eq!(body["rowCount"], 0);
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_table_name_is_bound_not_inlined() {
        let client = StubClient::with_loads_schema();
        let hostile = "loads'; DROP TABLE loads; --";
        DescribeTableTool::execute(&params(hostile), &Config::default(), &client).await;

        let (sql, bound) = client.last_call().unwrap();
        assert!(!sql.contains("DROP TABLE"));
        assert_eq!(bound[1], serde_json::json!(hostile));
    }

    #[test]
    fn test_params_use_camel_case() {
        let parsed: DescribeTableParams =
            serde_json::from_value(serde_json::json!({ "tableName": "loads" })).unwrap();
        assert_eq!(parsed.table_name, "loads");
    }

    /// Runs against a real Postgres when `TEST_DATABASE_URL` is set.
    #[tokio::test]
    async fn test_live_nonexistent_table() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let mut config = Config::default();
        config.database.url = Some(url);
        let client = crate::core::database::PgClient::from_config(&config.database).unwrap();

        let result =
            DescribeTableTool::execute(&params("definitely_not_a_table"), &config, &client).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(body(&result)["rowCount"], 0);
    }
}
