//! Generate migration tool definition.
//!
//! Builds the name and content of a timestamped SQL migration file. Nothing is
//! written to disk; the caller persists the returned text.

use chrono::{DateTime, Utc};
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

use super::common::success_result;
use crate::core::config::Config;

const MAX_SLUG_LEN: usize = 50;

/// Parameters for the generate migration tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateMigrationParams {
    /// Short description, used in the file name and header.
    pub description: String,

    /// SQL body of the migration.
    pub sql: String,
}

/// A migration file ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub path: String,
    pub content: String,
}

impl MigrationFile {
    /// Render a migration for the given creation time.
    pub fn render(description: &str, sql: &str, migrations_dir: &str, now: DateTime<Utc>) -> Self {
        let file_name = format!("{}_{}.sql", now.format("%Y%m%d%H%M%S"), slugify(description));
        let dir = migrations_dir.trim_end_matches('/');
        let path = if dir.is_empty() {
            file_name
        } else {
            format!("{}/{}", dir, file_name)
        };

        let content = format!(
            "-- Migration: {}\n-- Created: {}\n\n{}\n",
            description.trim(),
            now.to_rfc3339(),
            sql.trim_end()
        );

        Self { path, content }
    }
}

/// `Add index on loads.status` -> `add_index_on_loads_status`.
fn slugify(description: &str) -> String {
    let mut slug = String::with_capacity(description.len());
    for c in description.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "migration".to_string()
    } else {
        slug.to_string()
    }
}

/// Generate migration tool.
pub struct GenerateMigrationTool;

impl GenerateMigrationTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate_migration";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate a timestamped SQL migration file name and content from a description and SQL. Returns the text; the file is not written.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(description = %params.description))]
    pub fn execute(params: &GenerateMigrationParams, config: &Config) -> CallToolResult {
        let migration = MigrationFile::render(
            &params.description,
            &params.sql,
            &config.database.migrations_dir,
            Utc::now(),
        );

        info!("Generated migration {}", migration.path);

        success_result(format!(
            "Migration file: {}\n\n{}",
            migration.path, migration.content
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GenerateMigrationParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: GenerateMigrationParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
    }

    #[test]
    fn test_render_names_file_by_timestamp_and_slug() {
        let m = MigrationFile::render(
            "Add index on loads.status",
            "CREATE INDEX idx_loads_status ON loads (status);\n\n",
            "migrations",
            at(),
        );
        assert_eq!(m.path, "migrations/20260304050607_add_index_on_loads_status.sql");
        assert_eq!(
            m.content,
            "-- Migration: Add index on loads.status\n\
             -- Created: 2026-03-04T05:06:07+00:00\n\n\
             CREATE INDEX idx_loads_status ON loads (status);\n"
        );
    }

    #[test]
    fn test_render_without_dir() {
        let m = MigrationFile::render("x", "SELECT 1;", "", at());
        assert_eq!(m.path, "20260304050607_x.sql");
        let m = MigrationFile::render("x", "SELECT 1;", "db/migrations/", at());
        assert_eq!(m.path, "db/migrations/20260304050607_x.sql");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Create carriers table"), "create_carriers_table");
        assert_eq!(slugify("  --Add POD column!! "), "add_pod_column");
        assert_eq!(slugify("???"), "migration");
        assert_eq!(slugify(""), "migration");
        assert_eq!(slugify(&"a".repeat(80)).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_execute_returns_text_blob() {
        let params = GenerateMigrationParams {
            description: "Create loads".to_string(),
            sql: "CREATE TABLE loads (id serial primary key);".to_string(),
        };
        let result = GenerateMigrationTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(false));

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.starts_with("Migration file: migrations/"));
        assert!(text.contains("_create_loads.sql"));
        assert!(text.contains("CREATE TABLE loads"));
    }
}
