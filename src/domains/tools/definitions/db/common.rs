//! Helpers shared by the database tools.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use crate::core::database::{DatabaseError, QueryOutput};

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Render a query outcome: pretty JSON on success, a flagged error otherwise.
pub fn query_result(outcome: Result<QueryOutput, DatabaseError>) -> CallToolResult {
    match outcome {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => success_result(json),
            Err(e) => error_result(&format!("Failed to encode query result: {}", e)),
        },
        Err(e) => error_result(&format!("Database error: {}", e)),
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory [`SqlClient`] for tool tests.

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    use crate::core::database::{DatabaseError, FieldInfo, QueryOutput, SqlClient};

    /// Answers catalog queries from a fixed table list, accepts `SELECT`
    /// statements, and rejects anything else as a syntax error.
    #[derive(Default)]
    pub struct StubClient {
        pub tables: Vec<(&'static str, Vec<(&'static str, &'static str)>)>,
        pub calls: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl StubClient {
        pub fn with_loads_schema() -> Self {
            Self {
                tables: vec![
                    (
                        "loads",
                        vec![("id", "integer"), ("status", "text"), ("shipper_id", "integer")],
                    ),
                    ("carriers", vec![("id", "integer"), ("mc_number", "text")]),
                ],
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn last_call(&self) -> Option<(String, Vec<Value>)> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    fn field(name: &str, data_type: &str) -> FieldInfo {
        FieldInfo {
            name: name.to_string(),
            data_type: data_type.to_string(),
        }
    }

    fn output(rows: Vec<Value>, fields: Vec<FieldInfo>) -> QueryOutput {
        QueryOutput {
            row_count: rows.len() as u64,
            fields: if rows.is_empty() { Vec::new() } else { fields },
            rows,
        }
    }

    #[async_trait]
    impl SqlClient for StubClient {
        async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryOutput, DatabaseError> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), params.to_vec()));

            if sql.contains("information_schema.tables") {
                let mut names: Vec<_> = self.tables.iter().map(|(name, _)| *name).collect();
                names.sort();
                let rows = names.into_iter().map(|n| json!({ "table_name": n })).collect();
                return Ok(output(rows, vec![field("table_name", "TEXT")]));
            }

            if sql.contains("information_schema.columns") {
                let wanted = params.get(1).and_then(Value::as_str).unwrap_or_default();
                let rows = self
                    .tables
                    .iter()
                    .filter(|(name, _)| *name == wanted)
                    .flat_map(|(_, columns)| columns.iter())
                    .map(|(column, data_type)| {
                        json!({
                            "column_name": column,
                            "data_type": data_type,
                            "is_nullable": "YES",
                            "column_default": null
                        })
                    })
                    .collect();
                return Ok(output(
                    rows,
                    vec![
                        field("column_name", "TEXT"),
                        field("data_type", "TEXT"),
                        field("is_nullable", "TEXT"),
                        field("column_default", "TEXT"),
                    ],
                ));
            }

            if sql.trim_start().to_ascii_uppercase().starts_with("SELECT ") {
                return Ok(output(vec![json!({ "one": 1 })], vec![field("one", "INT4")]));
            }

            Err(DatabaseError::Sqlx(sqlx::Error::Protocol(format!(
                "syntax error at or near \"{}\"",
                sql.split_whitespace().next().unwrap_or_default()
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_result_success_is_json() {
        let result = query_result(Ok(QueryOutput::default()));
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_query_result_error_is_flagged() {
        let result = query_result(Err(DatabaseError::NotConfigured));
        assert_eq!(result.is_error, Some(true));
    }
}
