//! SQL client used by the database tools.
//!
//! Tools talk to the database through the [`SqlClient`] trait. The production
//! implementation, [`PgClient`], forwards statements verbatim to Postgres over
//! an sqlx pool that is created lazily: nothing connects until the first tool
//! call, so the server starts (and keeps serving) without a reachable database.

use async_trait::async_trait;
use futures::TryStreamExt;
use serde::Serialize;
use serde_json::{Value, json};
use sqlx::postgres::types::PgInterval;
use sqlx::postgres::{PgArguments, PgColumn, PgPoolOptions, PgRow, PgTypeKind, PgValueFormat};
use sqlx::query::Query;
use sqlx::types::BigDecimal;
use sqlx::{Column, Either, Executor, PgPool, Postgres, Row, TypeInfo, ValueRef};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use super::config::DatabaseConfig;

/// Errors returned by a [`SqlClient`].
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No connection URL was configured.
    #[error("Database not configured: set DATABASE_URL")]
    NotConfigured,

    /// Error reported by sqlx or the database itself.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Column metadata of a result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub name: String,
    pub data_type: String,
}

/// Result of one forwarded statement.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutput {
    /// Rows as JSON objects keyed by column name.
    pub rows: Vec<Value>,

    /// Rows returned, or rows affected for statements that return none.
    pub row_count: u64,

    /// Result columns, empty when no row came back.
    pub fields: Vec<FieldInfo>,
}

/// Something that can run a SQL statement with positional parameters.
#[async_trait]
pub trait SqlClient: Send + Sync {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryOutput, DatabaseError>;
}

// ============================================================================
// Postgres client
// ============================================================================

/// Postgres-backed [`SqlClient`].
pub struct PgClient {
    pool: Option<PgPool>,
}

impl PgClient {
    /// Build a client from configuration. The pool connects on first use; only
    /// a malformed URL fails here.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let Some(url) = config.url.as_deref() else {
            return Ok(Self::unconfigured());
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(url)?;

        info!(
            "Database pool ready (max {} connections, schema '{}')",
            config.max_connections, config.schema
        );

        Ok(Self { pool: Some(pool) })
    }

    /// A client that rejects every statement with [`DatabaseError::NotConfigured`].
    pub fn unconfigured() -> Self {
        Self { pool: None }
    }
}

#[async_trait]
impl SqlClient for PgClient {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryOutput, DatabaseError> {
        let pool = self.pool.as_ref().ok_or(DatabaseError::NotConfigured)?;

        debug!(params = params.len(), "Executing SQL: {}", sql);

        // Without parameters the text goes over the simple protocol, which
        // accepts several `;`-separated statements and returns text values.
        let mut results = if params.is_empty() {
            pool.fetch_many(sqlx::raw_sql(sql))
        } else {
            let mut query = sqlx::query(sql).persistent(false);
            for param in params {
                query = bind_json(query, param);
            }
            pool.fetch_many(query)
        };

        let mut output = QueryOutput::default();
        let mut rows_affected = 0;

        while let Some(item) = results.try_next().await? {
            match item {
                Either::Left(done) => rows_affected += done.rows_affected(),
                Either::Right(row) => {
                    if output.fields.is_empty() {
                        output.fields = field_info(&row);
                    }
                    output.rows.push(row_to_json(&row));
                }
            }
        }

        output.row_count = if output.rows.is_empty() {
            rows_affected
        } else {
            output.rows.len() as u64
        };

        Ok(output)
    }
}

/// Bind a JSON value as the next positional parameter.
///
/// Strings bind as TEXT, so statements comparing against other column types
/// need an explicit cast (`$1::date`). Arrays and objects bind as JSONB.
fn bind_json<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &Value,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(sqlx::types::Json(value.clone())),
    }
}

fn field_info(row: &PgRow) -> Vec<FieldInfo> {
    row.columns()
        .iter()
        .map(|column| FieldInfo {
            name: column.name().to_string(),
            data_type: column.type_info().name().to_string(),
        })
        .collect()
}

/// Convert a row to a JSON object, decoding by the column's Postgres type.
fn row_to_json(row: &PgRow) -> Value {
    let mut obj = serde_json::Map::new();

    for column in row.columns() {
        obj.insert(column.name().to_string(), column_value(row, column));
    }

    Value::Object(obj)
}

fn column_value(row: &PgRow, column: &PgColumn) -> Value {
    let idx = column.ordinal();
    let type_info = column.type_info();

    let raw = match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw,
        Err(e) => {
            debug!("Cannot read column {}: {}", idx, e);
            return Value::Null;
        }
    };

    let decoded = match type_info.name() {
        "BOOL" => row.try_get::<bool, _>(idx).map(Value::from),
        "INT2" => row.try_get::<i16, _>(idx).map(Value::from),
        "INT4" => row.try_get::<i32, _>(idx).map(Value::from),
        "INT8" => row.try_get::<i64, _>(idx).map(Value::from),
        "FLOAT4" => row.try_get::<f32, _>(idx).map(Value::from),
        "FLOAT8" => row.try_get::<f64, _>(idx).map(Value::from),
        "NUMERIC" => row
            .try_get::<BigDecimal, _>(idx)
            .map(|n| Value::from(numeric_text(&n))),
        "JSON" | "JSONB" => row.try_get::<Value, _>(idx),
        "TIMESTAMPTZ" => row
            .try_get::<chrono::DateTime<chrono::Utc>, _>(idx)
            .map(|ts| Value::from(ts.to_rfc3339())),
        "TIMESTAMP" => row
            .try_get::<chrono::NaiveDateTime, _>(idx)
            .map(|ts| Value::from(ts.to_string())),
        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(idx)
            .map(|d| Value::from(d.to_string())),
        "TIME" => row
            .try_get::<chrono::NaiveTime, _>(idx)
            .map(|t| Value::from(t.to_string())),
        "INTERVAL" => row.try_get::<PgInterval, _>(idx).map(|iv| {
            json!({
                "months": iv.months,
                "days": iv.days,
                "microseconds": iv.microseconds,
            })
        }),
        "UUID" => row
            .try_get::<sqlx::types::Uuid, _>(idx)
            .map(|id| Value::from(id.to_string())),
        "BOOL[]" => row.try_get::<Vec<Option<bool>>, _>(idx).map(|v| json!(v)),
        "INT2[]" => row.try_get::<Vec<Option<i16>>, _>(idx).map(|v| json!(v)),
        "INT4[]" => row.try_get::<Vec<Option<i32>>, _>(idx).map(|v| json!(v)),
        "INT8[]" => row.try_get::<Vec<Option<i64>>, _>(idx).map(|v| json!(v)),
        "FLOAT4[]" => row.try_get::<Vec<Option<f32>>, _>(idx).map(|v| json!(v)),
        "FLOAT8[]" => row.try_get::<Vec<Option<f64>>, _>(idx).map(|v| json!(v)),
        "NUMERIC[]" => row.try_get::<Vec<Option<BigDecimal>>, _>(idx).map(|v| {
            v.iter()
                .map(|n| n.as_ref().map_or(Value::Null, |n| Value::from(numeric_text(n))))
                .collect::<Value>()
        }),
        "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => {
            row.try_get::<Vec<Option<String>>, _>(idx).map(|v| json!(v))
        }
        "UUID[]" => row
            .try_get::<Vec<Option<sqlx::types::Uuid>>, _>(idx)
            .map(|v| {
                v.iter()
                    .map(|id| id.map_or(Value::Null, |id| Value::from(id.to_string())))
                    .collect::<Value>()
            }),
        _ => row.try_get::<String, _>(idx).map(Value::from),
    };

    // Anything else is only readable as-is when the server sent text: the
    // simple protocol always does, and an enum's binary form is its label.
    // Other binary values become null.
    decoded
        .or_else(|e| {
            let textual = matches!(raw.format(), PgValueFormat::Text)
                || matches!(type_info.kind(), PgTypeKind::Enum(_));
            if textual {
                raw.as_str().map(Value::from).map_err(|_| e)
            } else {
                Err(e)
            }
        })
        .unwrap_or_else(|e| {
            debug!("Cannot decode {} column {}: {}", type_info.name(), idx, e);
            Value::Null
        })
}

/// Decimal text of a NUMERIC without trailing fractional zeros, so the same
/// value reads the same whichever protocol carried it.
fn numeric_text(value: &BigDecimal) -> String {
    let text = value.to_string();
    if text.contains('.') && !text.contains(['e', 'E']) {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
