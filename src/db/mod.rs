//! Database pool and the black-box query runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup creates the shared SQLx pool; the chat and dashboard services
//! hand model-generated SQL to [`run_query`], which returns rows as JSON
//! values. Any execution failure yields the empty table rather than an
//! error so downstream chart planning can detect "no data for this topic"
//! and skip it. A pooled connection is held only for the duration of each
//! query.

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Row, TypeInfo};
use tracing::warn;

use crate::tabular::{ColumnInfo, TableData};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Initialize the `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(db_max_connections())
        .connect(database_url)
        .await
}

// =============================================================================
// QUERY RUNNER
// =============================================================================

/// Execute `sql` and return the result table.
///
/// On any failure logs a warning and returns [`TableData::empty`]; callers
/// treat the empty table as "no data", never as an exception.
pub async fn run_query(pool: &PgPool, sql: &str) -> TableData {
    match fetch_table(pool, sql).await {
        Ok(table) => table,
        Err(e) => {
            warn!(error = %e, "query execution failed, returning empty table");
            TableData::empty()
        }
    }
}

async fn fetch_table(pool: &PgPool, sql: &str) -> Result<TableData, sqlx::Error> {
    let rows = sqlx::query(sql).fetch_all(pool).await?;

    let Some(first) = rows.first() else {
        return Ok(TableData::empty());
    };

    let columns: Vec<ColumnInfo> = first
        .columns()
        .iter()
        .map(|c| ColumnInfo { name: c.name().to_string(), dtype: c.type_info().name().to_string() })
        .collect();

    let data_rows = rows
        .iter()
        .map(|row| {
            row.columns()
                .iter()
                .enumerate()
                .map(|(idx, col)| decode_cell(row, idx, col.type_info().name()))
                .collect()
        })
        .collect();

    Ok(TableData { columns, rows: data_rows })
}

/// Decode one cell into a JSON value by Postgres type name.
///
/// Unrecognized or undecodable types degrade to `Null` rather than failing
/// the whole result.
fn decode_cell(row: &PgRow, idx: usize, type_name: &str) -> serde_json::Value {
    use serde_json::{Number, Value, json};

    match type_name {
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::String),
        "INT2" => row
            .try_get::<Option<i16>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| json!(v)),
        "INT4" => row
            .try_get::<Option<i32>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| json!(v)),
        "INT8" => row
            .try_get::<Option<i64>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| json!(v)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)
            .ok()
            .flatten()
            .and_then(|v| Number::from_f64(f64::from(v)))
            .map_or(Value::Null, Value::Number),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(idx)
            .ok()
            .flatten()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        "BOOL" => row
            .try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::Bool),
        "UUID" => row
            .try_get::<Option<uuid::Uuid>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_rfc3339())),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        "JSON" | "JSONB" => row
            .try_get::<Option<Value>, _>(idx)
            .ok()
            .flatten()
            .unwrap_or(Value::Null),
        _ => row
            .try_get::<Option<String>, _>(idx)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::String),
    }
}
