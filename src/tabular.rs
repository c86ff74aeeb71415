//! Tabular results — the black-box "run query, get rows" exchange type.
//!
//! DESIGN
//! ======
//! `TableData` is the only shape that crosses the query-execution boundary:
//! column metadata plus rows of JSON values. The empty table doubles as the
//! query-failure sentinel. Prompt context never sees the full table — only
//! a bounded sample, per-column summary statistics, and schema info.

use std::collections::HashSet;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on rows shown to the model.
pub const SAMPLE_ROWS: usize = 20;

// =============================================================================
// TYPES
// =============================================================================

/// Column name and database type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
}

/// One query result: columns plus rows of JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<Value>>,
}

impl TableData {
    /// The empty table — also the query-failure sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self { columns: Vec::new(), rows: Vec::new() }
    }

    /// `true` when the table holds no rows ("no data for this topic").
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First `n` rows, same columns.
    #[must_use]
    pub fn sample(&self, n: usize) -> TableData {
        TableData { columns: self.columns.clone(), rows: self.rows.iter().take(n).cloned().collect() }
    }

    /// Pipe-separated preview of up to `n` rows, header first.
    #[must_use]
    pub fn render_preview(&self, n: usize) -> String {
        let mut out = String::new();
        let header: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(out, "{}", header.join(" | "));
        for row in self.rows.iter().take(n) {
            let cells: Vec<String> = row.iter().map(render_cell).collect();
            let _ = writeln!(out, "{}", cells.join(" | "));
        }
        out
    }

    /// Column names and database types, one line per column.
    #[must_use]
    pub fn schema_info(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} rows x {} columns", self.rows.len(), self.columns.len());
        for col in &self.columns {
            let _ = writeln!(out, "{}: {}", col.name, col.dtype);
        }
        out
    }

    /// Descriptive statistics per column: count/mean/min/max for numeric
    /// columns, count/unique for everything else.
    #[must_use]
    pub fn summary_stats(&self) -> String {
        let mut out = String::new();
        for (idx, col) in self.columns.iter().enumerate() {
            let cells: Vec<&Value> = self
                .rows
                .iter()
                .filter_map(|row| row.get(idx))
                .filter(|v| !v.is_null())
                .collect();
            let numeric: Vec<f64> = cells.iter().filter_map(|v| v.as_f64()).collect();

            if numeric.is_empty() {
                let unique: HashSet<String> = cells.iter().copied().map(render_cell).collect();
                let _ = writeln!(out, "{}: count={} unique={}", col.name, cells.len(), unique.len());
            } else {
                let count = numeric.len();
                let sum: f64 = numeric.iter().sum();
                let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
                let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                #[allow(clippy::cast_precision_loss)]
                let mean = sum / count as f64;
                let _ = writeln!(out, "{}: count={count} mean={mean:.2} min={min} max={max}", col.name);
            }
        }
        out
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tabular_test.rs"]
mod tests;
