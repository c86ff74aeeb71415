//! Schema registry — the fixed typed shapes model replies validate against.
//!
//! DESIGN
//! ======
//! One serde struct per use case, every one rejecting unknown fields. Each
//! shape also carries a hand-authored JSON-schema value that prompt
//! templates interpolate so the model sees exactly the contract the
//! validator enforces.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Sentinel string the model uses for "this field does not apply".
pub const NULL_SENTINEL: &str = "null";

// =============================================================================
// TYPED REPLY TRAIT
// =============================================================================

/// A reply shape the invocation pipeline is willing to validate against.
pub trait TypedReply: DeserializeOwned {
    /// Shape name used in validation diagnostics.
    const SHAPE: &'static str;

    /// JSON-schema description interpolated into prompts.
    fn schema() -> Value;

    /// Pretty-printed schema text for template interpolation.
    #[must_use]
    fn schema_text() -> String {
        serde_json::to_string_pretty(&Self::schema()).unwrap_or_default()
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// A SQL query or a plain-text fallback, never both. The inapplicable
/// field carries the `"null"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlOrAnswer {
    pub sql_query: String,
    pub normal_response: String,
}

impl SqlOrAnswer {
    /// The SQL text, unless the model answered with the sentinel.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        (self.sql_query != NULL_SENTINEL).then_some(self.sql_query.as_str())
    }
}

impl TypedReply for SqlOrAnswer {
    const SHAPE: &'static str = "SqlOrAnswer";

    fn schema() -> Value {
        json!({
            "title": "SqlOrAnswer",
            "type": "object",
            "properties": {
                "sql_query": { "type": "string", "description": "SQL query answering the prompt, or \"null\"" },
                "normal_response": { "type": "string", "description": "plain-text answer, or \"null\"" }
            },
            "required": ["sql_query", "normal_response"],
            "additionalProperties": false
        })
    }
}

/// An improved version of the user's prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewrittenPrompt {
    pub optimized_prompt: String,
}

impl TypedReply for RewrittenPrompt {
    const SHAPE: &'static str = "RewrittenPrompt";

    fn schema() -> Value {
        json!({
            "title": "RewrittenPrompt",
            "type": "object",
            "properties": {
                "optimized_prompt": { "type": "string", "description": "improved version of the user's prompt" }
            },
            "required": ["optimized_prompt"],
            "additionalProperties": false
        })
    }
}

/// Free-form conversational answer about the current table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreeformAnswer {
    pub bot_response: String,
}

impl TypedReply for FreeformAnswer {
    const SHAPE: &'static str = "FreeformAnswer";

    fn schema() -> Value {
        json!({
            "title": "FreeformAnswer",
            "type": "object",
            "properties": {
                "bot_response": { "type": "string", "description": "answer to the user's prompt" }
            },
            "required": ["bot_response"],
            "additionalProperties": false
        })
    }
}

/// One report topic in a dashboard decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportTopic {
    pub report_name: String,
    pub description: String,
}

/// Decomposition of a user request into 1–3 report topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportPlan {
    pub reports: Vec<ReportTopic>,
    pub num_reports: i64,
}

impl TypedReply for ReportPlan {
    const SHAPE: &'static str = "ReportPlan";

    fn schema() -> Value {
        json!({
            "title": "ReportPlan",
            "type": "object",
            "properties": {
                "reports": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "report_name": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["report_name", "description"],
                        "additionalProperties": false
                    }
                },
                "num_reports": { "type": "integer", "minimum": 1, "maximum": 3 }
            },
            "required": ["reports", "num_reports"],
            "additionalProperties": false
        })
    }
}

/// Bare SQL produced from a report description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlOutput {
    pub output: String,
}

impl TypedReply for SqlOutput {
    const SHAPE: &'static str = "SqlOutput";

    fn schema() -> Value {
        json!({
            "title": "SqlOutput",
            "type": "object",
            "properties": {
                "output": { "type": "string", "description": "the SQL query" }
            },
            "required": ["output"],
            "additionalProperties": false
        })
    }
}

/// One chart instruction in a plan. `chart_columns` maps axis-role names
/// declared by the renderer (e.g. `x_col`) to dataset column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartStep {
    pub chart_type: String,
    pub chart_description: String,
    pub chart_title: String,
    pub chart_columns: BTreeMap<String, String>,
}

/// Ordered chart instructions for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartPlan {
    pub chart_content: Vec<ChartStep>,
}

impl TypedReply for ChartPlan {
    const SHAPE: &'static str = "ChartPlan";

    fn schema() -> Value {
        json!({
            "title": "ChartPlan",
            "type": "object",
            "properties": {
                "chart_content": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "chart_type": { "type": "string", "description": "one of the available chart types" },
                            "chart_description": { "type": "string" },
                            "chart_title": { "type": "string" },
                            "chart_columns": {
                                "type": "object",
                                "description": "axis role -> column name, e.g. {\"x_col\": \"age\"}",
                                "additionalProperties": { "type": "string" }
                            }
                        },
                        "required": ["chart_type", "chart_description", "chart_title", "chart_columns"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["chart_content"],
            "additionalProperties": false
        })
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
