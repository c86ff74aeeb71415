use serde_json::json;

use super::*;

// =============================================================================
// VALIDATION — happy paths
// =============================================================================

#[test]
fn sql_or_answer_validates() {
    let reply: SqlOrAnswer =
        serde_json::from_value(json!({ "sql_query": "SELECT 1", "normal_response": "null" })).unwrap();
    assert_eq!(reply.sql(), Some("SELECT 1"));
}

#[test]
fn sql_or_answer_null_sentinel_means_no_sql() {
    let reply: SqlOrAnswer =
        serde_json::from_value(json!({ "sql_query": "null", "normal_response": "hello" })).unwrap();
    assert_eq!(reply.sql(), None);
    assert_eq!(reply.normal_response, "hello");
}

#[test]
fn rewritten_prompt_validates() {
    let reply: RewrittenPrompt = serde_json::from_value(json!({ "optimized_prompt": "better" })).unwrap();
    assert_eq!(reply.optimized_prompt, "better");
}

#[test]
fn freeform_answer_validates() {
    let reply: FreeformAnswer = serde_json::from_value(json!({ "bot_response": "hi" })).unwrap();
    assert_eq!(reply.bot_response, "hi");
}

#[test]
fn report_plan_validates() {
    let reply: ReportPlan = serde_json::from_value(json!({
        "reports": [
            { "report_name": "Demographics", "description": "Age and gender breakdown" },
            { "report_name": "Diagnoses", "description": "Top diagnoses" }
        ],
        "num_reports": 2
    }))
    .unwrap();
    assert_eq!(reply.reports.len(), 2);
    assert_eq!(reply.num_reports, 2);
    assert_eq!(reply.reports[0].report_name, "Demographics");
}

#[test]
fn sql_output_validates() {
    let reply: SqlOutput = serde_json::from_value(json!({ "output": "SELECT * FROM t" })).unwrap();
    assert_eq!(reply.output, "SELECT * FROM t");
}

#[test]
fn chart_plan_validates() {
    let reply: ChartPlan = serde_json::from_value(json!({
        "chart_content": [{
            "chart_type": "bar_chart",
            "chart_description": "ages",
            "chart_title": "Age by department",
            "chart_columns": { "x_col": "department", "y_col": "age" }
        }]
    }))
    .unwrap();
    assert_eq!(reply.chart_content.len(), 1);
    assert_eq!(reply.chart_content[0].chart_columns["x_col"], "department");
}

// =============================================================================
// VALIDATION — extra fields rejected everywhere
// =============================================================================

#[test]
fn sql_or_answer_rejects_extra_fields() {
    let result = serde_json::from_value::<SqlOrAnswer>(json!({
        "sql_query": "SELECT 1", "normal_response": "null", "extra": true
    }));
    assert!(result.is_err());
}

#[test]
fn rewritten_prompt_rejects_extra_fields() {
    let result = serde_json::from_value::<RewrittenPrompt>(json!({ "optimized_prompt": "p", "note": "x" }));
    assert!(result.is_err());
}

#[test]
fn freeform_answer_rejects_extra_fields() {
    let result = serde_json::from_value::<FreeformAnswer>(json!({ "bot_response": "hi", "mood": "good" }));
    assert!(result.is_err());
}

#[test]
fn report_plan_rejects_extra_fields() {
    let result = serde_json::from_value::<ReportPlan>(json!({ "reports": [], "num_reports": 0, "x": 1 }));
    assert!(result.is_err());
}

#[test]
fn report_topic_rejects_extra_fields() {
    let result = serde_json::from_value::<ReportPlan>(json!({
        "reports": [{ "report_name": "a", "description": "b", "priority": 1 }],
        "num_reports": 1
    }));
    assert!(result.is_err());
}

#[test]
fn sql_output_rejects_extra_fields() {
    let result = serde_json::from_value::<SqlOutput>(json!({ "output": "SELECT 1", "dialect": "pg" }));
    assert!(result.is_err());
}

#[test]
fn chart_step_rejects_extra_fields() {
    let result = serde_json::from_value::<ChartPlan>(json!({
        "chart_content": [{
            "chart_type": "bar_chart",
            "chart_description": "d",
            "chart_title": "t",
            "chart_columns": {},
            "palette": "viridis"
        }]
    }));
    assert!(result.is_err());
}

#[test]
fn missing_required_field_rejected() {
    let result = serde_json::from_value::<SqlOrAnswer>(json!({ "sql_query": "SELECT 1" }));
    assert!(result.is_err());
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[test]
fn valid_objects_survive_a_round_trip() {
    let original = SqlOrAnswer { sql_query: "null".into(), normal_response: "fine".into() };
    let reparsed: SqlOrAnswer = serde_json::from_value(serde_json::to_value(&original).unwrap()).unwrap();
    assert_eq!(original, reparsed);

    let plan = ChartPlan {
        chart_content: vec![ChartStep {
            chart_type: "line_chart".into(),
            chart_description: "trend".into(),
            chart_title: "Heart rate over time".into(),
            chart_columns: [("x_col".to_string(), "created_at".to_string())].into_iter().collect(),
        }],
    };
    let reparsed: ChartPlan = serde_json::from_value(serde_json::to_value(&plan).unwrap()).unwrap();
    assert_eq!(plan, reparsed);
}

// =============================================================================
// SCHEMA TEXT
// =============================================================================

#[test]
fn schemas_declare_closed_objects() {
    for schema in [
        SqlOrAnswer::schema(),
        RewrittenPrompt::schema(),
        FreeformAnswer::schema(),
        ReportPlan::schema(),
        SqlOutput::schema(),
        ChartPlan::schema(),
    ] {
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
    }
}

#[test]
fn schema_text_is_pretty_json() {
    let text = SqlOrAnswer::schema_text();
    assert!(text.contains("\"sql_query\""));
    assert!(text.contains('\n'));
}
