use super::*;

const SCHEMA: &str = r#"{ "type": "object" }"#;

// =============================================================================
// TABLE Q&A
// =============================================================================

#[test]
fn table_qa_interpolates_all_parameters() {
    let ctx = table_qa("oldest patients", "Table name = healthdb.t", SCHEMA);
    assert!(ctx.system.contains(SCHEMA));
    assert!(ctx.system.contains("Table name = healthdb.t"));
    assert!(ctx.user.contains("USER QUESTION: oldest patients"));
}

#[test]
fn table_qa_states_the_null_contract() {
    let ctx = table_qa("p", "d", SCHEMA);
    assert!(ctx.user.contains("\"null\""));
    assert!(ctx.user.contains("without concatenation operators"));
}

// =============================================================================
// PROMPT REWRITING
// =============================================================================

#[test]
fn rewrite_prompt_has_no_history_section() {
    let ctx = rewrite_prompt("my question", SCHEMA);
    assert!(ctx.system.contains(SCHEMA));
    assert!(!ctx.system.contains("previous prompts"));
    assert!(ctx.user.contains("my question"));
}

#[test]
fn rewrite_with_history_renders_turns_oldest_first() {
    let ctx = rewrite_prompt_with_history("next", &["first q", "second q"], &["first r", "second r"], SCHEMA);

    let first = ctx.system.find("'first q'").unwrap();
    let second = ctx.system.find("'second q'").unwrap();
    assert!(first < second);
    assert!(ctx.system.contains("['first r', 'second r']"));
    assert!(ctx.user.contains("previous conversation"));
}

// =============================================================================
// TABLE CHAT
// =============================================================================

fn preview() -> TablePreview<'static> {
    TablePreview { sample: "a | b", summary_stats: "a: count=1", schema_info: "a: INT4" }
}

#[test]
fn table_chat_carries_the_preview() {
    let ctx = table_chat("how many?", preview(), SCHEMA);
    assert!(ctx.system.contains("**DF**: a | b"));
    assert!(ctx.system.contains("**INFO**: a: INT4"));
    assert!(ctx.system.contains("**DESCRIPTION**: a: count=1"));
    assert!(!ctx.system.contains("previous prompts"));
}

#[test]
fn table_chat_with_history_appends_context() {
    let ctx = table_chat_with_history("how many?", preview(), &["q1"], &["r1"], SCHEMA);
    assert!(ctx.system.contains("**DF**: a | b"));
    assert!(ctx.system.contains("['q1']"));
    assert!(ctx.system.contains("['r1']"));
    assert!(ctx.user.contains("previous conversations"));
}

// =============================================================================
// DASHBOARD TEMPLATES
// =============================================================================

#[test]
fn report_plan_asks_for_one_to_three_reports() {
    let ctx = report_plan("overview of patients", "table desc", SCHEMA);
    assert!(ctx.system.contains("from 1 to 3"));
    assert!(ctx.system.contains("table desc"));
    assert_eq!(ctx.user, "overview of patients");
}

#[test]
fn sql_from_description_forbids_backslashes() {
    let ctx = sql_from_description("p", "Demographics", "Age breakdown", "table desc", SCHEMA);
    assert!(ctx.system.contains("Do NOT add any backslash"));
    assert!(ctx.system.contains("Report statement: Demographics"));
    assert!(ctx.system.contains("Report description: Age breakdown"));
}

#[test]
fn chart_plan_constrains_axes_to_single_columns() {
    let ctx = chart_plan("p", "sample", "stats", "bar_chart, line_chart", "bar_chart(x_col, y_col)", SCHEMA);
    assert!(ctx.system.contains("ONE x-axis column and ONE y-axis column"));
    assert!(ctx.system.contains("bar_chart, line_chart"));
    assert!(ctx.system.contains("bar_chart(x_col, y_col)"));
}
