use serde_json::json;

use super::*;
use crate::llm::types::mock::MockLlm;
use crate::state::test_helpers::test_pool;
use crate::tabular::ColumnInfo;

fn fast_opts() -> AskOptions {
    AskOptions { retry_delay: std::time::Duration::ZERO, ..AskOptions::default() }
}

fn rewrite_reply() -> String {
    json!({ "optimized_prompt": "improved question" }).to_string()
}

// =============================================================================
// MAIN CHAT — answer path
// =============================================================================

#[tokio::test]
async fn plain_answer_skips_query_execution() {
    let llm = MockLlm::texts(&[
        &rewrite_reply(),
        r#"{ "sql_query": "null", "normal_response": "You are welcome." }"#,
    ]);
    let pool = test_pool();

    let outcome = answer_table_question(&llm, &pool, &[], "thanks!", &fast_opts())
        .await
        .unwrap();

    assert_eq!(outcome.rewritten_prompt, "improved question");
    assert_eq!(outcome.answer.as_deref(), Some("You are welcome."));
    assert!(outcome.sql.is_none());
    assert!(outcome.table.is_none());
    assert_eq!(llm.calls(), 2);
}

// =============================================================================
// MAIN CHAT — SQL path
// =============================================================================

#[tokio::test]
async fn sql_is_normalized_before_execution() {
    let llm = MockLlm::texts(&[
        &rewrite_reply(),
        r#"{ "sql_query": "SELECT *\nFROM t", "normal_response": "null" }"#,
    ]);
    // The lazy pool never connects, so execution fails and the runner
    // returns the empty-table sentinel.
    let pool = test_pool();

    let outcome = answer_table_question(&llm, &pool, &[], "show everything", &fast_opts())
        .await
        .unwrap();

    assert_eq!(outcome.sql.as_deref(), Some("SELECT * FROM t"));
    assert!(outcome.answer.is_none());
    assert!(outcome.table.as_ref().is_some_and(TableData::is_empty));
}

#[tokio::test]
async fn history_feeds_the_rewrite_call() {
    let llm = MockLlm::texts(&[
        &rewrite_reply(),
        r#"{ "sql_query": "null", "normal_response": "ok" }"#,
    ]);
    let pool = test_pool();
    let history = vec![("earlier question".to_string(), "earlier answer".to_string())];

    let outcome = answer_table_question(&llm, &pool, &history, "follow-up", &fast_opts())
        .await
        .unwrap();

    assert_eq!(outcome.answer.as_deref(), Some("ok"));
    assert_eq!(llm.calls(), 2);
}

#[tokio::test]
async fn pipeline_failure_propagates() {
    let llm = MockLlm::texts(&[r#"{ "unexpected": 1 }"#]);
    let pool = test_pool();

    let err = answer_table_question(&llm, &pool, &[], "q", &fast_opts())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::SchemaValidationFailed { shape: "RewrittenPrompt", .. }));
}

// =============================================================================
// SIDE CHAT
// =============================================================================

fn loaded_table() -> TableData {
    TableData {
        columns: vec![ColumnInfo { name: "age".into(), dtype: "INT4".into() }],
        rows: vec![vec![json!(76)], vec![json!(68)]],
    }
}

#[tokio::test]
async fn empty_table_short_circuits_without_a_model_call() {
    let llm = MockLlm::texts(&[]);

    let answer = side_chat(&llm, &TableData::empty(), &[], "anything?", &fast_opts())
        .await
        .unwrap();

    assert_eq!(answer, EMPTY_TABLE_REPLY);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn answers_over_the_loaded_table() {
    let llm = MockLlm::texts(&[r#"{ "bot_response": "Two patients, ages 68 and 76." }"#]);

    let answer = side_chat(&llm, &loaded_table(), &[], "how many patients?", &fast_opts())
        .await
        .unwrap();

    assert_eq!(answer, "Two patients, ages 68 and 76.");
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn history_is_threaded_into_the_context() {
    let llm = MockLlm::texts(&[r#"{ "bot_response": "As I said, two." }"#]);
    let history = vec![("how many patients?".to_string(), "Two.".to_string())];

    let answer = side_chat(&llm, &loaded_table(), &history, "repeat that", &fast_opts())
        .await
        .unwrap();

    assert_eq!(answer, "As I said, two.");
}
