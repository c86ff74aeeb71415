//! Prompt template catalog — one pure constructor per use case.
//!
//! DESIGN
//! ======
//! Each constructor turns named runtime values (table description, prior
//! turns, dataframe preview, output schema) into an immutable
//! [`PromptContext`]. Templates never perform I/O or validation; the
//! catalog is process-wide immutable behavior. History is always rendered
//! as two parallel ordered sequences, oldest first.

use std::fmt::Write;

// =============================================================================
// PROMPT CONTEXT
// =============================================================================

/// One (system, user) pair, built fresh per model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub system: String,
    pub user: String,
}

// =============================================================================
// TABLE Q&A
// =============================================================================

/// SQL-or-answer agent: produce a query against the described table, or a
/// plain-text answer, never both.
#[must_use]
pub fn table_qa(user_prompt: &str, table_description: &str, output_schema: &str) -> PromptContext {
    let system = format!(
        "You are a helpful SQL query assistant that returns SQL queries in a JSON response \
         using the schema: {output_schema}\n\
         You have access to one SQL table. Information about the table is given below:\n\n\
         {table_description}"
    );
    let user = format!(
        "Your task is to return an SQL query, if necessary, that answers the user's prompt.\n\
         If the user's question does not require an SQL query, give an answer based on your \
         current knowledge.\n\
         When returning the SQL query, adhere to the following instructions:\n\
         1. Always reference the table by its fully qualified name exactly as given in the \
         table description.\n\
         2. If the answer requires a complex SQL query, use Common Table Expressions (CTEs) \
         or subqueries where possible.\n\
         3. Generate a valid SQL query that can be executed directly, without concatenation \
         operators (e.g. `+`).\n\
         4. If the answer requires an SQL query, set sql_query to the query and \
         normal_response to \"null\". If it does not, set sql_query to \"null\" and \
         normal_response to a fitting answer.\n\n\
         USER QUESTION: {user_prompt}"
    );
    PromptContext { system, user }
}

// =============================================================================
// PROMPT REWRITING
// =============================================================================

/// First-turn prompt rewriting: no history available yet.
#[must_use]
pub fn rewrite_prompt(user_prompt: &str, output_schema: &str) -> PromptContext {
    let system = format!(
        "You are a skillful and effective communicator that helps optimize and contextualize \
         a user's prompts by generating a new and improved user prompt in JSON.\n\
         The newly generated user prompts must use the schema: {output_schema}\n\
         You take in the user's prompt and create an improved version of it."
    );
    let user = format!(
        "Please generate an improved version of the user's prompt given below.\n\
         User's prompt: {user_prompt}"
    );
    PromptContext { system, user }
}

/// Prompt rewriting with conversation history, oldest turns first.
#[must_use]
pub fn rewrite_prompt_with_history(
    user_prompt: &str,
    prior_queries: &[&str],
    prior_responses: &[&str],
    output_schema: &str,
) -> PromptContext {
    let system = format!(
        "You are a skillful and effective communicator that helps optimize and contextualize \
         a user's prompts by generating a new and improved user prompt in JSON.\n\
         The newly generated user prompts must use the schema: {output_schema}\n\
         You are given 2 collections of texts from a conversation between a user and yourself: \
         the user's previous prompts and your responses.\n\
         **User's previous prompts** - prior questions or statements made by the user, in the \
         sequence they were sent.\n\
         **Your responses** - the responses you have given so far to each of those prompts.\n\n\
         Context:\n\
             User's previous prompts: {prior}\n\
             Your responses so far: {responses}",
        prior = render_sequence(prior_queries),
        responses = render_sequence(prior_responses),
    );
    let user = format!(
        "Please generate an improved version of the user's prompt given below.\n\
         Ensure the previous conversation is taken into consideration if it is relevant to \
         the user's current prompt.\n\n\
         User's prompt: {user_prompt}"
    );
    PromptContext { system, user }
}

// =============================================================================
// FREE-FORM TABLE CHAT
// =============================================================================

/// Values the dataframe collaborator supplies for table chat: a bounded
/// sample, descriptive statistics, and schema info — never the full table.
#[derive(Debug, Clone, Copy)]
pub struct TablePreview<'a> {
    pub sample: &'a str,
    pub summary_stats: &'a str,
    pub schema_info: &'a str,
}

/// Free-form Q&A over the current table, first turn.
#[must_use]
pub fn table_chat(user_prompt: &str, preview: TablePreview<'_>, output_schema: &str) -> PromptContext {
    let system = format!(
        "You are a skillful and effective communicator that answers a user's prompt in the \
         most accurate and easy-to-understand way possible, in JSON.\n\
         Your responses must use the schema: {output_schema}\n\
         You have access to a dataframe (DF) truncated at {rows} rows along with some of its \
         characteristics: INFO and DESCRIPTION. Use these if necessary to answer the user's \
         prompt. If you do not need the dataframe to answer, answer from your own knowledge \
         base.\n\
         **DF**: {sample}\n\
         **INFO**: {info}\n\
         **DESCRIPTION**: {stats}",
        rows = crate::tabular::SAMPLE_ROWS,
        sample = preview.sample,
        info = preview.schema_info,
        stats = preview.summary_stats,
    );
    let user = table_chat_user_text(user_prompt, false);
    PromptContext { system, user }
}

/// Free-form Q&A over the current table with conversation history.
#[must_use]
pub fn table_chat_with_history(
    user_prompt: &str,
    preview: TablePreview<'_>,
    prior_queries: &[&str],
    prior_responses: &[&str],
    output_schema: &str,
) -> PromptContext {
    let mut ctx = table_chat(user_prompt, preview, output_schema);
    let _ = write!(
        ctx.system,
        "\nIn addition, you have access to 2 collections of texts from an ongoing conversation \
         between the user and yourself: the user's previous prompts and your responses.\n\n\
         Context:\n\
             User's previous prompts: {prior}\n\
             Your responses so far: {responses}",
        prior = render_sequence(prior_queries),
        responses = render_sequence(prior_responses),
    );
    ctx.user = table_chat_user_text(user_prompt, true);
    ctx
}

fn table_chat_user_text(user_prompt: &str, with_history: bool) -> String {
    let history_rule = if with_history {
        "3. Incorporate relevant information from previous conversations, if applicable.\n"
    } else {
        ""
    };
    format!(
        "Please answer the user's prompt given below. Use the following instructions:\n\
         1. If the user's prompt has nothing to do with the dataframe, answer it from your \
         knowledge base.\n\
         2. If the user's prompt is related to the dataframe, use the data content within its \
         cells and avoid describing the table structure (column names, schema, or general \
         metadata).\n\
         {history_rule}\
         Focus on providing insights about the records in the dataframe rather than the \
         structure of the table.\n\n\
         User's prompt: {user_prompt}"
    )
}

// =============================================================================
// DASHBOARD GENERATION
// =============================================================================

/// Report decomposition: 1–3 report topics with descriptions.
#[must_use]
pub fn report_plan(user_prompt: &str, table_description: &str, output_schema: &str) -> PromptContext {
    let system = format!(
        "Help return the number of relevant detailed reports (from 1 to 3) that can be used \
         to answer the user prompt: '{user_prompt}'.\n\n\
         Return your answer **only** as a valid JSON object. Do **not** include any \
         explanations, comments, or text outside the JSON object.\n\
         The JSON object must strictly follow the schema below:\n\
         {output_schema}\n\
         If your output does not strictly match the JSON schema, it will fail validation.\n\n\
         The reports are going to be generated using SQL queries from the table described \
         below:\n\
         Table description:\n\
         {table_description}"
    );
    PromptContext { system, user: user_prompt.to_string() }
}

/// SQL from a report topic and its description. The resulting table feeds
/// chart generation, so the query must be directly executable.
#[must_use]
pub fn sql_from_description(
    user_prompt: &str,
    report_statement: &str,
    report_description: &str,
    table_description: &str,
    output_schema: &str,
) -> PromptContext {
    let system = format!(
        "Help answer the user query by returning an SQL query in valid JSON.\n\
         1. Keep in mind that the resulting table of the SQL query will be used to create \
         charts and graphs.\n\
         2. The SQL query must answer the report statement and report description provided \
         below.\n\
         3. The SQL query must be able to query the database table whose description is also \
         given below.\n\
         4. You can make use of CTEs or subqueries, depending on the complexity of the \
         scenario.\n\
         5. Return your answer **only** as a valid JSON object. Do **not** include any \
         explanations, comments, or text outside the JSON object.\n\
         6. The JSON object must strictly follow the schema below:\n\
         {output_schema}\n\
         7. Do NOT add any backslash or any unnecessary character. Neat formatting does not \
         matter.\n\n\
         Report statement: {report_statement}\n\
         Report description: {report_description}\n\n\
         Table description:\n\
         {table_description}"
    );
    PromptContext { system, user: user_prompt.to_string() }
}

/// Chart planning over one result table. Constrains every chart to one
/// x-axis and one y-axis column reference.
#[must_use]
pub fn chart_plan(
    user_prompt: &str,
    sample: &str,
    summary_stats: &str,
    chart_type_names: &str,
    chart_capability_table: &str,
    output_schema: &str,
) -> PromptContext {
    let system = format!(
        "Determine the appropriate charts and graphs to answer the user's prompt.\n\n\
         1. **Instructions**:\n\
            - Do **not** generate charts; instead, provide detailed instructions for chart \
         creation.\n\
            - Return the response **only** as a valid JSON object following the schema: \
         {output_schema}\n\
            - Each chart can only take ONE x-axis column and ONE y-axis column. DO NOT under \
         any circumstance provide multiple column values for x-axis or y-axis columns.\n\
            - **Chart type**: specify the chart type (e.g. bar_chart, line_chart, etc.).\n\
            - **Description**: briefly describe the chart and the data it represents.\n\
            - **Chart title**: provide a clear, descriptive title.\n\
            - **Chart columns**: map the dataset columns to the chart axes (e.g. \
         \"x_col\": \"column1\", \"y_col\": \"column2\"); every value **must be a single \
         column name** from the dataset (no lists or arrays).\n\
            - Do NOT add backslashes, comments, or extra characters.\n\n\
         2. **Inputs**:\n\
            - **User prompt**: `{user_prompt}`\n\
            - **Dataset sample**: `{sample}`\n\
            - **Dataset stats**: `{summary_stats}`\n\
            - **Chart types**: `{chart_type_names}`\n\
            - **Chart metadata**: `{chart_capability_table}`"
    );
    PromptContext { system, user: user_prompt.to_string() }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Render an ordered sequence as a bracketed list of quoted items.
fn render_sequence(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;
