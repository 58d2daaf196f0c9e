//! The prompt-to-SQL translation pipeline.
//!
//! Composes the model client, the sanitizer and the executor: build the
//! instruction, stream and concatenate the generation, clean it, run it.
//! Model and database failures are folded into a single-row error table so
//! the caller never needs its own error handling on this path.

use tracing::debug;

use crate::agent::{build_instruction, SchemaCatalog};
use crate::db::{SqlExecutor, TabularResult};
use crate::error::{ParleyError, Result};
use crate::model::{collect_stream, ModelClient};
use crate::sql::clean_sql;

/// Translates natural-language requests into executed SQL.
pub struct DataAgent<'a> {
    model: &'a dyn ModelClient,
    executor: &'a dyn SqlExecutor,
    catalog: &'a SchemaCatalog,
}

impl<'a> DataAgent<'a> {
    /// Creates a new agent over the given collaborators.
    pub fn new(
        model: &'a dyn ModelClient,
        executor: &'a dyn SqlExecutor,
        catalog: &'a SchemaCatalog,
    ) -> Self {
        Self {
            model,
            executor,
            catalog,
        }
    }

    /// Runs one user request end to end.
    ///
    /// Connection, model and query failures come back as an `Error` table;
    /// configuration and internal errors propagate so bugs are not masked
    /// as query failures.
    pub async fn translate_and_run(&self, user_request: &str, model: &str) -> Result<TabularResult> {
        match self.run_inner(user_request, model).await {
            Ok(result) => Ok(result),
            Err(TranslationFailure { sql, error }) if error.is_pipeline_recoverable() => {
                Ok(TabularResult::error_table(error_cell(sql.as_deref(), &error)))
            }
            Err(TranslationFailure { error, .. }) => Err(error),
        }
    }

    /// The fallible pipeline body; failures carry the cleaned SQL when one
    /// was produced before things went wrong.
    async fn run_inner(
        &self,
        user_request: &str,
        model: &str,
    ) -> std::result::Result<TabularResult, TranslationFailure> {
        let instruction = build_instruction(self.catalog, user_request);

        let raw = self
            .stream_generation(&instruction, model)
            .await
            .map_err(TranslationFailure::before_sql)?;

        let sql = clean_sql(&raw);
        debug!(%sql, "Generated SQL");

        self.executor
            .execute(&sql)
            .await
            .map_err(|e| TranslationFailure::with_sql(sql, e))
    }

    /// Streams the generation and concatenates fragments in arrival order.
    async fn stream_generation(&self, instruction: &str, model: &str) -> Result<String> {
        let stream = self.model.stream(model, instruction).await?;
        collect_stream(stream).await
    }
}

/// A pipeline failure, with the cleaned SQL if translation got that far.
struct TranslationFailure {
    sql: Option<String>,
    error: ParleyError,
}

impl TranslationFailure {
    fn before_sql(error: ParleyError) -> Self {
        Self { sql: None, error }
    }

    fn with_sql(sql: String, error: ParleyError) -> Self {
        Self {
            sql: Some(sql),
            error,
        }
    }
}

/// Formats the error-table cell: the failed SQL (when produced) and the
/// error message, separated by a blank line.
fn error_cell(sql: Option<&str>, error: &ParleyError) -> String {
    match sql {
        Some(sql) if !sql.is_empty() => format!("Failed SQL:\n{sql}\n\n{error}"),
        _ => error.to_string(),
    }
}
