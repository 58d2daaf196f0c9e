//! Instruction prompt construction for the data agent.
//!
//! Embeds the schema catalog and fixed directives into the text sent to the
//! model. Cleaning of the model's output is the sanitizer's job, not the
//! model's; the prompt deliberately does not ask the model to clean up
//! after itself.

use crate::agent::SchemaCatalog;

/// Instruction template for SQL generation.
const INSTRUCTION_TEMPLATE: &str = r#"You are a Data Agent with access to a PostgreSQL database.
Table schemas: {schema}
Translate the user request into a valid SQL query for PostgreSQL.
Only return the SQL, no explanations.
Add prefix 'public.' to all table names.

User request: {request}"#;

/// Builds the full instruction prompt for a user request.
pub fn build_instruction(catalog: &SchemaCatalog, user_request: &str) -> String {
    INSTRUCTION_TEMPLATE
        .replace("{schema}", &catalog.to_prompt_json())
        .replace("{request}", user_request)
}
