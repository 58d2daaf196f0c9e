//! End-to-end tests for the translation pipeline over the mock seams.
//!
//! No network and no database: the model client and executor are the
//! in-crate mocks, exercised through the public library API exactly as the
//! binary wires them together.

use db_parley::agent::{build_instruction, ChatAgent, DataAgent, SchemaCatalog};
use db_parley::db::{FailingExecutor, MockExecutor, TabularResult, Value};
use db_parley::model::{collect_stream, list_models_or_default, MockModelClient};
use db_parley::sql::clean_sql;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn success_path_returns_executor_table_unchanged() {
    let model = MockModelClient::new().with_fragments(["SELECT 1 AS x"]);
    let expected = TabularResult::with_data(vec!["x".to_string()], vec![vec![Value::Int(1)]]);
    let executor = MockExecutor::with_result(expected.clone());
    let catalog = SchemaCatalog::demo();

    let agent = DataAgent::new(&model, &executor, &catalog);
    let result = agent.translate_and_run("give me one", "m").await.unwrap();

    assert_eq!(result, expected);
}

#[tokio::test]
async fn fragment_boundaries_do_not_affect_the_generated_sql() {
    let whole = MockModelClient::new().with_fragments(["SELECT 1 AS x"]);
    let split = MockModelClient::new().with_fragments(["SEL", "ECT 1", " AS x"]);
    let catalog = SchemaCatalog::demo();

    for model in [whole, split] {
        let executor = MockExecutor::new();
        let agent = DataAgent::new(&model, &executor, &catalog);
        agent.translate_and_run("one", "m").await.unwrap();
        assert_eq!(executor.executed_sql(), vec!["SELECT 1 AS x".to_string()]);
    }
}

#[tokio::test]
async fn failed_query_surfaces_as_single_row_error_table() {
    let model =
        MockModelClient::new().with_fragments(["```sql\nSELECT * FROM nonexistent_table```"]);
    let executor = FailingExecutor::new("relation does not exist");
    let catalog = SchemaCatalog::demo();

    let agent = DataAgent::new(&model, &executor, &catalog);
    let result = agent.translate_and_run("show me ghosts", "m").await.unwrap();

    assert_eq!(result.columns, vec!["Error".to_string()]);
    assert_eq!(result.rows.len(), 1);
    let cell = result.rows[0][0].to_display_string();
    assert!(cell.contains("SELECT * FROM nonexistent_table"));
    assert!(cell.contains("relation does not exist"));
    // The fence markers were stripped before execution and reporting.
    assert!(!cell.contains("```"));
}

#[tokio::test]
async fn unreachable_model_surfaces_as_error_table_not_panic() {
    let model = MockModelClient::new().with_unreachable_endpoint();
    let executor = MockExecutor::new();
    let catalog = SchemaCatalog::demo();

    let agent = DataAgent::new(&model, &executor, &catalog);
    let result = agent.translate_and_run("anything", "m").await.unwrap();

    assert_eq!(result.columns, vec!["Error".to_string()]);
    assert!(executor.executed_sql().is_empty());
}

#[tokio::test]
async fn instruction_carries_catalog_directives_and_request() {
    let catalog = SchemaCatalog::new().with_table("public.sales", ["id", "amount"]);
    let instruction = build_instruction(&catalog, "total sales");

    assert!(instruction.contains(r#""public.sales":["id","amount"]"#));
    assert!(instruction.contains("Add prefix 'public.' to all table names."));
    assert!(instruction.contains("User request: total sales"));
}

#[tokio::test]
async fn chat_mode_streams_fragments_verbatim() {
    let model = MockModelClient::new().with_fragments(["Hel", "lo ", "world"]);
    let agent = ChatAgent::new(&model);

    let stream = agent.stream("say hello", "m").await.unwrap();
    assert_eq!(collect_stream(stream).await.unwrap(), "Hello world");
    assert_eq!(model.prompts(), vec!["say hello"]);
}

#[tokio::test]
async fn model_listing_falls_back_instead_of_propagating() {
    let dead = MockModelClient::new().with_unreachable_endpoint();
    assert_eq!(list_models_or_default(&dead).await, vec!["default"]);

    let live = MockModelClient::new().with_models(["llama3.2:3b", "codellama"]);
    assert_eq!(
        list_models_or_default(&live).await,
        vec!["llama3.2:3b", "codellama"]
    );
}

#[test]
fn sanitizer_matches_pipeline_expectations() {
    // The pipeline relies on these exact cleaning semantics.
    assert_eq!(clean_sql("```sql\nSELECT 1\n```"), "SELECT 1");
    assert_eq!(clean_sql("SELECT 1\n-- comment\nFROM t"), "SELECT 1\nFROM t");
    assert_eq!(clean_sql("SELECT 'a--b'"), "SELECT 'a--b'");

    let cleaned = clean_sql("```sql\n-- lead-in\nSELECT 2\n```");
    assert_eq!(clean_sql(&cleaned), cleaned);
}
