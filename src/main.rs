//! Parley - talk to your database through a local LLM.

mod cli;

use std::io::Write;

use cli::{Cli, Mode};
use db_parley::agent::{ChatAgent, DataAgent, SchemaCatalog};
use db_parley::config::{Config, ConnectionConfig};
use db_parley::db::{self, MockExecutor, SqlExecutor, TabularResult, Value};
use db_parley::error::{ParleyError, Result};
use db_parley::model::{
    list_models_or_default, MockModelClient, ModelClient, OllamaClient, OllamaConfig,
};
use db_parley::logging;
use futures::StreamExt;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let mode = cli.mode().map_err(ParleyError::config)?;

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?.apply_env()?;

    // CLI flags take precedence over env and config file.
    if let Some(url) = &cli.ollama_url {
        config.model.url = url.clone();
    }
    if let Some(conn_str) = &cli.database_url {
        config.database = ConnectionConfig::from_connection_string(conn_str)?;
    }
    let model_name = cli.model.clone().unwrap_or_else(|| config.model.name.clone());

    let client: Box<dyn ModelClient> = if cli.mock {
        Box::new(MockModelClient::new().with_fragments(["```sql\nSELECT 1 AS demo\n```"]))
    } else {
        Box::new(OllamaClient::new(
            OllamaConfig::new()
                .with_url(config.model.url.clone())
                .with_timeout(config.model.timeout_secs),
        )?)
    };

    if cli.list_models {
        for model in list_models_or_default(client.as_ref()).await {
            println!("{model}");
        }
        return Ok(());
    }

    let message = cli
        .message
        .clone()
        .ok_or_else(|| ParleyError::config("A message is required. Use --help for usage."))?;

    match mode {
        Mode::Chat => run_chat(client.as_ref(), &message, &model_name).await,
        Mode::Agent => run_agent(&cli, &config, client.as_ref(), &message, &model_name).await,
    }
}

/// Streams a chat reply to stdout as fragments arrive.
async fn run_chat(client: &dyn ModelClient, message: &str, model: &str) -> Result<()> {
    let agent = ChatAgent::new(client);
    let mut stream = agent.stream(message, model).await?;

    let mut stdout = std::io::stdout();
    while let Some(fragment) = stream.next().await {
        print!("{}", fragment?);
        stdout
            .flush()
            .map_err(|e| ParleyError::internal(format!("stdout write failed: {e}")))?;
    }
    println!();
    Ok(())
}

/// Runs the translation pipeline and prints the resulting table.
async fn run_agent(
    cli: &Cli,
    config: &Config,
    client: &dyn ModelClient,
    message: &str,
    model: &str,
) -> Result<()> {
    let executor: Box<dyn SqlExecutor> = if cli.mock {
        Box::new(MockExecutor::with_result(TabularResult::with_data(
            vec!["demo".to_string()],
            vec![vec![Value::Int(1)]],
        )))
    } else {
        if config.database.is_unset() {
            return Err(ParleyError::config(
                "No database connection configured. Pass --database-url, set DATABASE_URL, \
                 or add a [database] section to the config file.",
            ));
        }
        info!("Connecting to {}", config.database.display_string());
        db::connect(&config.database).await?
    };

    let catalog = config.catalog();
    let table = run_and_close(client, executor.as_ref(), &catalog, message, model).await?;

    println!("{}", table.render_text());
    Ok(())
}

/// Runs the translation pipeline and releases the executor on every path.
///
/// A pipeline error takes precedence over a close error.
async fn run_and_close(
    client: &dyn ModelClient,
    executor: &dyn SqlExecutor,
    catalog: &SchemaCatalog,
    message: &str,
    model: &str,
) -> Result<TabularResult> {
    let agent = DataAgent::new(client, executor, catalog);
    let result = agent.translate_and_run(message, model).await;
    let close_result = executor.close().await;

    let table = result?;
    close_result?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db_parley::db::FailingExecutor;

    #[tokio::test]
    async fn test_executor_closed_when_pipeline_propagates_fatal_error() {
        let client = MockModelClient::new();
        let executor = FailingExecutor::internal("unexpected state");
        let catalog = SchemaCatalog::demo();

        let result = run_and_close(&client, &executor, &catalog, "anything", "m").await;

        assert!(result.is_err());
        assert_eq!(executor.close_calls(), 1);
    }

    #[tokio::test]
    async fn test_executor_closed_on_success() {
        let client = MockModelClient::new();
        let executor = MockExecutor::new();
        let catalog = SchemaCatalog::demo();

        run_and_close(&client, &executor, &catalog, "anything", "m")
            .await
            .unwrap();

        assert_eq!(executor.close_calls(), 1);
    }
}
