use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use promptpg::config::Config;
use promptpg::cost::{CostEstimator, format_cost};
use promptpg::domain::{ComparisonBatch, InvocationResult};
use promptpg::history::HistoryRecorder;
use promptpg::llm::{OpenAiClient, OpenAiConfig};
use promptpg::prompt::{PromptLoader, RenderMode};
use promptpg::Result as PlaygroundResult;
use promptpg::runner::{InputSource, Playground, PlaygroundConfig};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptpg")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("promptpg.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Run {
            prompt_file,
            input,
            strict,
        } => handle_run_command(prompt_file, input, *strict, config).await,
        Commands::New { name } => handle_new_command(name, config),
        Commands::List => handle_list_command(config),
        Commands::Compare {
            prompt_files,
            input,
            input_file,
            strict,
        } => handle_compare_command(prompt_files, input.as_deref(), input_file.as_deref(), *strict, config).await,
    }
}

/// Build the completion client from config and the credential in the environment
fn build_client(config: &Config) -> PlaygroundResult<Arc<OpenAiClient>> {
    let openai = OpenAiConfig::from_env(&config.llm.api_key_env)?
        .with_base_url(&config.llm.base_url)
        .with_timeout(config.llm.timeout());
    Ok(Arc::new(OpenAiClient::new(openai)?))
}

fn build_playground(config: &Config, strict: bool) -> PlaygroundResult<Playground<OpenAiClient>> {
    let render_mode = if strict { RenderMode::Strict } else { RenderMode::Lenient };
    Ok(Playground::with_config(
        build_client(config)?,
        PromptLoader::new(&config.paths.prompts_dir),
        HistoryRecorder::new(&config.paths.history_dir),
        PlaygroundConfig {
            render_mode,
            estimator: CostEstimator::new(config.cost.per_token_usd),
        },
    ))
}

async fn handle_run_command(prompt_file: &str, input: &str, strict: bool, config: &Config) -> Result<()> {
    info!("Running prompt {} (strict: {})", prompt_file, strict);
    let playground = build_playground(config, strict)?;
    let outcome = playground
        .run(prompt_file, input)
        .await
        .context(format!("Failed to run {}", prompt_file))?;

    let result = &outcome.result;
    println!("\n{}\n{}", "Response:".green().bold(), result.output);
    println!(
        "\n{} {} tokens (Prompt: {}, Completion: {})",
        "Token usage:".cyan(),
        result.total_tokens,
        result.prompt_tokens,
        result.completion_tokens
    );
    println!("{} ${}", "Estimated cost:".cyan(), format_cost(result.cost_usd));
    println!("{} {}", "Saved:".dimmed(), outcome.transcript_path.display());
    Ok(())
}

fn handle_new_command(name: &str, config: &Config) -> Result<()> {
    info!("Scaffolding prompt: {}", name);
    let loader = PromptLoader::new(&config.paths.prompts_dir);
    let path = loader.scaffold(name)?;
    println!("{} {}", "Created new prompt at".green(), path.display());
    Ok(())
}

fn handle_list_command(config: &Config) -> Result<()> {
    info!("Listing prompts in {}", config.paths.prompts_dir.display());
    let loader = PromptLoader::new(&config.paths.prompts_dir);
    let prompts = loader.list_available()?;
    if prompts.is_empty() {
        println!("{}", format!("No prompts in {}", config.paths.prompts_dir.display()).yellow());
    }
    for prompt in prompts {
        println!("{}", prompt);
    }
    Ok(())
}

async fn handle_compare_command(
    prompt_files: &[String],
    input: Option<&str>,
    input_file: Option<&Path>,
    strict: bool,
    config: &Config,
) -> Result<()> {
    info!("Comparing prompts: {:?}", prompt_files);

    // Flag problems are usage errors, raised before the credential is looked up
    let source = InputSource::from_flags(input, input_file)?;
    let playground = build_playground(config, strict)?;
    let batch = playground
        .compare_from(&source, prompt_files)
        .await
        .context("Comparison aborted")?;

    print_comparison(&batch);
    Ok(())
}

fn print_comparison(batch: &ComparisonBatch) {
    println!("\n{}\n{}\n\n---\n{}\n", "Input:".green().bold(), batch.input, "Results:".green().bold());
    for result in &batch.results {
        print_result(result);
    }
    println!(
        "{} {} tokens, ${}",
        "Total:".cyan().bold(),
        batch.total_tokens(),
        format_cost(batch.total_cost_usd())
    );
    println!(
        "{} {}, {}",
        "Saved:".dimmed(),
        batch.transcript_path.display(),
        batch.summary_path.display()
    );
}

fn print_result(result: &InvocationResult) {
    println!("{} {}", "Prompt:".bold(), result.prompt_id);
    println!("{} {}", "Response:".green(), result.output);
    println!(
        "{} {} (Prompt: {}, Completion: {})",
        "Tokens:".cyan(),
        result.total_tokens,
        result.prompt_tokens,
        result.completion_tokens
    );
    println!("{} ${}", "Estimated cost:".cyan(), format_cost(result.cost_usd));
    println!("{}", "-".repeat(40));
}

/// A missing `.env` is normal; anything else is worth reporting
fn env_file_error(e: dotenvy::Error) -> Option<dotenvy::Error> {
    if e.not_found() { None } else { Some(e) }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // A local .env may carry the API key
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => {
            if let Some(e) = env_file_error(e) {
                warn!("Failed to load .env: {}", e);
            }
        }
    }

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_env_file_is_quiet() {
        let temp_dir = TempDir::new().unwrap();
        let err = dotenvy::from_path(temp_dir.path().join(".env")).unwrap_err();
        assert!(env_file_error(err).is_none());
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "PROMPTPG_TEST_UNTERMINATED='oops\n").unwrap();

        let err = dotenvy::from_path(&path).unwrap_err();
        assert!(env_file_error(err).is_some());
    }
}
