//! BoatGPT CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use boatgpt::cli::{Cli, Command};
use boatgpt::config::Config;
use boatgpt::engine::BoatGpt;
use boatgpt::repl::ReplSession;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Log to a file so REPL output stays clean
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boatgpt")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = match level_str.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            other => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("boatgpt.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref())?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref())?;
    debug!(model = %config.llm.model, "main: config loaded");

    let engine = BoatGpt::from_config(&config)?;

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            ReplSession::new(engine).run().await?;
        }
        Command::Quick { id, text } => {
            let reply = engine.quick_ask(&id, &text.join(" ")).await;
            println!("{}", reply);
        }
    }

    Ok(())
}
