mod cli;
mod config;
mod db;
mod error;
mod models;

use anyhow::Context;
use cli::{App, TerminalSession};
use colored::*;
use config::Config;
use db::Database;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Sends logs to `LOG_FILE` when set, otherwise to stderr. Defaults to `warn` so log lines
/// stay out of the prompts unless `RUST_LOG` asks for more.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_file = std::env::var("LOG_FILE").ok().filter(|p| !p.is_empty());
    if let Some(path) = log_file.as_deref().map(Path::new) {
        if let Some(file_name) = path.file_name() {
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            return Some(guard);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    None
}

/// Opens the single store connection behind a spinner.
async fn connect(config: &Config) -> error::Result<Database> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Connecting to the PostgreSQL database...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let connected = Database::connect(config.connect_options()?).await;
    spinner.finish_and_clear();
    connected
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = init_logging();

    info!("Starting employee tracker...");

    let config = Config::from_env().context("Failed to read database settings")?;
    let db = match connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect: {:?}", e);
            println!(
                "{}",
                "Error: Could not connect to the PostgreSQL database.".red()
            );
            return Err(e).context("Failed to connect to the database");
        },
    };
    println!("{}", "Connected to the PostgreSQL database.".cyan().bold());

    let mut app = App::new(db, TerminalSession::new(), std::io::stdout());
    app.run().await.context("Employee tracker stopped")?;

    info!("Employee tracker exited cleanly");
    Ok(())
}
