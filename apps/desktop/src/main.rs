use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::HttpEventClient;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod session;

use config::{load_settings, Overrides};
use session::OneShot;

#[derive(Parser, Debug)]
#[command(name = "event-desk", about = "Event details and registration from the terminal")]
struct Args {
    /// Settings file; defaults to ./event_desk.toml or the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    access_token: Option<String>,
    #[arg(long)]
    event_id: Option<i64>,
    /// Show the sign-in prompt on the registration screen as well.
    #[arg(long)]
    unify_unauthorized: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Interactive screens (default).
    Browse,
    /// Print the event details and exit.
    Details,
    /// Print your registration status and exit.
    Status,
    /// Register if not registered yet, then print the status.
    Register,
    /// Cancel a confirmed registration, then print the status.
    Cancel,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            backend_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
            event_id: self.event_id,
            unify_unauthorized: self.unify_unauthorized,
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    settings.apply_overrides(args.overrides());
    init_tracing(&settings.log_filter);
    match &settings.source {
        Some(path) => info!(path = %path.display(), "config: loaded settings file"),
        None => info!("config: no settings file, using defaults and environment"),
    }

    let event_id = settings.validate().context("invalid settings")?;
    let client = Arc::new(
        HttpEventClient::new(settings.client_config()).context("failed to build backend client")?,
    );
    let options = settings.flow_options();
    let mut stdout = std::io::stdout();

    let one_shot = match args.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            let stdin = BufReader::new(tokio::io::stdin());
            session::browse(client, event_id, options, stdin, &mut stdout).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Details => OneShot::Details,
        Command::Status => OneShot::Status,
        Command::Register => OneShot::Register,
        Command::Cancel => OneShot::Cancel,
    };

    let outcome = session::run_once(client, event_id, options, one_shot, &mut stdout).await?;
    Ok(outcome.into())
}
