//! procview - workflow engine process instance viewer
//!
//! Main entry point for the procview CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{events, process, subprocesses, tasks, token, variables};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// procview - inspect workflow engine process instances
#[derive(Parser)]
#[command(name = "procview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./procview.toml, then the user config dir)
    #[arg(long, global = true, env = "PROCVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Acquire an access token and show its expiry
    Token(token::TokenArgs),

    /// Show a process instance with its variables, tasks and subprocesses
    Process(process::ProcessArgs),

    /// List variables of a process instance or task
    Variables(variables::VariablesArgs),

    /// List user tasks of a process instance
    Tasks(tasks::TasksArgs),

    /// List subprocesses of a process instance
    Subprocesses(subprocesses::SubprocessesArgs),

    /// List events of a process instance or task
    Events(events::EventsArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console layer on stderr, JSON layer in a daily rolling file
    let filter = if cli.verbose {
        "procview=debug,procview_auth=debug,procview_client=debug,procview_config=debug,info"
    } else {
        "procview=info,procview_auth=info,procview_client=warn,warn"
    };

    let log_dir = procview_config::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    // Console only when the log dir cannot be created.
    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("procview.log")
        .build(&log_dir);
    let (file_writer, _guard, file_error) = match file_appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "procview=trace,procview_auth=trace,procview_client=trace,procview_config=trace,info",
                ))
        }))
        .init();

    if let Some(e) = file_error {
        tracing::warn!(log_dir = %log_dir.display(), error = %e, "File logging disabled");
    }

    let ctx = commands::Context::load(cli.config.as_deref(), cli.json, cli.verbose)?;

    // Dispatch to command handlers
    match cli.command {
        Commands::Token(args) => token::run(args, &ctx).await,
        Commands::Process(args) => process::run(args, &ctx).await,
        Commands::Variables(args) => variables::run(args, &ctx).await,
        Commands::Tasks(args) => tasks::run(args, &ctx).await,
        Commands::Subprocesses(args) => subprocesses::run(args, &ctx).await,
        Commands::Events(args) => events::run(args, &ctx).await,
    }
}
