//! Spark CLI - SparkCreatives donor and reviewer portal
//!
//! Fetches, downloads and emails donation receipts, shows reviewer metrics,
//! and runs the web portal.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use spark_core::ApiError;
use std::path::Path;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{serve, Cli, Commands};

const DEFAULT_FILTER: &str = "spark=info,spark_web=debug,spark_core=info";
const VERBOSE_FILTER: &str = "spark=debug,spark_web=debug,spark_core=debug";

/// Initialize tracing, optionally mirroring events to a log file.
///
/// Events go to stderr so `--json` output on stdout stays parseable. The
/// returned guard flushes the file writer and must live until exit.
fn init_tracing(log_file: Option<&Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}

/// Print an error the way users should see it.
fn report(err: &anyhow::Error) {
    let message = match err.downcast_ref::<ApiError>() {
        Some(api) => api.display_message(),
        None => format!("{:#}", err),
    };
    eprintln!("{} {}", "Error:".red().bold(), message.red());
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log || args.log_file.is_some() => Some(
            args.log_file
                .clone()
                .unwrap_or_else(serve::default_log_file),
        ),
        _ => None,
    };

    let _guard = match init_tracing(log_file.as_deref(), cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
