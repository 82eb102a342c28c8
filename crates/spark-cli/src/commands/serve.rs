//! Web portal command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::Context;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on [default: 3000]
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (implies --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Log file used by `--log` without `--log-file`.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spark")
        .join("serve.log")
}

pub async fn execute(ctx: &Context) -> Result<()> {
    let addr = ctx.config.server.addr();

    println!();
    println!("  {} {}", "SparkCreatives".cyan().bold(), "Portal".bold());
    println!();
    println!("  {}  http://{}/", "Receipts".green(), addr);
    println!("  {}  http://{}/reviewer", "Reviewer".green(), addr);
    println!("  {}    http://{}/status", "Status".green(), addr);
    println!("  {}  {}", "Upstream".green(), ctx.config.api.base_url);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    spark_web::run_server(ctx.config.clone()).await
}
