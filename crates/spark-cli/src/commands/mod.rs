//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use spark_core::{config::ConfigOverrides, DonationApiClient, PortalConfig};
use std::path::PathBuf;
use std::sync::Arc;

pub mod receipt;
pub mod reviewer;
pub mod serve;
pub mod statement;
pub mod status;

/// SparkCreatives portal - donation receipts and reviewer briefings
#[derive(Parser)]
#[command(name = "spark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Donation API base URL (overrides SPARK_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true, env = "SPARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web portal
    Serve(serve::ServeArgs),

    /// View, download or email donation receipts
    #[command(subcommand)]
    Receipt(receipt::ReceiptCommands),

    /// Year-end donor statements
    #[command(subcommand)]
    Statement(statement::StatementCommands),

    /// Reviewer metrics and data room
    #[command(subcommand)]
    Reviewer(reviewer::ReviewerCommands),

    /// Show donation API health and counters
    Status,
}

/// Resolved settings handed to every command.
pub struct Context {
    pub config: Arc<PortalConfig>,
    pub json: bool,
}

impl Context {
    pub fn client(&self) -> Result<DonationApiClient> {
        Ok(DonationApiClient::new(&self.config.api)?)
    }
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            ..ConfigOverrides::default()
        };

        match &self.command {
            Commands::Serve(args) => {
                overrides.host = args.host.clone();
                overrides.port = args.port;
            }
            Commands::Reviewer(cmd) => {
                overrides.default_org = cmd.org().map(str::to_string);
            }
            _ => {}
        }
        overrides
    }

    pub async fn execute(self) -> Result<()> {
        let config = PortalConfig::resolve(self.config.as_deref(), self.overrides())?;
        tracing::debug!(api_url = %config.api.base_url, json = self.json, "Executing command");
        let ctx = Context {
            config: Arc::new(config),
            json: self.json,
        };

        match self.command {
            Commands::Serve(_) => serve::execute(&ctx).await,
            Commands::Receipt(cmd) => receipt::execute(cmd, &ctx).await,
            Commands::Statement(cmd) => statement::execute(cmd, &ctx).await,
            Commands::Reviewer(cmd) => reviewer::execute(cmd, &ctx).await,
            Commands::Status => status::execute(&ctx).await,
        }
    }
}
