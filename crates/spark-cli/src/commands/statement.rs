//! Year-end statement commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::json;
use spark_core::{download, DonorId, StatementYear};
use std::path::PathBuf;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum StatementCommands {
    /// Download a donor's year-end statement PDF
    Download(StatementArgs),
}

#[derive(Args)]
pub struct StatementArgs {
    /// Donor ID
    pub donor: String,

    /// Statement year
    pub year: i32,

    /// Destination directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn execute(cmd: StatementCommands, ctx: &Context) -> Result<()> {
    match cmd {
        StatementCommands::Download(args) => {
            let donor = DonorId::parse(&args.donor)?;
            let year = StatementYear::parse(args.year)?;
            let client = ctx.client()?;

            let spinner = output::spinner(format!("Fetching {} statement for {}", year, donor));
            let result = download::save_statement(&client, &donor, year, &args.out).await;
            spinner.finish_and_clear();
            let path = result?;

            if ctx.json {
                output::print_json(&json!({ "donor_id": donor, "year": year, "path": path }))?;
            } else {
                println!(
                    "{} Saved {} statement to {}",
                    "✓".green().bold(),
                    year,
                    path.display().to_string().cyan()
                );
            }
        }
    }

    Ok(())
}
