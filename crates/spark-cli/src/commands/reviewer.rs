//! Reviewer commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum ReviewerCommands {
    /// Show delivery metrics, funds and impact stories
    Metrics(OrgArgs),

    /// List documents in the data room
    DataRoom(OrgArgs),
}

#[derive(Args)]
pub struct OrgArgs {
    /// Organization name shown in headings (defaults to the configured one)
    #[arg(long)]
    pub org: Option<String>,
}

impl ReviewerCommands {
    pub fn org(&self) -> Option<&str> {
        match self {
            Self::Metrics(args) | Self::DataRoom(args) => args.org.as_deref(),
        }
    }
}

pub async fn execute(cmd: ReviewerCommands, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let org = &ctx.config.default_org;

    match cmd {
        ReviewerCommands::Metrics(_) => {
            let metrics = client.reviewer_metrics().await?;
            if ctx.json {
                output::print_json(&metrics)?;
            } else {
                output::print_reviewer_metrics(org, &metrics);
            }
        }

        ReviewerCommands::DataRoom(_) => {
            let folders = client.data_room_index().await?;
            if ctx.json {
                output::print_json(&folders)?;
            } else {
                output::print_data_room(org, &folders);
            }
        }
    }

    Ok(())
}
