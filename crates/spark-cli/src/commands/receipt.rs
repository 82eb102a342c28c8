//! Receipt commands.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Select};
use serde_json::json;
use spark_core::{
    download,
    viewer::{ReceiptViewState, RequestKind, RequestOutcome, RequestTicket},
    ApiError, DonationApiClient, DonationId,
};
use std::path::{Path, PathBuf};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum ReceiptCommands {
    /// Download a receipt PDF
    Download(DownloadArgs),

    /// Email a receipt to the donor's address on file
    Email(IdArgs),

    /// Print the URL of a receipt PDF
    Url(IdArgs),

    /// Look up receipts interactively
    Prompt(PromptArgs),
}

#[derive(Args)]
pub struct IdArgs {
    /// Donation ID
    pub id: String,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Donation ID
    pub id: String,

    /// Destination directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct PromptArgs {
    /// Destination directory for downloads
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn execute(cmd: ReceiptCommands, ctx: &Context) -> Result<()> {
    match cmd {
        ReceiptCommands::Download(args) => {
            let id = DonationId::parse(&args.id)?;
            let client = ctx.client()?;

            let spinner = output::spinner(format!("Fetching receipt {}", id));
            let result = download::save_receipt(&client, &id, &args.out).await;
            spinner.finish_and_clear();
            let path = result?;

            if ctx.json {
                output::print_json(&json!({ "donation_id": id, "path": path }))?;
            } else {
                println!(
                    "{} Saved receipt to {}",
                    "✓".green().bold(),
                    path.display().to_string().cyan()
                );
            }
        }

        ReceiptCommands::Email(args) => {
            let id = DonationId::parse(&args.id)?;
            let client = ctx.client()?;

            let spinner = output::spinner(format!("Sending receipt {}", id));
            let result = client.send_receipt_email(&id).await;
            spinner.finish_and_clear();
            let response = result?;

            if ctx.json {
                output::print_json(&response)?;
            } else {
                output::print_email_result(&response);
            }
        }

        ReceiptCommands::Url(args) => {
            let id = DonationId::parse(&args.id)?;
            let url = ctx.client()?.receipt_url(&id);
            if ctx.json {
                output::print_json(&json!({ "donation_id": id, "url": url }))?;
            } else {
                println!("{}", url);
            }
        }

        ReceiptCommands::Prompt(args) => prompt(&ctx.client()?, &args.out).await?,
    }

    Ok(())
}

const ACTIONS: [&str; 5] = [
    "Check receipt and show its URL",
    "Download PDF",
    "Email receipt",
    "Change donation ID",
    "Quit",
];

/// Interactive lookup loop.
async fn prompt(client: &DonationApiClient, out: &Path) -> Result<()> {
    let mut state = ReceiptViewState::new();

    loop {
        if state.input().trim().is_empty() {
            let input: String = Input::new()
                .with_prompt("Donation ID")
                .validate_with(|value: &String| -> Result<(), String> {
                    DonationId::parse(value)
                        .map(|_| ())
                        .map_err(|e| e.display_message())
                })
                .interact_text()
                .context("Failed to read donation ID")?;
            state.edit_input(input);
        }

        let choice = Select::new()
            .with_prompt(format!("Receipt {}", state.input().trim().cyan()))
            .items(&ACTIONS)
            .default(0)
            .interact()
            .context("Failed to read selection")?;

        let kind = match choice {
            0 => RequestKind::View,
            1 => RequestKind::Download,
            2 => RequestKind::Email,
            3 => {
                state.edit_input("");
                continue;
            }
            _ => break,
        };

        let Ok(ticket) = state.begin(kind) else {
            output::print_phase(state.phase());
            state.edit_input("");
            continue;
        };

        let spinner = output::spinner(format!("{} {}", kind.label(), ticket.donation_id()));
        let outcome = run_request(client, &ticket, out).await;
        spinner.finish_and_clear();

        let stop = ends_prompt(&outcome);
        state.complete(ticket, outcome);
        output::print_phase(state.phase());
        if stop {
            anyhow::bail!("Receipt lookup stopped");
        }
    }

    Ok(())
}

/// Whether a request outcome ends the interactive loop. Only failures
/// that would repeat on every attempt do.
fn ends_prompt(outcome: &Result<RequestOutcome, ApiError>) -> bool {
    matches!(outcome, Err(e) if !e.is_retryable_by_user())
}

async fn run_request(
    client: &DonationApiClient,
    ticket: &RequestTicket,
    out: &Path,
) -> Result<RequestOutcome, ApiError> {
    let id = ticket.donation_id();
    match ticket.kind() {
        RequestKind::View => {
            client.fetch_receipt_pdf(id).await?;
            Ok(RequestOutcome::Viewed {
                url: client.receipt_url(id),
            })
        }
        RequestKind::Download => download::save_receipt(client, id, out)
            .await
            .map(|path| RequestOutcome::Downloaded { path }),
        RequestKind::Email => client
            .send_receipt_email(id)
            .await
            .map(RequestOutcome::Emailed),
    }
}
