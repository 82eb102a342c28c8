//! Terminal output formatting.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use spark_core::model::{
    format_currency, group_thousands, DataRoomFolder, HealthStatus, OperationalMetrics,
    ReceiptEmailResponse, ReviewerMetrics,
};
use spark_core::viewer::ViewPhase;
use spark_core::ApiResult;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Width of the name column in tables.
const NAME_WIDTH: usize = 28;

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Horizontal bar for a percentage share.
fn share_bar(share: f64, width: usize) -> String {
    let filled = ((share.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar width that fits the terminal next to the name, amount and share columns.
fn bar_width(term: usize) -> usize {
    term.saturating_sub(NAME_WIDTH + 12 + 8 + 6).clamp(10, 40)
}

/// Spinner shown on stderr while a request is in flight.
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the outcome of an email request. `sent: false` is not an error.
pub fn print_email_result(response: &ReceiptEmailResponse) {
    match (response.sent, response.recipient.as_deref()) {
        (true, Some(recipient)) => println!(
            "{} Receipt sent to {}",
            "✓".green().bold(),
            recipient.cyan()
        ),
        (true, None) => println!(
            "{} Receipt sent to the email address on file",
            "✓".green().bold()
        ),
        (false, Some(recipient)) => println!(
            "{} Failed to send receipt to {}",
            "!".yellow().bold(),
            recipient.cyan()
        ),
        (false, None) => println!("{} Failed to send receipt", "!".yellow().bold()),
    }
}

/// Print what the interactive lookup currently shows.
pub fn print_phase(phase: &ViewPhase) {
    match phase {
        ViewPhase::Idle => {}
        ViewPhase::Loading(kind) => println!("{}", format!("{}...", kind.label()).dimmed()),
        ViewPhase::Failed(message) => eprintln!("{} {}", "✗".red().bold(), message.red()),
        ViewPhase::Viewing { url } => println!(
            "{} Receipt available at {}",
            "✓".green().bold(),
            url.cyan()
        ),
        ViewPhase::Downloaded { path } => println!(
            "{} Saved receipt to {}",
            "✓".green().bold(),
            path.display().to_string().cyan()
        ),
        ViewPhase::Emailed(response) => print_email_result(response),
    }
}

/// Print the reviewer briefing.
pub fn print_reviewer_metrics(org: &str, metrics: &ReviewerMetrics) {
    println!("{} {}", org.cyan().bold(), "Reviewer Briefing".bold());
    println!();

    let on_time = format!("{:.0}%", metrics.on_time_pct);
    let on_time = if metrics.on_time_is_healthy() {
        on_time.green()
    } else {
        on_time.yellow()
    };

    println!("  {} {}", pad_right("Boxes shipped (YTD)", 22).dimmed(), group_thousands(metrics.shipped_ytd).bold());
    println!("  {} {}", pad_right("On-time delivery", 22).dimmed(), on_time);
    println!("  {} {}", pad_right("Beneficiaries", 22).dimmed(), group_thousands(metrics.beneficiaries).bold());
    println!("  {} {}", pad_right("Total raised", 22).dimmed(), format_currency(metrics.total_funds()).bold());
    println!();

    println!("{}", "Funds by Designation".bold());
    if metrics.funds_by_designation.is_empty() {
        println!("  {}", "No donations recorded yet.".dimmed());
    } else {
        let total = metrics.total_funds();
        let width = bar_width(term_width());
        for fund in &metrics.funds_by_designation {
            let share = fund.share_of(total);
            println!(
                "  {} {:>12} {:>7} {}",
                pad_right(&truncate_visual(fund.display_name(), NAME_WIDTH), NAME_WIDTH),
                format_currency(fund.value),
                format!("{:.1}%", share),
                share_bar(share, width).cyan()
            );
        }
    }

    if !metrics.impact_stories.is_empty() {
        println!();
        println!("{}", "Impact Stories".bold());
        let blurb_width = term_width().saturating_sub(6).max(20);
        for story in &metrics.impact_stories {
            println!("  {} {}", "•".cyan(), story.title.bold());
            println!("    {}", truncate_visual(&story.blurb, blurb_width).dimmed());
        }
    }
}

/// Print the data room index.
pub fn print_data_room(org: &str, folders: &[DataRoomFolder]) {
    println!("{} {}", org.cyan().bold(), "Data Room".bold());
    println!();

    if folders.is_empty() {
        println!("{}", "No documents have been shared yet.".dimmed());
        return;
    }

    let item_width = term_width().saturating_sub(6).max(20);
    for folder in folders {
        println!("{} {}", folder.folder.bold(), format!("({})", folder.items.len()).dimmed());
        if folder.items.is_empty() {
            println!("  {}", "No documents yet".dimmed());
        }
        for item in &folder.items {
            println!("  {}", truncate_visual(item, item_width));
        }
    }
}

/// Print upstream health and counters. Either half may have failed.
pub fn print_status(
    api_url: &str,
    health: &ApiResult<HealthStatus>,
    metrics: &ApiResult<OperationalMetrics>,
) {
    println!("{} {}", "Donation API".bold(), api_url.dimmed());
    println!();

    match health {
        Ok(h) => {
            let status = if h.is_healthy() {
                h.status.green().bold()
            } else {
                h.status.yellow().bold()
            };
            println!("  {} {}", pad_right("Status", 20).dimmed(), status);
            if let Some(version) = &h.version {
                println!("  {} {}", pad_right("Version", 20).dimmed(), version);
            }
            for (name, value) in &h.checks {
                let value = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                println!("  {} {}", pad_right(name, 20).dimmed(), value);
            }
        }
        Err(e) => println!("  {} {}", pad_right("Status", 20).dimmed(), e.display_message().red()),
    }

    match metrics {
        Ok(m) => {
            println!("  {} {}", pad_right("Uptime", 20).dimmed(), m.uptime_display());
            println!("  {} {}", pad_right("Receipts generated", 20).dimmed(), group_thousands(m.receipts_generated));
            println!("  {} {}", pad_right("Emails sent", 20).dimmed(), group_thousands(m.emails_sent));
        }
        Err(e) => println!("  {} {}", pad_right("Counters", 20).dimmed(), e.display_message().red()),
    }
}
