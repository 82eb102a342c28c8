//! Upstream status command.

use anyhow::Result;
use serde_json::json;

use super::Context;
use crate::output;

pub async fn execute(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let (health, metrics) = futures::join!(client.health(), client.operational_metrics());

    if ctx.json {
        output::print_json(&json!({
            "api_url": client.base_url(),
            "health": health.as_ref().ok(),
            "metrics": metrics.as_ref().ok(),
        }))?;
    } else {
        output::print_status(client.base_url(), &health, &metrics);
    }

    // The health check decides the exit status.
    health?;
    Ok(())
}
