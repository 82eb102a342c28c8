//! Upstream status page.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use spark_core::{
    model::{group_thousands, HealthStatus, OperationalMetrics},
    ApiResult,
};

use crate::components::CardVariant;
use crate::error::PageError;
use crate::state::AppState;
use crate::views::{notice_card, render_page, section_card, titled_card, Heading};

#[derive(Template)]
#[template(path = "partials/detail_rows.html")]
struct DetailRowsTemplate {
    rows: Vec<(String, String)>,
}

/// GET /status - Health and counters fetched concurrently.
pub async fn status_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let (health, metrics) = futures::join!(state.api.health(), state.api.operational_metrics());

    let healthy = matches!(&health, Ok(h) if h.is_healthy());
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let page = render_page("Status", status_sections(state.api.base_url(), &health, &metrics)?)?;
    Ok((code, page).into_response())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn health_rows(health: &HealthStatus) -> Vec<(String, String)> {
    let mut rows = vec![("Status".to_string(), health.status.clone())];
    if let Some(version) = &health.version {
        rows.push(("Version".to_string(), version.clone()));
    }
    rows.extend(health.checks.iter().map(|(name, value)| (name.clone(), value_text(value))));
    rows
}

fn metric_rows(metrics: &OperationalMetrics) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Uptime".to_string(), metrics.uptime_display()),
        ("Receipts generated".to_string(), group_thousands(metrics.receipts_generated)),
        ("Emails sent".to_string(), group_thousands(metrics.emails_sent)),
    ];
    if let Some(timestamp) = &metrics.timestamp {
        rows.push(("Reported at".to_string(), timestamp.clone()));
    }
    rows.extend(metrics.extra.iter().map(|(name, value)| (name.clone(), value_text(value))));
    rows
}

fn status_sections(
    api_url: &str,
    health: &ApiResult<HealthStatus>,
    metrics: &ApiResult<OperationalMetrics>,
) -> askama::Result<Vec<String>> {
    let heading = Heading::new("Service Status").subtitle(api_url).card()?;

    let health_card = match health {
        Ok(h) => {
            let variant = if h.is_healthy() {
                CardVariant::Success
            } else {
                CardVariant::Warning
            };
            let rows = DetailRowsTemplate { rows: health_rows(h) }.render()?;
            titled_card(variant, "Health", &rows)?
        }
        Err(e) => notice_card(CardVariant::Warning, "Health unavailable", &e.display_message())?,
    };

    let metrics_card = match metrics {
        Ok(m) => section_card("Counters", &DetailRowsTemplate { rows: metric_rows(m) }.render()?)?,
        Err(e) => notice_card(CardVariant::Warning, "Counters unavailable", &e.display_message())?,
    };

    Ok(vec![heading, health_card, metrics_card])
}
