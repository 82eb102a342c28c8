//! SparkCreatives Portal
//!
//! Axum server rendering the donor receipt pages and the reviewer
//! briefing/data room over the remote donation API.

pub mod components;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use spark_core::PortalConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let receipt_routes = Router::new()
        .route("/", get(routes::receipts::lookup_page))
        .route(
            "/receipts",
            get(routes::receipts::lookup_query).post(routes::receipts::lookup_submit),
        )
        .route("/receipts/{id}", get(routes::receipts::view_receipt))
        .route("/receipts/{id}/pdf", get(routes::receipts::receipt_pdf))
        .route("/receipts/{id}/download", get(routes::receipts::download_receipt))
        .route("/receipts/{id}/email", post(routes::receipts::email_receipt))
        .route(
            "/donors/{donor}/statements/{year}",
            get(routes::receipts::download_statement),
        );

    let reviewer_routes = Router::new()
        .route("/reviewer", get(routes::reviewer::index))
        .route("/reviewer/{org}/briefing", get(routes::reviewer::briefing))
        .route("/reviewer/{org}/data-room", get(routes::reviewer::data_room));

    Router::new()
        .merge(receipt_routes)
        .merge(reviewer_routes)
        .route("/status", get(routes::status::status_page))
        .route("/static/portal.js", get(routes::assets::portal_js))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the portal server.
pub async fn run_server(config: Arc<PortalConfig>) -> anyhow::Result<()> {
    let addr = config.server.addr();
    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Portal listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
