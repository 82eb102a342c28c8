//! Handler errors rendered as HTML pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use spark_core::ApiError;
use thiserror::Error;

use crate::components::CardVariant;
use crate::views::{notice_card, render_page};

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// HTTP status the portal answers with for a client error.
pub fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        ApiError::Http { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ApiError::Network { .. } | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
        ApiError::Io(_) | ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Full error page showing `message`.
pub fn error_page(message: &str) -> askama::Result<Html<String>> {
    let notice = notice_card(CardVariant::Warning, "Something went wrong", message)?;
    render_page("Error", vec![notice])
}

fn template_failure(e: askama::Error) -> Response {
    tracing::error!(error = %e, "Template rendering failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("Template error: {}", e)),
    )
        .into_response()
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::Api(err) => {
                let status = status_for(&err);
                tracing::warn!(status = status.as_u16(), error = %err, "Request failed");
                match error_page(&err.display_message()) {
                    Ok(page) => (status, page).into_response(),
                    Err(e) => template_failure(e),
                }
            }
            Self::Template(e) => template_failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&ApiError::validation("Invalid donation ID")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&ApiError::from_error_body(404, b"{}")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&ApiError::from_error_body(503, b"{}")), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&ApiError::from_error_body(302, b"{}")), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&ApiError::Network {
                message: "refused".to_string()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_for(&ApiError::config("bad")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_response() {
        let response = PageError::from(ApiError::from_error_body(404, br#"{"detail": "Donation not found"}"#))
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
