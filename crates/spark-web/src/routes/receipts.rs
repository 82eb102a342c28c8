//! Donor receipt pages: lookup, inline view, download and email.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use spark_core::{
    model::ReceiptEmailResponse, ApiError, ApiResult, DonationId, DonorId, StatementYear,
};

use crate::components::{Card, CardPart, CardSize, CardVariant};
use crate::error::{status_for, PageError};
use crate::state::AppState;
use crate::views::{notice_card, render_page, section_card, Heading};

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "partials/lookup_form.html")]
struct LookupFormTemplate<'a> {
    input: &'a str,
    error: Option<&'a str>,
    generation: u64,
}

#[derive(Template)]
#[template(path = "partials/email_status.html")]
struct EmailStatusTemplate {
    generation: u64,
    card: Option<String>,
}

#[derive(Template)]
#[template(path = "partials/receipt_frame.html")]
struct ReceiptFrameTemplate<'a> {
    id: &'a str,
}

#[derive(Template)]
#[template(path = "partials/receipt_actions.html")]
struct ReceiptActionsTemplate<'a> {
    id: &'a str,
}

// ============================================================
// REQUEST TYPES
// ============================================================

#[derive(Deserialize)]
pub struct LookupQuery {
    pub id: Option<String>,
}

#[derive(Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub id: String,
    pub action: Option<String>,
    pub generation: Option<u64>,
}

#[derive(Deserialize)]
pub struct EmailForm {
    pub generation: Option<u64>,
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Receipt lookup form.
pub async fn lookup_page() -> Result<Response, PageError> {
    lookup_response(StatusCode::OK, "", None, 0, None)
}

/// GET /receipts?id= - Validate the ID and redirect to its viewer.
pub async fn lookup_query(Query(query): Query<LookupQuery>) -> Result<Response, PageError> {
    let raw = query.id.unwrap_or_default();
    match DonationId::parse(&raw) {
        Ok(id) => Ok(Redirect::to(&format!("/receipts/{}", id)).into_response()),
        Err(e) => lookup_response(StatusCode::BAD_REQUEST, &raw, Some(&e.display_message()), 0, None),
    }
}

/// POST /receipts - Lookup form submission.
pub async fn lookup_submit(
    State(state): State<AppState>,
    Form(form): Form<LookupForm>,
) -> Result<Response, PageError> {
    let generation = form.generation.unwrap_or(0);
    let id = match DonationId::parse(&form.id) {
        Ok(id) => id,
        Err(e) => {
            return lookup_response(
                StatusCode::BAD_REQUEST,
                &form.id,
                Some(&e.display_message()),
                generation,
                None,
            )
        }
    };

    match form.action.as_deref().unwrap_or("view") {
        "download" => Ok(Redirect::to(&format!("/receipts/{}/download", id)).into_response()),
        "email" => {
            let result = state.api.send_receipt_email(&id).await;
            match &result {
                Ok(_) => {
                    let status = email_status(generation, &result)?;
                    lookup_response(StatusCode::OK, id.as_str(), None, generation, Some(status))
                }
                Err(e) => lookup_response(
                    status_for(e),
                    id.as_str(),
                    Some(&e.display_message()),
                    generation,
                    None,
                ),
            }
        }
        _ => Ok(Redirect::to(&format!("/receipts/{}", id)).into_response()),
    }
}

/// GET /receipts/{id} - Receipt viewer page.
pub async fn view_receipt(Path(raw): Path<String>) -> Result<Response, PageError> {
    let id = match DonationId::parse(&raw) {
        Ok(id) => id,
        Err(e) => {
            return lookup_response(StatusCode::BAD_REQUEST, &raw, Some(&e.display_message()), 0, None)
        }
    };

    let subtitle = format!("Donation ID: {}", id);
    let heading = Heading::new("Tax Receipt")
        .subtitle(&subtitle)
        .link("/", "Look up another receipt")
        .card()?;

    let frame = ReceiptFrameTemplate { id: id.as_str() }.render()?;
    let actions = ReceiptActionsTemplate { id: id.as_str() }.render()?;
    let viewer = Card::new().size(CardSize::Lg).render(&format!(
        "{}{}",
        CardPart::Content.render("p-0", &frame)?,
        CardPart::Footer.render("flex-wrap gap-3 px-0 pt-4", &actions)?
    ))?;

    let status = EmailStatusTemplate { generation: 0, card: None }.render()?;
    let page = render_page("Tax Receipt", vec![heading, viewer, status])?;
    Ok(page.into_response())
}

/// GET /receipts/{id}/pdf - Receipt PDF shown inline.
pub async fn receipt_pdf(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, PageError> {
    let id = DonationId::parse(&raw)?;
    let bytes = non_empty(state.api.fetch_receipt_pdf(&id).await?)?;
    Ok(pdf_response(bytes, "inline", &id.receipt_filename()))
}

/// GET /receipts/{id}/download - Receipt PDF as an attachment.
pub async fn download_receipt(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, PageError> {
    let id = DonationId::parse(&raw)?;
    let bytes = non_empty(state.api.fetch_receipt_pdf(&id).await?)?;
    tracing::info!(donation_id = %id, size = bytes.len(), "Receipt downloaded");
    Ok(pdf_response(bytes, "attachment", &id.receipt_filename()))
}

/// POST /receipts/{id}/email - Email the receipt. Returns a status fragment.
pub async fn email_receipt(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Form(form): Form<EmailForm>,
) -> Result<Response, PageError> {
    let generation = form.generation.unwrap_or(0);
    let result = match DonationId::parse(&raw) {
        Ok(id) => state.api.send_receipt_email(&id).await,
        Err(e) => Err(e),
    };

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    Ok((status, Html(email_status(generation, &result)?)).into_response())
}

/// GET /donors/{donor}/statements/{year} - Year-end statement download.
pub async fn download_statement(
    State(state): State<AppState>,
    Path((donor, year)): Path<(String, String)>,
) -> Result<Response, PageError> {
    let donor = DonorId::parse(&donor)?;
    let year: StatementYear = year.parse()?;
    let bytes = non_empty(state.api.fetch_statement_pdf(&donor, year).await?)?;
    Ok(pdf_response(bytes, "attachment", &year.statement_filename(&donor)))
}

// ============================================================
// HELPERS
// ============================================================

const EMPTY_BODY: &str = "Empty document body";

fn non_empty(bytes: Vec<u8>) -> ApiResult<Vec<u8>> {
    if bytes.is_empty() {
        Err(ApiError::Decode(EMPTY_BODY.to_string()))
    } else {
        Ok(bytes)
    }
}

fn pdf_response(bytes: Vec<u8>, disposition: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{}; filename=\"{}\"", disposition, filename),
            ),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        bytes,
    )
        .into_response()
}

/// Render the status fragment for an email attempt.
fn email_status(generation: u64, result: &ApiResult<ReceiptEmailResponse>) -> askama::Result<String> {
    let card = match result {
        Ok(response) if response.sent => {
            let message = match response.recipient.as_deref() {
                Some(recipient) => format!("Receipt sent to {}", recipient),
                None => "Receipt sent to the email address on file".to_string(),
            };
            notice_card(CardVariant::Success, "Receipt sent", &message)?
        }
        Ok(_) => notice_card(
            CardVariant::Warning,
            "Receipt not sent",
            "Failed to send receipt",
        )?,
        Err(e) => notice_card(CardVariant::Warning, "Error", &e.display_message())?,
    };

    EmailStatusTemplate {
        generation,
        card: Some(card),
    }
    .render()
}

fn lookup_response(
    status: StatusCode,
    input: &str,
    error: Option<&str>,
    generation: u64,
    email: Option<String>,
) -> Result<Response, PageError> {
    let heading = Heading::new("Donation Receipt Viewer")
        .subtitle("View, download, or email your tax receipt")
        .card()?;

    let form = LookupFormTemplate {
        input,
        error,
        generation,
    }
    .render()?;
    let form_card = section_card("Find your receipt", &form)?;

    let email = match email {
        Some(fragment) => fragment,
        None => EmailStatusTemplate { generation, card: None }.render()?,
    };

    let page = render_page("Receipts", vec![heading, form_card, email])?;
    Ok((status, page).into_response())
}
