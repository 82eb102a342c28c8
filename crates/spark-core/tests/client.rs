//! Client behaviour against a stub donation API.

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use spark_core::{
    download, model::ReceiptEmailResponse, ApiConfig, ApiError, DonationApiClient, DonationId,
    DonorId, StatementYear,
};

const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<\n/Type /Catalog\n>>\nendobj\n%%EOF";

async fn receipt_pdf(Path(id): Path<String>, headers: HeaderMap) -> Response {
    let accepts_pdf = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.contains("application/pdf"));
    if !accepts_pdf {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }

    match id.as_str() {
        "NOTFOUND123" => (StatusCode::NOT_FOUND, Json(json!({"detail": "Donation not found"}))).into_response(),
        "ERROR123" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response(),
        "MALFORMED123" => (StatusCode::BAD_REQUEST, Json(json!("not an object"))).into_response(),
        "EMPTY123" => ([(header::CONTENT_TYPE, "application/pdf")], Vec::<u8>::new()).into_response(),
        _ => ([(header::CONTENT_TYPE, "application/pdf")], PDF.to_vec()).into_response(),
    }
}

async fn send_receipt(Path(id): Path<String>, headers: HeaderMap) -> Response {
    let json_body = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == "application/json");
    if !json_body {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }

    match id.as_str() {
        "EMAIL123" => Json(json!({"sent": true, "recipient": "a@b.com"})).into_response(),
        "FAILED123" => Json(json!({"sent": false, "recipient": "test@example.com"})).into_response(),
        "NOEMAIL123" => (StatusCode::BAD_REQUEST, Json(json!({"detail": "No donor email on file"}))).into_response(),
        "JSON123" => ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "Donation not found"}))).into_response(),
    }
}

async fn statement(Path((donor, year)): Path<(String, i32)>) -> Response {
    if donor == "D1" && year == 2024 {
        ([(header::CONTENT_TYPE, "application/pdf")], PDF.to_vec()).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": format!("No donations found for donor {} in year {}", donor, year)})),
        )
            .into_response()
    }
}

fn stub_api() -> Router {
    Router::new()
        .route("/api/v1/donations/{id}/receipt.pdf", get(receipt_pdf))
        .route("/api/v1/donations/{id}/receipt", post(send_receipt))
        .route("/api/v1/donors/{donor}/statement/{year}", get(statement))
        .route(
            "/api/v1/metrics/reviewer",
            get(|| async {
                Json(json!({
                    "shippedYTD": 12,
                    "onTimePct": 93,
                    "beneficiaries": 412,
                    "fundsByDesignation": [{"name": "General Fund", "value": 150.0}],
                    "impactStories": [{"title": "Lopez Sari-Sari", "blurb": "Launched a micro-business."}]
                }))
            }),
        )
        .route(
            "/api/v1/data-room",
            get(|| async {
                Json(json!([
                    {"folder": "governance", "items": ["IRS Letter.pdf", "FDACS Registration.pdf"]},
                    {"folder": "financials", "items": ["Budget Summary FY2025.pdf"]}
                ]))
            }),
        )
        .route(
            "/health",
            get(|| async { Json(json!({"status": "healthy", "version": "1.0.0", "checks": {}})) }),
        )
        .route(
            "/metrics",
            get(|| async { Json(json!({"uptime_seconds": 61, "receipts_generated": 3, "emails_sent": 1})) }),
        )
}

async fn spawn_stub() -> DonationApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub_api()).await.unwrap();
    });
    DonationApiClient::new(&ApiConfig::with_base_url(&format!("http://{}", addr))).unwrap()
}

/// A client pointed at a port nothing listens on.
async fn unreachable_client() -> DonationApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    DonationApiClient::new(&ApiConfig::with_base_url(&format!("http://{}", addr))).unwrap()
}

fn id(raw: &str) -> DonationId {
    DonationId::parse(raw).unwrap()
}

#[tokio::test]
async fn test_fetch_receipt_pdf() {
    let client = spawn_stub().await;
    let bytes = client.fetch_receipt_pdf(&id("DON-2024_001")).await.unwrap();
    assert_eq!(bytes, PDF);
}

#[tokio::test]
async fn test_detail_message_is_surfaced() {
    let client = spawn_stub().await;
    let err = client.fetch_receipt_pdf(&id("NOTFOUND123")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.display_message(), "Donation not found");
}

#[tokio::test]
async fn test_generic_status_message() {
    let client = spawn_stub().await;
    let err = client.fetch_receipt_pdf(&id("ERROR123")).await.unwrap_err();
    assert_eq!(err.display_message(), "HTTP error! status: 500");

    let err = client.fetch_receipt_pdf(&id("MALFORMED123")).await.unwrap_err();
    assert_eq!(err.display_message(), "HTTP error! status: 400");
}

#[tokio::test]
async fn test_network_failure() {
    let client = unreachable_client().await;
    let err = client.fetch_receipt_pdf(&id("NETWORK123")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(err.display_message(), "Network error");

    let err = client.send_receipt_email(&id("TIMEOUT123")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}

#[tokio::test]
async fn test_send_receipt_email() {
    let client = spawn_stub().await;
    let result = client.send_receipt_email(&id("EMAIL123")).await.unwrap();
    assert_eq!(
        result,
        ReceiptEmailResponse {
            sent: true,
            recipient: Some("a@b.com".to_string()),
        }
    );

    let result = client.send_receipt_email(&id("FAILED123")).await.unwrap();
    assert!(!result.sent);
    assert_eq!(result.recipient.as_deref(), Some("test@example.com"));
}

#[tokio::test]
async fn test_send_receipt_email_errors() {
    let client = spawn_stub().await;
    let err = client.send_receipt_email(&id("NOEMAIL123")).await.unwrap_err();
    assert_eq!(err.display_message(), "No donor email on file");

    let err = client.send_receipt_email(&id("JSON123")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_save_receipt_writes_named_file() {
    let client = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();

    let path = download::save_receipt(&client, &id("TEST123"), dir.path()).await.unwrap();
    assert_eq!(path.file_name().unwrap(), "receipt-TEST123.pdf");
    assert_eq!(std::fs::read(&path).unwrap(), PDF);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_failed_save_writes_nothing() {
    let client = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();

    let err = download::save_receipt(&client, &id("NOTFOUND123"), dir.path()).await.unwrap_err();
    assert_eq!(err.display_message(), "Donation not found");

    let err = download::save_receipt(&client, &id("EMPTY123"), dir.path()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_save_statement() {
    let client = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let donor = DonorId::parse("D1").unwrap();

    let year = StatementYear::parse(2024).unwrap();
    let path = download::save_statement(&client, &donor, year, dir.path()).await.unwrap();
    assert_eq!(path.file_name().unwrap(), "statement-D1-2024.pdf");

    let year = StatementYear::parse(2023).unwrap();
    let err = download::save_statement(&client, &donor, year, dir.path()).await.unwrap_err();
    assert_eq!(err.display_message(), "No donations found for donor D1 in year 2023");
}

#[tokio::test]
async fn test_reviewer_endpoints() {
    let client = spawn_stub().await;

    let metrics = client.reviewer_metrics().await.unwrap();
    assert_eq!(metrics.shipped_ytd, 12);
    assert_eq!(metrics.impact_stories[0].photo(), None);

    let folders = client.data_room_index().await.unwrap();
    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].folder, "governance");
    assert_eq!(folders[0].items.len(), 2);
}

#[tokio::test]
async fn test_operational_endpoints() {
    let client = spawn_stub().await;

    let health = client.health().await.unwrap();
    assert!(health.is_healthy());

    let metrics = client.operational_metrics().await.unwrap();
    assert_eq!(metrics.receipts_generated, 3);
    assert_eq!(metrics.uptime_display(), "0h 1m 1s");
}
