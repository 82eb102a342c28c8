//! HTTP client for the donation API.
//!
//! Every operation normalizes failures into [`ApiError`]: a non-success
//! status becomes `Http` (using the body's `detail` when present), a
//! transport failure becomes `Network`, and an unreadable success body
//! becomes `Decode`.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::donation::{DonationId, DonorId, StatementYear};
use crate::error::{ApiError, ApiResult};
use crate::model::{
    DataRoomFolder, HealthStatus, OperationalMetrics, ReceiptEmailResponse, ReviewerMetrics,
};

/// Client for the donation API. Cheap to clone.
#[derive(Clone, Debug)]
pub struct DonationApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl DonationApiClient {
    /// Create a client from validated API settings.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("spark-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::config(format!("Cannot build HTTP client: {}", e)))?;

        debug!(base_url = %config.base_url, "Donation API client initialized");
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL of a donation's receipt PDF.
    pub fn receipt_url(&self, id: &DonationId) -> String {
        self.url(&format!("/api/v1/donations/{}/receipt.pdf", id))
    }

    /// Fetch the receipt PDF for a donation.
    pub async fn fetch_receipt_pdf(&self, id: &DonationId) -> ApiResult<Vec<u8>> {
        let url = self.receipt_url(id);
        self.get_pdf(&url).await
    }

    /// Ask the API to email the receipt to the donor on file.
    ///
    /// The JSON answer is returned as-is; `sent: false` is not an error.
    pub async fn send_receipt_email(&self, id: &DonationId) -> ApiResult<ReceiptEmailResponse> {
        let url = self.url(&format!("/api/v1/donations/{}/receipt", id));
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| network_failure(&url, e))?;
        let response = check_status(response, &url).await?;
        let result: ReceiptEmailResponse = decode_json(response).await?;

        if result.sent {
            info!(donation_id = %id, recipient = ?result.recipient, "Receipt email sent");
        } else {
            warn!(donation_id = %id, recipient = ?result.recipient, "Receipt email was not sent");
        }
        Ok(result)
    }

    /// Fetch a donor's year-end statement PDF.
    pub async fn fetch_statement_pdf(
        &self,
        donor: &DonorId,
        year: StatementYear,
    ) -> ApiResult<Vec<u8>> {
        let url = self.url(&format!("/api/v1/donors/{}/statement/{}", donor, year));
        self.get_pdf(&url).await
    }

    /// Reviewer dashboard metrics.
    pub async fn reviewer_metrics(&self) -> ApiResult<ReviewerMetrics> {
        self.get_json("/api/v1/metrics/reviewer").await
    }

    /// Reviewer data-room folder index.
    pub async fn data_room_index(&self) -> ApiResult<Vec<DataRoomFolder>> {
        self.get_json("/api/v1/data-room").await
    }

    /// API liveness probe.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.get_json("/health").await
    }

    /// API operational counters.
    pub async fn operational_metrics(&self) -> ApiResult<OperationalMetrics> {
        self.get_json("/metrics").await
    }

    async fn get_pdf(&self, url: &str) -> ApiResult<Vec<u8>> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/pdf")
            .send()
            .await
            .map_err(|e| network_failure(url, e))?;
        let response = check_status(response, url).await?;
        let bytes = response.bytes().await.map_err(|e| network_failure(url, e))?;

        debug!(url = %url, size = bytes.len(), "Fetched PDF");
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| network_failure(&url, e))?;
        let response = check_status(response, &url).await?;
        decode_json(response).await
    }
}

fn network_failure(url: &str, e: reqwest::Error) -> ApiError {
    warn!(url = %url, error = %e, "Donation API unreachable");
    ApiError::from(e)
}

/// Turn a non-success response into an `Http` error.
async fn check_status(response: Response, url: &str) -> ApiResult<Response> {
    let status = response.status();
    debug!(url = %url, status = status.as_u16(), "Response");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let err = ApiError::from_error_body(status.as_u16(), &body);
    warn!(url = %url, status = status.as_u16(), error = %err, "Donation API returned an error");
    Err(err)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
