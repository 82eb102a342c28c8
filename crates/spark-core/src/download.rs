//! Saving receipts and statements to disk.
//!
//! Bytes are written to a temporary file in the destination directory and
//! only renamed to the final name once fully written. A failed save never
//! leaves a partial file behind: the temporary file is removed on drop.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::client::DonationApiClient;
use crate::donation::{DonationId, DonorId, StatementYear};
use crate::error::{ApiError, ApiResult};

/// Fetch a receipt and save it as `receipt-<id>.pdf` in `dir`.
pub async fn save_receipt(
    client: &DonationApiClient,
    id: &DonationId,
    dir: &Path,
) -> ApiResult<PathBuf> {
    let bytes = client.fetch_receipt_pdf(id).await?;
    write_document(dir, &id.receipt_filename(), &bytes)
}

/// Fetch a year-end statement and save it as `statement-<donor>-<year>.pdf`.
pub async fn save_statement(
    client: &DonationApiClient,
    donor: &DonorId,
    year: StatementYear,
    dir: &Path,
) -> ApiResult<PathBuf> {
    let bytes = client.fetch_statement_pdf(donor, year).await?;
    write_document(dir, &year.statement_filename(donor), &bytes)
}

/// Write `bytes` to `dir/filename` through a temporary file.
pub fn write_document(dir: &Path, filename: &str, bytes: &[u8]) -> ApiResult<PathBuf> {
    if bytes.is_empty() {
        return Err(ApiError::Decode("Empty document body".to_string()));
    }
    if !dir.is_dir() {
        return Err(ApiError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )));
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".spark-")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    let target = dir.join(filename);
    tmp.persist(&target).map_err(|e| ApiError::Io(e.error))?;

    info!(path = %target.display(), size = bytes.len(), "Saved document");
    Ok(target)
}
