//! Identifier validation for donations, donors and statement years.
//!
//! Every client operation takes one of these types, so an identifier that
//! fails validation can never be sent to the donation API.

use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, ApiResult};

/// Maximum length of a donation or donor identifier.
pub const MAX_ID_LEN: usize = 50;

/// Earliest year a statement can be requested for.
pub const MIN_STATEMENT_YEAR: i32 = 1900;

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Check `^[A-Za-z0-9_-]{1,50}$` against an already-trimmed value.
pub fn is_valid_id(value: &str) -> bool {
    !value.is_empty() && value.len() <= MAX_ID_LEN && value.chars().all(is_id_char)
}

fn parse_id(raw: &str, what: &str) -> ApiResult<String> {
    let trimmed = raw.trim();
    if is_valid_id(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ApiError::validation(format!("Invalid {} ID", what)))
    }
}

/// A validated donation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DonationId(String);

impl DonationId {
    /// Validate a raw identifier. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> ApiResult<Self> {
        parse_id(raw, "donation").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used when the receipt is saved or downloaded.
    pub fn receipt_filename(&self) -> String {
        format!("receipt-{}.pdf", self.0)
    }
}

impl FromStr for DonationId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DonationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DonationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated donor identifier, same format as [`DonationId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DonorId(String);

impl DonorId {
    pub fn parse(raw: &str) -> ApiResult<Self> {
        parse_id(raw, "donor").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DonorId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Year of a donor's year-end statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatementYear(i32);

impl StatementYear {
    /// Validate against the current UTC year.
    pub fn parse(year: i32) -> ApiResult<Self> {
        Self::parse_at(year, chrono::Utc::now().year())
    }

    /// Validate against an explicit current year.
    pub fn parse_at(year: i32, current_year: i32) -> ApiResult<Self> {
        if (MIN_STATEMENT_YEAR..=current_year).contains(&year) {
            Ok(Self(year))
        } else {
            Err(ApiError::validation("Valid year is required"))
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// File name used when a donor's statement is saved.
    pub fn statement_filename(self, donor: &DonorId) -> String {
        format!("statement-{}-{}.pdf", donor, self.0)
    }
}

impl FromStr for StatementYear {
    type Err = ApiError;

    /// Parse a year taken from a path or prompt. Non-numeric input fails
    /// the same way as an out-of-range year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::validation("Valid year is required"))?;
        Self::parse(year)
    }
}

impl fmt::Display for StatementYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
