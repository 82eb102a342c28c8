//! Response models returned by the donation API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Aggregate KPIs shown on the reviewer briefing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerMetrics {
    #[serde(rename = "shippedYTD")]
    pub shipped_ytd: u64,
    #[serde(rename = "onTimePct")]
    pub on_time_pct: f64,
    pub beneficiaries: u64,
    #[serde(rename = "fundsByDesignation", default)]
    pub funds_by_designation: Vec<FundDesignation>,
    #[serde(rename = "impactStories", default)]
    pub impact_stories: Vec<ImpactStory>,
}

impl ReviewerMetrics {
    /// Sum of all fund designations.
    pub fn total_funds(&self) -> f64 {
        self.funds_by_designation.iter().map(|f| f.value).sum()
    }

    /// On-time delivery at or above this percentage trends up.
    pub fn on_time_is_healthy(&self) -> bool {
        self.on_time_pct >= 90.0
    }
}

/// Funds raised for one designation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundDesignation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
}

impl FundDesignation {
    /// Donations without a designation go to the general fund.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "General Fund"
        } else {
            &self.name
        }
    }

    /// Percentage of `total`, rounded to one decimal.
    pub fn share_of(&self, total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        (self.value / total * 1000.0).round() / 10.0
    }
}

/// A short story shown to reviewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactStory {
    pub title: String,
    pub blurb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl ImpactStory {
    /// Photo URL. Only absolute `http://` and `https://` URLs are returned;
    /// the empty placeholder the API sends and any other scheme yield `None`.
    pub fn photo(&self) -> Option<&str> {
        let photo = self.photo.as_deref()?.trim();
        let lower = photo.to_ascii_lowercase();
        let web = ["http://", "https://"]
            .iter()
            .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len());
        web.then_some(photo)
    }

    /// First character of the title, used as the avatar initial.
    pub fn initial(&self) -> String {
        self.title
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// One folder of the reviewer data room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRoomFolder {
    pub folder: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Outcome of asking the API to email a receipt.
///
/// `sent: false` is a valid answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptEmailResponse {
    pub sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Body of the API health probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub checks: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Operational counters exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalMetrics {
    pub uptime_seconds: u64,
    #[serde(default)]
    pub receipts_generated: u64,
    #[serde(default)]
    pub emails_sent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_human: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OperationalMetrics {
    /// Uptime as `<h>h <m>m <s>s`, preferring the server's own rendering.
    pub fn uptime_display(&self) -> String {
        match &self.uptime_human {
            Some(human) if !human.is_empty() => human.clone(),
            _ => {
                let secs = self.uptime_seconds;
                format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
            }
        }
    }
}

/// Group an integer with thousands separators: `12345` → `12,345`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a dollar amount rounded to whole dollars: `1234.5` → `$1,235`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded))
}
