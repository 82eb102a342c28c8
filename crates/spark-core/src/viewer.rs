//! Transient state of the receipt lookup UI.
//!
//! Each edit of the donation ID bumps a generation counter. Requests carry
//! the generation they were issued under, and a completion whose generation
//! is no longer current is dropped instead of overwriting newer state.

use std::path::PathBuf;
use tracing::debug;

use crate::donation::DonationId;
use crate::error::{ApiError, ApiResult};
use crate::model::ReceiptEmailResponse;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    View,
    Download,
    Email,
}

impl RequestKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Download => "download",
            Self::Email => "email",
        }
    }
}

/// Successful result of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Viewed { url: String },
    Downloaded { path: PathBuf },
    Emailed(ReceiptEmailResponse),
}

/// What the UI currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPhase {
    Idle,
    Loading(RequestKind),
    Failed(String),
    Viewing { url: String },
    Downloaded { path: PathBuf },
    Emailed(ReceiptEmailResponse),
}

/// Handle for an in-flight request.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    kind: RequestKind,
    donation_id: DonationId,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn donation_id(&self) -> &DonationId {
        &self.donation_id
    }
}

/// Whether a completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// Receipt lookup state: the ID being typed and what is displayed for it.
#[derive(Debug, Clone)]
pub struct ReceiptViewState {
    input: String,
    generation: u64,
    phase: ViewPhase,
}

impl Default for ReceiptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptViewState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            generation: 0,
            phase: ViewPhase::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    /// Error currently displayed, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ViewPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading(_))
    }

    /// Replace the typed ID. Clears any displayed result or error right
    /// away and invalidates requests issued for the previous input.
    pub fn edit_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.generation += 1;
        self.phase = ViewPhase::Idle;
    }

    /// Start a request for the current input.
    ///
    /// An invalid ID fails here, is displayed, and yields no ticket, so no
    /// request can be sent for it.
    pub fn begin(&mut self, kind: RequestKind) -> ApiResult<RequestTicket> {
        match DonationId::parse(&self.input) {
            Ok(donation_id) => {
                self.phase = ViewPhase::Loading(kind);
                Ok(RequestTicket {
                    generation: self.generation,
                    kind,
                    donation_id,
                })
            }
            Err(e) => {
                self.phase = ViewPhase::Failed(e.display_message());
                Err(e)
            }
        }
    }

    /// Record the result of a request started with [`begin`](Self::begin).
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RequestOutcome, ApiError>,
    ) -> Applied {
        if ticket.generation != self.generation {
            debug!(
                kind = ticket.kind.label(),
                issued = ticket.generation,
                current = self.generation,
                "Dropping stale response"
            );
            return Applied::Stale;
        }

        self.phase = match outcome {
            Ok(RequestOutcome::Viewed { url }) => ViewPhase::Viewing { url },
            Ok(RequestOutcome::Downloaded { path }) => ViewPhase::Downloaded { path },
            Ok(RequestOutcome::Emailed(response)) => ViewPhase::Emailed(response),
            Err(e) => ViewPhase::Failed(e.display_message()),
        };
        Applied::Current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_fails_without_ticket() {
        let mut state = ReceiptViewState::new();
        state.edit_input("   ");
        assert!(state.begin(RequestKind::View).is_err());
        assert_eq!(state.error(), Some("Invalid donation ID"));

        state.edit_input("invalid@id!");
        assert!(state.begin(RequestKind::Email).is_err());
        assert_eq!(state.error(), Some("Invalid donation ID"));
    }

    #[test]
    fn test_editing_clears_error_before_next_request() {
        let mut state = ReceiptViewState::new();
        state.edit_input("NOTFOUND123");
        let ticket = state.begin(RequestKind::Download).unwrap();
        state.complete(
            ticket,
            Err(ApiError::from_error_body(404, br#"{"detail": "Donation not found"}"#)),
        );
        assert_eq!(state.error(), Some("Donation not found"));

        state.edit_input("NOTFOUND12");
        assert_eq!(state.error(), None);
        assert_eq!(state.phase(), &ViewPhase::Idle);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut state = ReceiptViewState::new();
        state.edit_input("OLD1");
        let old = state.begin(RequestKind::Email).unwrap();

        state.edit_input("NEW1");
        let new = state.begin(RequestKind::Email).unwrap();
        assert_eq!(new.donation_id().as_str(), "NEW1");

        let applied = state.complete(
            new,
            Ok(RequestOutcome::Emailed(ReceiptEmailResponse {
                sent: true,
                recipient: Some("a@b.com".to_string()),
            })),
        );
        assert_eq!(applied, Applied::Current);

        let applied = state.complete(
            old,
            Err(ApiError::Network {
                message: "timeout".to_string(),
            }),
        );
        assert_eq!(applied, Applied::Stale);
        assert!(matches!(state.phase(), ViewPhase::Emailed(r) if r.sent));
    }

    #[test]
    fn test_sent_false_is_not_an_error() {
        let mut state = ReceiptViewState::new();
        state.edit_input("FAILED123");
        let ticket = state.begin(RequestKind::Email).unwrap();
        assert!(state.is_loading());

        state.complete(
            ticket,
            Ok(RequestOutcome::Emailed(ReceiptEmailResponse {
                sent: false,
                recipient: None,
            })),
        );
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_does_not_block_next_request() {
        let mut state = ReceiptViewState::new();
        state.edit_input("ERR1");
        let first = state.begin(RequestKind::View).unwrap();
        state.complete(first, Err(ApiError::from_error_body(500, b"{}")));
        assert_eq!(state.error(), Some("HTTP error! status: 500"));

        let second = state.begin(RequestKind::View).unwrap();
        state.complete(
            second,
            Ok(RequestOutcome::Viewed {
                url: "http://localhost:8080/api/v1/donations/ERR1/receipt.pdf".to_string(),
            }),
        );
        assert!(matches!(state.phase(), ViewPhase::Viewing { .. }));
    }
}
