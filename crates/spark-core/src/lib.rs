//! SparkCreatives Portal Core
//!
//! Typed client for the remote donation API, the response models it
//! returns, and the configuration shared by the portal and the CLI.

pub mod client;
pub mod config;
pub mod donation;
pub mod download;
pub mod error;
pub mod model;
pub mod viewer;

pub use client::DonationApiClient;
pub use config::{ApiConfig, PortalConfig};
pub use donation::{DonationId, DonorId, StatementYear};
pub use error::{ApiError, ApiResult};
