//! Application state.

use spark_core::{ApiResult, DonationApiClient, PortalConfig};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PortalConfig>,
    pub api: DonationApiClient,
}

impl AppState {
    pub fn new(config: Arc<PortalConfig>) -> ApiResult<Self> {
        let api = DonationApiClient::new(&config.api)?;
        Ok(Self { config, api })
    }
}
