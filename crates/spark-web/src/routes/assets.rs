//! Static asset handlers.
//!
//! Serves the embedded portal script, with the card activation keys
//! substituted in.

use axum::{http::header, response::IntoResponse};
use std::sync::LazyLock;

use crate::components::ACTIVATION_KEYS;

const PORTAL_JS: &str = include_str!("../../assets/portal.js");

const KEYS_PLACEHOLDER: &str = "__ACTIVATION_KEYS__";

static PORTAL_SCRIPT: LazyLock<String> = LazyLock::new(|| {
    let keys = serde_json::Value::from(ACTIVATION_KEYS.to_vec()).to_string();
    PORTAL_JS.replace(KEYS_PLACEHOLDER, &keys)
});

/// GET /static/portal.js
pub async fn portal_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        PORTAL_SCRIPT.as_str(),
    )
}
