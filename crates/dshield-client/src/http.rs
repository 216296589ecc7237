//! Response handling shared by both clients.

use dshield_core::{DshieldError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// Convert a transport failure into a [`DshieldError`]
pub(crate) fn transport_error(e: &reqwest::Error, timeout: Duration) -> DshieldError {
    if e.is_timeout() {
        DshieldError::Timeout(timeout.as_secs())
    } else if e.is_connect() {
        DshieldError::Connection(e.to_string())
    } else {
        DshieldError::Http(e.to_string())
    }
}

/// Decode a JSON body, or turn a non-success status into an error
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DshieldError::Http(e.to_string()))?;

    if status.is_success() {
        serde_json::from_str(&body).map_err(DshieldError::Json)
    } else {
        Err(status_error(status, body))
    }
}

/// Map an error status and its body to a [`DshieldError`]
pub(crate) fn status_error(status: StatusCode, body: String) -> DshieldError {
    // Both APIs put a human readable message under "error" or "message"
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|e| e.as_str())
                .map(String::from)
        })
        .unwrap_or(body);

    match status.as_u16() {
        401 | 403 => DshieldError::Unauthorized,
        404 => DshieldError::NotFound { resource: message },
        429 => {
            warn!("rate limited by remote API");
            DshieldError::RateLimited
        }
        code => DshieldError::Api { code, message },
    }
}
