//! services/api/src/adapters/google.rs
//!
//! Error handling shared by the adapters that talk to Google REST APIs.

use medisign_core::ports::PortError;
use serde::Deserialize;

/// Google APIs report failures as `{"error": {"code": .., "message": .., "status": ..}}`.
#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// Maps a transport failure from `reqwest` onto the port's error type.
pub(crate) fn map_transport_error(e: reqwest::Error) -> PortError {
    if e.is_timeout() {
        PortError::Timeout
    } else if e.is_decode() {
        PortError::MalformedResponse(e.to_string())
    } else {
        PortError::Network(e.to_string())
    }
}

/// Turns a non-2xx response into `PortError::Upstream`, keeping Google's message when present.
pub(crate) async fn upstream_error(response: reqwest::Response) -> PortError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<GoogleErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or(body);
    PortError::Upstream { status, detail }
}
