//! services/api/src/web/callable.rs
//!
//! Handlers for the client-invoked callable endpoints, and the callable wire
//! protocol: requests arrive as `{"data": {...}}`, successes leave as
//! `{"result": {...}}`, failures as `{"error": {"status": .., "message": ..}}`.

use crate::web::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use medisign_core::onboarding::CallableError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct WelcomeMessageData {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct WelcomeMessageRequest {
    #[serde(default)]
    pub data: WelcomeMessageData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeMessageResult {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeMessageResponse {
    pub result: WelcomeMessageResult,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextData {
    pub text: Option<String>,
    /// Defaults to `"en"`.
    pub target_lang: Option<String>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct TranslateTextRequest {
    #[serde(default)]
    pub data: TranslateTextData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextResult {
    pub translated_text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslateTextResponse {
    pub result: TranslateTextResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CallableErrorDetail {
    /// `INVALID_ARGUMENT` or `INTERNAL`.
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CallableErrorBody {
    pub error: CallableErrorDetail,
}

//=========================================================================================
// Error Envelope
//=========================================================================================

/// A `CallableError` on its way back to the client.
#[derive(Debug)]
pub struct CallableFailure(pub CallableError);

impl From<CallableError> for CallableFailure {
    fn from(error: CallableError) -> Self {
        Self(error)
    }
}

impl IntoResponse for CallableFailure {
    fn into_response(self) -> Response {
        let status = match self.0 {
            CallableError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CallableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = CallableErrorBody {
            error: CallableErrorDetail {
                status: self.0.status().to_string(),
                message: self.0.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Decodes a callable request body. An empty body is an empty request.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, CallableFailure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Rejecting malformed callable request body");
        CallableFailure(CallableError::InvalidArgument(format!("Invalid request body: {}", e)))
    })
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Personalized welcome message for a returning user.
///
/// Falls back to a canned message when generation fails; the caller cannot tell.
#[utoipa::path(
    post,
    path = "/callable/getWelcomeMessage",
    request_body = WelcomeMessageRequest,
    responses(
        (status = 200, description = "Welcome message", body = WelcomeMessageResponse),
        (status = 400, description = "Email missing", body = CallableErrorBody)
    )
)]
pub async fn welcome_message_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WelcomeMessageResponse>, CallableFailure> {
    let request: WelcomeMessageRequest = parse_body(&body)?;
    let outcome = state
        .onboarding
        .welcome_message(request.data.email.as_deref())
        .await?;

    Ok(Json(WelcomeMessageResponse {
        result: WelcomeMessageResult {
            message: outcome.into_text(),
        },
    }))
}

/// Translate plain text with the Cloud Translation API.
#[utoipa::path(
    post,
    path = "/callable/translateText",
    request_body = TranslateTextRequest,
    responses(
        (status = 200, description = "Translated text, empty if upstream had none", body = TranslateTextResponse),
        (status = 400, description = "Text missing", body = CallableErrorBody),
        (status = 500, description = "Translation failed", body = CallableErrorBody)
    )
)]
pub async fn translate_text_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranslateTextResponse>, CallableFailure> {
    let request: TranslateTextRequest = parse_body(&body)?;
    let result = state
        .onboarding
        .translate_text(request.data.text.as_deref(), request.data.target_lang.as_deref())
        .await?;

    Ok(Json(TranslateTextResponse {
        result: TranslateTextResult {
            translated_text: result.translated_text,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_as_empty_data() {
        let request: WelcomeMessageRequest = parse_body(b"").unwrap();
        assert!(request.data.email.is_none());
    }

    #[test]
    fn missing_data_field_parses_as_empty_data() {
        let request: TranslateTextRequest = parse_body(br#"{"other": 1}"#).unwrap();
        assert!(request.data.text.is_none());
    }

    #[test]
    fn target_lang_uses_the_callable_field_name() {
        let request: TranslateTextRequest =
            parse_body(br#"{"data": {"text": "hi", "targetLang": "de"}}"#).unwrap();
        assert_eq!(request.data.target_lang.as_deref(), Some("de"));
    }

    #[test]
    fn malformed_body_is_invalid_argument() {
        let err = parse_body::<WelcomeMessageRequest>(b"{not json").unwrap_err();
        assert!(matches!(err.0, CallableError::InvalidArgument(_)));
    }
}
