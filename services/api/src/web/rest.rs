//! services/api/src/web/rest.rs
//!
//! Assembles the router and holds the master definition for the OpenAPI
//! specification.

use crate::web::{
    callable::{
        self, CallableErrorBody, CallableErrorDetail, TranslateTextData, TranslateTextRequest,
        TranslateTextResponse, TranslateTextResult, WelcomeMessageData, WelcomeMessageRequest,
        WelcomeMessageResponse, WelcomeMessageResult,
    },
    events::{self, UserCreatedPayload},
    state::AppState,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        events::user_created_handler,
        callable::welcome_message_handler,
        callable::translate_text_handler,
    ),
    components(
        schemas(
            UserCreatedPayload,
            WelcomeMessageData, WelcomeMessageRequest, WelcomeMessageResult, WelcomeMessageResponse,
            TranslateTextData, TranslateTextRequest, TranslateTextResult, TranslateTextResponse,
            CallableErrorDetail, CallableErrorBody,
        )
    ),
    tags(
        (name = "MediSign API", description = "Onboarding trigger and callable endpoints for the MediSign app.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Handlers and Router
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health_handler() -> &'static str {
    "ok"
}

/// Builds the API routes over the shared state.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/events/user-created", post(events::user_created_handler))
        .route("/callable/getWelcomeMessage", post(callable::welcome_message_handler))
        .route("/callable/translateText", post(callable::translate_text_handler))
        .with_state(app_state)
}
