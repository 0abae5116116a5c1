//! services/api/src/web/events.rs
//!
//! Receives "user created" events from the authentication platform.
//! There is no caller waiting on the result, so only storage failures are reported.

use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use medisign_core::domain::UserCreatedEvent;
use medisign_core::onboarding::OnboardingOutcome;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

/// The subset of the platform's user record this service reads. Other fields are ignored.
#[derive(Deserialize, ToSchema)]
pub struct UserCreatedPayload {
    pub uid: Option<String>,
    pub email: Option<String>,
}

impl From<UserCreatedPayload> for UserCreatedEvent {
    fn from(payload: UserCreatedPayload) -> Self {
        UserCreatedEvent {
            uid: payload.uid,
            email: payload.email,
        }
    }
}

/// Onboard a newly created user.
#[utoipa::path(
    post,
    path = "/events/user-created",
    request_body = UserCreatedPayload,
    responses(
        (status = 204, description = "Event handled (onboarded, already onboarded, or dropped)"),
        (status = 500, description = "The onboarding record could not be written")
    )
)]
pub async fn user_created_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserCreatedPayload>,
) -> Result<StatusCode, (StatusCode, String)> {
    match state.onboarding.on_user_created(payload.into()).await {
        Ok(outcome) => {
            if let OnboardingOutcome::Onboarded(call) = &outcome {
                debug!(fallback = call.is_fallback(), "Onboarding event processed");
            }
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!("Failed to save onboarding record: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save onboarding record".to_string(),
            ))
        }
    }
}
