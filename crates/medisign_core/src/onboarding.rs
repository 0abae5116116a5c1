//! crates/medisign_core/src/onboarding.rs
//!
//! The three entry points of the backend: the "user created" trigger, the
//! welcome-message callable and the translation callable. Each one is a thin
//! call site over the ports plus, for onboarding, a single create-once write.

use crate::domain::{NewUserOnboarding, Role, TranslationRequest, TranslationResult, UserCreatedEvent};
use crate::fallback::random_fallback;
use crate::ports::{CreateOnce, PortError, PortResult, TranslationService, UserRecordStore};
use crate::resilient::{CallOutcome, ResilientGenerator};
use std::sync::Arc;
use tracing::{error, info};

/// A failure returned to the client of a callable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallableError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Internal(String),
}

impl CallableError {
    /// The callable protocol's status code for this error.
    pub fn status(&self) -> &'static str {
        match self {
            CallableError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CallableError::Internal(_) => "INTERNAL",
        }
    }
}

/// What happened to a "user created" event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingOutcome {
    /// A new record was written with this message.
    Onboarded(CallOutcome),
    /// A record already existed for the uid; nothing changed.
    AlreadyOnboarded,
    /// The event lacked a uid or email and was discarded.
    Dropped,
}

pub fn onboarding_prompt(email: &str) -> String {
    format!(
        "Welcome new user {email}. Generate a friendly onboarding message for a healthcare communication app."
    )
}

pub fn welcome_prompt(email: &str) -> String {
    format!(
        "Welcome back, {email}! Generate a personalized, encouraging welcome message for a healthcare communication app user."
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct Onboarding {
    generator: ResilientGenerator,
    translator: Option<Arc<dyn TranslationService>>,
    store: Arc<dyn UserRecordStore>,
}

impl Onboarding {
    pub fn new(
        generator: ResilientGenerator,
        translator: Option<Arc<dyn TranslationService>>,
        store: Arc<dyn UserRecordStore>,
    ) -> Self {
        Self {
            generator,
            translator,
            store,
        }
    }

    /// Handles a "user created" event.
    ///
    /// The first delivery for a uid writes its record; later deliveries are no-ops
    /// and skip the generation call entirely. Only storage failures are errors.
    pub async fn on_user_created(&self, event: UserCreatedEvent) -> PortResult<OnboardingOutcome> {
        let (Some(uid), Some(email)) = (non_empty(event.uid.as_deref()), non_empty(event.email.as_deref()))
        else {
            error!(uid = ?event.uid, "Missing UID or email on new user, dropping event");
            return Ok(OnboardingOutcome::Dropped);
        };

        if self.store.find_user(uid).await?.is_some() {
            info!(uid, "User already onboarded, ignoring repeated event");
            return Ok(OnboardingOutcome::AlreadyOnboarded);
        }

        let outcome = self
            .generator
            .generate_or(&onboarding_prompt(email), random_fallback(email))
            .await;

        let record = NewUserOnboarding {
            uid: uid.to_string(),
            email: email.to_string(),
            role: Role::User,
            onboarding_message: outcome.text().to_string(),
        };

        match self.store.create_once(record).await? {
            CreateOnce::Created(_) => {
                info!(uid, fallback = outcome.is_fallback(), "Onboarding saved");
                Ok(OnboardingOutcome::Onboarded(outcome))
            }
            CreateOnce::AlreadyExists(_) => {
                info!(uid, "User was onboarded concurrently, keeping the first record");
                Ok(OnboardingOutcome::AlreadyOnboarded)
            }
        }
    }

    /// Produces a personalized welcome for a returning user. Never touches storage.
    pub async fn welcome_message(&self, email: Option<&str>) -> Result<CallOutcome, CallableError> {
        let email = non_empty(email)
            .ok_or_else(|| CallableError::InvalidArgument("Email is required.".to_string()))?;

        Ok(self
            .generator
            .generate_or(&welcome_prompt(email), random_fallback(email))
            .await)
    }

    /// Translates `text`; there is no local substitute, so upstream failures surface.
    pub async fn translate_text(
        &self,
        text: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<TranslationResult, CallableError> {
        let text = non_empty(text)
            .ok_or_else(|| CallableError::InvalidArgument("No text provided.".to_string()))?;
        let request = TranslationRequest::new(text, target_lang);

        let translator = self.translator.as_ref().ok_or_else(|| {
            error!("Translate API error: no translation service configured");
            CallableError::Internal("Translation failed".to_string())
        })?;

        translator
            .translate(&request.text, &request.target_language_code)
            .await
            .map_err(|e: PortError| {
                error!(error = %e, target_lang = %request.target_language_code, "Translate API error");
                CallableError::Internal("Translation failed".to_string())
            })
    }
}
