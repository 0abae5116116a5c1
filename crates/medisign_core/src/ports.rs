//! crates/medisign_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the Gemini API, the Cloud Translation API and the database.

use async_trait::async_trait;
use crate::domain::{NewUserOnboarding, TranslationResult, UserOnboardingRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Upstream request timed out")]
    Timeout,
    #[error("Upstream returned HTTP {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// What a create-once write found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOnce {
    /// The record did not exist and was written.
    Created(UserOnboardingRecord),
    /// A record already existed; it is returned untouched.
    AlreadyExists(UserOnboardingRecord),
}

impl CreateOnce {
    pub fn record(&self) -> &UserOnboardingRecord {
        match self {
            CreateOnce::Created(record) | CreateOnce::AlreadyExists(record) => record,
        }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends a prompt to the generative-text API and returns the first candidate's text.
    async fn generate_text(&self, prompt: &str) -> PortResult<String>;
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translates plain text into the target language.
    async fn translate(&self, text: &str, target_language_code: &str) -> PortResult<TranslationResult>;
}

#[async_trait]
pub trait UserRecordStore: Send + Sync {
    async fn find_user(&self, uid: &str) -> PortResult<Option<UserOnboardingRecord>>;

    /// Writes the record only if no record exists for its `uid`.
    /// An existing record is never overwritten.
    async fn create_once(&self, record: NewUserOnboarding) -> PortResult<CreateOnce>;
}
