//! crates/medisign_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;

/// The target language used when a translation request does not name one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// The role assigned to an account. Only `User` is ever created here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
        }
    }

    /// Parses the stored string form back into a role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The onboarding record written once per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOnboardingRecord {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub onboarding_message: String,
    /// Assigned by the store at creation, never rewritten.
    pub created_at: DateTime<Utc>,
}

/// The write payload for a new onboarding record. The store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserOnboarding {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub onboarding_message: String,
}

// The identity fields carried by a "user created" auth event.
// Both are optional because the platform does not guarantee them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCreatedEvent {
    pub uid: Option<String>,
    pub email: Option<String>,
}

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language_code: String,
}

impl TranslationRequest {
    /// Builds a request, defaulting a missing or empty target language to `"en"`.
    pub fn new(text: impl Into<String>, target_language_code: Option<&str>) -> Self {
        let target_language_code = target_language_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_TARGET_LANGUAGE)
            .to_string();
        Self {
            text: text.into(),
            target_language_code,
        }
    }
}

/// The outcome of a translation. Empty when the upstream returned no candidates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationResult {
    pub translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_stored_form() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn translation_request_defaults_target_language() {
        assert_eq!(TranslationRequest::new("hola", None).target_language_code, "en");
        assert_eq!(TranslationRequest::new("hola", Some("")).target_language_code, "en");
        assert_eq!(TranslationRequest::new("hello", Some("es")).target_language_code, "es");
    }
}
