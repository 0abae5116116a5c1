pub mod domain;
pub mod fallback;
pub mod onboarding;
pub mod ports;
pub mod resilient;

pub use domain::{
    NewUserOnboarding, Role, TranslationRequest, TranslationResult, UserCreatedEvent,
    UserOnboardingRecord,
};
pub use onboarding::{CallableError, Onboarding, OnboardingOutcome};
pub use ports::{
    CreateOnce, PortError, PortResult, TextGenerationService, TranslationService, UserRecordStore,
};
pub use resilient::{CallOutcome, FallbackReason, ResilientGenerator};
