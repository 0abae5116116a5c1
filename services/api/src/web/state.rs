//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use medisign_core::onboarding::Onboarding;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub onboarding: Onboarding,
}
