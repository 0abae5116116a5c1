//! crates/medisign_core/src/resilient.rs
//!
//! The fallback-tolerant wrapper around the text-generation port.
//!
//! A single attempt is made under a hard timeout. Any failure (timeout, network
//! error, upstream error, malformed or empty result) is logged and replaced by a
//! caller-supplied fallback string. Nothing here ever returns an error: the
//! outcome says which path was taken so callers and tests can tell them apart.

use crate::ports::{PortError, TextGenerationService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout used when none is configured.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Why a generation call was replaced by its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The call did not finish within the configured timeout and was abandoned.
    TimedOut(Duration),
    /// The port reported a failure.
    Failed(PortError),
    /// The upstream answered, but with blank text.
    EmptyResult,
    /// No generation service is configured.
    Disabled,
}

/// The result of a wrapped generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Generated(String),
    FellBack { text: String, reason: FallbackReason },
}

impl CallOutcome {
    pub fn text(&self) -> &str {
        match self {
            CallOutcome::Generated(text) | CallOutcome::FellBack { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CallOutcome::Generated(text) | CallOutcome::FellBack { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CallOutcome::FellBack { .. })
    }
}

/// Wraps an optional generation service with single-attempt, timeout-bounded semantics.
#[derive(Clone)]
pub struct ResilientGenerator {
    service: Option<Arc<dyn TextGenerationService>>,
    timeout: Duration,
}

impl ResilientGenerator {
    pub fn new(service: Arc<dyn TextGenerationService>, timeout: Duration) -> Self {
        Self {
            service: Some(service),
            timeout,
        }
    }

    /// A wrapper that never calls out and always returns the fallback.
    pub fn disabled() -> Self {
        Self {
            service: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_some()
    }

    /// Generates text for `prompt`, or returns `fallback` unchanged on any failure.
    pub async fn generate_or(&self, prompt: &str, fallback: String) -> CallOutcome {
        let reason = match &self.service {
            None => FallbackReason::Disabled,
            Some(service) => {
                match tokio::time::timeout(self.timeout, service.generate_text(prompt)).await {
                    Ok(Ok(text)) if !text.trim().is_empty() => return CallOutcome::Generated(text),
                    Ok(Ok(_)) => FallbackReason::EmptyResult,
                    Ok(Err(e)) => FallbackReason::Failed(e),
                    Err(_) => FallbackReason::TimedOut(self.timeout),
                }
            }
        };

        match &reason {
            FallbackReason::Failed(e) => warn!(error = %e, "Generation failed, using fallback message"),
            FallbackReason::TimedOut(after) => warn!(
                timeout_ms = after.as_millis() as u64,
                "Generation timed out, using fallback message"
            ),
            FallbackReason::EmptyResult => warn!("Generation returned no text, using fallback message"),
            FallbackReason::Disabled => debug!("Generation is disabled, using fallback message"),
        }

        CallOutcome::FellBack {
            text: fallback,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortResult;
    use async_trait::async_trait;

    enum Behaviour {
        Reply(&'static str),
        Fail(PortError),
        Hang,
    }

    struct FakeGenerator(Behaviour);

    #[async_trait]
    impl TextGenerationService for FakeGenerator {
        async fn generate_text(&self, _prompt: &str) -> PortResult<String> {
            match &self.0 {
                Behaviour::Reply(text) => Ok(text.to_string()),
                Behaviour::Fail(e) => Err(e.clone()),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn wrapper(behaviour: Behaviour, timeout: Duration) -> ResilientGenerator {
        ResilientGenerator::new(Arc::new(FakeGenerator(behaviour)), timeout)
    }

    #[tokio::test]
    async fn returns_generated_text_on_success() {
        let outcome = wrapper(Behaviour::Reply("Welcome aboard!"), DEFAULT_GENERATION_TIMEOUT)
            .generate_or("prompt", "fallback".to_string())
            .await;
        assert_eq!(outcome, CallOutcome::Generated("Welcome aboard!".to_string()));
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn falls_back_on_port_error() {
        let error = PortError::Upstream {
            status: 503,
            detail: "overloaded".to_string(),
        };
        let outcome = wrapper(Behaviour::Fail(error.clone()), DEFAULT_GENERATION_TIMEOUT)
            .generate_or("prompt", "fallback".to_string())
            .await;
        assert_eq!(
            outcome,
            CallOutcome::FellBack {
                text: "fallback".to_string(),
                reason: FallbackReason::Failed(error),
            }
        );
    }

    #[tokio::test]
    async fn falls_back_when_the_call_hangs() {
        let timeout = Duration::from_millis(20);
        let outcome = wrapper(Behaviour::Hang, timeout)
            .generate_or("prompt", "fallback".to_string())
            .await;
        assert_eq!(outcome.text(), "fallback");
        assert_eq!(
            outcome,
            CallOutcome::FellBack {
                text: "fallback".to_string(),
                reason: FallbackReason::TimedOut(timeout),
            }
        );
    }

    #[tokio::test]
    async fn blank_text_counts_as_malformed() {
        let outcome = wrapper(Behaviour::Reply("   "), DEFAULT_GENERATION_TIMEOUT)
            .generate_or("prompt", "fallback".to_string())
            .await;
        assert!(matches!(
            outcome,
            CallOutcome::FellBack { reason: FallbackReason::EmptyResult, .. }
        ));
    }

    #[tokio::test]
    async fn disabled_wrapper_never_calls_out() {
        let generator = ResilientGenerator::disabled();
        assert!(!generator.is_enabled());
        let outcome = generator.generate_or("prompt", "fallback".to_string()).await;
        assert_eq!(
            outcome,
            CallOutcome::FellBack {
                text: "fallback".to_string(),
                reason: FallbackReason::Disabled,
            }
        );
    }
}
