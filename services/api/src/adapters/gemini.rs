//! services/api/src/adapters/gemini.rs
//!
//! This module contains the adapter for the Gemini generative-text API.
//! It implements the `TextGenerationService` port from the `core` crate.

use async_trait::async_trait;
use medisign_core::ports::{PortError, PortResult, TextGenerationService};
use serde::{Deserialize, Serialize};

use super::google::{map_transport_error, upstream_error};
use crate::config::GenerationConfig;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` against `models/{model}:generateContent`.
#[derive(Clone)]
pub struct GeminiAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiAdapter {
    /// Creates a new `GeminiAdapter` for the configured API version and model.
    ///
    /// Returns `None` when no API key is configured.
    pub fn new(client: reqwest::Client, config: &GenerationConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let endpoint = format!(
            "{}/{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.api_version,
            config.model
        );
        Some(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for GeminiAdapter {
    async fn generate_text(&self, prompt: &str) -> PortResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let body: GenerateContentResponse = response.json().await.map_err(map_transport_error)?;

        // The text lives at candidates[0].content.parts[0].text.
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                PortError::MalformedResponse("Gemini response contained no candidate text.".to_string())
            })
    }
}
