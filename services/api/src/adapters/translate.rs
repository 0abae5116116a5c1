//! services/api/src/adapters/translate.rs
//!
//! This module contains the adapter for the Cloud Translation v3 API.
//! It implements the `TranslationService` port from the `core` crate.

use async_trait::async_trait;
use medisign_core::domain::TranslationResult;
use medisign_core::ports::{PortResult, TranslationService};
use serde::{Deserialize, Serialize};

use super::google::{map_transport_error, upstream_error};
use crate::config::TranslationConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: [&'a str; 1],
    mime_type: &'static str,
    target_language_code: &'a str,
}

#[derive(Deserialize)]
struct TranslateTextResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    #[serde(default)]
    translated_text: String,
}

/// An adapter that implements `TranslationService` using `projects/*/locations/*:translateText`.
#[derive(Clone)]
pub struct GoogleTranslateAdapter {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl GoogleTranslateAdapter {
    pub fn new(client: reqwest::Client, config: &TranslationConfig, project_id: &str) -> Self {
        let parent = format!("projects/{}/locations/{}", project_id, config.location);
        let endpoint = format!(
            "{}/v3/{}:translateText",
            config.base_url.trim_end_matches('/'),
            parent
        );
        Self {
            client,
            endpoint,
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl TranslationService for GoogleTranslateAdapter {
    async fn translate(&self, text: &str, target_language_code: &str) -> PortResult<TranslationResult> {
        let request = TranslateTextRequest {
            contents: [text],
            mime_type: "text/plain",
            target_language_code,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let body: TranslateTextResponse = response.json().await.map_err(map_transport_error)?;

        // No candidates is an empty translation, not an error.
        let translated_text = body
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .unwrap_or_default();

        Ok(TranslationResult { translated_text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use medisign_core::ports::PortError;
    use std::time::Duration;

    fn adapter_for(server: &MockServer, token: Option<&str>) -> GoogleTranslateAdapter {
        let config = TranslationConfig {
            project_id: Some("medisign".to_string()),
            location: "global".to_string(),
            base_url: server.base_url(),
            access_token: token.map(str::to_string),
            timeout: Duration::from_secs(5),
        };
        GoogleTranslateAdapter::new(reqwest::Client::new(), &config, "medisign")
    }

    #[tokio::test]
    async fn sends_the_translate_payload_and_returns_the_first_result() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v3/projects/medisign/locations/global:translateText")
                    .header("authorization", "Bearer token-123")
                    .json_body(serde_json::json!({
                        "contents": ["Where does it hurt?"],
                        "mimeType": "text/plain",
                        "targetLanguageCode": "es"
                    }));
                then.status(200).json_body(serde_json::json!({
                    "translations": [
                        { "translatedText": "¿Dónde le duele?", "detectedLanguageCode": "en" },
                        { "translatedText": "second" }
                    ]
                }));
            })
            .await;

        let result = adapter_for(&server, Some("token-123"))
            .translate("Where does it hurt?", "es")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.translated_text, "¿Dónde le duele?");
    }

    #[tokio::test]
    async fn no_translations_yields_empty_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(serde_json::json!({}));
            })
            .await;

        let result = adapter_for(&server, None).translate("hello", "fr").await.unwrap();
        assert_eq!(result.translated_text, "");
    }

    #[tokio::test]
    async fn upstream_failure_is_propagated() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403).json_body(serde_json::json!({
                    "error": { "code": 403, "message": "Cloud Translation API has not been used", "status": "PERMISSION_DENIED" }
                }));
            })
            .await;

        let err = adapter_for(&server, None).translate("hello", "fr").await.unwrap_err();
        assert!(matches!(err, PortError::Upstream { status: 403, .. }));
    }
}
