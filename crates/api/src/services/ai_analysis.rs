//! Generative-language client for the inventory analysis endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::services::{AnalysisError, AnalysisProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AiConfig;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AnalysisError> {
        if config.api_key.is_empty() {
            return Err(AnalysisError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AnalysisError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl AnalysisProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Analysis provider returned an error");
            return Err(AnalysisError::Upstream(format!("{}: {}", status, error_text)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Upstream(e.to_string()))?;

        debug!(model = %self.model, "Analysis generated");
        parsed.first_text().ok_or(AnalysisError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Build the configured provider, or `None` when analysis is disabled.
pub fn provider_from_config(
    config: &AiConfig,
) -> Result<Option<Arc<dyn AnalysisProvider>>, AnalysisError> {
    if !config.enabled {
        return Ok(None);
    }
    let client = GeminiClient::new(config)?;
    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ai_config(enabled: bool, key: &str) -> AiConfig {
        AiConfig {
            enabled,
            api_key: key.to_string(),
            base_url: "https://example.invalid/v1beta/".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_ms: 1000,
        }
    }

    #[test]
    fn test_request_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_first_text() {
        let parsed: GenerateResponse = serde_json::from_str(
            r##"{"candidates":[{"content":{"parts":[{"text":"# Roadmap"}]}}]}"##,
        )
        .unwrap();
        assert_eq!(parsed.first_text().as_deref(), Some("# Roadmap"));
    }

    #[test]
    fn test_first_text_missing() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(parsed.first_text().is_none());

        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(parsed.first_text().is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(&ai_config(true, "k")).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.invalid/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_provider_from_config() {
        assert!(provider_from_config(&ai_config(false, "")).unwrap().is_none());
        assert!(provider_from_config(&ai_config(true, "k")).unwrap().is_some());
        assert!(matches!(
            provider_from_config(&ai_config(true, "")),
            Err(AnalysisError::NotConfigured)
        ));
    }
}
