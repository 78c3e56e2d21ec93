//! Narrative analysis of the inventory through a generative-language model.
//!
//! The domain only knows how to assemble the data snapshot into a prompt; the
//! HTTP client lives in the API crate behind [`AnalysisProvider`].

use serde::Serialize;
use thiserror::Error;

use crate::models::{Asset, MutationEntry, OpnameEntry, ProcurementRequest, Summary};

/// Errors returned by an analysis provider.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI analysis is not configured")]
    NotConfigured,

    #[error("AI provider request failed: {0}")]
    Upstream(String),

    #[error("AI provider returned no text")]
    EmptyResponse,
}

/// Everything the analyst sees, gathered from the read side at call time.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSnapshot {
    pub summary: Summary,
    pub inventory: Vec<Asset>,
    pub procurement: Vec<ProcurementRequest>,
    pub opname: Vec<OpnameEntry>,
    pub mutations: Vec<MutationEntry>,
}

/// Response of POST /api/ai/analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub model: String,
}

/// A generative-language backend.
#[async_trait::async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Send a prompt and return the generated markdown.
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;

    /// Model identifier reported back to the caller.
    fn model(&self) -> &str;
}

/// Render the snapshot into the analyst prompt.
pub fn build_prompt(snapshot: &AnalysisSnapshot) -> Result<String, serde_json::Error> {
    let summary = serde_json::to_string(&snapshot.summary)?;
    let inventory = serde_json::to_string(&snapshot.inventory)?;
    let procurement = serde_json::to_string(&snapshot.procurement)?;
    let opname = serde_json::to_string(&snapshot.opname)?;
    let mutations = serde_json::to_string(&snapshot.mutations)?;

    Ok(format!(
        "You are a senior facilities and infrastructure (sarana dan prasarana) consultant \
for a school. Audit the data below and write a strategic roadmap in Markdown, \
in Bahasa Indonesia.\n\n\
SYSTEM DATA:\n\
1. EXECUTIVE SUMMARY: {summary}\n\
2. FULL INVENTORY: {inventory}\n\
3. CURRENT PROCUREMENT REQUESTS: {procurement}\n\
4. CONDITION AUDIT HISTORY (OPNAME): {opname}\n\
5. LOCATION CHANGES (MUTATIONS): {mutations}\n\n\
INSTRUCTIONS:\n\
A. Asset health: estimate depreciation from the acquisition year, name critical \
assets that are damaged but essential, and assess how items are distributed across rooms.\n\
B. Budget forecast: from pending procurement and damage trends, estimate the budget \
needed for the next year and suggest cost-saving measures.\n\
C. Quality and vendors: compare brands by cost against durability and recommend \
minimum specifications for the next purchases.\n\
D. Close with a prioritised action list.\n"
    ))
}

/// Canned provider for development and tests.
#[derive(Debug, Clone, Default)]
pub struct MockAnalysisProvider {
    /// Whether to simulate an upstream failure.
    pub simulate_failure: bool,
}

impl MockAnalysisProvider {
    pub fn new() -> Self {
        Self {
            simulate_failure: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
        }
    }
}

#[async_trait::async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        if self.simulate_failure {
            tracing::warn!("Mock analysis provider simulating failure");
            return Err(AnalysisError::Upstream("simulated failure".to_string()));
        }

        tracing::info!(prompt_len = prompt.len(), "Mock analysis provider called");
        Ok(format!("## Analysis\n\nReceived {} characters of data.", prompt.len()))
    }

    fn model(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> AnalysisSnapshot {
        AnalysisSnapshot {
            summary: Summary {
                total_items: 3,
                total_land: 1,
                total_building: 1,
                total_damaged: 1,
                procurement_pending: 2,
            },
            inventory: vec![],
            procurement: vec![],
            opname: vec![],
            mutations: vec![],
        }
    }

    #[test]
    fn test_prompt_embeds_every_section() {
        let prompt = build_prompt(&snapshot()).unwrap();
        assert!(prompt.contains("\"total_items\":3"));
        assert!(prompt.contains("\"procurement_pending\":2"));
        assert!(prompt.contains("FULL INVENTORY: []"));
        assert!(prompt.contains("OPNAME): []"));
        assert!(prompt.contains("MUTATIONS): []"));
    }

    #[tokio::test]
    async fn test_mock_provider_returns_markdown() {
        let provider = MockAnalysisProvider::new();
        let text = provider.generate("hello").await.unwrap();
        assert!(text.starts_with("## Analysis"));
        assert_eq!(provider.model(), "mock");
    }

    #[tokio::test]
    async fn test_failing_mock_provider() {
        let provider = MockAnalysisProvider::failing();
        let err = provider.generate("hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Upstream(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnalysisError::NotConfigured.to_string(),
            "AI analysis is not configured"
        );
        assert_eq!(
            AnalysisError::Upstream("timeout".into()).to_string(),
            "AI provider request failed: timeout"
        );
    }
}
