//! Study-advice client.
//!
//! Wraps a single text-generation call. Every failure is absorbed here and
//! turned into a fixed fallback message; callers only ever see an
//! [`AdviceResponse`].

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use gradecalc_core::traits::{AdviceRequest, AdviceResponse, GenerateRequest, LlmProvider};

use crate::config::AdvisorConfig;
use crate::error::ProviderError;
use crate::gemini::GeminiProvider;

/// Persona and style for every advice reply.
pub const SYSTEM_PROMPT: &str = "You are an experienced, light-hearted teacher who understands \
how students feel. Reply in about 100-150 words: encourage the student, point out one thing to \
improve and share one small study tip. Use a friendly, modern tone; emoji are welcome. \
Format the reply in Markdown.";

/// Build the user prompt from the context and score snapshot.
pub fn build_prompt(context: &str, scores: &BTreeMap<String, f64>) -> String {
    let snapshot = serde_json::to_string(scores).unwrap_or_else(|_| format!("{scores:?}"));
    format!(
        "Analyse this student's situation from the data below.\n\
         Context: {context}\n\
         Current scores: {snapshot}\n\n\
         Give short advice that lifts their spirits, names what to improve and ends with a study tip."
    )
}

/// Asks a text-generation backend for study advice.
///
/// Stateless: each call is a single independent attempt, never cached.
pub struct AdviceClient {
    provider: Option<Arc<dyn LlmProvider>>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl AdviceClient {
    /// Build a client backed by Gemini, or an unconfigured client when the
    /// config carries no credential.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        let provider = match config.credential() {
            Some(key) => {
                let gemini = GeminiProvider::new(key, config.base_url.clone())?;
                Some(Arc::new(gemini) as Arc<dyn LlmProvider>)
            }
            None => None,
        };
        Ok(Self::with_optional_provider(provider, config))
    }

    /// Build a client around an explicit provider.
    pub fn with_provider(provider: Arc<dyn LlmProvider>, config: &AdvisorConfig) -> Self {
        Self::with_optional_provider(Some(provider), config)
    }

    fn with_optional_provider(
        provider: Option<Arc<dyn LlmProvider>>,
        config: &AdvisorConfig,
    ) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }

    /// Whether a backend credential is available.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Ask for advice about `scores` in `context`.
    pub async fn request_advice(
        &self,
        context: &str,
        scores: &BTreeMap<String, f64>,
    ) -> AdviceResponse {
        let Some(provider) = &self.provider else {
            warn!("advisor has no API key configured");
            return AdviceResponse::not_configured();
        };

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(context, scores),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            disable_thinking: true,
        };

        info!(provider = provider.name(), model = %self.model, "requesting advice");
        match provider.generate(&request).await {
            Ok(response) if response.content.trim().is_empty() => {
                info!("advisor returned no text");
                AdviceResponse::empty()
            }
            Ok(response) => {
                info!(latency_ms = response.latency_ms, "advice received");
                AdviceResponse::delivered(response.content)
            }
            Err(e) => {
                let kind = e
                    .downcast_ref::<ProviderError>()
                    .map_or("other", ProviderError::label);
                warn!(kind, error = %e, "advice request failed");
                AdviceResponse::unavailable()
            }
        }
    }

    /// Send a prepared [`AdviceRequest`].
    pub async fn advise(&self, request: &AdviceRequest) -> AdviceResponse {
        self.request_advice(&request.context, &request.scores).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use gradecalc_core::model::CalculatorKind;
    use gradecalc_core::traits::{
        score_snapshot, AdviceOutcome, EMPTY_MESSAGE, NOT_CONFIGURED_MESSAGE, UNAVAILABLE_MESSAGE,
    };
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_client(mock: &Arc<MockProvider>) -> AdviceClient {
        AdviceClient::with_provider(mock.clone(), &AdvisorConfig::default())
    }

    #[test]
    fn prompt_embeds_context_and_scores() {
        let prompt = build_prompt("Using the yearly tool.", &score_snapshot(7.5));
        assert!(prompt.contains("Using the yearly tool."));
        assert!(prompt.contains(r#"{"calculatedScore":7.5}"#));
    }

    #[tokio::test]
    async fn missing_credential_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = AdvisorConfig {
            api_key: None,
            base_url: Some(server.uri()),
            ..AdvisorConfig::default()
        };
        let client = AdviceClient::from_config(&config).unwrap();
        assert!(!client.is_configured());

        let response = client.request_advice("ctx", &score_snapshot(6.0)).await;
        assert_eq!(response.outcome, AdviceOutcome::NotConfigured);
        assert_eq!(response.text, NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn delivered_advice_is_passed_through() {
        let mock = Arc::new(MockProvider::with_fixed_response("**Great work!** 🎉"));
        let client = mock_client(&mock);

        let request = AdviceRequest::for_result(CalculatorKind::Subject, 7.0);
        let response = client.advise(&request).await;
        assert!(response.is_delivered());
        assert_eq!(response.text, "**Great work!** 🎉");

        let sent = mock.last_request().unwrap();
        assert!(sent.disable_thinking);
        assert_eq!(sent.system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert!(sent.prompt.contains("Subject Average"));
        assert!(sent.prompt.contains("calculatedScore"));
    }

    #[tokio::test]
    async fn blank_reply_asks_to_try_again() {
        let mock = Arc::new(MockProvider::with_fixed_response("  \n"));
        let response = mock_client(&mock)
            .request_advice("ctx", &score_snapshot(5.0))
            .await;
        assert_eq!(response.outcome, AdviceOutcome::Empty);
        assert_eq!(response.text, EMPTY_MESSAGE);
    }

    #[tokio::test]
    async fn backend_failure_becomes_fallback_after_one_attempt() {
        let mock = Arc::new(MockProvider::failing(500));
        let response = mock_client(&mock)
            .request_advice("ctx", &score_snapshot(5.0))
            .await;
        assert_eq!(response.outcome, AdviceOutcome::Unavailable);
        assert_eq!(response.text, UNAVAILABLE_MESSAGE);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn identical_requests_are_not_cached() {
        let mock = Arc::new(MockProvider::with_fixed_response("Tip!"));
        let client = mock_client(&mock);
        let scores = score_snapshot(8.0);
        client.request_advice("same", &scores).await;
        client.request_advice("same", &scores).await;
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn http_error_is_never_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let config = AdvisorConfig {
            api_key: Some("test-key".into()),
            base_url: Some(server.uri()),
            ..AdvisorConfig::default()
        };
        let client = AdviceClient::from_config(&config).unwrap();
        let response = client.request_advice("ctx", &score_snapshot(4.0)).await;
        assert_eq!(response.outcome, AdviceOutcome::Unavailable);
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let config = AdvisorConfig {
            api_key: Some("test-key".into()),
            base_url: Some(server.uri()),
            ..AdvisorConfig::default()
        };
        let client = AdviceClient::from_config(&config).unwrap();
        let response = client.request_advice("ctx", &score_snapshot(4.0)).await;
        assert_eq!(response.outcome, AdviceOutcome::Unavailable);
    }

    #[tokio::test]
    async fn no_candidates_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let config = AdvisorConfig {
            api_key: Some("test-key".into()),
            base_url: Some(server.uri()),
            ..AdvisorConfig::default()
        };
        let client = AdviceClient::from_config(&config).unwrap();
        let response = client.request_advice("ctx", &score_snapshot(9.0)).await;
        assert_eq!(response.outcome, AdviceOutcome::Empty);
    }
}
