//! Core trait and message definitions for text-generation backends and the
//! advice exchange.
//!
//! The trait is implemented by the `gradecalc-advisor` crate; the advice
//! types live here so the session can track an exchange without depending on
//! any backend.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::CalculatorKind;

// ---------------------------------------------------------------------------
// Text generation trait
// ---------------------------------------------------------------------------

/// Trait for generative-text backends that answer a prompt.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate a reply for a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
}

/// Request to generate text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-3-flash-preview").
    pub model: String,
    /// The main prompt.
    pub prompt: String,
    /// Persona/style instruction.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Ask the backend to skip extended reasoning for a faster reply.
    #[serde(default)]
    pub disable_thinking: bool,
}

/// Response from a text generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The reply text; empty when the backend answered without any text.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Advice exchange
// ---------------------------------------------------------------------------

/// Context and score snapshot sent to the advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    /// Free-text description of the situation.
    pub context: String,
    /// Score labels mapped to values.
    pub scores: BTreeMap<String, f64>,
}

impl AdviceRequest {
    /// The standard request for a freshly computed result.
    pub fn for_result(kind: CalculatorKind, score: f64) -> Self {
        Self {
            context: context_for(kind, score),
            scores: score_snapshot(score),
        }
    }
}

/// Describe which tool produced a score, for the advisor prompt.
pub fn context_for(kind: CalculatorKind, score: f64) -> String {
    format!(
        "The student is using the {} tool. The computed score is {score:.2}.",
        kind.title()
    )
}

/// Snapshot with the single computed score.
pub fn score_snapshot(score: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([("calculatedScore".to_string(), score)])
}

/// How an advice request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceOutcome {
    /// The backend returned advice text.
    Delivered,
    /// No credential configured; no call was made.
    NotConfigured,
    /// The call failed.
    Unavailable,
    /// The backend answered without any text.
    Empty,
}

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Please configure an API key to use the AI advisor.";
pub const UNAVAILABLE_MESSAGE: &str =
    "Could not reach the AI teacher. Please try again later.";
pub const EMPTY_MESSAGE: &str = "The AI teacher is still thinking, try again in a moment!";

/// Advice text, or a fixed fallback message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub outcome: AdviceOutcome,
    pub text: String,
}

impl AdviceResponse {
    pub fn delivered(text: impl Into<String>) -> Self {
        Self {
            outcome: AdviceOutcome::Delivered,
            text: text.into(),
        }
    }

    pub fn not_configured() -> Self {
        Self::fallback(AdviceOutcome::NotConfigured, NOT_CONFIGURED_MESSAGE)
    }

    pub fn unavailable() -> Self {
        Self::fallback(AdviceOutcome::Unavailable, UNAVAILABLE_MESSAGE)
    }

    pub fn empty() -> Self {
        Self::fallback(AdviceOutcome::Empty, EMPTY_MESSAGE)
    }

    fn fallback(outcome: AdviceOutcome, text: &str) -> Self {
        Self {
            outcome,
            text: text.to_string(),
        }
    }

    /// Whether the text is real advice rather than a fallback.
    pub fn is_delivered(&self) -> bool {
        self.outcome == AdviceOutcome::Delivered
    }
}

impl fmt::Display for AdviceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_mentions_tool_and_rounded_score() {
        let context = context_for(CalculatorKind::Yearly, 22.1 / 3.0);
        assert!(context.contains("Yearly Average"));
        assert!(context.contains("7.37"));
    }

    #[test]
    fn snapshot_keeps_full_precision() {
        let snapshot = score_snapshot(22.1 / 3.0);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["calculatedScore"], 22.1 / 3.0);
    }

    #[test]
    fn fallbacks_are_not_delivered() {
        assert!(!AdviceResponse::not_configured().is_delivered());
        assert!(!AdviceResponse::unavailable().is_delivered());
        assert!(!AdviceResponse::empty().is_delivered());
        assert!(AdviceResponse::delivered("Keep going!").is_delivered());
        assert_eq!(AdviceResponse::empty().to_string(), EMPTY_MESSAGE);
    }
}
