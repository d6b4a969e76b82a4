//! gradecalc-advisor: AI study advice for computed grades.
//!
//! Implements the `LlmProvider` trait for Google Gemini and wraps it in an
//! `AdviceClient` that always answers with advice text or a fixed fallback.

pub mod advisor;
pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use advisor::AdviceClient;
pub use config::{load_config, load_config_from, AdvisorConfig};
pub use error::ProviderError;
