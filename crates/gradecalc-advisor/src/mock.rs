//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use gradecalc_core::traits::{GenerateRequest, GenerateResponse, LlmProvider};

use crate::error::ProviderError;

enum Behavior {
    Reply(String),
    Fail(u16),
}

/// A mock backend for exercising the advice client without real API calls.
pub struct MockProvider {
    behavior: Behavior,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a mock that always returns the same text.
    pub fn with_fixed_response(response: &str) -> Self {
        Self::with_behavior(Behavior::Reply(response.to_string()))
    }

    /// Create a mock that always fails with an API error of `status`.
    pub fn failing(status: u16) -> Self {
        Self::with_behavior(Behavior::Fail(status))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.behavior {
            Behavior::Reply(content) => Ok(GenerateResponse {
                content: content.clone(),
                model: request.model.clone(),
                latency_ms: 1,
            }),
            Behavior::Fail(status) => Err(ProviderError::ApiError {
                status: *status,
                message: "mock failure".to_string(),
            }
            .into()),
        }
    }
}
