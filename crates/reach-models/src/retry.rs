use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reach_core::{ChatModel, ChatRequest, ChatResponse, ReachError};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Retries rate-limit and timeout failures with exponential backoff.
pub struct RetryChatModel {
    inner: Arc<dyn ChatModel>,
    policy: RetryPolicy,
}

impl RetryChatModel {
    pub fn new(inner: Arc<dyn ChatModel>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl ChatModel for RetryChatModel {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ReachError> {
        let mut last_error = None;
        for attempt in 0..self.policy.max_attempts {
            match self.inner.chat(request.clone()).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_transient() && attempt + 1 < self.policy.max_attempts => {
                    let delay = self.policy.base_delay * 2u32.saturating_pow(attempt as u32);
                    warn!(attempt = attempt + 1, error = %e, delay = ?delay, "retrying model call");
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_error.unwrap_or_else(|| ReachError::Model("retry exhausted".to_string())))
    }
}
