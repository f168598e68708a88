use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_trait::async_trait;
use reach_core::ReachError;
use serde_json::Value;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport used by provider clients to POST a JSON body and read a JSON reply.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse, ReachError>;
}

/// Production backend using reqwest.
///
/// One client is shared by every request so connections are pooled rather than
/// serialized behind a single socket.
pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Backend whose requests fail with [`ReachError::Timeout`] after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ReachError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReachError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn map_transport_error(e: reqwest::Error) -> ReachError {
    if e.is_timeout() {
        ReachError::Timeout(format!("HTTP request timed out: {e}"))
    } else {
        ReachError::Model(format!("HTTP request failed: {e}"))
    }
}

#[async_trait]
impl ProviderBackend for HttpBackend {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse, ReachError> {
        let mut builder = self.client.post(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        builder = builder.json(&request.body);

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ReachError::Timeout(format!("response body timed out: {e}"))
            } else {
                ReachError::Parsing(format!("failed to parse response JSON: {e}"))
            }
        })?;

        Ok(ProviderResponse { status, body })
    }
}

/// Test backend with queued responses. Every request it receives is recorded.
pub struct FakeBackend {
    responses: Arc<Mutex<VecDeque<Result<ProviderResponse, ReachError>>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_response(&self, response: ProviderResponse) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Ok(response));
        self
    }

    pub fn push_json(&self, status: u16, body: Value) -> &Self {
        self.push_response(ProviderResponse { status, body })
    }

    pub fn push_error(&self, error: ReachError) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Err(error));
        self
    }

    /// Requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderBackend for FakeBackend {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse, ReachError> {
        self.requests.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        responses
            .pop_front()
            .unwrap_or_else(|| Err(ReachError::Model("FakeBackend exhausted".to_string())))
    }
}
