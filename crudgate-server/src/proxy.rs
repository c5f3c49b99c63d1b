//! Text-generation passthrough (`GET /say`)
//!
//! Provides a trait for the outbound call, with:
//! - Real implementation using reqwest
//! - Mock implementation for testing
//! - Timeout enforcement on the HTTP client

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Endpoint the service has always proxied to.
pub const DEFAULT_SAY_URL: &str = "https://vi7kd7jlq5.execute-api.us-east-2.amazonaws.com/main/say";

/// Default outbound request timeout
pub const DEFAULT_PROXY_TIMEOUT: Duration = Duration::from_secs(10);

/// Error from the upstream text generator
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

/// Trait for the outbound text-generation call (testable)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Ask the generator to embed `keyword` in a sentence; the JSON reply is
    /// returned verbatim.
    async fn say(&self, keyword: Option<&str>) -> Result<Value, ProxyError>;
}

/// Real generator issuing one GET per call
pub struct HttpTextGenerator {
    client: Client,
    endpoint: String,
}

impl HttpTextGenerator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProxyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn say(&self, keyword: Option<&str>) -> Result<Value, ProxyError> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(keyword) = keyword {
            request = request.query(&[("keyword", keyword)]);
        }

        let body = request
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}

/// Mock generator for testing
#[derive(Default)]
pub struct MockTextGenerator {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<Option<String>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn add_response(&self, body: Value) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(body));
    }

    /// Queue a failed reply
    pub fn add_failure(&self, reason: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(reason.into()));
    }

    /// Keywords received so far
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn say(&self, keyword: Option<&str>) -> Result<Value, ProxyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(keyword.map(str::to_owned));

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(reason)) => Err(ProxyError::Unavailable(reason)),
            None => Err(ProxyError::Unavailable("no mock response queued".into())),
        }
    }
}
