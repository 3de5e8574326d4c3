//! Ollama provider
//!
//! Talks to the `/api/generate` endpoint of a local Ollama server.
//! Transient failures (connection errors, 5xx, 429) are retried with
//! exponential backoff; a 404 means the model is not pulled and is final.
//!
//! ```no_run
//! use itinera_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), itinera_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1")?;
//! let reply = provider.complete("Say hello", None).await?;
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use itinera_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound for a single backoff pause
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Provider backed by a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a provider for `model` at `endpoint`
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a provider for `model` on the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the number of attempts per call (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Endpoint this provider talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one completion
    ///
    /// With `format` set, Ollama constrains the reply to JSON matching it
    /// (`"json"` or a JSON schema object).
    pub async fn complete(
        &self,
        prompt: &str,
        format: Option<serde_json::Value>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options: GenerateOptions { temperature: 0.0 },
        };

        let mut last_error = LlmError::Communication("no attempt made".to_string());
        for attempt in 1..=self.max_retries {
            match self.send(&url, &body).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Ollama attempt {}/{} failed ({}), retrying in {:?}",
                        attempt, self.max_retries, e, delay
                    );
                    last_error = e;
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_error)
    }

    async fn send(&self, url: &str, body: &GenerateRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, text)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        debug!("Ollama replied with {} chars", parsed.response.len());
        Ok(parsed.response)
    }

    fn block_on(&self, prompt: &str, format: Option<serde_json::Value>) -> Result<String, LlmError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
        runtime.block_on(self.complete(prompt, format))
    }
}

impl LlmProvider for OllamaProvider {
    type Error = LlmError;

    /// Blocking call; run it off the async executor (e.g. `spawn_blocking`)
    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.block_on(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.block_on(prompt, Some(structured_format(schema)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Pause before retry number `attempt` (1-based): 1s, 2s, 4s, ... capped
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    Duration::from_secs(1u64 << exponent).min(MAX_BACKOFF)
}

/// Ollama `format` value for a schema string
///
/// A schema that is itself a JSON object is passed through; anything else
/// falls back to plain JSON mode.
fn structured_format(schema: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(schema) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        _ => serde_json::Value::String("json".to_string()),
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}
