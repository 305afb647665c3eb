//! Text-generation client
//!
//! The generation endpoint is a black-box capability `generate(prompt) ->
//! text`. It is modeled as the [`TextGenerator`] trait so the keyword
//! extractor and answer pipeline stay testable without network access; the
//! production implementation is a small HTTP client posting
//! `{"prompt": ...}` and reading `{"output": ...}` back.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::LlmError;

/// Injected interface over the external text-generation capability
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    /// Generate free text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    output: String,
}

/// HTTP-backed generator
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
}

impl HttpGenerator {
    /// Create a generator from configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the HTTP client cannot be built
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "Requesting generation");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        Ok(body.output)
    }
}
