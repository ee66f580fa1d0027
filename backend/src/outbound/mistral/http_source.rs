//! Reqwest-backed chat-completion source adapter.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into the
//! raw reply text. Degrade-to-empty policy lives in the domain gateway, not
//! here; this adapter reports precise typed errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto};
use crate::domain::ports::{CompletionSource, CompletionSourceError};

/// Upper bound on one generator call; the UI degrades rather than waits.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Hosted chat-completion endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";

/// Model requested when no override is configured.
pub const DEFAULT_MODEL: &str = "mistral-medium";

/// Chat-completion source adapter performing HTTP POST requests.
#[derive(Clone)]
pub struct MistralHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl MistralHttpSource {
    /// Build an adapter with the default 15-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, api_key, model, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        endpoint: Url,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionSource for MistralHttpSource {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionSourceError> {
        let body = ChatCompletionRequestDto::user_prompt(&self.model, prompt);
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        parse_completion_text(bytes.as_ref())
    }
}

/// Decode a success body into the reply text.
fn parse_completion_text(body: &[u8]) -> Result<String, CompletionSourceError> {
    let decoded: ChatCompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        CompletionSourceError::decode(format!("invalid completion JSON payload: {error}"))
    })?;
    decoded
        .into_content()
        .ok_or(CompletionSourceError::EmptyChoices)
}

fn map_transport_error(error: reqwest::Error) -> CompletionSourceError {
    if error.is_timeout() {
        CompletionSourceError::timeout(error.to_string())
    } else {
        CompletionSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompletionSourceError::timeout(message)
        }
        _ => CompletionSourceError::status(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
