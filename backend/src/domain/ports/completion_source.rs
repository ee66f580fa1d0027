//! Driven port for the external chat-completion generator.

use async_trait::async_trait;

/// Errors surfaced while calling the generator.
///
/// The content gateway collapses every variant into a degraded empty result;
/// the variants exist so adapters can log precisely what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionSourceError {
    /// Network transport failed before receiving a response.
    #[error("generator transport failed: {message}")]
    Transport { message: String },
    /// The call exceeded the request timeout.
    #[error("generator timeout: {message}")]
    Timeout { message: String },
    /// The generator answered with a non-success status.
    #[error("generator status error: {message}")]
    Status { message: String },
    /// The response body could not be decoded.
    #[error("generator response decode failed: {message}")]
    Decode { message: String },
    /// The response carried no choices to read a message from.
    #[error("generator returned no choices")]
    EmptyChoices,
}

impl CompletionSourceError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a status error with the given message.
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for requesting one free-text completion per prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Send `prompt` to the generator and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionSourceError>;
}
