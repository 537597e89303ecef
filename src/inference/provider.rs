use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;

use super::types::StreamChunk;

/// Errors that can occur during provider operations.
///
/// None of these reach the transcript verbatim; the chat session maps every
/// variant to one fixed user-facing line. The detail is for the log.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused, stream reset).
    Network(String),
    /// API returned an error response, either as HTTP status or in-stream.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response, or the stream carried no text.
    Parse(String),
    /// The mpsc channel was closed (TUI dropped the receiver).
    ChannelClosed,
    /// The caller's cancellation token fired.
    Cancelled,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
            ProviderError::ChannelClosed => write!(f, "channel closed"),
            ProviderError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a completion request.
///
/// Only the latest user message is sent; the service sees no history.
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub system_instruction: &'a str,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Streams a completion, sending chunks in arrival order to `sender`.
    ///
    /// Returns `Ok(())` once the stream ends normally. When `cancel` fires the
    /// provider stops reading and returns `ProviderError::Cancelled`.
    async fn stream_completion(
        &self,
        request: CompletionRequest<'_>,
        sender: Sender<StreamChunk>,
        cancel: CancellationToken,
    ) -> Result<(), ProviderError>;
}
