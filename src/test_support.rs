//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;

use crate::core::content::PortfolioContent;
use crate::core::rotator::TypewriterTiming;
use crate::core::state::App;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError, StreamChunk};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl CompletionProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn stream_completion(
        &self,
        _request: CompletionRequest<'_>,
        _sender: Sender<StreamChunk>,
        _cancel: CancellationToken,
    ) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Replays fixed text chunks, then optionally fails.
pub struct ScriptedProvider {
    pub chunks: Vec<String>,
    pub error: Option<String>,
}

impl ScriptedProvider {
    pub fn ok(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            error: None,
        }
    }

    pub fn failing(chunks: &[&str], message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::ok(chunks)
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn stream_completion(
        &self,
        _request: CompletionRequest<'_>,
        sender: Sender<StreamChunk>,
        cancel: CancellationToken,
    ) -> Result<(), ProviderError> {
        for chunk in &self.chunks {
            if cancel.is_cancelled() {
                return Err(ProviderError::Cancelled);
            }
            sender
                .send(StreamChunk::Text(chunk.clone()))
                .await
                .map_err(|_| ProviderError::ChannelClosed)?;
        }
        match &self.error {
            Some(message) => Err(ProviderError::Network(message.clone())),
            None => Ok(()),
        }
    }
}

/// Creates a test App with a NoopProvider and the built-in content.
pub fn test_app() -> App {
    test_app_with(Arc::new(NoopProvider))
}

pub fn test_app_with(provider: Arc<dyn CompletionProvider>) -> App {
    App::new(
        provider,
        PortfolioContent::default(),
        "test-model".to_string(),
        "test persona".to_string(),
        TypewriterTiming::default(),
        Instant::now(),
    )
    .expect("built-in content has roles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok, block_on};

    fn request() -> CompletionRequest<'static> {
        CompletionRequest {
            prompt: "hi",
            model: "m",
            system_instruction: "",
        }
    }

    #[test]
    fn test_scripted_provider_replays_chunks() {
        let provider = ScriptedProvider::ok(&["a", "b"]);
        let (tx, mut rx) = tokio::sync::mpsc::channel(8);
        assert_ok!(block_on(provider.stream_completion(
            request(),
            tx,
            CancellationToken::new()
        )));
        assert_eq!(rx.try_recv().ok(), Some(StreamChunk::Text("a".into())));
        assert_eq!(rx.try_recv().ok(), Some(StreamChunk::Text("b".into())));
    }

    #[test]
    fn test_scripted_provider_honours_cancel() {
        let provider = ScriptedProvider::ok(&["a"]);
        let (tx, _rx) = tokio::sync::mpsc::channel(8);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = block_on(provider.stream_completion(request(), tx, cancel));
        assert!(matches!(assert_err!(result), ProviderError::Cancelled));
    }
}
