//! Google Gemini provider using the `streamGenerateContent` endpoint.
//!
//! With `alt=sse` the service answers with server-sent events, one
//! `GenerateContentResponse` JSON object per `data:` line:
//!
//! ```text
//! data: {"candidates":[{"content":{"parts":[{"text":"Hel"}],"role":"model"}}]}
//!
//! data: {"candidates":[{"content":{"parts":[{"text":"lo!"}]},"finishReason":"STOP"}]}
//! ```

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;

use crate::inference::{CompletionProvider, CompletionRequest, ProviderError, Role, StreamChunk};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: Vec<Part>,
}

/// The request body for `streamGenerateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

/// One SSE payload. Every field is optional: the service omits whatever
/// a given chunk does not carry.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    code: Option<u16>,
    message: String,
}

/// Error body of a non-2xx response.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn build_request(request: &CompletionRequest<'_>) -> GenerateContentRequest {
    let system_instruction = (!request.system_instruction.trim().is_empty()).then(|| Content {
        role: None,
        parts: vec![Part {
            text: request.system_instruction.to_string(),
        }],
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: Some(Role::User),
            parts: vec![Part {
                text: request.prompt.to_string(),
            }],
        }],
        system_instruction,
    }
}

/// Parses one SSE `data:` payload into the chunks it carries.
///
/// Text from all parts of the first candidate is joined into a single
/// `Text` chunk so the transcript sees one append per event.
fn parse_event(data: &str) -> Result<Vec<StreamChunk>, ProviderError> {
    let event: GenerateContentResponse = serde_json::from_str(data)
        .map_err(|e| ProviderError::Parse(format!("malformed stream chunk: {e}")))?;

    if let Some(error) = event.error {
        return Err(ProviderError::Api {
            status: error.code.unwrap_or(0),
            message: error.message,
        });
    }

    let mut chunks = Vec::new();
    if let Some(candidate) = event.candidates.into_iter().next() {
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if !text.is_empty() {
            chunks.push(StreamChunk::Text(text));
        }
        if let Some(reason) = candidate.finish_reason {
            chunks.push(StreamChunk::Finished(reason));
        }
    }
    Ok(chunks)
}

fn api_error_from_body(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());
    ProviderError::Api { status, message }
}

/// Running totals for a single stream, used for logging and the
/// empty-stream check.
#[derive(Default)]
struct StreamProgress {
    events: usize,
    text_chunks: usize,
    text_bytes: usize,
}

/// Splits a byte stream into lines.
///
/// Bytes are held until a newline arrives, so a multi-byte character
/// straddling two network chunks is decoded only once it is complete.
#[derive(Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Appends `bytes` and returns every line completed by them.
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Returns the unterminated tail, if any.
    fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}

async fn handle_sse_line(
    line: &str,
    sender: &Sender<StreamChunk>,
    progress: &mut StreamProgress,
) -> Result<(), ProviderError> {
    let Some(data) = line.strip_prefix("data:") else {
        if !line.is_empty() {
            debug!("Ignoring SSE line: {}", line);
        }
        return Ok(());
    };
    let data = data.trim();
    if data.is_empty() {
        return Ok(());
    }

    progress.events += 1;
    for chunk in parse_event(data)? {
        match &chunk {
            StreamChunk::Text(text) => {
                progress.text_chunks += 1;
                progress.text_bytes += text.len();
                debug!(
                    "Sending Text chunk (len={}, total={})",
                    text.len(),
                    progress.text_bytes
                );
            }
            StreamChunk::Finished(reason) => debug!("Finish reason: {}", reason),
        }
        if sender.send(chunk).await.is_err() {
            warn!("Chunk send failed: receiver dropped");
            return Err(ProviderError::ChannelClosed);
        }
    }
    Ok(())
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn stream_completion(
        &self,
        request: CompletionRequest<'_>,
        sender: Sender<StreamChunk>,
        cancel: CancellationToken,
    ) -> Result<(), ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Config(
                "Gemini API key missing (config file, GEMINI_API_KEY or API_KEY env var)"
                    .to_string(),
            )
        })?;

        let body = build_request(&request);
        info!(
            "Gemini request: model={}, prompt_len={}",
            request.model,
            request.prompt.len()
        );

        let send = self
            .client
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send();

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
            response = send => response.map_err(|e| ProviderError::Network(e.to_string()))?,
        };

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(api_error_from_body(status, &err_body));
        }

        let mut stream = response.bytes_stream();
        let mut lines = LineBuffer::default();
        let mut progress = StreamProgress::default();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Stream cancelled after {} events", progress.events);
                    return Err(ProviderError::Cancelled);
                }
                next = stream.next() => next,
            };
            let Some(bytes) = next else {
                break;
            };
            let bytes = bytes.map_err(|e| ProviderError::Network(e.to_string()))?;
            debug!("Raw chunk received: {} bytes", bytes.len());
            for line in lines.push(&bytes) {
                handle_sse_line(line.trim(), &sender, &mut progress).await?;
            }
        }

        if let Some(line) = lines.finish() {
            handle_sse_line(line.trim(), &sender, &mut progress).await?;
        }

        if progress.text_chunks == 0 {
            warn!(
                "Stream ended without text ({} events received)",
                progress.events
            );
            return Err(ProviderError::Parse(
                "stream ended without any text".to_string(),
            ));
        }

        info!(
            "Stream complete: {} events, {} text chunks, {} bytes",
            progress.events, progress.text_chunks, progress.text_bytes
        );
        Ok(())
    }
}
