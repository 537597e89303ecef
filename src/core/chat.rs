//! # Chat Session
//!
//! The streaming conversation core. Owns the transcript, the not-yet-sent
//! input and the single in-flight request.
//!
//! ```text
//!   submit ──► [user msg][placeholder ▌]   busy = true, request emitted
//!   chunk  ──► placeholder.text += chunk
//!   finish ──► placeholder frozen          busy = false
//!   fail   ──► placeholder → error text    busy = false
//! ```
//!
//! Every request carries a [`RequestId`]. Events for any other id are stale
//! (the request was cancelled or already settled) and are dropped.

use log::{debug, info, warn};

use crate::inference::{ChatMessage, Role};

/// The only failure text a user ever sees.
pub const ERROR_MESSAGE: &str = "System error: Neural link unstable.";

/// Replaces an empty placeholder when the user aborts a request.
pub const CANCELLED_MESSAGE: &str = "Transmission aborted.";

pub const DEFAULT_GREETING: &str =
    "Hello. I'm Ziyi's AI Assistant. Ask me about the tech stack or projects.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What the session asks its owner to send.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub id: RequestId,
    pub prompt: String,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending_input: String,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl ChatSession {
    pub fn new(greeting: &str) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(greeting)],
            pending_input: String::new(),
            in_flight: None,
            next_request: 1,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Starts a request for `text`.
    ///
    /// Returns `None` (and changes nothing) when `text` is blank or another
    /// request is still in flight. On success the user message and an empty
    /// streaming placeholder are appended and the session is already busy
    /// when this returns.
    pub fn submit(&mut self, text: &str) -> Option<OutboundRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(id) = self.in_flight {
            debug!("Submit rejected: request {} still in flight", id.0);
            return None;
        }

        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.in_flight = Some(id);

        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::placeholder());
        info!("Chat request {} submitted ({} chars)", id.0, text.len());

        Some(OutboundRequest {
            id,
            prompt: text.to_string(),
        })
    }

    /// Submits the pending input. It is cleared only if the submit is accepted.
    pub fn submit_pending(&mut self) -> Option<OutboundRequest> {
        let text = std::mem::take(&mut self.pending_input);
        let request = self.submit(&text);
        if request.is_none() {
            self.pending_input = text;
        }
        request
    }

    /// Appends a chunk to the streaming message. Returns `false` for stale ids.
    pub fn apply_chunk(&mut self, id: RequestId, text: &str) -> bool {
        if self.in_flight != Some(id) {
            debug!("Dropping stale chunk for request {}", id.0);
            return false;
        }
        match self.streaming_message_mut() {
            Some(message) => {
                message.push_chunk(text);
                true
            }
            None => false,
        }
    }

    /// Marks the request as complete.
    pub fn finish(&mut self, id: RequestId) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        if let Some(message) = self.streaming_message_mut() {
            message.is_streaming = false;
        }
        self.in_flight = None;
        info!("Chat request {} finished", id.0);
        true
    }

    /// Records a failed request with the fixed error text.
    ///
    /// An empty placeholder is replaced in place; one that already holds
    /// partial text is frozen and the error is appended after it.
    pub fn fail(&mut self, id: RequestId) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        warn!("Chat request {} failed", id.0);
        self.settle_trailing(ERROR_MESSAGE, true);
        self.in_flight = None;
        true
    }

    /// Aborts the in-flight request, returning its id.
    ///
    /// Partial text is kept as-is; an empty placeholder becomes
    /// [`CANCELLED_MESSAGE`].
    pub fn cancel(&mut self) -> Option<RequestId> {
        let id = self.in_flight.take()?;
        info!("Chat request {} cancelled", id.0);
        self.settle_trailing(CANCELLED_MESSAGE, false);
        Some(id)
    }

    fn settle_trailing(&mut self, text: &str, append_after_partial: bool) {
        let Some(message) = self.streaming_message_mut() else {
            return;
        };
        message.is_streaming = false;
        if message.text.is_empty() {
            message.text = text.to_string();
        } else if append_after_partial {
            self.messages.push(ChatMessage::assistant(text));
        }
    }

    fn streaming_message_mut(&mut self) -> Option<&mut ChatMessage> {
        self.messages
            .last_mut()
            .filter(|m| m.is_streaming && m.role == Role::Assistant)
    }
}
