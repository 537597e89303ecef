use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    /// The assistant. Gemini calls this role "model" on the wire.
    #[serde(rename = "model")]
    Assistant,
}

/// A single transcript entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// True while tokens are still arriving for this message.
    #[serde(default)]
    pub is_streaming: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            is_streaming: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            is_streaming: false,
        }
    }

    /// An empty assistant message that will grow as chunks arrive.
    pub fn placeholder() -> Self {
        Self {
            role: Role::Assistant,
            text: String::new(),
            is_streaming: true,
        }
    }

    /// Appends streamed text verbatim.
    pub fn push_chunk(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }
}

/// Represents a chunk of streamed content from the model.
#[derive(Debug, PartialEq)]
pub enum StreamChunk {
    Text(String),
    /// The service reported why generation stopped (e.g. "STOP", "MAX_TOKENS").
    Finished(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_streaming_assistant() {
        let message = ChatMessage::placeholder();
        assert_eq!(message.role, Role::Assistant);
        assert!(message.text.is_empty());
        assert!(message.is_streaming);
    }

    #[test]
    fn test_role_serializes_with_gemini_names() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"model\"");
    }

    #[test]
    fn test_push_chunk_preserves_whitespace() {
        let mut message = ChatMessage::placeholder();
        message.push_chunk("Hel");
        message.push_chunk(" lo ");
        assert_eq!(message.text, "Hel lo ");
    }
}
