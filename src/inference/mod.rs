pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CompletionProvider, CompletionRequest, ProviderError};
pub use providers::GeminiProvider;
pub use types::{ChatMessage, Role, StreamChunk};
