pub mod completion;

use async_trait::async_trait;

use crate::error::GenerationError;

pub use completion::CompletionClient;

/// A synchronous prompt-in, text-out completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn run_prompt(&self, prompt: &str) -> Result<String, GenerationError>;
}
