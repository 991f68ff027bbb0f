//! Provider-agnostic seam for single-shot text generation.

use async_trait::async_trait;

use crate::error_handler::Result;

/// Anything that can turn one prompt into one completion.
///
/// Implemented by [`GeminiService`](crate::services::gemini_service::GeminiService);
/// tests substitute in-memory fakes.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` and returns the raw completion text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier used for logs.
    fn model(&self) -> &str;
}
