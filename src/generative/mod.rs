//! Generative text backend abstraction
//!
//! The recommendation engine only needs "prompt in, text out". Real calls go
//! to an OpenAI-compatible chat completions API; tests plug in canned
//! generators through the same trait.

use async_trait::async_trait;

pub mod openai;

pub use openai::OpenAiGenerator;

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Generative backend errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Backend returned status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u32),

    #[error("Backend returned an empty response")]
    EmptyResponse,
}

/// Text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion and return the raw reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}
