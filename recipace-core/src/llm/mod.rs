//! Text generation provider abstraction.
//!
//! Generation is a single call: a prompt goes in, text comes out or the call
//! fails. Failures are not retried; the caller decides what to keep.

mod fake;
mod gemini;

pub use fake::{FakeProvider, FAKE_CONVERSION, FAKE_RECIPE};
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::config::{AppConfig, ProviderKind};

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for text generation providers.
///
/// Implementations should be stateless and thread-safe.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the model and get its text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "gemini", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gemma-3-27b-it").
    fn model_name(&self) -> &str;
}

/// Create the provider selected by the configuration.
pub fn create_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider: Box<dyn LlmProvider> = match config.provider {
        ProviderKind::Gemini => Box::new(GeminiProvider::new(config)?),
        ProviderKind::Fake => Box::new(FakeProvider::with_recipe_responses()),
    };

    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Generation provider ready"
    );

    Ok(provider)
}
