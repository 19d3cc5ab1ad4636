//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests and local development to run without network access or API
//! costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, RwLock};

/// Recipe returned by [`FakeProvider::with_recipe_responses`] for recipe prompts.
pub const FAKE_RECIPE: &str = "Lemon Herb Roast Chicken
Ingredients:
1 whole chicken (4 lb)
2 tbsp olive oil
1 lemon

Steps:
Preheat the oven to 425F.
Rub the chicken with oil and stuff with lemon.
Roast for 70 minutes.

Grocery List:
Chicken, olive oil, lemon";

/// Response returned by [`FakeProvider::with_recipe_responses`] for unit conversion prompts.
pub const FAKE_CONVERSION: &str = "Lemon Herb Roast Chicken
1 whole chicken (1.8 kg)
30 ml olive oil
Preheat the oven to 220C.";

/// A fake LLM provider for testing.
///
/// Queued responses are returned first, in order. After that, responses are
/// matched by checking if the prompt contains a registered substring, first
/// registration wins. If nothing matches, returns the default response or an
/// error.
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// (prompt substring, response) pairs in registration order
    responses: Vec<(String, String)>,
    /// Default response if no match found
    default_response: Option<String>,
    /// One-shot responses consumed before pattern matching
    queued: Mutex<VecDeque<Result<String, String>>>,
    /// Every prompt received, in order
    prompts: RwLock<Vec<String>>,
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeProvider with canned recipe and unit conversion responses.
    pub fn with_recipe_responses() -> Self {
        let mut provider = Self::new();
        provider.add_response("Convert measurements", FAKE_CONVERSION);
        provider.with_default_response(FAKE_RECIPE)
    }

    /// Return `response` for the next call, regardless of prompt.
    pub fn queue_response(&self, response: &str) {
        self.lock_queue().push_back(Ok(response.to_string()));
    }

    /// Fail the next call with `message`.
    pub fn queue_failure(&self, message: &str) {
        self.lock_queue().push_back(Err(message.to_string()));
    }

    /// All prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .read()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// The most recent prompt received.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.read().ok().and_then(|p| p.last().cloned())
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, String>>> {
        self.queued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut prompts) = self.prompts.write() {
            prompts.push(prompt.to_string());
        }

        if let Some(queued) = self.lock_queue().pop_front() {
            return queued.map_err(LlmError::RequestFailed);
        }

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
