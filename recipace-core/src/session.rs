//! Per-user session state.
//!
//! A [`Session`] owns everything one user works with: the parameter
//! selection, prompt flags, the last generation, saved recipes, unit
//! preference and rating. It is a plain value: callers hold it and pass the
//! generation provider in for each action.
//!
//! Phases follow from what is populated:
//!
//! ```text
//! Empty --generate--> HasResult --regenerate--> HasResult
//!                        |  ^                      |
//!                      save |generate/regenerate   save
//!                        v  |                      v
//!                     SavedAppended <--------------+
//! ```
//!
//! Regenerate resends the prompt stored by the last successful generate, not
//! one rebuilt from the current selection. Selection changes only take
//! effect on the next generate.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::error::{ExportError, ParameterError};
use crate::export::{export_docx, share_url};
use crate::llm::{LlmError, LlmProvider};
use crate::params::ParameterSet;
use crate::prompts::convert_units::CONVERT_UNITS_PROMPT_NAME;
use crate::prompts::recipe::RECIPE_PROMPT_NAME;
use crate::prompts::{render_convert_units_prompt, render_recipe_prompt, PromptFlags};
use crate::selection::Selection;
use crate::types::{Rating, UnitSystem};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Nothing to regenerate: generate a recipe first")]
    NothingToRegenerate,

    #[error("No recipe to work with: generate a recipe first")]
    NoResult,

    #[error("{0}")]
    InvalidRating(String),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Where the session is in the generate/regenerate/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No recipe generated yet.
    Empty,
    /// A recipe is live and has not been saved since it was generated.
    HasResult,
    /// The live recipe has been appended to the saved list.
    SavedAppended,
}

/// The live generation: the prompt that produced it and the model's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub prompt: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    params: Arc<ParameterSet>,
    selection: Selection,
    flags: PromptFlags,
    current: Option<Generation>,
    current_saved: bool,
    saved: Vec<String>,
    unit_system: UnitSystem,
    rating: Rating,
}

impl Session {
    /// Start a session with every parameter unset.
    pub fn new(params: Arc<ParameterSet>) -> Self {
        let selection = Selection::new(&params);
        Self {
            params,
            selection,
            flags: PromptFlags::default(),
            current: None,
            current_saved: false,
            saved: Vec::new(),
            unit_system: UnitSystem::default(),
            rating: Rating::default(),
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set one parameter. Invalid values leave the selection unchanged.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        self.selection.set(&self.params, name, value)?;
        Ok(())
    }

    /// Set several parameters at once; all or nothing.
    pub fn update_selection<'a, I>(&mut self, updates: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.selection.apply(&self.params, updates)?;
        Ok(())
    }

    pub fn flags(&self) -> PromptFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PromptFlags) {
        self.flags = flags;
    }

    /// The prompt a generate would send right now.
    pub fn prompt_preview(&self) -> String {
        render_recipe_prompt(&self.selection, self.flags)
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.current, self.current_saved) {
            (None, _) => SessionPhase::Empty,
            (Some(_), false) => SessionPhase::HasResult,
            (Some(_), true) => SessionPhase::SavedAppended,
        }
    }

    pub fn generation(&self) -> Option<&Generation> {
        self.current.as_ref()
    }

    /// Text of the live generation.
    pub fn result(&self) -> Option<&str> {
        self.current.as_ref().map(|g| g.text.as_str())
    }

    /// Prompt of the live generation; what regenerate will resend.
    pub fn last_prompt(&self) -> Option<&str> {
        self.current.as_ref().map(|g| g.prompt.as_str())
    }

    /// Build a prompt from the current selection and flags and generate a recipe.
    ///
    /// On failure nothing changes: the previous prompt and result stay live.
    pub async fn generate(&mut self, provider: &dyn LlmProvider) -> Result<&str, SessionError> {
        let prompt = self.prompt_preview();
        self.complete(provider, prompt, "generate").await
    }

    /// Generate again from the last prompt, ignoring selection changes since.
    pub async fn regenerate(&mut self, provider: &dyn LlmProvider) -> Result<&str, SessionError> {
        let prompt = self
            .last_prompt()
            .ok_or(SessionError::NothingToRegenerate)?
            .to_string();
        self.complete(provider, prompt, "regenerate").await
    }

    async fn complete(
        &mut self,
        provider: &dyn LlmProvider,
        prompt: String,
        action: &'static str,
    ) -> Result<&str, SessionError> {
        tracing::debug!(
            action,
            prompt = RECIPE_PROMPT_NAME,
            provider = provider.provider_name(),
            prompt_chars = prompt.chars().count(),
            "Requesting recipe"
        );

        let text = provider
            .complete(&prompt)
            .await
            .inspect_err(|e| tracing::warn!(action, error = %e, "Recipe generation failed"))?;

        tracing::info!(action, chars = text.chars().count(), "Recipe generated");

        self.current_saved = false;
        let generation = self.current.insert(Generation { prompt, text });
        Ok(generation.text.as_str())
    }

    /// Append the live recipe to the saved list and return its 1-based position.
    ///
    /// Saving the same recipe twice stores it twice.
    pub fn save(&mut self) -> Result<usize, SessionError> {
        let text = self.result().ok_or(SessionError::NoResult)?.to_string();
        self.saved.push(text);
        self.current_saved = true;

        tracing::info!(saved = self.saved.len(), "Recipe saved");
        Ok(self.saved.len())
    }

    /// Saved recipes, oldest first.
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    /// Saved recipe by 1-based position.
    pub fn saved_recipe(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.saved.get(i))
            .map(String::as_str)
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        self.unit_system = unit_system;
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn set_rating(&mut self, value: u8) -> Result<(), SessionError> {
        self.rating = Rating::try_from(value).map_err(SessionError::InvalidRating)?;
        Ok(())
    }

    /// Ask the model to convert the live recipe to the preferred unit system.
    ///
    /// The converted text is returned for display only; the live recipe is
    /// not replaced.
    pub async fn convert_units(&self, provider: &dyn LlmProvider) -> Result<String, SessionError> {
        let text = self.result().ok_or(SessionError::NoResult)?;
        let prompt = render_convert_units_prompt(self.unit_system, text);
        tracing::debug!(
            prompt = CONVERT_UNITS_PROMPT_NAME,
            provider = provider.provider_name(),
            prompt_chars = prompt.chars().count(),
            "Requesting unit conversion"
        );

        let converted = provider.complete(&prompt).await?;
        tracing::info!(unit_system = %self.unit_system, "Recipe units converted");
        Ok(converted)
    }

    /// The live recipe as a .docx, with the current selection as its parameters.
    pub fn export_docx(&self, generated_at: Option<NaiveDateTime>) -> Result<Vec<u8>, SessionError> {
        let text = self.result().ok_or(SessionError::NoResult)?;
        Ok(export_docx(text, &self.selection, generated_at)?)
    }

    /// Sharing link for the live recipe.
    pub fn share_url(&self) -> Result<String, SessionError> {
        let text = self.result().ok_or(SessionError::NoResult)?;
        Ok(share_url(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;

    fn params() -> Arc<ParameterSet> {
        Arc::new(
            ParameterSet::from_json(
                r#"{"Cuisine": ["None", "Mexican", "Korean"], "Diet": ["None", "Vegetarian"]}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(params());
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert_eq!(session.unit_system(), UnitSystem::Imperial);
        assert_eq!(session.rating().value(), 3);
        assert!(session.saved().is_empty());
        assert!(session.last_prompt().is_none());
    }

    #[tokio::test]
    async fn test_generate_stores_prompt_and_result() {
        let provider = FakeProvider::new().with_default_response("Tacos\nSteps:");
        let mut session = Session::new(params());
        session.set_parameter("Cuisine", "Mexican").unwrap();

        let text = session.generate(&provider).await.unwrap().to_string();

        assert_eq!(text, "Tacos\nSteps:");
        assert_eq!(session.phase(), SessionPhase::HasResult);
        assert_eq!(session.last_prompt(), provider.last_prompt().as_deref());
        assert!(session.last_prompt().unwrap().contains("Cuisine: Mexican"));
    }

    #[tokio::test]
    async fn test_regenerate_without_generation() {
        let provider = FakeProvider::new().with_default_response("x");
        let mut session = Session::new(params());
        let result = session.regenerate(&provider).await;
        assert!(matches!(result, Err(SessionError::NothingToRegenerate)));
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_previous_result() {
        let provider = FakeProvider::new().with_default_response("Bibimbap");
        let mut session = Session::new(params());
        session.set_parameter("Cuisine", "Korean").unwrap();
        session.generate(&provider).await.unwrap();
        let before = session.generation().cloned();

        session.set_parameter("Cuisine", "Mexican").unwrap();
        provider.queue_failure("quota exceeded");
        let result = session.generate(&provider).await;

        assert!(matches!(result, Err(SessionError::Generation(_))));
        assert_eq!(session.generation().cloned(), before);
    }

    #[tokio::test]
    async fn test_save_transitions() {
        let provider = FakeProvider::new().with_default_response("Churros");
        let mut session = Session::new(params());

        assert!(matches!(session.save(), Err(SessionError::NoResult)));

        session.generate(&provider).await.unwrap();
        assert_eq!(session.save().unwrap(), 1);
        assert_eq!(session.phase(), SessionPhase::SavedAppended);

        session.regenerate(&provider).await.unwrap();
        assert_eq!(session.phase(), SessionPhase::HasResult);
    }

    #[test]
    fn test_saved_recipe_is_one_based() {
        let mut session = Session::new(params());
        session.current = Some(Generation {
            prompt: "p".to_string(),
            text: "Flan".to_string(),
        });
        session.save().unwrap();

        assert_eq!(session.saved_recipe(1), Some("Flan"));
        assert_eq!(session.saved_recipe(0), None);
        assert_eq!(session.saved_recipe(2), None);
    }

    #[test]
    fn test_rating_validation() {
        let mut session = Session::new(params());
        session.set_rating(5).unwrap();
        assert_eq!(session.rating().value(), 5);
        assert!(matches!(
            session.set_rating(0),
            Err(SessionError::InvalidRating(_))
        ));
        assert_eq!(session.rating().value(), 5);
    }

    #[test]
    fn test_exports_require_result() {
        let session = Session::new(params());
        assert!(matches!(session.export_docx(None), Err(SessionError::NoResult)));
        assert!(matches!(session.share_url(), Err(SessionError::NoResult)));
    }
}
