//! Session behavior across generate, regenerate, save and convert.

use recipace_core::llm::{FAKE_CONVERSION, FAKE_RECIPE};
use recipace_core::{
    FakeProvider, ParameterSet, PromptFlags, Session, SessionError, SessionPhase, UnitSystem,
};
use std::sync::Arc;

fn params() -> Arc<ParameterSet> {
    Arc::new(
        ParameterSet::from_json(
            r#"{
                "Cuisine": ["None", "Italian", "Japanese"],
                "Meal Type": ["None", "Lunch", "Dinner"],
                "Spice Level": ["None", "Mild", "Hot"]
            }"#,
        )
        .unwrap(),
    )
}

#[tokio::test]
async fn test_regenerate_reuses_last_prompt_after_selection_change() {
    let provider = FakeProvider::with_recipe_responses();
    let mut session = Session::new(params());
    session.set_parameter("Cuisine", "Italian").unwrap();
    session.set_flags(PromptFlags {
        chef_mode: true,
        video_script: false,
    });
    session.generate(&provider).await.unwrap();
    let first_prompt = provider.last_prompt().unwrap();

    session.set_parameter("Cuisine", "Japanese").unwrap();
    session.set_flags(PromptFlags::default());
    provider.queue_response("Second take");
    session.regenerate(&provider).await.unwrap();

    assert_eq!(provider.prompts(), vec![first_prompt.clone(), first_prompt.clone()]);
    assert!(first_prompt.contains("Cuisine: Italian"));
    assert_eq!(session.result(), Some("Second take"));
    assert_eq!(session.last_prompt(), Some(first_prompt.as_str()));

    // A fresh generate picks up the new selection.
    session.generate(&provider).await.unwrap();
    let latest = provider.last_prompt().unwrap();
    assert!(latest.contains("Cuisine: Japanese"));
    assert!(!latest.contains("plating"));
}

#[tokio::test]
async fn test_regenerate_overwrites_result() {
    let provider = FakeProvider::new();
    provider.queue_response("Version one");
    provider.queue_response("Version two");

    let mut session = Session::new(params());
    session.generate(&provider).await.unwrap();
    session.regenerate(&provider).await.unwrap();

    assert_eq!(session.result(), Some("Version two"));
    assert!(session.saved().is_empty());
}

#[tokio::test]
async fn test_saving_twice_keeps_duplicates() {
    let provider = FakeProvider::with_recipe_responses();
    let mut session = Session::new(params());
    session.generate(&provider).await.unwrap();

    assert_eq!(session.save().unwrap(), 1);
    assert_eq!(session.save().unwrap(), 2);
    assert_eq!(session.saved(), &[FAKE_RECIPE.to_string(), FAKE_RECIPE.to_string()]);
}

#[tokio::test]
async fn test_saved_entries_survive_regeneration() {
    let provider = FakeProvider::new();
    provider.queue_response("Ramen");
    provider.queue_response("Udon");

    let mut session = Session::new(params());
    session.generate(&provider).await.unwrap();
    session.save().unwrap();
    session.regenerate(&provider).await.unwrap();

    assert_eq!(session.saved(), &["Ramen".to_string()]);
    assert_eq!(session.result(), Some("Udon"));
    assert_eq!(session.phase(), SessionPhase::HasResult);
}

#[tokio::test]
async fn test_failed_regenerate_keeps_state() {
    let provider = FakeProvider::new();
    provider.queue_response("Risotto");
    provider.queue_failure("network down");

    let mut session = Session::new(params());
    session.generate(&provider).await.unwrap();
    session.save().unwrap();

    let err = session.regenerate(&provider).await.unwrap_err();
    assert!(matches!(err, SessionError::Generation(_)));
    assert_eq!(session.result(), Some("Risotto"));
    assert_eq!(session.phase(), SessionPhase::SavedAppended);
}

#[tokio::test]
async fn test_convert_units_does_not_replace_result() {
    let provider = FakeProvider::with_recipe_responses();
    let mut session = Session::new(params());
    session.generate(&provider).await.unwrap();
    session.set_unit_system(UnitSystem::Metric);

    let converted = session.convert_units(&provider).await.unwrap();

    assert_eq!(converted, FAKE_CONVERSION);
    assert_eq!(session.result(), Some(FAKE_RECIPE));
    assert_eq!(
        provider.last_prompt().unwrap(),
        format!("Convert measurements to Metric units:\n{}", FAKE_RECIPE)
    );
}

#[tokio::test]
async fn test_convert_units_requires_result() {
    let provider = FakeProvider::with_recipe_responses();
    let session = Session::new(params());
    let result = session.convert_units(&provider).await;
    assert!(matches!(result, Err(SessionError::NoResult)));
}

#[tokio::test]
async fn test_share_url_from_result() {
    let provider = FakeProvider::new();
    provider.queue_response("Miso Soup\nServes 2");

    let mut session = Session::new(params());
    session.generate(&provider).await.unwrap();

    assert_eq!(
        session.share_url().unwrap(),
        "https://twitter.com/intent/tweet?text=Miso%20Soup%0AServes%202"
    );
}

#[test]
fn test_invalid_selection_rejected() {
    let mut session = Session::new(params());
    let result = session.update_selection([("Cuisine", "Italian"), ("Spice Level", "Nuclear")]);
    assert!(matches!(result, Err(SessionError::Parameter(_))));
    assert_eq!(session.selection().get("Cuisine"), Some("None"));
}
