//! Recipe generation prompt.

use serde::{Deserialize, Serialize};

use crate::selection::Selection;

/// Prompt name used in logs.
pub const RECIPE_PROMPT_NAME: &str = "recipe";

const HEADER: &str = "Generate a one-of-a-kind recipe (title, ingredients, cooking method, step-by-step guide) \
for a YouTube food video creator with the following parameters:\n";

const DETAIL_FOOTER: &str =
    "\n\nInclude detailed explanations, chef’s tips, and common mistakes to avoid at each step.";

const CHEF_MODE: &str = "\nAlso include professional plating suggestions and beverage pairings.";

const VIDEO_SCRIPT: &str = "\nAfter the recipe, generate a concise YouTube video script \
(intro, step narration, outro).";

/// Extra sections requested after every recipe, in the order they are asked for.
pub const EXTRA_SECTIONS: [&str; 4] = [
    "Grocery List",
    "Step-by-Step Timers (with estimated durations)",
    "Nutrition Facts",
    "Ingredient Substitutions",
];

/// Optional additions to the recipe prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFlags {
    /// Ask for plating suggestions and beverage pairings.
    #[serde(default)]
    pub chef_mode: bool,
    /// Ask for a three-part video script after the recipe.
    #[serde(default)]
    pub video_script: bool,
}

/// Render the recipe prompt for the current selection.
///
/// Parameters left at "None" are omitted. Values are inserted verbatim.
pub fn render_recipe_prompt(selection: &Selection, flags: PromptFlags) -> String {
    let parts: Vec<String> = selection
        .active()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();

    let mut prompt = String::from(HEADER);
    prompt.push_str(&parts.join("\n"));
    prompt.push_str(DETAIL_FOOTER);

    if flags.chef_mode {
        prompt.push_str(CHEF_MODE);
    }
    if flags.video_script {
        prompt.push_str(VIDEO_SCRIPT);
    }

    prompt.push_str("\n\nThen also produce, under clear headings:");
    for section in EXTRA_SECTIONS {
        prompt.push_str("\n- ");
        prompt.push_str(section);
    }

    prompt
}
