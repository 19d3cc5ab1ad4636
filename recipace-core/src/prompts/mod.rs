//! Prompt templates sent to the generation model.

pub mod convert_units;
pub mod recipe;

pub use convert_units::render_convert_units_prompt;
pub use recipe::{render_recipe_prompt, PromptFlags, EXTRA_SECTIONS};
