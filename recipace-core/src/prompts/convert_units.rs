//! Prompt for converting a generated recipe to another measurement system.

use crate::types::UnitSystem;

/// Prompt name used in logs.
pub const CONVERT_UNITS_PROMPT_NAME: &str = "convert_units";

/// Render the unit conversion prompt for the given recipe text.
pub fn render_convert_units_prompt(system: UnitSystem, recipe_text: &str) -> String {
    format!("Convert measurements to {system} units:\n{recipe_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_convert_units_prompt(UnitSystem::Metric, "Pancakes\n1 cup flour");
        assert_eq!(prompt, "Convert measurements to Metric units:\nPancakes\n1 cup flour");
    }
}
