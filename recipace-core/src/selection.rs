//! The user's current choice for each recipe parameter.

use crate::error::ParameterError;
use crate::params::{ParameterSet, NONE};

/// One chosen value per known parameter, in [`ParameterSet`] order.
///
/// A selection is always complete: every parameter has a value, and unset
/// parameters hold [`NONE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    values: Vec<(String, String)>,
}

impl Selection {
    /// A selection with every parameter set to [`NONE`].
    pub fn new(params: &ParameterSet) -> Self {
        let values = params
            .names()
            .map(|name| (name.to_string(), NONE.to_string()))
            .collect();
        Self { values }
    }

    /// Set a single parameter, validating it against the parameter set.
    pub fn set(
        &mut self,
        params: &ParameterSet,
        name: &str,
        value: &str,
    ) -> Result<(), ParameterError> {
        params.validate(name, value)?;
        match self.slot(name) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(ParameterError::UnknownParameter(name.to_string())),
        }
    }

    /// Apply several updates at once. Nothing is changed if any update is invalid.
    pub fn apply<'a, I>(&mut self, params: &ParameterSet, updates: I) -> Result<(), ParameterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut next = self.clone();
        for (name, value) in updates {
            next.set(params, name, value)?;
        }
        *self = next;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, value)| value)
    }

    /// All (name, value) pairs in parameter order, including unset ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Only the parameters that are set, in parameter order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, value)| *value != NONE)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    fn slot(&mut self, name: &str) -> Option<&mut String> {
        self.values
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ParameterSet {
        ParameterSet::from_json(
            r#"{"Cuisine": ["None", "Italian"], "Diet": ["None", "Vegan"], "Course": ["None", "Dessert"]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_to_none_for_every_parameter() {
        let selection = Selection::new(&params());
        assert_eq!(selection.len(), 3);
        assert!(selection.iter().all(|(_, v)| v == NONE));
        assert_eq!(selection.active().count(), 0);
    }

    #[test]
    fn test_active_keeps_parameter_order() {
        let params = params();
        let mut selection = Selection::new(&params);
        selection.set(&params, "Course", "Dessert").unwrap();
        selection.set(&params, "Cuisine", "Italian").unwrap();

        let active: Vec<_> = selection.active().collect();
        assert_eq!(active, vec![("Cuisine", "Italian"), ("Course", "Dessert")]);
    }

    #[test]
    fn test_invalid_update_leaves_selection_untouched() {
        let params = params();
        let mut selection = Selection::new(&params);
        let result = selection.apply(&params, [("Cuisine", "Italian"), ("Diet", "Carnivore")]);

        assert!(result.is_err());
        assert_eq!(selection.get("Cuisine"), Some(NONE));
    }
}
