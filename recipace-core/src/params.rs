//! Recipe parameter definitions.
//!
//! The parameter file is a JSON object mapping a parameter name to its list of
//! allowed options, e.g. `{"Cuisine": ["None", "Italian", "Thai"]}`. Every list
//! is expected to contain the [`NONE`] sentinel; parameters are kept in the
//! order they are declared in the file.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::ParameterError;

/// Option value meaning "not set". Parameters holding it are left out of
/// prompts and exports.
pub const NONE: &str = "None";

/// Default location of the parameter file, relative to the working directory.
pub const DEFAULT_PARAMS_PATH: &str = "recipace.json";

/// Immutable mapping of parameter name to allowed options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<(String, Vec<String>)>,
}

impl ParameterSet {
    /// Load parameter definitions from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParameterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ParameterError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let set = Self::from_json(&content)?;

        tracing::info!(
            path = %path.display(),
            parameters = set.len(),
            "Loaded recipe parameters"
        );

        Ok(set)
    }

    /// Parse parameter definitions from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ParameterError> {
        let object: Map<String, Value> = serde_json::from_str(json)?;
        let params = object
            .into_iter()
            .map(|(name, options)| {
                let options: Vec<String> = serde_json::from_value(options)?;
                Ok::<_, serde_json::Error>((name, options))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(params)
    }

    /// Build a parameter set from (name, options) pairs in display order.
    pub fn new(params: Vec<(String, Vec<String>)>) -> Result<Self, ParameterError> {
        if let Some((name, _)) = params.iter().find(|(_, opts)| opts.is_empty()) {
            return Err(ParameterError::NoOptions(name.clone()));
        }
        Ok(Self { params })
    }

    /// Parameter names in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }

    /// Allowed options for a parameter.
    pub fn options(&self, name: &str) -> Option<&[String]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, opts)| opts.as_slice())
    }

    /// Iterate over (name, options) in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params
            .iter()
            .map(|(name, opts)| (name.as_str(), opts.as_slice()))
    }

    /// Check that `value` is one of the options for `name`.
    ///
    /// [`NONE`] is always accepted, even when a definition omits it.
    pub fn validate(&self, name: &str, value: &str) -> Result<(), ParameterError> {
        let options = self
            .options(name)
            .ok_or_else(|| ParameterError::UnknownParameter(name.to_string()))?;

        if value == NONE || options.iter().any(|o| o == value) {
            Ok(())
        } else {
            Err(ParameterError::InvalidOption {
                name: name.to_string(),
                value: value.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "Cuisine": ["None", "Italian", "Thai"],
        "Diet": ["None", "Vegan"],
        "Spice Level": ["None", "Mild", "Hot"]
    }"#;

    #[test]
    fn test_declared_order_is_preserved() {
        let set = ParameterSet::from_json(JSON).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["Cuisine", "Diet", "Spice Level"]);
    }

    #[test]
    fn test_options_lookup() {
        let set = ParameterSet::from_json(JSON).unwrap();
        assert_eq!(set.options("Diet").unwrap(), &["None", "Vegan"]);
        assert!(set.options("Missing").is_none());
    }

    #[test]
    fn test_validate() {
        let set = ParameterSet::from_json(JSON).unwrap();
        assert!(set.validate("Cuisine", "Thai").is_ok());
        assert!(set.validate("Cuisine", NONE).is_ok());
        assert!(matches!(
            set.validate("Cuisine", "Klingon"),
            Err(ParameterError::InvalidOption { .. })
        ));
        assert!(matches!(
            set.validate("Color", "Red"),
            Err(ParameterError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_empty_option_list_rejected() {
        let result = ParameterSet::from_json(r#"{"Cuisine": []}"#);
        assert!(matches!(result, Err(ParameterError::NoOptions(name)) if name == "Cuisine"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = ParameterSet::from_json(r#"{"Cuisine": "Italian"}"#);
        assert!(matches!(result, Err(ParameterError::InvalidJson(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipace.json");
        fs::write(&path, JSON).unwrap();

        let set = ParameterSet::load(&path).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set, ParameterSet::from_json(JSON).unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ParameterSet::load("/definitely/not/here/recipace.json");
        assert!(matches!(result, Err(ParameterError::Read { .. })));
    }
}
