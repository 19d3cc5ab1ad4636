//! Configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::params::DEFAULT_PARAMS_PATH;

/// Environment variable holding the generation API credential.
pub const API_KEY_VAR: &str = "GEMMA_API_KEY";

/// Default Generative Language API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gemma-3-27b-it";

/// Environment variable overriding the parameter file location.
pub const PARAMS_PATH_VAR: &str = "RECIPACE_PARAMS_PATH";

/// Default request timeout in seconds. Long recipes with every extra section
/// take a while to generate.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing {0} in environment or .env")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Which generation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Offline canned responses, for development and tests.
    Fake,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(ProviderKind::Gemini),
            "fake" => Ok(ProviderKind::Fake),
            other => Err(format!("unknown provider {:?}", other)),
        }
    }
}

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Credential for the generation API.
    pub api_key: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Path to the parameter definition file.
    pub params_path: PathBuf,
    /// Timeout for a single generation call.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"***")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("params_path", &self.params_path)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMMA_API_KEY`: API key for the Generative Language API
    ///
    /// Optional:
    /// - `RECIPACE_PROVIDER`: "gemini" or "fake" (default: "gemini")
    /// - `RECIPACE_MODEL`: Model name (default: "gemma-3-27b-it")
    /// - `RECIPACE_API_BASE_URL`: API base URL
    /// - `RECIPACE_PARAMS_PATH`: Parameter file (default: "recipace.json")
    /// - `RECIPACE_TIMEOUT_SECS`: Request timeout (default: 120)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;

        let provider = match lookup("RECIPACE_PROVIDER") {
            Some(v) => v.parse().map_err(|message| ConfigError::InvalidValue {
                var: "RECIPACE_PROVIDER".to_string(),
                message,
            })?,
            None => ProviderKind::default(),
        };

        let model = lookup("RECIPACE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url =
            lookup("RECIPACE_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let params_path = params_path_from(&lookup);

        let timeout_secs = match lookup("RECIPACE_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                var: "RECIPACE_TIMEOUT_SECS".to_string(),
                message: format!("expected whole seconds, got {:?}", v),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            provider,
            model,
            base_url,
            params_path,
            timeout_secs,
        })
    }
}

/// Parameter file location from the environment, for callers that never
/// contact the model and so have no credential to load.
pub fn params_path_from_env() -> PathBuf {
    params_path_from(|key| env::var(key).ok())
}

fn params_path_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(PARAMS_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_PATH))
}
