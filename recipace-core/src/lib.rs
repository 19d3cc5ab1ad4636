pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod params;
pub mod prompts;
pub mod selection;
pub mod session;
pub mod types;

pub use config::{AppConfig, ConfigError, ProviderKind};
pub use error::{ExportError, ParameterError};
pub use export::{build_document, export_docx, share_text, share_url, Block, RecipeDocument};
pub use llm::{create_provider, FakeProvider, GeminiProvider, LlmError, LlmProvider};
pub use params::{ParameterSet, NONE};
pub use prompts::{render_convert_units_prompt, render_recipe_prompt, PromptFlags};
pub use selection::Selection;
pub use session::{Generation, Session, SessionError, SessionPhase};
pub use types::{Rating, UnitSystem};
