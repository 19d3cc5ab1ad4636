mod generate;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use recipace_core::config::params_path_from_env;
use recipace_core::{ParameterSet, PromptFlags, Session, UnitSystem};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "recipace")]
#[command(about = "Recipace-AI recipe generator", long_about = None)]
struct Cli {
    /// Parameter definition file (default: $RECIPACE_PARAMS_PATH or recipace.json)
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipe parameters and their options
    Params,
    /// Print the prompt for a selection without calling the model
    Prompt(RecipeArgs),
    /// Generate a recipe and optionally export it
    Generate {
        #[command(flatten)]
        recipe: RecipeArgs,
        /// Write the recipe as plain text to this path
        #[arg(long)]
        txt: Option<PathBuf>,
        /// Write the recipe as a Word document to this path
        #[arg(long)]
        docx: Option<PathBuf>,
        /// Also print the recipe converted to this unit system (imperial or metric)
        #[arg(long, value_parser = parse_unit_system)]
        convert: Option<UnitSystem>,
    },
}

#[derive(Args)]
struct RecipeArgs {
    /// Parameter value as NAME=VALUE; repeatable
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,
    /// Ask for plating suggestions and beverage pairings
    #[arg(long)]
    chef_mode: bool,
    /// Ask for a video script after the recipe
    #[arg(long)]
    video_script: bool,
}

impl RecipeArgs {
    /// A session with this selection and these flags applied.
    fn session(&self, params: Arc<ParameterSet>) -> Result<Session> {
        let mut session = Session::new(params);
        session
            .update_selection(
                self.set
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
            .context("Invalid --set")?;
        session.set_flags(PromptFlags {
            chef_mode: self.chef_mode,
            video_script: self.video_script,
        });
        Ok(session)
    }
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_unit_system(s: &str) -> Result<UnitSystem, String> {
    s.parse()
}

fn load_params(path: Option<PathBuf>) -> Result<Arc<ParameterSet>> {
    let path = path.unwrap_or_else(params_path_from_env);
    let params = ParameterSet::load(&path)
        .with_context(|| format!("Failed to load parameters from {}", path.display()))?;
    Ok(Arc::new(params))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params => {
            let params = load_params(cli.params)?;
            for (name, options) in params.iter() {
                println!("{}: {}", name, options.join(", "));
            }
        }
        Commands::Prompt(recipe) => {
            let session = recipe.session(load_params(cli.params)?)?;
            println!("{}", session.prompt_preview());
        }
        Commands::Generate {
            recipe,
            txt,
            docx,
            convert,
        } => {
            let params = load_params(cli.params)?;
            let session = recipe.session(params)?;
            generate::run(
                session,
                generate::Outputs {
                    txt,
                    docx,
                    convert,
                },
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("Meal Type=Dinner").unwrap(),
            ("Meal Type".to_string(), "Dinner".to_string())
        );
        assert_eq!(
            parse_assignment("Notes=a=b").unwrap(),
            ("Notes".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("Cuisine").is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "recipace",
            "generate",
            "--set",
            "Cuisine=Thai",
            "--set",
            "Servings=4",
            "--chef-mode",
            "--convert",
            "metric",
            "--docx",
            "out.docx",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                recipe,
                docx,
                convert,
                txt,
            } => {
                assert_eq!(recipe.set.len(), 2);
                assert!(recipe.chef_mode);
                assert!(!recipe.video_script);
                assert_eq!(convert, Some(UnitSystem::Metric));
                assert_eq!(docx, Some(PathBuf::from("out.docx")));
                assert!(txt.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_session_rejects_unknown_parameter() {
        let params = Arc::new(
            ParameterSet::from_json(r#"{"Cuisine": ["None", "Thai"]}"#).unwrap(),
        );
        let args = RecipeArgs {
            set: vec![("Colour".to_string(), "Red".to_string())],
            chef_mode: false,
            video_script: false,
        };
        assert!(args.session(params).is_err());
    }
}
