use anyhow::{Context, Result};
use chrono::Local;
use recipace_core::{create_provider, AppConfig, Session, UnitSystem};
use std::fs;
use std::path::PathBuf;

/// Where to send the generated recipe besides stdout.
pub struct Outputs {
    pub txt: Option<PathBuf>,
    pub docx: Option<PathBuf>,
    pub convert: Option<UnitSystem>,
}

pub async fn run(mut session: Session, outputs: Outputs) -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let provider = create_provider(&config).context("Failed to create generation provider")?;

    let recipe = session
        .generate(&*provider)
        .await
        .context("Recipe generation failed")?
        .to_string();
    println!("{}", recipe);

    if let Some(path) = &outputs.txt {
        fs::write(path, &recipe)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    if let Some(path) = &outputs.docx {
        let bytes = session
            .export_docx(Some(Local::now().naive_local()))
            .context("Failed to build Word document")?;
        fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    if let Some(unit_system) = outputs.convert {
        session.set_unit_system(unit_system);
        let converted = session
            .convert_units(&*provider)
            .await
            .context("Unit conversion failed")?;
        println!("\n--- {} ---\n{}", unit_system, converted);
    }

    Ok(())
}
