use crate::core::ExpenseEngine;
use crate::core::export::ExportFormat;
use anyhow::{Context, Result};
use std::path::Path;

/// Writes the full expense log as CSV or JSON, to stdout or to `output`.
pub async fn run(
    engine: &ExpenseEngine,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let content = match format {
        ExportFormat::Csv => engine.export_csv().await?,
        ExportFormat::Json => engine.export_json().await?,
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write export file: {}", path.display()))?;
            tracing::info!("Exported expenses to {}", path.display());
            println!("Exported expenses to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
