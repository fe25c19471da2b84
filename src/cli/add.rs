use crate::core::ExpenseEngine;
use crate::core::config::AppConfig;
use crate::core::expense::FALLBACK_CATEGORY;
use anyhow::Result;
use console::style;

/// Records one expense and reports the assigned id.
pub async fn run(
    engine: &ExpenseEngine,
    config: &AppConfig,
    amount: f64,
    note: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let id = engine.record_expense(amount, note, category).await?;

    let category = category.unwrap_or(FALLBACK_CATEGORY);
    println!(
        "Recorded expense #{id}: {} ({category})",
        style(format!("{}{amount:.2}", config.currency)).green().bold()
    );
    Ok(())
}
