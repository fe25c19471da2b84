use super::ui;
use crate::core::ExpenseEngine;
use anyhow::Result;
use comfy_table::Cell;

/// Prints every known category name.
pub async fn list(engine: &ExpenseEngine) -> Result<()> {
    let categories = engine.categories().await?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Category")]);
    for name in &categories {
        table.add_row(vec![Cell::new(name)]);
    }
    println!("{table}");
    Ok(())
}

/// Adds a user-defined category.
pub async fn add(engine: &ExpenseEngine, name: &str) -> Result<()> {
    engine.add_category(name).await?;
    println!("Added category: {name}");
    Ok(())
}
