use super::ui;
use crate::core::ExpenseEngine;
use crate::core::config::AppConfig;
use crate::core::window::Window;
use anyhow::Result;
use comfy_table::Cell;

/// Prints the expenses inside `window` as a table, newest first.
pub async fn run(engine: &ExpenseEngine, config: &AppConfig, window: Window) -> Result<()> {
    let expenses = engine.query_expenses(window).await?;

    if expenses.is_empty() {
        println!("No expenses recorded for window: {window}");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Date"),
        ui::header_cell(&format!("Amount ({})", config.currency)),
        ui::header_cell("Category"),
        ui::header_cell("Note"),
    ]);

    for expense in &expenses {
        let date = expense
            .local_date()
            .map(|local| local.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| expense.date.clone());
        table.add_row(vec![
            Cell::new(expense.id),
            Cell::new(date),
            ui::amount_cell(format!("{:.2}", expense.amount)),
            Cell::new(&expense.category),
            Cell::new(&expense.note),
        ]);
    }

    println!("{table}");
    println!(
        "{} expense(s), window: {}",
        expenses.len(),
        ui::style_text(&window.to_string(), ui::StyleType::Subtle)
    );
    Ok(())
}
