use super::ui;
use crate::core::ExpenseEngine;
use crate::core::analytics;
use crate::core::config::AppConfig;
use crate::core::window::Window;
use anyhow::Result;
use chrono::Local;
use comfy_table::Cell;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Prints aggregate statistics for `window`: overall totals, the category
/// breakdown, and a per-day view for the week and month windows.
pub async fn run(engine: &ExpenseEngine, config: &AppConfig, window: Window) -> Result<()> {
    let expenses = engine.query_expenses(window).await?;
    let stats = analytics::compute_stats(&expenses);
    let currency = &config.currency;

    println!(
        "Spending, window: {}\n",
        ui::style_text(&window.to_string(), ui::StyleType::Title)
    );
    println!(
        "{} {}   Expenses: {}   Average: {currency}{:.2}",
        ui::style_text("Total:", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{currency}{:.2}", stats.total), ui::StyleType::TotalValue),
        stats.count,
        stats.average
    );

    if stats.category_totals.is_empty() {
        return Ok(());
    }

    // Category breakdown, largest first, with each category's share.
    let mut totals: Vec<(&String, &f64)> = stats.category_totals.iter().collect();
    totals.sort_by(|a, b| b.1.total_cmp(a.1));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Amount ({currency})")),
        ui::header_cell("Share (%)"),
    ]);
    for (name, amount) in totals {
        let share = if stats.total > 0.0 {
            amount / stats.total * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(name),
            ui::amount_cell(format!("{amount:.2}")),
            ui::amount_cell(format!("{share:.1}")),
        ]);
    }
    println!("\n{table}");

    let today = Local::now().date_naive();
    match window {
        Window::Week => {
            let totals = analytics::weekday_totals(&expenses, today);
            let max = totals.iter().cloned().fold(0.0f64, f64::max);

            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Day"),
                ui::header_cell(&format!("Amount ({currency})")),
                ui::header_cell(""),
            ]);
            for (label, amount) in WEEKDAY_LABELS.iter().zip(totals) {
                table.add_row(vec![
                    Cell::new(label),
                    ui::amount_cell(format!("{amount:.2}")),
                    Cell::new(ui::bar(amount, max)),
                ]);
            }
            println!("\n{table}");
        }
        Window::Month => {
            let daily = analytics::daily_totals(&expenses, today);
            println!("\nDaily trend: {}", ui::sparkline(&daily));
        }
        _ => {}
    }

    Ok(())
}
