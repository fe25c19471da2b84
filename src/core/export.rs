//! Plain-text export encodings for the expense log.

use crate::core::expense::Expense;
use anyhow::Result;
use std::fmt::Display;
use std::str::FromStr;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        write!(f, "{value}")
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid export format: {s}. Valid values: csv, json"
            )),
        }
    }
}

/// Renders expenses as CSV with the header `Date,Amount,Category,Note`.
///
/// The date column is the local calendar date. Notes are always wrapped in
/// double quotes with embedded quotes doubled. Rows are joined with `\n` and
/// there is no trailing newline.
pub fn to_csv(expenses: &[Expense]) -> String {
    let mut lines = Vec::with_capacity(expenses.len() + 1);
    lines.push("Date,Amount,Category,Note".to_string());
    for expense in expenses {
        let date = expense
            .local_date()
            .map(|local| local.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| expense.date.clone());
        lines.push(format!(
            "{},{},{},\"{}\"",
            date,
            expense.amount,
            expense.category,
            expense.note.replace('"', "\"\"")
        ));
    }
    lines.join("\n")
}

/// Renders expenses as a pretty-printed JSON array of full records.
pub fn to_json(expenses: &[Expense]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(expenses)
}
