//! Pure aggregation over expense records.

use crate::core::expense::Expense;
use crate::core::window::Window;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Aggregate statistics for a set of expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseStats {
    /// Sum of all amounts.
    pub total: f64,
    /// Number of records.
    pub count: usize,
    /// `total / count`, or zero when there are no records.
    pub average: f64,
    /// Per-category sums, keyed by category name.
    pub category_totals: BTreeMap<String, f64>,
}

/// Computes totals over `expenses`. Depends only on which records are
/// present, not on their order.
pub fn compute_stats(expenses: &[Expense]) -> ExpenseStats {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let count = expenses.len();

    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *category_totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    let average = if count > 0 { total / count as f64 } else { 0.0 };

    ExpenseStats {
        total,
        count,
        average,
        category_totals,
    }
}

/// Sums spending per weekday (Sunday first) for the week containing
/// `today`. Records outside that week contribute nothing.
pub fn weekday_totals(expenses: &[Expense], today: NaiveDate) -> [f64; 7] {
    let mut totals = [0.0; 7];
    for expense in expenses {
        if let Some(date) = expense.local_date() {
            let date = date.date_naive();
            if Window::Week.contains(date, today) {
                totals[date.weekday().num_days_from_sunday() as usize] += expense.amount;
            }
        }
    }
    totals
}

/// Sums spending per day of the calendar month containing `today`, one slot
/// per day of that month.
pub fn daily_totals(expenses: &[Expense], today: NaiveDate) -> Vec<f64> {
    let mut totals = vec![0.0; days_in_month(today) as usize];
    for expense in expenses {
        if let Some(date) = expense.local_date() {
            let date = date.date_naive();
            if Window::Month.contains(date, today) {
                totals[date.day0() as usize] += expense.amount;
            }
        }
    }
    totals
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
