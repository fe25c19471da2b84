//! The engine facade: composes the store with the window filter and the
//! aggregator to answer every expense operation.

use crate::core::analytics::{self, ExpenseStats};
use crate::core::expense::Expense;
use crate::core::export;
use crate::core::store::{ExpenseStore, StoreError};
use crate::core::window::Window;
use chrono::Local;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::debug;

/// Front door for all expense operations. Holds no record cache; every query
/// re-reads from the store.
#[derive(Clone)]
pub struct ExpenseEngine {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseEngine {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Opens and, on first use, seeds the underlying store. Call once before
    /// any other operation.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.store.initialize().await
    }

    /// Records a new expense and returns its assigned id.
    pub async fn record_expense(
        &self,
        amount: f64,
        note: Option<&str>,
        category: Option<&str>,
    ) -> Result<u64, StoreError> {
        let id = self.store.add_expense(amount, note, category).await?;
        debug!(id, amount, "Recorded expense");
        Ok(id)
    }

    /// Expenses inside `window`, newest first. Equal dates are broken by the
    /// creation timestamp and then by id, so the order is deterministic.
    pub async fn query_expenses(&self, window: Window) -> Result<Vec<Expense>, StoreError> {
        let today = Local::now().date_naive();
        let mut expenses: Vec<Expense> = self
            .store
            .all_expenses()
            .await?
            .into_iter()
            .filter(|expense| match expense.local_date() {
                Some(date) => window.contains(date.date_naive(), today),
                // A record whose date does not parse has no calendar
                // position; it still shows up unfiltered.
                None => window == Window::All,
            })
            .collect();
        expenses.sort_by_cached_key(|expense| Reverse(sort_key(expense)));
        debug!(window = %window, count = expenses.len(), "Filtered expenses");
        Ok(expenses)
    }

    /// Deletes by id. Deleting an id that does not exist succeeds.
    pub async fn remove_expense(&self, id: u64) -> Result<(), StoreError> {
        self.store.delete_expense(id).await?;
        debug!(id, "Removed expense");
        Ok(())
    }

    /// Aggregate statistics over the expenses inside `window`.
    pub async fn stats_for(&self, window: Window) -> Result<ExpenseStats, StoreError> {
        let expenses = self.query_expenses(window).await?;
        Ok(analytics::compute_stats(&expenses))
    }

    /// The full expense log as CSV, in display order.
    pub async fn export_csv(&self) -> Result<String, StoreError> {
        let expenses = self.query_expenses(Window::All).await?;
        Ok(export::to_csv(&expenses))
    }

    /// The full expense log as pretty-printed JSON, in display order.
    pub async fn export_json(&self) -> Result<String, StoreError> {
        let expenses = self.query_expenses(Window::All).await?;
        export::to_json(&expenses).map_err(StoreError::read)
    }

    /// Every known category name.
    pub async fn categories(&self) -> Result<Vec<String>, StoreError> {
        self.store.categories().await
    }

    /// Adds a user-defined category.
    pub async fn add_category(&self, name: &str) -> Result<(), StoreError> {
        self.store.add_category(name).await?;
        debug!(name, "Added category");
        Ok(())
    }

    /// Reads a persisted preference.
    pub async fn setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.store.setting(key).await
    }

    /// Creates or replaces a persisted preference.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.store.set_setting(key, value).await
    }
}

/// Ordering key: the creation instant from the date string when it parses,
/// falling back to the raw timestamp, then the tie-breaks.
fn sort_key(expense: &Expense) -> (i64, i64, u64) {
    let date_ms = expense
        .local_date()
        .map(|local| local.timestamp_millis())
        .unwrap_or(expense.timestamp);
    (date_ms, expense.timestamp, expense.id)
}
