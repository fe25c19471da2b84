use crate::core::expense::{Category, DEFAULT_CATEGORIES, DEFAULT_SETTING, Expense, Setting};
use crate::core::store::{ExpenseStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Tables {
    expenses: BTreeMap<u64, Expense>,
    categories: BTreeMap<String, Category>,
    settings: BTreeMap<String, Setting>,
    last_expense_id: u64,
}

/// [`ExpenseStore`] on plain maps behind a mutex. Ids stay monotonic for the
/// lifetime of the instance; nothing survives drop. Used in tests and
/// anywhere durability is not wanted.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        let tables = guard.get_or_insert_with(Tables::default);

        for name in DEFAULT_CATEGORIES {
            tables
                .categories
                .entry(name.to_string())
                .or_insert_with(|| Category {
                    name: name.to_string(),
                    is_default: true,
                });
        }

        let (key, value) = DEFAULT_SETTING;
        tables.settings.entry(key.to_string()).or_insert_with(|| Setting {
            key: key.to_string(),
            value: value.to_string(),
        });

        debug!("Initialized in-memory store");
        Ok(())
    }

    async fn add_expense(
        &self,
        amount: f64,
        note: Option<&str>,
        category: Option<&str>,
    ) -> Result<u64, StoreError> {
        let mut guard = self.inner.lock().await;
        let tables = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        tables.last_expense_id += 1;
        let id = tables.last_expense_id;
        tables
            .expenses
            .insert(id, Expense::create(id, amount, note, category));
        Ok(id)
    }

    async fn all_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        let guard = self.inner.lock().await;
        let tables = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(tables.expenses.values().cloned().collect())
    }

    async fn delete_expense(&self, id: u64) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        let tables = guard.as_mut().ok_or(StoreError::NotInitialized)?;
        tables.expenses.remove(&id);
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let guard = self.inner.lock().await;
        let tables = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(tables.categories.keys().cloned().collect())
    }

    async fn add_category(&self, name: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        let tables = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        if tables.categories.contains_key(name) {
            return Err(StoreError::DuplicateKey(name.to_string()));
        }
        tables.categories.insert(
            name.to_string(),
            Category {
                name: name.to_string(),
                is_default: false,
            },
        );
        Ok(())
    }

    async fn setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.inner.lock().await;
        let tables = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(tables.settings.get(key).map(|setting| setting.value.clone()))
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        let tables = guard.as_mut().ok_or(StoreError::NotInitialized)?;
        tables.settings.insert(
            key.to_string(),
            Setting {
                key: key.to_string(),
                value: value.to_string(),
            },
        );
        Ok(())
    }
}
