//! Storage contract for the expense, category and settings collections.

use crate::core::expense::Expense;
use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by [`ExpenseStore`] operations.
///
/// Operations are all-or-nothing at the single-record level and never retry
/// internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// An operation was attempted before [`ExpenseStore::initialize`].
    #[error("expense store is not initialized")]
    NotInitialized,

    /// The underlying storage could not be opened or upgraded.
    #[error("failed to open expense store: {0}")]
    Initialization(String),

    /// A read failed in the underlying storage.
    #[error("failed to read from expense store: {0}")]
    Read(String),

    /// A write failed in the underlying storage.
    #[error("failed to write to expense store: {0}")]
    Write(String),

    /// An insert collided with an existing key.
    #[error("\"{0}\" already exists")]
    DuplicateKey(String),
}

impl StoreError {
    pub(crate) fn init(err: impl std::fmt::Display) -> Self {
        StoreError::Initialization(err.to_string())
    }

    pub(crate) fn read(err: impl std::fmt::Display) -> Self {
        StoreError::Read(err.to_string())
    }

    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        StoreError::Write(err.to_string())
    }
}

/// CRUD over the three persisted collections.
///
/// Implementations assign expense ids and stamp creation times themselves;
/// callers supply only the user-provided fields. `initialize` must be called
/// once before any other operation.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Opens the storage, creating and seeding the collections on first use.
    /// Reopening an existing store never re-seeds or duplicates records.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Inserts a new expense and returns its assigned id. An omitted note
    /// becomes the empty string and an omitted category becomes "Other". The
    /// amount is stored exactly as given, NaN included.
    async fn add_expense(
        &self,
        amount: f64,
        note: Option<&str>,
        category: Option<&str>,
    ) -> Result<u64, StoreError>;

    /// Every expense record, unordered.
    async fn all_expenses(&self) -> Result<Vec<Expense>, StoreError>;

    /// Removes the expense with `id`. Removing an absent id succeeds.
    async fn delete_expense(&self, id: u64) -> Result<(), StoreError>;

    /// Every category name, sorted.
    async fn categories(&self) -> Result<Vec<String>, StoreError>;

    /// Adds a user-defined category. Fails with
    /// [`StoreError::DuplicateKey`] when the name is already present.
    async fn add_category(&self, name: &str) -> Result<(), StoreError>;

    /// Point read of a setting; `None` when the key was never written.
    async fn setting(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Creates or replaces a setting.
    async fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
