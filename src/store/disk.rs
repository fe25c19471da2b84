use crate::core::expense::{Category, DEFAULT_CATEGORIES, DEFAULT_SETTING, Expense, Setting};
use crate::core::store::{ExpenseStore, StoreError};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// Bumped when the persisted layout changes. An upgrade only adds missing
/// partitions or seed records, never touches existing ones.
const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &str = "schema_version";
const LAST_EXPENSE_ID_KEY: &str = "last_expense_id";

#[derive(Clone)]
struct Partitions {
    keyspace: Keyspace,
    expenses: PartitionHandle,
    categories: PartitionHandle,
    settings: PartitionHandle,
    meta: PartitionHandle,
}

/// Durable [`ExpenseStore`] on an embedded fjall keyspace, one partition per
/// collection plus a `meta` partition for the schema version and the id
/// counter. Nothing is opened until [`ExpenseStore::initialize`].
pub struct DiskStore {
    path: PathBuf,
    inner: RwLock<Option<Partitions>>,
}

impl DiskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: RwLock::new(None),
        }
    }

    fn open_partitions(&self) -> Result<Partitions, StoreError> {
        std::fs::create_dir_all(&self.path).map_err(StoreError::init)?;

        let keyspace = fjall::Config::new(&self.path)
            .open()
            .map_err(StoreError::init)?;
        let expenses = keyspace
            .open_partition("expenses", PartitionCreateOptions::default())
            .map_err(StoreError::init)?;
        let categories = keyspace
            .open_partition("categories", PartitionCreateOptions::default())
            .map_err(StoreError::init)?;
        let settings = keyspace
            .open_partition("settings", PartitionCreateOptions::default())
            .map_err(StoreError::init)?;
        let meta = keyspace
            .open_partition("meta", PartitionCreateOptions::default())
            .map_err(StoreError::init)?;

        Ok(Partitions {
            keyspace,
            expenses,
            categories,
            settings,
            meta,
        })
    }

    /// Inserts the default categories and settings that are not already
    /// present. Safe to run against a store that carries user data.
    fn seed(parts: &Partitions) -> Result<(), StoreError> {
        for name in DEFAULT_CATEGORIES {
            if !parts.categories.contains_key(name).map_err(StoreError::init)? {
                let category = Category {
                    name: name.to_string(),
                    is_default: true,
                };
                let encoded = serde_json::to_vec(&category).map_err(StoreError::init)?;
                parts
                    .categories
                    .insert(name, encoded)
                    .map_err(StoreError::init)?;
            }
        }

        let (key, value) = DEFAULT_SETTING;
        if !parts.settings.contains_key(key).map_err(StoreError::init)? {
            let setting = Setting {
                key: key.to_string(),
                value: value.to_string(),
            };
            let encoded = serde_json::to_vec(&setting).map_err(StoreError::init)?;
            parts
                .settings
                .insert(key, encoded)
                .map_err(StoreError::init)?;
        }

        Ok(())
    }

    fn collections(&self) -> Result<Partitions, StoreError> {
        self.inner
            .read()
            .unwrap()
            .clone()
            .ok_or(StoreError::NotInitialized)
    }
}

#[async_trait]
impl ExpenseStore for DiskStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        if self.inner.read().unwrap().is_some() {
            debug!("Store already initialized");
            return Ok(());
        }

        let parts = self.open_partitions()?;

        let version: Option<u32> = parts
            .meta
            .get(SCHEMA_VERSION_KEY)
            .map_err(StoreError::init)?
            .map(|raw| serde_json::from_slice(&raw))
            .transpose()
            .map_err(StoreError::init)?;

        match version {
            Some(found) if found >= SCHEMA_VERSION => {
                debug!(version = found, "Opened existing store");
            }
            _ => {
                Self::seed(&parts)?;
                let encoded = serde_json::to_vec(&SCHEMA_VERSION).map_err(StoreError::init)?;
                parts
                    .meta
                    .insert(SCHEMA_VERSION_KEY, encoded)
                    .map_err(StoreError::init)?;
                parts
                    .keyspace
                    .persist(PersistMode::SyncAll)
                    .map_err(StoreError::init)?;
                debug!(version = SCHEMA_VERSION, "Created and seeded store");
            }
        }

        *self.inner.write().unwrap() = Some(parts);
        Ok(())
    }

    async fn add_expense(
        &self,
        amount: f64,
        note: Option<&str>,
        category: Option<&str>,
    ) -> Result<u64, StoreError> {
        let parts = self.collections()?;

        let last: u64 = match parts
            .meta
            .get(LAST_EXPENSE_ID_KEY)
            .map_err(StoreError::write)?
        {
            Some(raw) => serde_json::from_slice(&raw).map_err(StoreError::write)?,
            None => 0,
        };
        let id = last + 1;

        // The counter is claimed before the record lands, so a crash in
        // between skips an id rather than reusing one.
        let encoded_id = serde_json::to_vec(&id).map_err(StoreError::write)?;
        parts
            .meta
            .insert(LAST_EXPENSE_ID_KEY, encoded_id)
            .map_err(StoreError::write)?;

        let expense = Expense::create(id, amount, note, category);
        let encoded = serde_json::to_vec(&expense).map_err(StoreError::write)?;
        parts
            .expenses
            .insert(id.to_be_bytes().as_slice(), encoded)
            .map_err(StoreError::write)?;
        parts
            .keyspace
            .persist(PersistMode::SyncAll)
            .map_err(StoreError::write)?;

        debug!(id, "Inserted expense");
        Ok(id)
    }

    async fn all_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        let parts = self.collections()?;

        let mut expenses = Vec::new();
        for entry in parts.expenses.iter() {
            let (_, value) = entry.map_err(StoreError::read)?;
            expenses.push(serde_json::from_slice(&value).map_err(StoreError::read)?);
        }

        debug!(count = expenses.len(), "Loaded expenses");
        Ok(expenses)
    }

    async fn delete_expense(&self, id: u64) -> Result<(), StoreError> {
        let parts = self.collections()?;

        parts
            .expenses
            .remove(id.to_be_bytes().as_slice())
            .map_err(StoreError::write)?;
        parts
            .keyspace
            .persist(PersistMode::SyncAll)
            .map_err(StoreError::write)?;

        debug!(id, "Deleted expense");
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let parts = self.collections()?;

        let mut names = Vec::new();
        for entry in parts.categories.iter() {
            let (_, value) = entry.map_err(StoreError::read)?;
            let category: Category = serde_json::from_slice(&value).map_err(StoreError::read)?;
            names.push(category.name);
        }

        Ok(names)
    }

    async fn add_category(&self, name: &str) -> Result<(), StoreError> {
        let parts = self.collections()?;

        if parts
            .categories
            .contains_key(name)
            .map_err(StoreError::write)?
        {
            return Err(StoreError::DuplicateKey(name.to_string()));
        }

        let category = Category {
            name: name.to_string(),
            is_default: false,
        };
        let encoded = serde_json::to_vec(&category).map_err(StoreError::write)?;
        parts
            .categories
            .insert(name, encoded)
            .map_err(StoreError::write)?;
        parts
            .keyspace
            .persist(PersistMode::SyncAll)
            .map_err(StoreError::write)?;

        debug!(name, "Inserted category");
        Ok(())
    }

    async fn setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let parts = self.collections()?;

        match parts.settings.get(key).map_err(StoreError::read)? {
            Some(raw) => {
                let setting: Setting = serde_json::from_slice(&raw).map_err(StoreError::read)?;
                Ok(Some(setting.value))
            }
            None => Ok(None),
        }
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let parts = self.collections()?;

        let setting = Setting {
            key: key.to_string(),
            value: value.to_string(),
        };
        let encoded = serde_json::to_vec(&setting).map_err(StoreError::write)?;
        parts
            .settings
            .insert(key, encoded)
            .map_err(StoreError::write)?;
        parts
            .keyspace
            .persist(PersistMode::SyncAll)
            .map_err(StoreError::write)?;

        debug!(key, "Stored setting");
        Ok(())
    }
}
