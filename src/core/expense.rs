//! Record types for the three persisted collections.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Categories seeded into a fresh store, in seed order.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Health",
    "Zakat/Charity",
    "Entertainment",
    "Other",
];

/// Category applied to an expense recorded without one.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Setting seeded into a fresh store: key and initial value.
pub const DEFAULT_SETTING: (&str, &str) = ("theme", "light");

/// A single logged expense. Field order is the JSON export field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier, unique per store and never reused.
    pub id: u64,
    /// Monetary amount, stored exactly as given. A NaN amount (from invalid
    /// input upstream) serializes as JSON `null` and reads back as NaN.
    #[serde(with = "amount_repr")]
    pub amount: f64,
    pub note: String,
    pub category: String,
    /// RFC 3339 UTC timestamp captured at creation, immutable.
    pub date: String,
    /// Epoch milliseconds of the same creation instant; tie-break for
    /// ordering when `date` values collide.
    pub timestamp: i64,
}

impl Expense {
    /// Builds a record for insertion, stamping both time fields from a
    /// single `Utc::now()` so they cannot disagree.
    pub(crate) fn create(id: u64, amount: f64, note: Option<&str>, category: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id,
            amount,
            note: note.unwrap_or_default().to_string(),
            category: category.unwrap_or(FALLBACK_CATEGORY).to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            timestamp: now.timestamp_millis(),
        }
    }

    /// The creation instant in the local timezone, or `None` when the stored
    /// date string does not parse.
    pub fn local_date(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|date| date.with_timezone(&Local))
    }
}

/// A spending category. `is_default` marks the seeded set; it carries no
/// other behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub is_default: bool,
}

/// A persisted key/value preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// JSON has no representation for non-finite numbers; NaN and infinite
/// amounts serialize as `null`, and `null` reads back as NaN.
mod amount_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if amount.is_finite() {
            serializer.serialize_f64(*amount)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
