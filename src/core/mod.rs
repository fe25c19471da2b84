//! Core business logic abstractions

pub mod analytics;
pub mod config;
pub mod engine;
pub mod expense;
pub mod export;
pub mod log;
pub mod store;
pub mod window;

// Re-export main types for cleaner imports
pub use analytics::ExpenseStats;
pub use engine::ExpenseEngine;
pub use expense::{Category, Expense, Setting};
pub use export::ExportFormat;
pub use store::{ExpenseStore, StoreError};
pub use window::Window;
