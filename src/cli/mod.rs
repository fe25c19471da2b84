//! Terminal command handlers.

pub mod add;
pub mod category;
pub mod export;
pub mod list;
pub mod remove;
pub mod setup;
pub mod stats;
pub mod theme;
pub mod ui;
