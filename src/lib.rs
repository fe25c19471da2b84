pub mod cli;
pub mod core;
pub mod store;

pub use crate::core::config;

use crate::core::ExpenseEngine;
use crate::core::config::AppConfig;
use crate::core::export::ExportFormat;
use crate::core::window::Window;
use crate::store::DiskStore;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Commands understood by the application, decoupled from the argument
/// parser in the binary.
pub enum AppCommand {
    Add {
        amount: f64,
        note: Option<String>,
        category: Option<String>,
    },
    List {
        window: Window,
    },
    Stats {
        window: Window,
    },
    Remove {
        id: u64,
    },
    Categories,
    AddCategory {
        name: String,
    },
    Export {
        format: ExportFormat,
        output: Option<PathBuf>,
    },
    Theme {
        value: Option<String>,
    },
}

/// Loads the configuration, opens the expense store and runs `command`.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Kharcha starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = Arc::new(DiskStore::new(config.store_path()?));
    let engine = ExpenseEngine::new(store);
    engine.initialize().await?;

    match command {
        AppCommand::Add {
            amount,
            note,
            category,
        } => cli::add::run(&engine, &config, amount, note.as_deref(), category.as_deref()).await,
        AppCommand::List { window } => cli::list::run(&engine, &config, window).await,
        AppCommand::Stats { window } => cli::stats::run(&engine, &config, window).await,
        AppCommand::Remove { id } => cli::remove::run(&engine, id).await,
        AppCommand::Categories => cli::category::list(&engine).await,
        AppCommand::AddCategory { name } => cli::category::add(&engine, &name).await,
        AppCommand::Export { format, output } => {
            cli::export::run(&engine, format, output.as_deref()).await
        }
        AppCommand::Theme { value } => cli::theme::run(&engine, value.as_deref()).await,
    }
}
