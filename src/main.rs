use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kharcha::core::export::ExportFormat;
use kharcha::core::log::init_logging;
use kharcha::core::window::Window;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for kharcha::AppCommand {
    fn from(cmd: Commands) -> kharcha::AppCommand {
        match cmd {
            Commands::Add {
                amount,
                note,
                category,
            } => kharcha::AppCommand::Add {
                amount,
                note,
                category,
            },
            Commands::List { window } => kharcha::AppCommand::List { window },
            Commands::Stats { window } => kharcha::AppCommand::Stats { window },
            Commands::Remove { id } => kharcha::AppCommand::Remove { id },
            Commands::Categories => kharcha::AppCommand::Categories,
            Commands::AddCategory { name } => kharcha::AppCommand::AddCategory { name },
            Commands::Export { format, output } => kharcha::AppCommand::Export { format, output },
            Commands::Theme { value } => kharcha::AppCommand::Theme { value },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record a new expense
    Add {
        /// Amount spent
        amount: f64,
        /// Short free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Category name, defaults to "Other"
        // No short flag: -c belongs to the global --config-path.
        #[arg(long)]
        category: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Time window: day, week, month or all
        #[arg(short, long, default_value = "all")]
        window: Window,
    },
    /// Display spending statistics
    Stats {
        /// Time window: day, week, month or all
        #[arg(short, long, default_value = "month")]
        window: Window,
    },
    /// Delete an expense by id
    Remove {
        /// Id reported when the expense was recorded
        id: u64,
    },
    /// List known categories
    Categories,
    /// Add a custom category
    AddCategory {
        /// Name of the new category
        name: String,
    },
    /// Export the full expense log
    Export {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the display theme
    Theme {
        /// New theme value; omit to print the current one
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => kharcha::cli::setup::setup(),
        Some(cmd) => kharcha::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
