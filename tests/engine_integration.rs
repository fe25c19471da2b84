use kharcha::core::{Expense, ExpenseEngine, StoreError, Window};
use kharcha::store::DiskStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

fn engine_at(path: &Path) -> ExpenseEngine {
    ExpenseEngine::new(Arc::new(DiskStore::new(path)))
}

#[test_log::test(tokio::test)]
async fn test_day_stats_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(dir.path());
    engine.initialize().await.unwrap();

    engine
        .record_expense(10.0, Some("lunch"), Some("Food"))
        .await
        .unwrap();
    engine.record_expense(20.0, None, Some("Food")).await.unwrap();
    engine
        .record_expense(5.0, Some("bus"), Some("Transport"))
        .await
        .unwrap();

    let stats = engine.stats_for(Window::Day).await.unwrap();
    info!(?stats, "Computed day stats");

    assert_eq!(stats.total, 35.0);
    assert_eq!(stats.count, 3);
    assert!((stats.average - 35.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.category_totals.get("Food"), Some(&30.0));
    assert_eq!(stats.category_totals.get("Transport"), Some(&5.0));
    assert_eq!(stats.category_totals.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = engine_at(dir.path());
        engine.initialize().await.unwrap();
        engine
            .record_expense(42.5, Some("groceries"), Some("Food"))
            .await
            .unwrap();
    }

    let engine = engine_at(dir.path());
    engine.initialize().await.unwrap();

    let expenses = engine.query_expenses(Window::All).await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 42.5);
    assert_eq!(expenses[0].note, "groceries");
    assert_eq!(expenses[0].category, "Food");

    // Reopening must not duplicate the seeded categories.
    let categories = engine.categories().await.unwrap();
    assert_eq!(categories.len(), 8);
}

#[test_log::test(tokio::test)]
async fn test_ids_are_never_reused() {
    let dir = tempfile::tempdir().unwrap();
    let highest;
    {
        let engine = engine_at(dir.path());
        engine.initialize().await.unwrap();
        engine.record_expense(1.0, None, None).await.unwrap();
        highest = engine.record_expense(2.0, None, None).await.unwrap();
        engine.remove_expense(highest).await.unwrap();
    }

    let engine = engine_at(dir.path());
    engine.initialize().await.unwrap();

    let next = engine.record_expense(3.0, None, None).await.unwrap();
    assert!(next > highest, "id {next} must be above {highest}");
}

#[test_log::test(tokio::test)]
async fn test_csv_export_layout_and_escaping() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(dir.path());
    engine.initialize().await.unwrap();

    engine
        .record_expense(7.0, Some("said \"hi\""), Some("Other"))
        .await
        .unwrap();

    let csv = engine.export_csv().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Date,Amount,Category,Note");
    assert!(lines[1].ends_with(",Other,\"said \"\"hi\"\"\""));
    assert!(!csv.ends_with('\n'));
}

#[test_log::test(tokio::test)]
async fn test_json_export_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(dir.path());
    engine.initialize().await.unwrap();

    engine
        .record_expense(12.5, Some("tea"), Some("Food"))
        .await
        .unwrap();
    engine.record_expense(3.0, None, None).await.unwrap();

    let json = engine.export_json().await.unwrap();
    let exported: Vec<Expense> = serde_json::from_str(&json).unwrap();
    let queried = engine.query_expenses(Window::All).await.unwrap();

    assert_eq!(exported, queried);
}

#[test_log::test(tokio::test)]
async fn test_operations_fail_before_initialize() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(dir.path());

    let err = engine.query_expenses(Window::All).await.unwrap_err();
    assert_eq!(err, StoreError::NotInitialized);
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        "currency: \"RM\"\ndata_path: \"{}\"\n",
        data_dir.path().display()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    let config_path = config_file.path().to_str().unwrap();

    let result = kharcha::run_command(
        kharcha::AppCommand::Add {
            amount: 12.5,
            note: Some("tea".to_string()),
            category: None,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Add command failed: {:?}", result.err());

    let result = kharcha::run_command(
        kharcha::AppCommand::List {
            window: Window::All,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "List command failed: {:?}", result.err());

    let result = kharcha::run_command(
        kharcha::AppCommand::Stats {
            window: Window::Day,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Stats command failed: {:?}", result.err());

    let result = kharcha::run_command(kharcha::AppCommand::Categories, Some(config_path)).await;
    assert!(
        result.is_ok(),
        "Categories command failed: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_export_command_writes_file() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        "currency: \"RM\"\ndata_path: \"{}\"\n",
        data_dir.path().display()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    let config_path = config_file.path().to_str().unwrap();

    let result = kharcha::run_command(
        kharcha::AppCommand::Add {
            amount: 5.0,
            note: None,
            category: Some("Transport".to_string()),
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Add command failed: {:?}", result.err());

    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("expenses.csv");
    let result = kharcha::run_command(
        kharcha::AppCommand::Export {
            format: kharcha::core::ExportFormat::Csv,
            output: Some(out_path.clone()),
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Export command failed: {:?}", result.err());

    let content = fs::read_to_string(&out_path).unwrap();
    assert!(content.starts_with("Date,Amount,Category,Note"));
    assert!(content.contains(",Transport,"));
}

#[test_log::test(tokio::test)]
async fn test_theme_command_round_trip() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        "currency: \"RM\"\ndata_path: \"{}\"\n",
        data_dir.path().display()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    let config_path = config_file.path().to_str().unwrap();

    let result = kharcha::run_command(
        kharcha::AppCommand::Theme {
            value: Some("dark".to_string()),
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Theme set failed: {:?}", result.err());

    // The stored value survives a fresh store open.
    let engine = engine_at(data_dir.path());
    engine.initialize().await.unwrap();
    assert_eq!(
        engine.setting("theme").await.unwrap(),
        Some("dark".to_string())
    );
}
