//! CLI command tests

use std::io::Write;

use spendcast_core::{db::Database, ForecastConfig};
use tempfile::NamedTempFile;

use crate::cli::OutputFormat;
use crate::commands::{self, truncate};

fn setup_test_db() -> (Database, i64) {
    let db = Database::in_memory().unwrap();
    db.seed_default_categories().unwrap();
    let user = db.add_user("Alice", 5000.0).unwrap();
    (db, user)
}

fn write_ledger(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Import four months of rent and food for `user`
fn import_sample(db: &Database, user: i64) {
    let ledger = write_ledger(
        "date,category,amount\n\
         2024-01-01,Housing,1000\n2024-01-09,Food,100\n\
         2024-02-01,Housing,1000\n2024-02-09,Food,180\n\
         2024-03-01,Housing,1000\n2024-03-09,Food,120\n\
         2024-04-01,Housing,1000\n2024-04-09,Food,160\n",
    );
    commands::cmd_import(db, user, ledger.path()).unwrap();
}

fn history_output(db: &Database, user: i64, format: OutputFormat) -> String {
    let mut out = Vec::new();
    commands::cmd_history(db, user, format, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn forecast_output(db: &Database, user: i64, months: u32, format: OutputFormat) -> String {
    let mut out = Vec::new();
    let config = ForecastConfig::default();
    commands::cmd_forecast(db, config, user, months, format, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn summary_output(db: &Database, user: i64, months: u32) -> String {
    let mut out = Vec::new();
    let config = ForecastConfig::default();
    commands::cmd_summary(db, config, user, months, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// ========== Init / Users / Import ==========

#[test]
fn test_cmd_init_seeds_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.db");

    commands::cmd_init(&path, true).unwrap();

    let db = commands::open_db(&path, true).unwrap();
    assert_eq!(db.list_categories().unwrap().len(), 7);
    assert!(commands::cmd_categories(&db).is_ok());
}

#[test]
fn test_cmd_users_add_and_list() {
    let db = Database::in_memory().unwrap();
    let id = commands::cmd_users_add(&db, "Bob", 3200.0).unwrap();

    assert_eq!(db.get_user_profile(id).unwrap().unwrap().name, "Bob");
    assert!(commands::cmd_users_list(&db).is_ok());
    assert!(commands::cmd_users_add(&db, "Broke", -5.0).is_err());
}

#[test]
fn test_cmd_import_ledger() {
    let (db, user) = setup_test_db();
    let ledger = write_ledger("date,category,amount\n2024-01-15,Food,12.50\n2024-01-20,Pets,40\n");

    let count = commands::cmd_import(&db, user, ledger.path()).unwrap();
    assert_eq!(count, 2);
    assert_eq!(db.count_transactions(user).unwrap(), 2);
    // Unseen categories are created on import
    assert!(db.list_categories().unwrap().contains(&"Pets".to_string()));
}

#[test]
fn test_cmd_import_rejects_unknown_user_and_bad_rows() {
    let (db, user) = setup_test_db();
    let ledger = write_ledger("date,category,amount\n2024-01-15,Food,twelve\n");

    assert!(commands::cmd_import(&db, user + 1, ledger.path()).is_err());

    let err = commands::cmd_import(&db, user, ledger.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 2"), "{:#}", err);
    assert_eq!(db.count_transactions(user).unwrap(), 0);
}

// ========== Reports ==========

#[test]
fn test_cmd_history_csv() {
    let (db, user) = setup_test_db();
    import_sample(&db, user);

    let output = history_output(&db, user, OutputFormat::Csv);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "month,Food,Housing");
    assert_eq!(lines[1], "2024-01,100.00,1000.00");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_cmd_history_table_for_empty_user() {
    let (db, user) = setup_test_db();
    let output = history_output(&db, user, OutputFormat::Table);
    assert!(output.contains("No spending recorded"));
}

#[test]
fn test_cmd_forecast_json() {
    let (db, user) = setup_test_db();
    import_sample(&db, user);

    let output = forecast_output(&db, user, 2, OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["basis"], "history");
    assert_eq!(json["months"], serde_json::json!(["2024-05", "2024-06"]));
    assert_eq!(json["categories"], serde_json::json!(["Food", "Housing"]));
    assert_eq!(json["methods"][1]["method"], "historical_mean");
    assert_eq!(json["columns"][1], serde_json::json!([1000.0, 1000.0]));
}

#[test]
fn test_cmd_forecast_table_paths() {
    let (db, user) = setup_test_db();
    import_sample(&db, user);

    let history = forecast_output(&db, user, 3, OutputFormat::Table);
    assert!(history.contains("based on spending history"));
    assert!(history.contains("2024-07"));

    let newcomer = db.add_user("Bob", 4000.0).unwrap();
    let heuristic = forecast_output(&db, newcomer, 3, OutputFormat::Table);
    assert!(heuristic.contains("income (fewer than 3 months of history)"));
    assert!(heuristic.contains("30% of spending budget"));

    let unknown = forecast_output(&db, 999, 3, OutputFormat::Table);
    assert!(unknown.contains("No user with ID 999"));
}

#[test]
fn test_cmd_forecast_rejects_zero_months() {
    let (db, user) = setup_test_db();
    let mut out = Vec::new();
    let result = commands::cmd_forecast(
        &db,
        ForecastConfig::default(),
        user,
        0,
        OutputFormat::Json,
        &mut out,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_summary_json() {
    let (db, user) = setup_test_db();
    import_sample(&db, user);

    let output = summary_output(&db, user, 1);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["months_observed"], 4);
    assert_eq!(json["average_monthly_spending"], 1140.0);
    assert_eq!(json["estimated_monthly_savings"], 3860.0);
    assert_eq!(json["top_categories"][0]["category"], "Housing");
    assert_eq!(json["forecast_basis"], "history");
}

// ========== Utilities ==========

#[test]
fn test_load_config_from_path() {
    let file = write_ledger(
        "min_history_months = 6\nspend_ratio = 0.4\n\n[category_weights]\nFood = 1.0\n",
    );
    let config = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(config.min_history_months, 6);
    assert_eq!(config.weight("Food"), 1.0);

    let bad = write_ledger("min_history_months = 0\nspend_ratio = 0.4\n\n[category_weights]\n");
    assert!(commands::load_config(Some(bad.path())).is_err());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Transportation", 8), "Trans...");
}
