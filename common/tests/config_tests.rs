// Configuration loading tests
// Feature: canteen-menu

use common::config::Settings;
use std::fs;
use tempfile::TempDir;

fn write_default_config(dir: &TempDir, refresh_interval_seconds: u64) {
    let config = format!(
        r#"
[menu]
url = "https://sheets.example.com/canteen/export?format=csv"
fetch_timeout_seconds = 10
timezone = "Asia/Kolkata"

[scheduler]
refresh_interval_seconds = {refresh_interval_seconds}

[observability]
log_level = "info"
metrics_port = 9090
"#
    );
    fs::write(dir.path().join("default.toml"), config).unwrap();
}

#[test]
fn test_load_from_default_toml() {
    let dir = TempDir::new().unwrap();
    write_default_config(&dir, 300);

    let settings = Settings::load_from_path(dir.path()).unwrap();
    assert_eq!(settings.scheduler.refresh_interval_seconds, 300);
    assert_eq!(settings.menu.fetch_timeout_seconds, 10);
    // Unset in the file, so the serde default applies.
    assert_eq!(settings.menu.delimiter, ',');
    assert!(settings.validate().is_ok());
}

#[test]
fn test_local_toml_overrides_default() {
    let dir = TempDir::new().unwrap();
    write_default_config(&dir, 300);
    fs::write(
        dir.path().join("local.toml"),
        "[scheduler]\nrefresh_interval_seconds = 60\n",
    )
    .unwrap();

    let settings = Settings::load_from_path(dir.path()).unwrap();
    assert_eq!(settings.scheduler.refresh_interval_seconds, 60);
}

#[test]
fn test_missing_menu_section_fails_to_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[observability]\nlog_level = \"info\"\nmetrics_port = 9090\n",
    )
    .unwrap();

    assert!(Settings::load_from_path(dir.path()).is_err());
}
