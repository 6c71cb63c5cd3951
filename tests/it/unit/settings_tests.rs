//! Settings file and watcher tests.

use satchel::settings::Settings;
use satchel::settings_watcher::SettingsWatcher;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_settings_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config").join("settings.json");
    let settings = Settings {
        grid_rows: 9,
        cell_size: 32.0,
        log_filter: "satchel=debug".to_string(),
        ..Settings::default()
    };

    settings.save_to(&path).unwrap();
    let loaded = Settings::load_from(&path).unwrap();

    assert_eq!(loaded, settings);
}

#[test]
fn test_out_of_range_settings_are_repaired() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"grid_rows": 0, "grid_cols": 50, "cell_size": -1.0}"#).unwrap();

    let loaded = Settings::load_from(&path).unwrap();

    assert_eq!((loaded.grid_rows, loaded.grid_cols), (3, 20));
    assert_eq!(loaded.cell_size, Settings::default().cell_size);
    assert_eq!(loaded.geometry().cell_unit(), 43.0);
}

#[test]
fn test_unparseable_settings_report_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "grid_rows = 4").unwrap();

    assert!(Settings::load_from(&path).is_err());
}

#[test]
fn test_watcher_creation() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "{}").unwrap();

    let watcher = SettingsWatcher::new(settings_path.clone()).unwrap();
    assert_eq!(watcher.path(), settings_path.as_path());
}
