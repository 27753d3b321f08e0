use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use activity_cli::config::ConfigFile;
use activity_ingest::Tab;

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap()
}

#[test]
fn saved_config_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activities_config.json");
    let mut config = ConfigFile::default();
    config.activities.sheet_url = "https://docs.google.com/spreadsheets/d/abc123/edit".into();
    config.activities.tabs.set(Tab::Quotes, "42");
    config.save_to(&path, at(9)).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    insta::assert_json_snapshot!(saved, @r###"
    {
      "activities": {
        "default_output": {
          "directory": "src/data/activities/",
          "filename": "imported-activities.json"
        },
        "preferences": {
          "create_backups": true,
          "default_replace": false,
          "skip_financial": false,
          "skip_quotes": false
        },
        "sheet_url": "https://docs.google.com/spreadsheets/d/abc123/edit",
        "tabs": {
          "experiences": "0",
          "financial": "",
          "quotes": "42"
        }
      },
      "metadata": {
        "created_at": "2024-03-01T09:00:00",
        "last_updated": "2024-03-01T09:00:00",
        "version": "1.0"
      }
    }
    "###);
}

#[test]
fn resaving_keeps_created_at() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    ConfigFile::default().save_to(&path, at(9)).unwrap();

    let mut config = ConfigFile::load_from(&path);
    config.activities.preferences.skip_quotes = true;
    config.metadata.created_at = None;
    config.save_to(&path, at(17)).unwrap();

    let reloaded = ConfigFile::read(&path).unwrap().unwrap();
    assert_eq!(reloaded.metadata.created_at, Some(at(9)));
    assert_eq!(reloaded.metadata.last_updated, Some(at(17)));
    assert!(reloaded.activities.preferences.skip_quotes);
}

#[test]
fn broken_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(ConfigFile::read(&path).is_err());
    assert_eq!(ConfigFile::load_from(&path), ConfigFile::default());
}

#[test]
fn reset_reports_whether_a_file_existed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    assert!(!ConfigFile::reset(&path).unwrap());

    ConfigFile::default().save_to(&path, at(9)).unwrap();
    assert!(ConfigFile::reset(&path).unwrap());
    assert!(!path.exists());
    assert!(ConfigFile::read(&path).unwrap().is_none());
}
