use peseta_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn load_returns_defaults_when_file_is_missing() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().join("nested")).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn save_then_load_preserves_preferences() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();

    let mut config = Config::default();
    config.set("locale", "en-US").unwrap();
    config.set("currency_symbol", "$").unwrap();
    config.last_snapshot = Some(dir.path().join("budgets.json"));
    manager.save(&config).unwrap();

    let reloaded = manager.load().unwrap();
    assert_eq!(reloaded, config);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_reports_serialization_error() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    std::fs::write(manager.config_path(), "{ not json").unwrap();
    let err = manager.load().unwrap_err();
    assert!(err.to_string().starts_with("Serialization error"));
}
