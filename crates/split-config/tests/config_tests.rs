use split_config::{Config, ConfigError, ConfigManager};
use split_domain::{RoundingMode, SettlementModel};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.settlement_model, SettlementModel::Transfer);
    assert_eq!(cfg.rounding_policy().scale, 2);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.settlement_model = SettlementModel::Pool;
    cfg.rounding_mode = RoundingMode::HalfUp;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"currency":"GBP"}"#).expect("write partial config");
    let manager = ConfigManager::new(path, dir.path().join("backups"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.display_scale, 2);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn invalid_scale_is_rejected_on_save() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let cfg = Config {
        display_scale: 40,
        ..Config::default()
    };

    let err = manager.save(&cfg).expect_err("scale too large");
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(!manager.config_path().exists());
}

#[test]
fn backups_can_be_listed_and_restored() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let cfg = Config {
        currency: "CHF".into(),
        ..Config::default()
    };

    let name = manager.backup(&cfg, Some("Before trip")).expect("backup");
    assert!(name.ends_with("_before-trip.json"));
    assert_eq!(manager.list_backups().expect("list"), vec![name.clone()]);

    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.currency, "CHF");
    assert!(matches!(
        manager.restore("config_missing.json"),
        Err(ConfigError::BackupNotFound(_))
    ));
}
