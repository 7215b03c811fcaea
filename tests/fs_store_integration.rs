//! Filesystem-backed zone file and settings

use std::time::{Duration, Instant, SystemTime};

use tempfile::TempDir;

use specialized_zones::core::EngineConfig;
use specialized_zones::host::{ConfigStore, FsConfigStore, MemoryRegistry, StringTablePublisher, Template};
use specialized_zones::reconcile::{TickOutcome, ZoneReconciler};
use specialized_zones::schema::parse;

#[test]
fn test_write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ModsData").join("SpecializedZones").join("SpecializedZones.json");
    let mut store = FsConfigStore::new(&path);

    assert!(!store.exists());
    assert!(store.modified().is_err());

    store.write_text("{}").unwrap();
    assert!(store.exists());
    assert_eq!(store.read_text().unwrap(), "{}");
    assert!(store.modified().is_ok());
}

#[test]
fn test_modified_time_moves_on_rewrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.json");
    let mut store = FsConfigStore::new(&path);
    store.write_text("{}").unwrap();

    let earlier = SystemTime::now() - Duration::from_secs(60);
    let file = std::fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(earlier).unwrap();
    let before = store.modified().unwrap();

    store.write_text("{ }").unwrap();
    assert!(store.modified().unwrap() > before);
}

#[test]
fn test_reconciler_seeds_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("SpecializedZones.json");
    let config = EngineConfig {
        zone_file: path.clone(),
        ..EngineConfig::default()
    };
    let registry = MemoryRegistry::new().with(Template::zone("Industrial Manufacturing"));
    let mut reconciler = ZoneReconciler::new(
        config.clone(),
        registry,
        FsConfigStore::new(&config.zone_file),
        StringTablePublisher::new(),
    );

    let t0 = Instant::now();
    assert!(matches!(reconciler.poll(t0), TickOutcome::Seeded));
    let text = std::fs::read_to_string(&path).unwrap();
    let doc = parse(&text).unwrap();
    assert!(doc.get("OilWarehouses").is_some());

    let outcome = reconciler.poll(t0 + config.poll_interval());
    let report = outcome.report().expect("seeded file is loaded on the next tick");
    assert!(report.created.iter().any(|id| id == "OilWarehouses"));
}

#[test]
fn test_settings_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
poll_interval_secs = 2
zone_file = "/tmp/zones.json"
rewrite_migrated = true

[naming]
policy = "strict"
"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.poll_interval(), Duration::from_secs(2));
    assert!(config.rewrite_migrated);
    assert!(config.validate().is_ok());
    // Rules not given keep the built-in list
    assert_eq!(config.naming.rules().len(), 5);
}

#[test]
fn test_missing_settings_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, EngineConfig::default());
}
