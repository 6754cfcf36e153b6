use std::sync::Arc;

use tempoline::config::{DEFAULT_INTERVAL_CACHE_CAPACITY, Settings};
use tempoline::granularity::Granularity;
use tempoline::interval::IntervalFactory;

#[test]
fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Some("does-not-exist/tempoline")).expect("settings");
    assert_eq!(settings.interval_cache_capacity, DEFAULT_INTERVAL_CACHE_CAPACITY);
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = std::env::temp_dir().join("tempoline_settings_test.toml");
    std::fs::write(
        &path,
        "interval_cache_capacity = 128\nweight_cache_capacity = 0\nlog_filter = \"tempoline=debug\"\n",
    )
    .expect("write settings");
    let settings = Settings::load(path.to_str()).expect("settings");
    assert_eq!(settings.interval_cache_capacity, 128);
    assert_eq!(settings.weight_cache_capacity, 0);
    assert_eq!(settings.log_filter, "tempoline=debug");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn applied_settings_bound_the_global_cache() {
    let settings = Settings {
        interval_cache_capacity: 32,
        ..Settings::default()
    };
    settings.init_logging();
    settings.apply();
    let factory = IntervalFactory::global();
    let held = factory.instance_at(-1, Granularity::Hour);
    for t in 0..500 {
        factory.instance_at(t, Granularity::Hour);
    }
    assert!(factory.len() <= 32);
    assert!(Arc::ptr_eq(&held, &factory.instance_at(-1, Granularity::Hour)));
}

#[test]
fn logging_can_be_initialised_more_than_once() {
    let settings = Settings::default();
    settings.init_logging();
    // the second subscriber is refused and only reported
    settings.init_logging();
}
