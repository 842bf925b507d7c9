use std::fs;
use std::time::Duration;

use pollo_loco::config::GameConfig;
use pollo_loco::error::ConfigError;
use pollo_loco::level::LevelSpec;

#[test]
fn missing_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GameConfig::with_path(dir.path().join("absent.ini"));

    config.load_from_file().unwrap();

    assert_eq!(config.level, LevelSpec::default());
    assert_eq!(config.target_fps, 30);
    assert!(!config.muted);
}

#[test]
fn file_overrides_only_what_it_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pollo_loco.ini");
    fs::write(
        &path,
        "[level]\nchickens = 8\nend_x = 9000\n\n[display]\ntarget_fps = 60\n\n[audio]\nmuted = true\n",
    )
    .unwrap();
    let mut config = GameConfig::with_path(&path);

    config.load_from_file().unwrap();

    assert_eq!(config.level.chickens, 8);
    assert_eq!(config.level.small_chickens, 4);
    assert_eq!(config.level.end_x, 9000.0);
    assert_eq!(config.target_fps, 60);
    assert!(config.muted);
    assert_eq!(config.frame_duration(), Duration::from_millis(16));
}

#[test]
fn unparsable_values_are_errors() {
    let mut config = GameConfig::new();
    let err = config.load_from_str("[level]\ncoins = lots\n").unwrap_err();

    assert!(matches!(err, ConfigError::Parse { ref key, .. } if key == "coins"));
    assert_eq!(config.level.coins, 10);
}

#[test]
fn out_of_range_values_are_errors() {
    let mut config = GameConfig::new();
    let err = config.load_from_str("[display]\ntarget_fps = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));

    let err = config.load_from_str("[level]\nend_x = -5\n").unwrap_err();
    assert!(err.to_string().contains("end_x"));
}

#[test]
fn oversized_levels_are_rejected() {
    let mut config = GameConfig::new();

    let err = config.load_from_str("[level]\nend_x = 1e15\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "end_x"));

    let err = config.load_from_str("[level]\nchickens = 100000000000\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "chickens"));
    assert_eq!(config.level, LevelSpec::default());

    config.load_from_str("[level]\nclouds = 1000\nend_x = 100000\n").unwrap();
    assert_eq!(config.level.clouds, 1000);
    assert_eq!(config.level.end_x, 100_000.0);
}

#[test]
fn default_frame_time_is_thirty_fps() {
    assert_eq!(GameConfig::default().frame_duration(), Duration::from_millis(33));
}
