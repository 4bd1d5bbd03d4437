//! Config file -> game pipeline

use std::sync::Arc;

use tui_reveal::config::{read_config, Config, ConfigError};
use tui_reveal::core::GameState;

#[test]
fn custom_catalog_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
seed = 42
width = 3
height = 3
addr = "127.0.0.1:0"

[[tile_types]]
glyph = "*"
color = "#ffff00"
points = 1

[[tile_types]]
glyph = "X"
color = "#88ff00"
points = 2

[[tile_types]]
glyph = "O"
color = "#0088ff"
points = 3
"##,
    )
    .unwrap();

    let load = read_config(&path);
    assert!(load.warning.is_none());
    let config = load.config;
    assert!(config.view_addr().unwrap().is_some());

    let mut game = GameState::generate(
        config.width,
        config.height,
        Arc::new(config.catalog()),
        config.seed,
    )
    .unwrap();
    assert_eq!(game.hit(1, 1).unwrap(), 2);
}

#[test]
fn saved_defaults_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.toml");

    let first = read_config(&path);
    assert!(first.warning.is_none());
    assert!(path.exists());

    let second = read_config(&path);
    assert!(second.warning.is_none());
    assert_eq!(second.config, Config::default());
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "width = 0\n").unwrap();

    let load = read_config(&path);
    assert!(matches!(load.warning, Some(ConfigError::Validation(_))));
    assert_eq!(load.config, Config::default());
}
