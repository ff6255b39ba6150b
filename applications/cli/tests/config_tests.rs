/// Configuration loading and validation tests
use gz_cli::{CliError, GzConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Defaults apply when the file only names a catalog
#[test]
fn test_defaults_fill_missing_sections() {
    let file = toml_file(
        r#"
        [catalog]
        url = "https://gz.example.com/songs.json"
        "#,
    );

    let config = GzConfig::load_from(Some(file.path()), "GZ_TEST_DEFAULTS").unwrap();
    config.validate().unwrap();

    assert_eq!(config.catalog.timeout_secs, 15);
    assert_eq!(config.storage.path.to_str(), Some("./data/gz-state.json"));
    assert!(!config.playback.shuffle);
    assert_eq!(config.playback.shuffle_seed, None);
}

/// Every section is read from the file
#[test]
fn test_full_file() {
    let file = toml_file(
        r#"
        [catalog]
        file = "songs.json"
        timeout_secs = 5

        [storage]
        path = "/tmp/gz/state.json"

        [playback]
        shuffle = true
        repeat_one = true
        shuffle_seed = 42
        "#,
    );

    let config = GzConfig::load_from(Some(file.path()), "GZ_TEST_FULL").unwrap();
    config.validate().unwrap();

    let player = config.player_config();
    assert!(player.shuffle);
    assert!(player.repeat_one);
    assert_eq!(player.shuffle_seed, Some(42));
    assert_eq!(config.catalog_timeout().as_secs(), 5);
}

/// Environment variables override the file
#[test]
fn test_env_overrides_file() {
    let file = toml_file(
        r#"
        [catalog]
        url = "https://from-file.example.com/songs.json"
        "#,
    );

    std::env::set_var("GZ_TEST_ENV_CATALOG__URL", "https://from-env.example.com/songs.json");
    std::env::set_var("GZ_TEST_ENV_PLAYBACK__REPEAT_ONE", "true");
    let config = GzConfig::load_from(Some(file.path()), "GZ_TEST_ENV").unwrap();
    std::env::remove_var("GZ_TEST_ENV_CATALOG__URL");
    std::env::remove_var("GZ_TEST_ENV_PLAYBACK__REPEAT_ONE");

    assert_eq!(
        config.catalog.url.as_deref(),
        Some("https://from-env.example.com/songs.json")
    );
    assert!(config.playback.repeat_one);
}

/// A catalog source is required
#[test]
fn test_missing_catalog_source_rejected() {
    let file = toml_file("[playback]\nshuffle = true\n");
    let config = GzConfig::load_from(Some(file.path()), "GZ_TEST_MISSING").unwrap();

    match config.validate() {
        Err(CliError::Config(msg)) => assert!(msg.contains("No catalog source")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

/// Zero timeout is rejected
#[test]
fn test_zero_timeout_rejected() {
    let file = toml_file("[catalog]\nurl = \"https://x.example.com\"\ntimeout_secs = 0\n");
    let config = GzConfig::load_from(Some(file.path()), "GZ_TEST_TIMEOUT").unwrap();
    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}

/// An explicit config path must exist
#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = GzConfig::load_from(Some(&dir.path().join("nope.toml")), "GZ_TEST_NOFILE");
    assert!(matches!(result, Err(CliError::Config(_))));
}

/// Imported tracks live next to the session file
#[test]
fn test_imports_path_follows_storage_path() {
    let file = toml_file(
        r#"
        [catalog]
        file = "songs.json"

        [storage]
        path = "/tmp/gz/state.json"
        "#,
    );

    let config = GzConfig::load_from(Some(file.path()), "GZ_TEST_IMPORTS").unwrap();
    assert_eq!(
        config.storage.imports_path().to_str(),
        Some("/tmp/gz/state.imports.json")
    );
}
