#![allow(clippy::unwrap_used)]
// File round-trips for ruralis-config using temporary directories.

use pretty_assertions::assert_eq;

use ruralis_config::{Config, Profile, load_config_from, save_config_to};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.default_profile.as_deref(), Some("default"));
    assert_eq!(config.defaults.output, "table");
    assert_eq!(config.defaults.timeout, 30);
    assert!(config.profiles.is_empty());
}

#[test]
fn test_reads_profiles_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_profile = "lab"

[defaults]
output = "json"
timeout = 10

[profiles.lab]
api_url = "http://localhost:8000"
timeout = 5

[profiles.prod]
api_url = "https://ruralis.example.com"
ca_cert = "/etc/ruralis/ca.pem"
api_token_env = "PROD_TOKEN"
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();

    assert_eq!(config.defaults.output, "json");
    assert_eq!(config.defaults.timeout, 10);
    let lab = config.profile(None).unwrap().unwrap();
    assert_eq!(lab.api_url.as_deref(), Some("http://localhost:8000"));
    assert_eq!(lab.timeout, Some(5));
    let prod = config.profile(Some("prod")).unwrap().unwrap();
    assert_eq!(prod.api_token_env.as_deref(), Some("PROD_TOKEN"));
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.profiles.insert(
        "default".into(),
        Profile {
            api_url: Some("http://127.0.0.1:8000".into()),
            insecure: Some(true),
            ..Profile::default()
        },
    );
    save_config_to(&config, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[profiles.default]"));
    assert!(!written.contains("api_token"));

    let loaded = load_config_from(&path).unwrap();
    let profile = loaded.profile(None).unwrap().unwrap();
    assert_eq!(profile.api_url.as_deref(), Some("http://127.0.0.1:8000"));
    assert_eq!(profile.insecure, Some(true));
}

#[test]
fn test_malformed_toml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "defaults = [not toml").unwrap();

    assert!(load_config_from(&path).is_err());
}
