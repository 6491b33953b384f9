//! Loading the configuration document from disk.

use std::fs;
use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};
use switchboard_config::{CONFIG_PATH, Config, ConfigError, LogFormat, load_config};
use tempfile::TempDir;

#[fixture]
fn config_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, body).expect("write config");
    path
}

#[rstest]
fn loads_full_document_shape(config_dir: TempDir) {
    let path = write_config(
        &config_dir,
        r#"{
            "WebServer": {
                "Port": "8080",
                "TLSPort": "8443",
                "TLSDisabled": true,
                "TLSPrivateKey": "keys/private.pem",
                "TLSPublicKey": "keys/public.pem",
                "ErrorMime": "text/plain",
                "WebRoot": "webroot"
            }
        }"#,
    );

    let config = load_config(&path).expect("config should load");

    assert_eq!(config.web_server.port, 8080);
    assert_eq!(config.web_server.tls_port, 8443);
    assert!(config.web_server.tls_disabled);
    assert_eq!(config.error_mime(), "text/plain");
    assert_eq!(config.web_server.web_root, Some(PathBuf::from("webroot")));
    assert_eq!(config.base_url(), "http://localhost:8080/");
    assert_eq!(config.pump_workers, 1);
    assert_eq!(config.log_format, LogFormat::Compact);
}

#[rstest]
fn applies_service_level_settings(config_dir: TempDir) {
    let path = write_config(
        &config_dir,
        r#"{
            "WebServer": { "Port": 9000, "TLSPort": 9443 },
            "LogFilter": "switchboardd=debug",
            "LogFormat": "json",
            "PumpWorkers": 4
        }"#,
    );

    let config = load_config(&path).expect("config should load");

    assert_eq!(config.log_filter, "switchboardd=debug");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.pump_workers, 4);
    assert_eq!(config.base_url(), "https://localhost:9443/");
}

#[rstest]
fn missing_document_reports_not_found_with_path(config_dir: TempDir) {
    let path = config_dir.path().join("absent.json");

    let error = load_config(&path).expect_err("missing file must fail");

    assert!(matches!(error, ConfigError::NotFound { .. }));
    assert_eq!(error.path(), path.as_path());
    assert!(
        error.to_string().contains(&path.display().to_string()),
        "diagnostic should name the path: {error}"
    );
}

#[rstest]
#[case::not_json("this is not json")]
#[case::missing_web_server(r#"{"LogFilter": "info"}"#)]
#[case::bad_port(r#"{"WebServer": {"Port": "eighty"}}"#)]
#[case::wrong_type(r#"{"WebServer": {"TLSDisabled": "yes"}}"#)]
#[case::zero_workers(r#"{"WebServer": {}, "PumpWorkers": 0}"#)]
fn malformed_document_reports_malformed_with_path(config_dir: TempDir, #[case] body: &str) {
    let path = write_config(&config_dir, body);

    let error = load_config(&path).expect_err("malformed file must fail");

    assert!(
        matches!(error, ConfigError::Malformed { .. }),
        "unexpected error: {error:?}"
    );
    assert!(error.to_string().contains(&path.display().to_string()));
}

#[rstest]
fn defaults_fill_an_empty_web_server_block(config_dir: TempDir) {
    let path = write_config(&config_dir, r#"{"WebServer": {}}"#);

    let config = load_config(&path).expect("config should load");

    assert_eq!(config, Config::default());
}

#[test]
fn shipped_document_points_at_the_shipped_web_root() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");

    let config = load_config(&workspace.join(CONFIG_PATH)).expect("shipped config should load");

    let web_root = workspace.join(config.web_server.web_root.expect("WebRoot is set"));
    assert!(web_root.join("index.html").is_file());
    assert!(web_root.join("js/service.js").is_file());
    assert!(config.web_server.tls_disabled);
}
