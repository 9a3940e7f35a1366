//! Loading MultiWindowConfig from TOML and JSON files.

use std::io::Write;

use mwin_runtime::{ConfigError, MultiWindowConfig};

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[test]
fn toml_file_round_trip() {
    let file = write_temp(
        r#"
panel_width = 120
divider_threshold = 30
default_app = "org.example.browser.BrowserActivity"

[layout]
max_tabs = 3
min_window_width = 150
"#,
        ".toml",
    );
    let config = MultiWindowConfig::from_toml_file(file.path()).expect("load");
    assert_eq!(config.panel_width, 120);
    assert_eq!(config.divider_threshold, 30);
    assert_eq!(config.layout.max_tabs, 3);
    assert_eq!(config.layout.min_window_width, 150);
    assert_eq!(config.layout.min_window_height, 200);
    assert!(config.validate().is_empty());
    assert_eq!(
        config.app_descriptor().expect("app").package,
        "org.example.browser"
    );
}

#[test]
fn json_file_round_trip() {
    let original = MultiWindowConfig {
        proxy_handle_size: 64,
        notification_capacity: 8,
        ..MultiWindowConfig::default()
    };
    let json = serde_json::to_string(&original).expect("serialize");
    let file = write_temp(&json, ".json");
    let loaded = MultiWindowConfig::from_json_file(file.path()).expect("load");
    assert_eq!(loaded, original);
    assert_eq!(loaded.proxy_config().handle_width, 64);
    assert_eq!(loaded.proxy_config().min_width, 200);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = MultiWindowConfig::from_toml_str("panel_width = \"wide\"").expect_err("bad");
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = MultiWindowConfig::from_json_file("/nonexistent/mwin.json").expect_err("missing");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn invalid_values_are_collected() {
    let config = MultiWindowConfig::from_json_str(
        r#"{"panel_width": -1, "layout": {"max_windows_per_tab": 6}}"#,
    )
    .expect("parse");
    let err = config.validated().expect_err("invalid");
    let ConfigError::Invalid(errors) = err else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.len(), 2);
}
