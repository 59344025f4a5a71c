use area_core::config::{
    ConfigError, DEFAULT_BACKEND_URL, DEFAULT_HORIZONTAL_SPACING, DEFAULT_ICON,
    DEFAULT_VERTICAL_SPACING,
};
use area_core::Config;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    assert_eq!(config.layout.horizontal_spacing, DEFAULT_HORIZONTAL_SPACING);
    assert_eq!(config.layout.vertical_spacing, DEFAULT_VERTICAL_SPACING);
    assert_eq!(config.palette.default_position.x, 0.0);
    assert_eq!(config.palette.default_position.y, 0.0);
    assert_eq!(config.editor.default_icon, DEFAULT_ICON);
    assert_eq!(
        config.widgets.actions.get("On Fetch").map(String::as_str),
        Some("webhook-trigger")
    );
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[backend]
base_url = "https://area.example.org"

[layout]
horizontal_spacing = 320.0

[editor]
rollback_on_failure = false

[widgets.reactions]
"Send Message" = "chat-message"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.backend.base_url, "https://area.example.org");
    assert_eq!(config.layout.horizontal_spacing, 320.0);
    // Unset keys keep their defaults.
    assert_eq!(config.layout.vertical_spacing, DEFAULT_VERTICAL_SPACING);
    assert!(!config.editor.rollback_on_failure);
    assert_eq!(
        config.widgets.reactions.get("Send Message").map(String::as_str),
        Some("chat-message")
    );
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("area.toml");
    std::fs::write(
        &path,
        "[palette]\ndefault_position = { x = 40.0, y = 80.0 }\n",
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.palette.default_position.x, 40.0);
    assert_eq!(config.palette.default_position.y, 80.0);
}

#[test]
fn test_config_from_file_rejects_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("area.toml");
    std::fs::write(&path, "[layout]\nvertical_spacing = -10.0\n").unwrap();

    assert!(matches!(Config::from_file(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_from_file_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("area.toml");
    std::fs::write(&path, "[layout\n").unwrap();

    assert!(matches!(Config::from_file(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::from_file(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}

#[test]
fn test_default_config_string_round_trips() {
    let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    assert!(config.validate().is_ok());
}
