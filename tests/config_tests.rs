//! Tests for loading configuration files

use course_library::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
server:
  host: 0.0.0.0
  port: 8080
  public_base_url: https://library.example.com/v1/
pagination:
  default_page_size: 5
  max_page_size: 50
"#,
    );

    let config = LibraryConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.base_url(), "https://library.example.com/v1");
    assert_eq!(config.pagination.page_size(None), 5);
    assert_eq!(config.pagination.page_size(Some(80)), 50);
}

#[test]
fn test_empty_sections_fall_back_to_defaults() {
    let file = write_config("pagination:\n  max_page_size: 40\n");

    let config = LibraryConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.pagination.default_page_size, 10);
    assert_eq!(config.pagination.max_page_size, 40);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = LibraryConfig::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_config("server:\n  port: 0\n");
    assert!(matches!(
        LibraryConfig::from_yaml_file(file.path()),
        Err(ConfigError::Invalid(_))
    ));

    let file = write_config("server:\n  host: \"\"\n");
    assert!(matches!(
        LibraryConfig::from_yaml_file(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_wrong_types_are_parse_errors() {
    let file = write_config("server:\n  port: lots\n");
    assert!(matches!(
        LibraryConfig::from_yaml_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_loaded_config_drives_links() {
    let file = write_config("server:\n  public_base_url: https://library.example.com/\n");
    let config = LibraryConfig::from_yaml_file(file.path()).unwrap();

    let state = ServerBuilder::new()
        .with_config(config)
        .build_state()
        .unwrap();
    let id = Uuid::nil();
    assert_eq!(
        state.links.author(&id).unwrap(),
        format!("https://library.example.com/api/authors/{}", id)
    );
}
