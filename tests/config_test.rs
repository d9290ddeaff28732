// tests/config_test.rs
use build_cut::config::{load_config, parse_config, Config};
use build_cut::BuildCutError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.tools.agvtool, PathBuf::from("/usr/bin/agvtool"));
    assert_eq!(config.settings_plist.path, None);
    assert_eq!(
        config.settings_plist.key,
        "PreferenceSpecifiers:1:DefaultValue"
    );
    assert_eq!(config.release_notes.directory, PathBuf::from("ReleaseNotes"));
    assert_eq!(config.release_notes.extension, "mkd");
    assert_eq!(config.remote.name, "origin");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[release_notes]
extension = "txt"

[remote]
name = "github"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.release_notes.extension, "txt");
    assert_eq!(config.release_notes.directory, PathBuf::from("ReleaseNotes"));
    assert!(config.release_notes.copy_to_clipboard);
    assert_eq!(config.remote.name, "github");
}

#[test]
fn test_load_full_fixture() {
    let config = load_config(Some(Path::new("tests/fixtures/full_config.toml")))
        .expect("Failed to load test config");

    assert_eq!(
        config.tools.agvtool,
        PathBuf::from("/opt/xcode/usr/bin/agvtool")
    );
    assert_eq!(
        config.tools.plist_buddy,
        PathBuf::from("/opt/tools/PlistBuddy")
    );
    assert_eq!(
        config.settings_plist.path,
        Some(PathBuf::from("MyApp/Settings.bundle/Root.plist"))
    );
    assert!(!config.release_notes.copy_to_clipboard);
    assert_eq!(config.remote.name, "upstream");

    let settings = config.build_settings();
    assert_eq!(settings.plist_key, "PreferenceSpecifiers:3:DefaultValue");
    assert_eq!(settings.notes_directory, PathBuf::from("docs/release-notes"));
    assert_eq!(settings.notes_extension, "md");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let err = load_config(Some(Path::new("tests/fixtures/does_not_exist.toml"))).unwrap_err();
    assert!(matches!(err, BuildCutError::Config(_)));
    assert!(err.to_string().contains("does_not_exist.toml"));
}

#[test]
fn test_unknown_value_type_is_error() {
    let err = parse_config("[release_notes]\ncopy_to_clipboard = \"sometimes\"\n").unwrap_err();
    assert!(matches!(err, BuildCutError::Config(_)));
}
