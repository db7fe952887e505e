//! Tests for loading resolver configuration from disk.

use std::io::Write;
use tally_resolver::ResolverConfig;

#[test]
fn from_file_reads_overrides() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    let toml = r#"
[cache]
static_ttl_secs = 3600
volatile_ttl_secs = 30

[resolver]
default_threshold = 80
"#;
    write!(file, "{toml}").unwrap();

    let config = ResolverConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.cache().static_ttl_secs(), 3600);
    assert_eq!(*config.cache().volatile_ttl_secs(), 30);
    assert_eq!(config.default_threshold().unwrap(), 80);
}

#[test]
fn from_file_fills_missing_sections_with_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[resolver]\ndefault_threshold = 60").unwrap();

    let config = ResolverConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.cache().static_ttl_secs(), 86_400);
    assert_eq!(*config.cache().volatile_ttl_secs(), 300);
    assert_eq!(config.default_threshold().unwrap(), 60);
}

#[test]
fn from_file_missing_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResolverConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.error_type(), "configuration");
}

#[test]
fn from_file_invalid_toml_is_config_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[cache\nstatic_ttl_secs = ").unwrap();

    assert!(ResolverConfig::from_file(file.path()).is_err());
}

#[test]
fn ttl_for_uses_loaded_values() {
    use std::time::Duration;
    use tally_core::CollectionKey;

    let config = ResolverConfig::from_toml_str("[cache]\nvolatile_ttl_secs = 45").unwrap();

    assert_eq!(config.cache().ttl_for(CollectionKey::Friends), Duration::from_secs(45));
    assert_eq!(config.cache().ttl_for(CollectionKey::Currencies), Duration::from_secs(86_400));
}
