//! Configuration loading tests

use std::io::Write;

use graft::{ConfigError, DispatchTracing, Graft, GraftConfig, RegistryScope};

#[test]
fn load_from_file_drives_graft_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[logging]\nfilter = \"graft=debug\"\n\n[model]\nregistry_scope = \"shared\"\n\n[double]\ntrace_dispatch = true"
    )
    .unwrap();

    let config = GraftConfig::load_from(file.path()).unwrap().unwrap();
    assert_eq!(config.log_filter().as_deref(), Some("graft=debug"));

    let graft = Graft::new(&config);
    assert_eq!(graft.dispatch_tracing(), DispatchTracing::Enabled);
    assert_eq!(graft.registry().scope(), RegistryScope::Shared);
}

#[test]
fn missing_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = GraftConfig::load_from(&dir.path().join("graft.toml")).unwrap();
    let graft = Graft::new(&loaded.unwrap_or_default());
    assert_eq!(graft.dispatch_tracing(), DispatchTracing::Disabled);
    assert_eq!(graft.registry().scope(), RegistryScope::PerClass);
}

#[test]
fn malformed_file_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[double]\ntrace_dispatch = \"yes\"").unwrap();

    match GraftConfig::load_from(file.path()) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("expected parse error, got {other:?}"),
    }
}
