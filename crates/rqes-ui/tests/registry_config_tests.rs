//! Coordinator installation and configuration loading.

use std::io::Write;
use std::sync::Arc;

use assert_matches::assert_matches;
use rqes_testkit::*;
use rqes_ui::{
    FlowRouter, FlowState, FlowStep, HashAlgorithm, Route, RqesUiConfig, RqesUiError,
    RqesUiRegistry,
};

const CONFIG_TOML: &str = r#"
print_logs = true

[rqes]
client_id = "wallet-client"
client_secret = "secret"
auth_flow_redirection_uri = "rqes://oauth/callback"
hash_algorithm = "SHA-384"

[[rssps]]
name = "Example QTSP"
uri = "https://qtsp.example.com/csc/v2"
sca_url = "https://qtsp.example.com/sca"
"#;

#[test]
fn instance_before_install_fails() {
    let registry = RqesUiRegistry::<FlowRouter>::new();
    assert!(!registry.is_installed());
    assert_matches!(registry.instance(), Err(RqesUiError::NotInitialized));
}

#[tokio::test]
async fn instance_returns_the_installed_coordinator() {
    let registry = RqesUiRegistry::new();
    let installed = registry
        .install(sample_config(), Arc::new(FlowRouter::new()))
        .unwrap();
    let host = Arc::new(RecordingHost::<Route>::new());

    installed
        .start(sample_document(), host.clone(), true)
        .await
        .unwrap();

    let a = registry.instance().unwrap();
    let b = registry.instance().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &installed));
    assert_eq!(a.state().await.step(), FlowStep::Initial);

    // a deep-link handler resumes through the registry
    b.resume("code", host, true).await.unwrap();
    assert_eq!(installed.state().await, FlowState::Credentials);
}

#[test]
fn invalid_config_is_not_installed() {
    let registry = RqesUiRegistry::new();
    let mut config = sample_config();
    config.rqes.client_id.clear();

    assert_matches!(
        registry.install(config, Arc::new(FlowRouter::new())),
        Err(RqesUiError::Config(_))
    );
    assert!(!registry.is_installed());
}

#[test]
fn coordinator_exposes_installed_config() {
    let registry = RqesUiRegistry::new();
    let ui = registry
        .install(sample_config(), Arc::new(FlowRouter::new()))
        .unwrap();

    assert_eq!(ui.rssps(), &[sample_qtsp(), alternate_qtsp()][..]);
    assert_eq!(ui.rqes_config().client_id, "wallet-client");
}

#[test]
fn load_from_file_reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG_TOML.as_bytes()).unwrap();

    let config = RqesUiConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.rssps.len(), 1);
    assert_eq!(config.rssps[0].name, "Example QTSP");
    assert_eq!(config.rqes.hash_algorithm, HashAlgorithm::Sha384);
}

#[test]
fn load_from_file_rejects_invalid_content() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"rssps = []\n[rqes]\nclient_id = \"c\"\nclient_secret = \"s\"\nauth_flow_redirection_uri = \"rqes://cb\"\n")
        .unwrap();

    assert_matches!(
        RqesUiConfig::load_from_file(file.path()),
        Err(RqesUiError::Config(_))
    );
}

#[test]
fn load_from_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RqesUiConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert_matches!(err, RqesUiError::Config(ref msg) if msg.contains("Failed to read"));
}

#[test]
fn json_and_toml_agree() {
    let from_toml = RqesUiConfig::from_toml_str(CONFIG_TOML).unwrap();
    let json = serde_json::to_string(&from_toml).unwrap();
    let from_json = RqesUiConfig::from_json_str(&json).unwrap();
    assert_eq!(from_toml, from_json);
}
