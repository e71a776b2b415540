//! Sample records and ready-wired coordinators

use std::sync::Arc;

use rqes_ui::{
    CredentialInfo, DocumentData, FlowRouter, HashAlgorithm, QtspData, RqesServiceConfig, RqesUi,
    RqesUiConfig,
};

use crate::mocks::RecordingHost;

/// Provider used by [`sample_config`].
pub fn sample_qtsp() -> QtspData {
    QtspData::new(
        "Example QTSP",
        "https://qtsp.example.com/csc/v2",
        "https://qtsp.example.com/sca",
    )
}

/// Second provider for selection tests.
pub fn alternate_qtsp() -> QtspData {
    QtspData::new(
        "Alternate QTSP",
        "https://alt.example.org/csc/v2",
        "https://alt.example.org/sca",
    )
}

/// A valid configuration listing both sample providers.
pub fn sample_config() -> RqesUiConfig {
    RqesUiConfig::new(
        vec![sample_qtsp(), alternate_qtsp()],
        RqesServiceConfig {
            client_id: "wallet-client".into(),
            client_secret: "wallet-secret".into(),
            auth_flow_redirection_uri: "rqes://oauth/callback".into(),
            hash_algorithm: HashAlgorithm::Sha256,
        },
    )
}

/// Document reference for a file named `name`.
pub fn document_named(name: &str) -> DocumentData {
    DocumentData::new(name, format!("file:///documents/{name}"))
}

/// The default sample document.
pub fn sample_document() -> DocumentData {
    document_named("sample.pdf")
}

/// Credential descriptor with a one-certificate chain.
pub fn sample_credential(id: &str) -> CredentialInfo {
    CredentialInfo {
        credential_id: id.into(),
        certificates: vec![format!("MIIB-{id}")],
        key_algorithms: vec!["1.2.840.10045.2.1".into()],
        description: Some(format!("Credential {id}")),
    }
}

/// Coordinator over [`FlowRouter`] together with a recording host.
pub fn test_ui() -> (Arc<RqesUi<FlowRouter>>, Arc<RecordingHost<rqes_ui::Route>>) {
    let ui = RqesUi::new(sample_config(), Arc::new(FlowRouter::new())).unwrap();
    (Arc::new(ui), Arc::new(RecordingHost::new()))
}
