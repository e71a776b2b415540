//! # Domain Records
//!
//! Plain records exchanged between screens, the coordinator and the external
//! signing library. They carry no behaviour beyond construction helpers.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The document selected for signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    /// Display name, usually the file name
    pub document_name: String,
    /// Location of the document (file URL or path)
    pub uri: String,
}

impl DocumentData {
    /// Create a document reference from a name and location.
    pub fn new(document_name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            uri: uri.into(),
        }
    }

    /// Create a document reference from a filesystem path.
    ///
    /// The last path component becomes the document name. A path without a
    /// final component (e.g. `/`) falls back to the full path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let uri = path.to_string_lossy().into_owned();
        let document_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| uri.clone());
        Self { document_name, uri }
    }
}

/// A remote signing service provider offered to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QtspData {
    /// Provider display name
    pub name: String,
    /// Base URI of the provider's remote signing API
    pub uri: String,
    /// Signature creation application endpoint
    pub sca_url: String,
}

impl QtspData {
    /// Create a provider entry.
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        sca_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            sca_url: sca_url.into(),
        }
    }
}

/// A signing credential (certificate) listed by the authorized service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialInfo {
    /// Provider-assigned credential identifier
    pub credential_id: String,
    /// Certificate chain, leaf first, base64 DER
    #[serde(default)]
    pub certificates: Vec<String>,
    /// Key algorithm OIDs supported by the credential
    #[serde(default)]
    pub key_algorithms: Vec<String>,
    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CredentialInfo {
    /// Create a credential descriptor with only an identifier.
    pub fn new(credential_id: impl Into<String>) -> Self {
        Self {
            credential_id: credential_id.into(),
            ..Self::default()
        }
    }
}

/// Digest used when hashing documents for remote signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    /// Object identifier for the digest.
    #[must_use]
    pub fn oid(self) -> &'static str {
        match self {
            Self::Sha256 => "2.16.840.1.101.3.4.2.1",
            Self::Sha384 => "2.16.840.1.101.3.4.2.2",
            Self::Sha512 => "2.16.840.1.101.3.4.2.3",
        }
    }
}
