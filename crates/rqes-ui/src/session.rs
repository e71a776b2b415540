//! # Session Store
//!
//! Accumulated user selections for one signing attempt. Each setter returns a
//! new [`Selection`] with exactly one field replaced; the store performs no
//! cross-field validation.

use serde::{Deserialize, Serialize};

use crate::model::{CredentialInfo, DocumentData, QtspData};

/// Selections made so far in the current flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Document being signed
    pub document: Option<DocumentData>,
    /// Chosen remote signing service provider
    pub qtsp: Option<QtspData>,
    /// Chosen signing credential
    pub certificate: Option<CredentialInfo>,
    /// Authorization code returned by the external redirect
    pub code: Option<String>,
}

impl Selection {
    /// Copy with `document` replaced.
    #[must_use]
    pub fn with_document(&self, document: Option<DocumentData>) -> Self {
        Self {
            document,
            ..self.clone()
        }
    }

    /// Copy with `qtsp` replaced.
    #[must_use]
    pub fn with_qtsp(&self, qtsp: Option<QtspData>) -> Self {
        Self {
            qtsp,
            ..self.clone()
        }
    }

    /// Copy with `certificate` replaced.
    #[must_use]
    pub fn with_certificate(&self, certificate: Option<CredentialInfo>) -> Self {
        Self {
            certificate,
            ..self.clone()
        }
    }

    /// Copy with `code` replaced.
    #[must_use]
    pub fn with_code(&self, code: Option<String>) -> Self {
        Self {
            code,
            ..self.clone()
        }
    }

    /// Whether nothing has been selected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_touch_one_field() {
        let doc = DocumentData::new("a.pdf", "file:///a.pdf");
        let qtsp = QtspData::new("Q", "https://q", "https://q/sca");

        let base = Selection::default()
            .with_document(Some(doc.clone()))
            .with_qtsp(Some(qtsp.clone()));
        let updated = base.with_code(Some("code-1".into()));

        assert_eq!(updated.document, Some(doc));
        assert_eq!(updated.qtsp, Some(qtsp));
        assert_eq!(updated.code.as_deref(), Some("code-1"));
        assert!(updated.certificate.is_none());

        // the source value is untouched
        assert!(base.code.is_none());
    }

    #[test]
    fn test_setter_can_clear_field() {
        let selection = Selection::default()
            .with_certificate(Some(CredentialInfo::new("cred-1")))
            .with_certificate(None);
        assert!(selection.is_empty());
    }
}
