//! # Signing Service Clients
//!
//! The remote-signing protocol lives in an external library. These traits are
//! the narrow surface the flow needs from it: one unauthenticated phase that
//! produces an authorization URL and exchanges a code, and one authorized
//! phase that lists credentials. The coordinator caches both as opaque
//! `Arc<dyn …>` handles for the lifetime of a flow.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RqesServiceConfig;
use crate::errors::Result;
use crate::model::{CredentialInfo, QtspData};

/// Unauthenticated remote-signing client.
#[async_trait]
pub trait RqesService: Debug + Send + Sync {
    /// URL the user must visit to authorize the service.
    async fn service_authorization_url(&self) -> Result<String>;

    /// Exchange an authorization code for an authorized client.
    async fn authorize_service(&self, code: &str) -> Result<Arc<dyn RqesServiceAuthorized>>;
}

/// Remote-signing client holding a service access token.
#[async_trait]
pub trait RqesServiceAuthorized: Debug + Send + Sync {
    /// List the signing credentials available to the user.
    async fn credentials(&self) -> Result<Vec<CredentialInfo>>;
}

/// Builds the unauthenticated client for a chosen provider.
pub trait RqesServiceFactory: Send + Sync {
    /// Create a client for `qtsp` using the installed service configuration.
    fn create(&self, config: &RqesServiceConfig, qtsp: &QtspData) -> Result<Arc<dyn RqesService>>;
}

/// Cached service handles for the flow in progress.
#[derive(Clone, Debug, Default)]
pub(crate) struct ServiceCache {
    pub(crate) service: Option<Arc<dyn RqesService>>,
    pub(crate) authorized: Option<Arc<dyn RqesServiceAuthorized>>,
}

impl ServiceCache {
    pub(crate) fn clear(&mut self) {
        self.service = None;
        self.authorized = None;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.service.is_none() && self.authorized.is_none()
    }
}
