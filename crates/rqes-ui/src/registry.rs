//! # Coordinator Registry
//!
//! The composition root owns one [`RqesUiRegistry`] and hands clones of the
//! installed coordinator to screens and deep-link handlers. There is no
//! process-global state; "one coordinator" holds because the root installs
//! into a single registry.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::RqesUiConfig;
use crate::coordinator::RqesUi;
use crate::errors::{Result, RqesUiError};
use crate::router::RouterGraph;

/// Slot holding the installed coordinator.
pub struct RqesUiRegistry<R: RouterGraph> {
    slot: RwLock<Option<Arc<RqesUi<R>>>>,
}

impl<R: RouterGraph> Default for RqesUiRegistry<R> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<R> RqesUiRegistry<R>
where
    R: RouterGraph,
    R::Screen: 'static,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a coordinator from `config` and `router` and install it.
    ///
    /// Installing again replaces the previous coordinator; holders of the old
    /// `Arc` keep a working but detached instance.
    pub fn install(&self, config: RqesUiConfig, router: Arc<R>) -> Result<Arc<RqesUi<R>>> {
        let ui = Arc::new(RqesUi::new(config, router)?);
        Ok(self.install_shared(ui))
    }

    /// Install an already constructed coordinator.
    pub fn install_shared(&self, ui: Arc<RqesUi<R>>) -> Arc<RqesUi<R>> {
        let previous = self.slot.write().replace(Arc::clone(&ui));
        if previous.is_some() {
            tracing::debug!("replaced installed RQES UI coordinator");
        }
        ui
    }

    /// The installed coordinator.
    pub fn instance(&self) -> Result<Arc<RqesUi<R>>> {
        self.slot
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(RqesUiError::NotInitialized)
    }

    /// Check if a coordinator has been installed
    pub fn is_installed(&self) -> bool {
        self.slot.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RqesServiceConfig;
    use crate::model::{HashAlgorithm, QtspData};
    use crate::router::FlowRouter;
    use assert_matches::assert_matches;

    fn config() -> RqesUiConfig {
        RqesUiConfig::new(
            vec![QtspData::new("Q", "https://q", "https://q/sca")],
            RqesServiceConfig {
                client_id: "client".into(),
                client_secret: "secret".into(),
                auth_flow_redirection_uri: "rqes://cb".into(),
                hash_algorithm: HashAlgorithm::Sha256,
            },
        )
    }

    #[test]
    fn test_instance_before_install() {
        let registry = RqesUiRegistry::<FlowRouter>::new();
        assert!(!registry.is_installed());
        assert_matches!(registry.instance(), Err(RqesUiError::NotInitialized));
    }

    #[test]
    fn test_instance_identity() {
        let registry = RqesUiRegistry::new();
        let installed = registry
            .install(config(), Arc::new(FlowRouter::new()))
            .unwrap();

        let a = registry.instance().unwrap();
        let b = registry.instance().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &installed));
    }

    #[test]
    fn test_reinstall_replaces() {
        let registry = RqesUiRegistry::new();
        let first = registry
            .install(config(), Arc::new(FlowRouter::new()))
            .unwrap();
        let second = registry
            .install(config(), Arc::new(FlowRouter::new()))
            .unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&registry.instance().unwrap(), &second));
    }

    #[test]
    fn test_failed_install_leaves_slot_empty() {
        let registry = RqesUiRegistry::<FlowRouter>::new();
        let mut cfg = config();
        cfg.rqes.client_id.clear();
        assert!(registry.install(cfg, Arc::new(FlowRouter::new())).is_err());
        assert!(!registry.is_installed());
    }
}
