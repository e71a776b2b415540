//! # RQES UI - Portable Signing Flow Core
//!
//! Headless core of the remote qualified electronic signature UI. The crate
//! sequences the signing journey and holds the user's selections; it renders
//! nothing and performs no signing itself.
//!
//! ```text
//! host app                       rqes-ui
//! ┌──────────────────┐   start   ┌──────────────────────────────┐
//! │ composition root │──────────►│ RqesUi                       │
//! │  RqesUiRegistry  │  resume   │  ├─ FlowState  (state.rs)    │
//! └──────────────────┘──────────►│  ├─ Selection  (session.rs)  │
//!          ▲                     │  └─ ServiceCache             │
//!          │ present / dismiss   └──────────┬───────────────────┘
//! ┌────────┴─────────┐                      │ next_view(state)
//! │ PresentationHost │◄─────────────────────┘ RouterGraph
//! └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = RqesUiRegistry::new();
//! let ui = registry.install(RqesUiConfig::load_from_file(path)?, Arc::new(FlowRouter::new()))?;
//!
//! ui.start(DocumentData::from_path("contract.pdf"), host.clone(), true).await?;
//! // ... the user authorizes in the browser, the app receives the redirect
//! registry.instance()?.resume(code, host, true).await?;
//! ```

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod logging;
pub mod model;
pub mod registry;
pub mod router;
pub mod services;
pub mod session;
pub mod state;
pub mod workflows;

pub use config::{RqesServiceConfig, RqesUiConfig};
pub use coordinator::{FlowSnapshot, RqesUi, SharedHost};
pub use errors::{ErrorCategory, Result, RqesUiError};
pub use logging::{LogController, TracingLogController};
pub use model::{CredentialInfo, DocumentData, HashAlgorithm, QtspData};
pub use registry::RqesUiRegistry;
pub use router::{FlowRouter, PresentationHost, Route, RouterGraph};
pub use services::{RqesService, RqesServiceAuthorized, RqesServiceFactory};
pub use session::Selection;
pub use state::{FlowState, FlowStep};

#[cfg(feature = "subscriber")]
pub use logging::init_tracing;
