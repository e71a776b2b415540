//! Categorized flow errors
//!
//! One error type is shared by the coordinator, the router contract and the
//! service workflows so that hosts only need to map a single enum onto their
//! own error surface.

use std::fmt;

use crate::state::FlowStep;

/// High-level error categories for host error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Configuration errors (correctable by modifying settings)
    Config,
    /// Caller sequencing errors (a required selection or step is missing)
    Input,
    /// Remote signing service errors (often transient)
    Network,
    /// General operation failures (catch-all)
    Operation,
}

impl ErrorCategory {
    /// Check if this error category is likely transient.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config => "Config",
            Self::Input => "Input",
            Self::Network => "Network",
            Self::Operation => "Operation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors surfaced by the signing flow core.
#[derive(Debug, thiserror::Error)]
pub enum RqesUiError {
    /// Coordinator or configuration used before installation
    #[error("RQES UI has not been initialized")]
    NotInitialized,

    /// The router has no screen for a state
    #[error("No screen is mapped for flow state `{state}`")]
    ScreenUnavailable {
        /// State that had no screen
        state: FlowStep,
    },

    /// The host failed to present a screen
    #[error("Presentation failed: {0}")]
    Presentation(String),

    /// `resume` called while no flow is in progress
    #[error("No signing flow is in progress")]
    NoActiveFlow,

    /// A workflow finished after its flow was restarted or cancelled
    #[error("Signing flow changed while a service call was in flight")]
    StaleFlow,

    /// A session field required by a workflow is not set
    #[error("Missing selection: {0}")]
    MissingSelection(&'static str),

    /// A service handle required by a workflow is not cached
    #[error("Signing service not available: {0}")]
    ServiceUnavailable(&'static str),

    /// Error reported by the external signing client
    #[error("Signing service error: {0}")]
    Service(String),

    /// Configuration failed to load or validate
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RqesUiError {
    /// Create a presentation error
    pub fn presentation(message: impl Into<String>) -> Self {
        Self::Presentation(message.into())
    }

    /// Create a signing service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the category for this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotInitialized | Self::ScreenUnavailable { .. } | Self::Config(_) => {
                ErrorCategory::Config
            }
            Self::NoActiveFlow | Self::MissingSelection(_) | Self::ServiceUnavailable(_) => {
                ErrorCategory::Input
            }
            Self::Service(_) => ErrorCategory::Network,
            Self::Presentation(_) | Self::StaleFlow => ErrorCategory::Operation,
        }
    }
}

impl From<toml::de::Error> for RqesUiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RqesUiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for RqesUiError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(format!("Failed to read config file: {err}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RqesUiError>;
