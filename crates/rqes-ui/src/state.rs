//! # Flow State Machine
//!
//! The signing journey is a closed, ordered set of states:
//!
//! ```text
//! none ─► initial(config) ─┐
//!                          ├─► credentials ─► sign ─► view ─┐
//!          rssps ──────────┘                          ▲     │
//!                                                     └─────┘
//! ```
//!
//! `none` is both the starting state and the state a cancelled flow returns
//! to. `view` is terminal and advancing it is a no-op.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::RqesUiConfig;

/// Payload-free tag identifying a [`FlowState`] variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    /// No flow in progress
    #[default]
    None,
    /// Flow started, document selected
    Initial,
    /// Listing remote signing service providers
    Rssps,
    /// Choosing a signing credential
    Credentials,
    /// Signing the document
    Sign,
    /// Viewing the signed document
    View,
}

impl FlowStep {
    /// Get all steps in flow order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Initial,
            Self::Rssps,
            Self::Credentials,
            Self::Sign,
            Self::View,
        ]
    }

    /// Stable identifier for the step.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Initial => "initial",
            Self::Rssps => "rssps",
            Self::Credentials => "credentials",
            Self::Sign => "sign",
            Self::View => "view",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Current position in the signing flow.
///
/// # Equality
///
/// Two states are equal when they are the same variant. The configuration
/// carried by [`FlowState::Initial`] takes no part in `PartialEq` or `Hash`,
/// so `Initial(a) == Initial(b)` holds for any `a` and `b`. Router lookups
/// and transition checks depend on this; do not derive these traits.
#[derive(Clone, Debug, Default)]
pub enum FlowState {
    /// No flow in progress, or the flow was cancelled
    #[default]
    None,
    /// A new flow has started with the installed configuration
    Initial(Arc<RqesUiConfig>),
    /// The provider list is being shown
    Rssps,
    /// A signing credential is being chosen
    Credentials,
    /// The document is being signed
    Sign,
    /// The signed document is being shown
    View,
}

impl FlowState {
    /// Tag for this state.
    #[must_use]
    pub fn step(&self) -> FlowStep {
        match self {
            Self::None => FlowStep::None,
            Self::Initial(_) => FlowStep::Initial,
            Self::Rssps => FlowStep::Rssps,
            Self::Credentials => FlowStep::Credentials,
            Self::Sign => FlowStep::Sign,
            Self::View => FlowStep::View,
        }
    }

    /// Stable identifier for the state.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.step().id()
    }

    /// Compute the successor state.
    ///
    /// Total over every variant. `config` is only consulted when leaving
    /// `None`.
    #[must_use]
    pub fn next(&self, config: &Arc<RqesUiConfig>) -> FlowState {
        match self {
            Self::None => Self::Initial(Arc::clone(config)),
            Self::Initial(_) | Self::Rssps => Self::Credentials,
            Self::Credentials => Self::Sign,
            Self::Sign | Self::View => Self::View,
        }
    }

    /// Whether a flow is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the state is the terminal fixed point.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::View)
    }

    /// Configuration carried by `Initial`, if any.
    #[must_use]
    pub fn config(&self) -> Option<&Arc<RqesUiConfig>> {
        match self {
            Self::Initial(config) => Some(config),
            _ => None,
        }
    }
}

impl PartialEq for FlowState {
    fn eq(&self, other: &Self) -> bool {
        self.step() == other.step()
    }
}

impl Eq for FlowState {}

impl Hash for FlowState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.step().hash(state);
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<&FlowState> for FlowStep {
    fn from(state: &FlowState) -> Self {
        state.step()
    }
}
