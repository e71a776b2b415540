//! # Screen Router
//!
//! The coordinator never builds screens itself. It asks a [`RouterGraph`] for
//! the root screen of a [`FlowState`] and hands it to a [`PresentationHost`].
//!
//! [`FlowRouter`] is the default graph: it resolves states to [`Route`]s and
//! keeps the in-flow navigation path that screens push onto.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::{Result, RqesUiError};
use crate::state::{FlowState, FlowStep};

/// Maps flow states to screens.
pub trait RouterGraph: Send + Sync {
    /// Screen handle produced for the host.
    type Screen: Send;

    /// Drop any retained navigation state.
    fn clear(&self);

    /// Build the root screen for `state`.
    ///
    /// An unmapped state is a configuration error and is returned as-is to the
    /// caller of `start`/`resume`.
    fn next_view(&self, state: &FlowState) -> Result<Self::Screen>;
}

/// Presents and dismisses screens on the host UI.
#[async_trait]
pub trait PresentationHost<S>: Send + Sync {
    /// Present `screen` modally on top of the host container.
    async fn present(&self, screen: S, animated: bool) -> Result<()>;

    /// Dismiss the screen previously presented by this host.
    async fn dismiss(&self, animated: bool) -> Result<()>;
}

/// Screens of the signing flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Selected document with provider choice
    DocumentSelection,
    /// Remote signing service provider list
    QtspSelection,
    /// Signing credential list
    CertificateSelection,
    /// Signing result
    SignedDocument,
    /// Full-screen document viewer
    ViewDocument {
        /// Whether the document shown is the signed output
        signed: bool,
    },
}

impl Route {
    /// Root route for a flow state, if the state has one.
    #[must_use]
    pub fn for_step(step: FlowStep) -> Option<Self> {
        match step {
            FlowStep::None => None,
            FlowStep::Initial => Some(Self::DocumentSelection),
            FlowStep::Rssps => Some(Self::QtspSelection),
            FlowStep::Credentials => Some(Self::CertificateSelection),
            FlowStep::Sign => Some(Self::SignedDocument),
            FlowStep::View => Some(Self::ViewDocument { signed: true }),
        }
    }

    /// Stable identifier for the route.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::DocumentSelection => "document_selection",
            Self::QtspSelection => "qtsp_selection",
            Self::CertificateSelection => "certificate_selection",
            Self::SignedDocument => "signed_document",
            Self::ViewDocument { .. } => "view_document",
        }
    }
}

/// Default router graph with an in-flow navigation path.
#[derive(Debug)]
pub struct FlowRouter {
    path: Mutex<VecDeque<Route>>,
    max_history: usize,
}

impl Default for FlowRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowRouter {
    /// Create a router with an empty navigation path.
    pub fn new() -> Self {
        Self {
            path: Mutex::new(VecDeque::new()),
            max_history: 50,
        }
    }

    /// Push a route onto the navigation path.
    ///
    /// Pushing the route already on top is ignored.
    pub fn navigate_to(&self, route: Route) {
        let mut path = self.path.lock();
        if path.back() == Some(&route) {
            return;
        }
        path.push_back(route);
        if path.len() > self.max_history {
            path.pop_front();
        }
    }

    /// Pop the top route, returning it.
    pub fn pop(&self) -> Option<Route> {
        self.path.lock().pop_back()
    }

    /// Snapshot of the navigation path, root first.
    pub fn path(&self) -> Vec<Route> {
        self.path.lock().iter().copied().collect()
    }

    /// Check if we can go back
    pub fn can_pop(&self) -> bool {
        !self.path.lock().is_empty()
    }
}

impl RouterGraph for FlowRouter {
    type Screen = Route;

    fn clear(&self) {
        self.path.lock().clear();
    }

    fn next_view(&self, state: &FlowState) -> Result<Route> {
        Route::for_step(state.step()).ok_or(RqesUiError::ScreenUnavailable {
            state: state.step(),
        })
    }
}
