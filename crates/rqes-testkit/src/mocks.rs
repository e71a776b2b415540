//! Recording fakes for the flow collaborators
//!
//! Uses `parking_lot::Mutex` because every fake here is test infrastructure
//! driven from short critical sections that never span an await.

use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use rqes_ui::{
    CredentialInfo, FlowState, FlowStep, LogController, PresentationHost, QtspData, Result,
    RouterGraph, RqesService, RqesServiceAuthorized, RqesServiceConfig, RqesServiceFactory,
    RqesUiError,
};

// ============================================================================
// Presentation host
// ============================================================================

/// Host that records every presentation and dismissal.
#[derive(Debug)]
pub struct RecordingHost<S> {
    presented: Mutex<Vec<(S, bool)>>,
    dismissals: AtomicUsize,
    fail_present: bool,
    fail_dismiss: bool,
}

impl<S> Default for RecordingHost<S> {
    fn default() -> Self {
        Self {
            presented: Mutex::new(Vec::new()),
            dismissals: AtomicUsize::new(0),
            fail_present: false,
            fail_dismiss: false,
        }
    }
}

impl<S: Clone> RecordingHost<S> {
    /// Host that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose `present` always fails.
    pub fn failing_present() -> Self {
        Self {
            fail_present: true,
            ..Self::default()
        }
    }

    /// Host whose `dismiss` always fails.
    pub fn failing_dismiss() -> Self {
        Self {
            fail_dismiss: true,
            ..Self::default()
        }
    }

    /// Screens presented so far, in order.
    pub fn presented(&self) -> Vec<S> {
        self.presented.lock().iter().map(|(s, _)| s.clone()).collect()
    }

    /// Animation flags passed to `present`, in order.
    pub fn animations(&self) -> Vec<bool> {
        self.presented.lock().iter().map(|(_, a)| *a).collect()
    }

    /// Number of `dismiss` calls, failed ones included.
    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: Clone + Send + Sync> PresentationHost<S> for RecordingHost<S> {
    async fn present(&self, screen: S, animated: bool) -> Result<()> {
        if self.fail_present {
            return Err(RqesUiError::presentation("host rejected presentation"));
        }
        self.presented.lock().push((screen, animated));
        Ok(())
    }

    async fn dismiss(&self, _animated: bool) -> Result<()> {
        self.dismissals.fetch_add(1, Ordering::SeqCst);
        if self.fail_dismiss {
            return Err(RqesUiError::presentation("no screen is presented"));
        }
        Ok(())
    }
}

// ============================================================================
// Log controller
// ============================================================================

/// Log controller that keeps every entry.
#[derive(Debug, Default)]
pub struct RecordingLogController {
    errors: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
}

impl RecordingLogController {
    /// Create an empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered errors, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// Messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl LogController for RecordingLogController {
    fn log_error(&self, error: &dyn Display) {
        self.errors.lock().push(error.to_string());
    }

    fn log(&self, description: &str) {
        self.messages.lock().push(description.to_string());
    }
}

// ============================================================================
// Router
// ============================================================================

/// Router whose screens are the flow steps themselves.
///
/// Records every lookup and can be told to reject a step.
#[derive(Debug, Default)]
pub struct ScriptedRouter {
    lookups: Mutex<Vec<FlowStep>>,
    clears: AtomicUsize,
    unmapped: Vec<FlowStep>,
}

impl ScriptedRouter {
    /// Router mapping every step except `None`.
    pub fn new() -> Self {
        Self {
            unmapped: vec![FlowStep::None],
            ..Self::default()
        }
    }

    /// Router that additionally has no screen for `steps`.
    pub fn without(steps: &[FlowStep]) -> Self {
        let mut router = Self::new();
        router.unmapped.extend_from_slice(steps);
        router
    }

    /// Steps looked up so far, in order.
    pub fn lookups(&self) -> Vec<FlowStep> {
        self.lookups.lock().clone()
    }

    /// Number of `clear` calls.
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl RouterGraph for ScriptedRouter {
    type Screen = FlowStep;

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn next_view(&self, state: &FlowState) -> Result<FlowStep> {
        let step = state.step();
        self.lookups.lock().push(step);
        if self.unmapped.contains(&step) {
            return Err(RqesUiError::ScreenUnavailable { state: step });
        }
        Ok(step)
    }
}

// ============================================================================
// Signing service
// ============================================================================

/// Authorized client returning a fixed credential list.
#[derive(Debug)]
pub struct FakeRqesServiceAuthorized {
    /// Code this client was authorized with
    pub code: String,
    credentials: Vec<CredentialInfo>,
}

impl FakeRqesServiceAuthorized {
    /// Client authorized with `code` that lists `credentials`.
    pub fn new(code: impl Into<String>, credentials: Vec<CredentialInfo>) -> Self {
        Self {
            code: code.into(),
            credentials,
        }
    }
}

#[async_trait]
impl RqesServiceAuthorized for FakeRqesServiceAuthorized {
    async fn credentials(&self) -> Result<Vec<CredentialInfo>> {
        Ok(self.credentials.clone())
    }
}

/// Unauthenticated client for one provider.
#[derive(Debug)]
pub struct FakeRqesService {
    /// Provider the client was created for
    pub qtsp: QtspData,
    redirect_uri: String,
    credentials: Vec<CredentialInfo>,
    authorized_codes: Mutex<Vec<String>>,
    reject_codes: bool,
}

impl FakeRqesService {
    /// Codes passed to `authorize_service`, in order.
    pub fn authorized_codes(&self) -> Vec<String> {
        self.authorized_codes.lock().clone()
    }
}

#[async_trait]
impl RqesService for FakeRqesService {
    async fn service_authorization_url(&self) -> Result<String> {
        Ok(format!(
            "{}/oauth2/authorize?redirect_uri={}",
            self.qtsp.uri, self.redirect_uri
        ))
    }

    async fn authorize_service(&self, code: &str) -> Result<Arc<dyn RqesServiceAuthorized>> {
        self.authorized_codes.lock().push(code.to_string());
        if self.reject_codes {
            return Err(RqesUiError::service(format!("invalid_grant: {code}")));
        }
        Ok(Arc::new(FakeRqesServiceAuthorized::new(
            code,
            self.credentials.clone(),
        )))
    }
}

/// Factory producing [`FakeRqesService`]s and remembering the last one.
#[derive(Debug, Default)]
pub struct FakeServiceFactory {
    credentials: Vec<CredentialInfo>,
    reject_codes: bool,
    last: Mutex<Option<Arc<FakeRqesService>>>,
}

impl FakeServiceFactory {
    /// Factory whose services list `credentials` once authorized.
    pub fn with_credentials(credentials: Vec<CredentialInfo>) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Factory whose services reject every authorization code.
    pub fn rejecting() -> Self {
        Self {
            reject_codes: true,
            ..Self::default()
        }
    }

    /// Most recently created service.
    pub fn last(&self) -> Option<Arc<FakeRqesService>> {
        self.last.lock().clone()
    }
}

impl RqesServiceFactory for FakeServiceFactory {
    fn create(&self, config: &RqesServiceConfig, qtsp: &QtspData) -> Result<Arc<dyn RqesService>> {
        let service = Arc::new(FakeRqesService {
            qtsp: qtsp.clone(),
            redirect_uri: config.auth_flow_redirection_uri.clone(),
            credentials: self.credentials.clone(),
            authorized_codes: Mutex::new(Vec::new()),
            reject_codes: self.reject_codes,
        });
        *self.last.lock() = Some(Arc::clone(&service));
        Ok(service)
    }
}
