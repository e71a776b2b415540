//! # Flow Coordinator
//!
//! [`RqesUi`] owns the flow state, the [`Selection`] and the cached service
//! handles behind one async mutex. Every transition reads the current state,
//! computes the successor, writes it and applies the session mutation inside
//! a single critical section, so concurrent `start`/`resume` calls are applied
//! strictly one after another.
//!
//! The router is consulted inside the same critical section and the resulting
//! screen is handed to the [`PresentationHost`] after the lock is released;
//! screens may call back into the coordinator while they are being presented.

use std::sync::Arc;

use async_lock::Mutex;
use uuid::Uuid;

use crate::config::{RqesServiceConfig, RqesUiConfig};
use crate::errors::{Result, RqesUiError};
use crate::logging::{LogController, TracingLogController};
use crate::model::{CredentialInfo, DocumentData, QtspData};
use crate::router::{PresentationHost, RouterGraph};
use crate::services::{RqesService, RqesServiceAuthorized, ServiceCache};
use crate::session::Selection;
use crate::state::FlowState;

/// Presentation host for the screens produced by router `R`.
pub type SharedHost<R> = Arc<dyn PresentationHost<<R as RouterGraph>::Screen>>;

/// Consistent view of the coordinator taken under a single lock acquisition.
#[derive(Clone, Debug)]
pub struct FlowSnapshot {
    /// Current flow state
    pub state: FlowState,
    /// Selections made so far
    pub selection: Selection,
    /// Identifier of the flow in progress
    pub flow_id: Option<Uuid>,
    /// Whether an unauthenticated service handle is cached
    pub has_service: bool,
    /// Whether an authorized service handle is cached
    pub has_authorized_service: bool,
}

/// Flow identity and service inputs read under one lock acquisition.
pub(crate) struct ServiceContext {
    pub(crate) flow_id: Option<Uuid>,
    pub(crate) selection: Selection,
    pub(crate) service: Option<Arc<dyn RqesService>>,
}

struct FlowInner<S> {
    state: FlowState,
    selection: Selection,
    services: ServiceCache,
    flow_id: Option<Uuid>,
    presented: Option<Arc<dyn PresentationHost<S>>>,
    presentation_seq: u64,
}

/// Host bookkeeping restored when a presentation fails.
struct Presentation<S> {
    seq: u64,
    previous: Option<Arc<dyn PresentationHost<S>>>,
}

impl<S> FlowInner<S> {
    fn new() -> Self {
        Self {
            state: FlowState::None,
            selection: Selection::default(),
            services: ServiceCache::default(),
            flow_id: None,
            presented: None,
            presentation_seq: 0,
        }
    }

    fn reset_cache(&mut self) {
        self.selection = Selection::default();
        self.services.clear();
    }

    fn record_presented(&mut self, host: Arc<dyn PresentationHost<S>>) -> Presentation<S> {
        self.presentation_seq += 1;
        Presentation {
            seq: self.presentation_seq,
            previous: self.presented.replace(host),
        }
    }

    fn take_presented(&mut self) -> Option<Arc<dyn PresentationHost<S>>> {
        self.presentation_seq += 1;
        self.presented.take()
    }
}

/// Coordinator for the remote signing flow.
pub struct RqesUi<R: RouterGraph> {
    config: Arc<RqesUiConfig>,
    router: Arc<R>,
    logger: Arc<dyn LogController>,
    inner: Mutex<FlowInner<R::Screen>>,
}

impl<R: RouterGraph> std::fmt::Debug for RqesUi<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RqesUi")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R> RqesUi<R>
where
    R: RouterGraph,
    R::Screen: 'static,
{
    /// Create a coordinator from a validated configuration and a router.
    pub fn new(config: RqesUiConfig, router: Arc<R>) -> Result<Self> {
        config.validate()?;
        let logger = Arc::new(TracingLogController::new(config.print_logs));
        Ok(Self {
            config: Arc::new(config),
            router,
            logger,
            inner: Mutex::new(FlowInner::new()),
        })
    }

    /// Replace the default log controller.
    #[must_use]
    pub fn with_log_controller(mut self, logger: Arc<dyn LogController>) -> Self {
        self.logger = logger;
        self
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Start a new signing attempt for `document`.
    ///
    /// Clears the router, the session and the cached service handles, enters
    /// `Initial` and presents its screen on `host`. Returns the new state.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(document = %document.document_name, flow_id = tracing::field::Empty)
    )]
    pub async fn start(
        &self,
        document: DocumentData,
        host: SharedHost<R>,
        animated: bool,
    ) -> Result<FlowState> {
        self.router.clear();
        let flow_id = Uuid::new_v4();
        tracing::Span::current().record("flow_id", tracing::field::display(flow_id));

        let (state, screen, presentation) = {
            let mut inner = self.inner.lock().await;
            inner.reset_cache();
            inner.selection = inner.selection.with_document(Some(document));
            inner.flow_id = Some(flow_id);
            inner.state = FlowState::Initial(Arc::clone(&self.config));
            tracing::debug!(state = %inner.state, "flow started");
            self.logger.log(&format!("Signing flow {flow_id} started"));

            let screen = self.router.next_view(&inner.state)?;
            let presentation = inner.record_presented(Arc::clone(&host));
            (inner.state.clone(), screen, presentation)
        };

        self.present(host, screen, animated, presentation).await?;
        Ok(state)
    }

    /// Continue the flow after an external authorization redirect.
    ///
    /// Keeps the session, advances the state by one step, records
    /// `authorization_code` and presents the new state's screen. Fails with
    /// [`RqesUiError::NoActiveFlow`] when no flow has been started.
    #[tracing::instrument(level = "debug", skip_all, fields(flow_id = tracing::field::Empty))]
    pub async fn resume(
        &self,
        authorization_code: impl Into<String>,
        host: SharedHost<R>,
        animated: bool,
    ) -> Result<FlowState> {
        let code = authorization_code.into();
        self.router.clear();

        let (state, screen, presentation) = {
            let mut inner = self.inner.lock().await;
            if !inner.state.is_active() {
                self.logger.log_error(&RqesUiError::NoActiveFlow);
                return Err(RqesUiError::NoActiveFlow);
            }
            if let Some(flow_id) = inner.flow_id {
                tracing::Span::current().record("flow_id", tracing::field::display(flow_id));
            }

            let next = inner.state.next(&self.config);
            tracing::debug!(from = %inner.state, to = %next, "flow resumed");
            inner.state = next;
            inner.selection = inner.selection.with_code(Some(code));

            let screen = self.router.next_view(&inner.state)?;
            let presentation = inner.record_presented(Arc::clone(&host));
            (inner.state.clone(), screen, presentation)
        };

        self.present(host, screen, animated, presentation).await?;
        Ok(state)
    }

    /// Abandon the flow and dismiss the presented screen.
    ///
    /// Dismissal is best effort: failures are logged, never returned.
    #[tracing::instrument(level = "debug", skip(self), fields(flow_id = tracing::field::Empty))]
    pub async fn cancel(&self, animated: bool) {
        let presented = {
            let mut inner = self.inner.lock().await;
            if let Some(flow_id) = inner.flow_id.take() {
                tracing::Span::current().record("flow_id", tracing::field::display(flow_id));
                self.logger.log(&format!("Signing flow {flow_id} cancelled"));
            }
            tracing::debug!(from = %inner.state, "flow cancelled");
            inner.state = FlowState::None;
            inner.take_presented()
        };
        self.dismiss(presented, animated).await;
    }

    /// Dismiss the presented screen, keeping state and session.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn pause(&self, animated: bool) {
        let presented = self.inner.lock().await.presented.clone();
        self.dismiss(presented, animated).await;
    }

    async fn present(
        &self,
        host: SharedHost<R>,
        screen: R::Screen,
        animated: bool,
        presentation: Presentation<R::Screen>,
    ) -> Result<()> {
        let Err(err) = host.present(screen, animated).await else {
            return Ok(());
        };
        {
            let mut inner = self.inner.lock().await;
            // untouched since this call recorded the host
            if inner.presentation_seq == presentation.seq {
                inner.presented = presentation.previous;
            }
        }
        self.logger.log_error(&err);
        Err(err)
    }

    async fn dismiss(&self, presented: Option<SharedHost<R>>, animated: bool) {
        let Some(host) = presented else {
            tracing::debug!("nothing presented, dismissal skipped");
            return;
        };
        if let Err(err) = host.dismiss(animated).await {
            tracing::warn!(error = %err, "dismissal failed");
            self.logger.log_error(&err);
        }
    }

    // ------------------------------------------------------------------------
    // Session mutators
    // ------------------------------------------------------------------------

    /// Record the document being signed.
    pub async fn update_selection_document(&self, document: Option<DocumentData>) {
        let mut inner = self.inner.lock().await;
        inner.selection = inner.selection.with_document(document);
    }

    /// Record the chosen provider.
    pub async fn update_qtsp(&self, qtsp: Option<QtspData>) {
        let mut inner = self.inner.lock().await;
        inner.selection = inner.selection.with_qtsp(qtsp);
    }

    /// Record the chosen signing credential.
    pub async fn update_certificate(&self, certificate: CredentialInfo) {
        let mut inner = self.inner.lock().await;
        inner.selection = inner.selection.with_certificate(Some(certificate));
    }

    /// Record the authorization code returned by the redirect.
    pub async fn update_authorization_code(&self, code: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.selection = inner.selection.with_code(Some(code.into()));
    }

    // ------------------------------------------------------------------------
    // Service handles
    // ------------------------------------------------------------------------

    /// Cached unauthenticated service handle.
    pub async fn rqes_service(&self) -> Option<Arc<dyn RqesService>> {
        self.inner.lock().await.services.service.clone()
    }

    /// Cache (or clear) the unauthenticated service handle.
    pub async fn set_rqes_service(&self, service: Option<Arc<dyn RqesService>>) {
        self.inner.lock().await.services.service = service;
    }

    /// Cached authorized service handle.
    pub async fn rqes_service_authorized(&self) -> Option<Arc<dyn RqesServiceAuthorized>> {
        self.inner.lock().await.services.authorized.clone()
    }

    /// Cache (or clear) the authorized service handle.
    pub async fn set_rqes_service_authorized(
        &self,
        service: Option<Arc<dyn RqesServiceAuthorized>>,
    ) {
        self.inner.lock().await.services.authorized = service;
    }

    /// Read the flow id, session and unauthenticated handle together.
    pub(crate) async fn service_context(&self) -> ServiceContext {
        let inner = self.inner.lock().await;
        ServiceContext {
            flow_id: inner.flow_id,
            selection: inner.selection.clone(),
            service: inner.services.service.clone(),
        }
    }

    /// Cache `service` if the flow identified by `flow_id` is still current.
    pub(crate) async fn attach_rqes_service(
        &self,
        flow_id: Option<Uuid>,
        service: Arc<dyn RqesService>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.ensure_current(inner.flow_id, flow_id)?;
        inner.services.service = Some(service);
        Ok(())
    }

    /// Cache `authorized` if the flow identified by `flow_id` is still current.
    pub(crate) async fn attach_rqes_service_authorized(
        &self,
        flow_id: Option<Uuid>,
        authorized: Arc<dyn RqesServiceAuthorized>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.ensure_current(inner.flow_id, flow_id)?;
        inner.services.authorized = Some(authorized);
        Ok(())
    }

    fn ensure_current(&self, current: Option<Uuid>, expected: Option<Uuid>) -> Result<()> {
        if current == expected {
            return Ok(());
        }
        tracing::debug!(?current, ?expected, "dropping handle from a previous flow");
        self.logger.log_error(&RqesUiError::StaleFlow);
        Err(RqesUiError::StaleFlow)
    }

    // ------------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------------

    /// Current flow state.
    pub async fn state(&self) -> FlowState {
        self.inner.lock().await.state.clone()
    }

    /// Selections made so far.
    pub async fn selection(&self) -> Selection {
        self.inner.lock().await.selection.clone()
    }

    /// Identifier of the flow in progress.
    pub async fn flow_id(&self) -> Option<Uuid> {
        self.inner.lock().await.flow_id
    }

    /// State, selection and handle presence read under one lock.
    pub async fn snapshot(&self) -> FlowSnapshot {
        let inner = self.inner.lock().await;
        FlowSnapshot {
            state: inner.state.clone(),
            selection: inner.selection.clone(),
            flow_id: inner.flow_id,
            has_service: inner.services.service.is_some(),
            has_authorized_service: inner.services.authorized.is_some(),
        }
    }

    /// Whether both service handles are unset.
    pub async fn services_cleared(&self) -> bool {
        self.inner.lock().await.services.is_empty()
    }

    /// Installed configuration.
    pub fn config(&self) -> &Arc<RqesUiConfig> {
        &self.config
    }

    /// Providers offered to the user.
    pub fn rssps(&self) -> &[QtspData] {
        &self.config.rssps
    }

    /// Signing-service client configuration.
    pub fn rqes_config(&self) -> &RqesServiceConfig {
        &self.config.rqes
    }

    /// Router shared with screens.
    pub fn router(&self) -> &Arc<R> {
        &self.router
    }

    /// Log controller shared with screens.
    pub fn logger(&self) -> &Arc<dyn LogController> {
        &self.logger
    }
}
