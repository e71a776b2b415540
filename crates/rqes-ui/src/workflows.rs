//! # Service Workflows
//!
//! Multi-step operations screens run against the cached service handles.
//! Each workflow reads what it needs from the coordinator, calls the external
//! client and writes the resulting handle back; the protocol itself stays in
//! the external library.
//!
//! Inputs are read together with the flow id. A handle is only cached if
//! that flow is still current when the client returns, otherwise it is
//! dropped and the workflow fails with [`RqesUiError::StaleFlow`].

use std::sync::Arc;

use crate::coordinator::RqesUi;
use crate::errors::{Result, RqesUiError};
use crate::model::CredentialInfo;
use crate::router::RouterGraph;
use crate::services::{RqesService, RqesServiceAuthorized, RqesServiceFactory};

/// Build the unauthenticated client for the selected provider and cache it.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn begin_service<R>(
    ui: &RqesUi<R>,
    factory: &dyn RqesServiceFactory,
) -> Result<Arc<dyn RqesService>>
where
    R: RouterGraph,
    R::Screen: 'static,
{
    let context = ui.service_context().await;
    let qtsp = context
        .selection
        .qtsp
        .ok_or(RqesUiError::MissingSelection("qtsp"))?;

    let service = factory.create(ui.rqes_config(), &qtsp).map_err(|err| {
        ui.logger().log_error(&err);
        err
    })?;
    tracing::debug!(qtsp = %qtsp.name, "signing service created");

    ui.attach_rqes_service(context.flow_id, Arc::clone(&service))
        .await?;
    Ok(service)
}

/// Authorization URL of the cached unauthenticated client.
pub async fn service_authorization_url<R>(ui: &RqesUi<R>) -> Result<String>
where
    R: RouterGraph,
    R::Screen: 'static,
{
    let service = ui
        .rqes_service()
        .await
        .ok_or(RqesUiError::ServiceUnavailable("rqes_service"))?;
    service.service_authorization_url().await
}

/// Exchange the session's authorization code and cache the authorized client.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn authorize_service<R>(ui: &RqesUi<R>) -> Result<Arc<dyn RqesServiceAuthorized>>
where
    R: RouterGraph,
    R::Screen: 'static,
{
    let context = ui.service_context().await;
    let code = context
        .selection
        .code
        .ok_or(RqesUiError::MissingSelection("authorization_code"))?;
    let service = context
        .service
        .ok_or(RqesUiError::ServiceUnavailable("rqes_service"))?;

    let authorized = service.authorize_service(&code).await.map_err(|err| {
        ui.logger().log_error(&err);
        err
    })?;

    ui.attach_rqes_service_authorized(context.flow_id, Arc::clone(&authorized))
        .await?;
    Ok(authorized)
}

/// Credentials available through the cached authorized client.
pub async fn list_credentials<R>(ui: &RqesUi<R>) -> Result<Vec<CredentialInfo>>
where
    R: RouterGraph,
    R::Screen: 'static,
{
    let authorized = ui
        .rqes_service_authorized()
        .await
        .ok_or(RqesUiError::ServiceUnavailable("rqes_service_authorized"))?;
    authorized.credentials().await.map_err(|err| {
        ui.logger().log_error(&err);
        err
    })
}
