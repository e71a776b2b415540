//! Diagnostics: log controller entries and lifecycle span fields.

use std::fmt::Debug;
use std::sync::Arc;

use assert_matches::assert_matches;
use parking_lot::Mutex;
use rqes_testkit::*;
use rqes_ui::{FlowRouter, Route, RqesUi, RqesUiError};
use tracing::field::{Field, Visit};
use tracing::span;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Registry;

fn logged_ui() -> (RqesUi<FlowRouter>, Arc<RecordingLogController>) {
    let logger = Arc::new(RecordingLogController::new());
    let ui = RqesUi::new(sample_config(), Arc::new(FlowRouter::new()))
        .unwrap()
        .with_log_controller(logger.clone());
    (ui, logger)
}

#[tokio::test]
async fn presentation_failure_is_logged_and_returned() {
    let (ui, logger) = logged_ui();
    let host = Arc::new(RecordingHost::<Route>::failing_present());

    assert_matches!(
        ui.start(sample_document(), host, true).await,
        Err(RqesUiError::Presentation(_))
    );

    assert_eq!(
        logger.errors(),
        ["Presentation failed: host rejected presentation"]
    );
}

#[tokio::test]
async fn dismissal_failure_is_logged_and_absorbed() {
    let (ui, logger) = logged_ui();
    let host = Arc::new(RecordingHost::<Route>::failing_dismiss());
    ui.start(sample_document(), host.clone(), true).await.unwrap();

    ui.pause(true).await;
    ui.cancel(true).await;

    assert_eq!(host.dismissals(), 2);
    assert_eq!(
        logger.errors(),
        [
            "Presentation failed: no screen is presented",
            "Presentation failed: no screen is presented",
        ]
    );
}

#[tokio::test]
async fn resume_without_flow_is_logged() {
    let (ui, logger) = logged_ui();
    let host = Arc::new(RecordingHost::<Route>::new());

    assert_matches!(
        ui.resume("code", host, true).await,
        Err(RqesUiError::NoActiveFlow)
    );
    assert_eq!(logger.errors(), ["No signing flow is in progress"]);
}

#[tokio::test]
async fn lifecycle_messages_name_the_flow() {
    let (ui, logger) = logged_ui();
    let host = Arc::new(RecordingHost::<Route>::new());

    ui.start(sample_document(), host, true).await.unwrap();
    let flow_id = ui.flow_id().await.unwrap();
    ui.cancel(true).await;
    ui.cancel(true).await;

    assert_eq!(
        logger.messages(),
        [
            format!("Signing flow {flow_id} started"),
            format!("Signing flow {flow_id} cancelled"),
        ]
    );
    assert!(logger.errors().is_empty());
}

#[tokio::test]
async fn service_errors_are_logged() {
    let (ui, logger) = logged_ui();
    ui.update_qtsp(Some(sample_qtsp())).await;
    ui.update_authorization_code("bad").await;
    rqes_ui::workflows::begin_service(&ui, &FakeServiceFactory::rejecting())
        .await
        .unwrap();

    assert!(rqes_ui::workflows::authorize_service(&ui).await.is_err());
    assert_eq!(logger.errors(), ["Signing service error: invalid_grant: bad"]);
}

// ============================================================================
// Span fields
// ============================================================================

/// Collects `(span name, flow_id)` for every span that records a flow id.
#[derive(Clone, Default)]
struct FlowIdCapture(Arc<Mutex<Vec<(String, String)>>>);

#[derive(Default)]
struct FlowIdVisitor(Option<String>);

impl Visit for FlowIdVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "flow_id" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for FlowIdCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = FlowIdVisitor::default();
        values.record(&mut visitor);
        if let (Some(flow_id), Some(span)) = (visitor.0, ctx.span(id)) {
            self.0.lock().push((span.name().to_string(), flow_id));
        }
    }
}

#[tokio::test]
async fn lifecycle_spans_record_flow_id() {
    let capture = FlowIdCapture::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(capture.clone()));

    let (ui, host) = test_ui();
    ui.start(sample_document(), host.clone(), true).await.unwrap();
    let flow_id = ui.flow_id().await.unwrap().to_string();
    ui.resume("code", host, true).await.unwrap();
    ui.cancel(true).await;

    let recorded = capture.0.lock().clone();
    assert_eq!(
        recorded,
        [
            ("start".to_string(), flow_id.clone()),
            ("resume".to_string(), flow_id.clone()),
            ("cancel".to_string(), flow_id),
        ]
    );
}
