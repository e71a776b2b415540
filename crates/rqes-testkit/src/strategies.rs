//! Proptest strategies for flow states and session records

use std::sync::Arc;

use proptest::prelude::*;
use rqes_ui::{DocumentData, FlowState, FlowStep};

use crate::factories::sample_config;

/// Any flow step.
pub fn arb_flow_step() -> impl Strategy<Value = FlowStep> {
    proptest::sample::select(FlowStep::all().to_vec())
}

/// Any flow state; `Initial` carries the sample configuration.
pub fn arb_flow_state() -> impl Strategy<Value = FlowState> {
    let config = Arc::new(sample_config());
    arb_flow_step().prop_map(move |step| match step {
        FlowStep::None => FlowState::None,
        FlowStep::Initial => FlowState::Initial(Arc::clone(&config)),
        FlowStep::Rssps => FlowState::Rssps,
        FlowStep::Credentials => FlowState::Credentials,
        FlowStep::Sign => FlowState::Sign,
        FlowStep::View => FlowState::View,
    })
}

/// Document reference with a short alphanumeric name.
pub fn arb_document() -> impl Strategy<Value = DocumentData> {
    "[a-z][a-z0-9_]{0,11}".prop_map(|stem| {
        let name = format!("{stem}.pdf");
        DocumentData::new(name.clone(), format!("file:///documents/{name}"))
    })
}

/// Non-empty authorization code.
pub fn arb_auth_code() -> impl Strategy<Value = String> {
    "[A-Za-z0-9-]{1,32}"
}
