//! Serverless event loop for load-balancer invocations.

use crate::http::CanonicalRequest;
use crate::synth::synthesize;
use crate::transport::event::{into_alb_response, target_group_arn, uses_multi_value};
use aws_lambda_events::alb::{AlbTargetGroupRequest, AlbTargetGroupResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{debug, info};

/// Runs the core behind the serverless runtime's invocation loop.
#[derive(Debug, Default)]
pub struct EventRunner;

impl EventRunner {
    /// Create a runner.
    pub fn new() -> Self {
        Self
    }

    /// Poll the runtime API for events until the process is stopped.
    pub async fn run(self) -> Result<(), Error> {
        info!("Starting event runtime");
        lambda_runtime::run(service_fn(|event: LambdaEvent<AlbTargetGroupRequest>| async move {
            debug!(request_id = %event.context.request_id, "Invocation received");
            Ok::<_, Error>(handle_event(event.payload))
        }))
        .await
    }
}

/// Answer one load-balancer event.
pub fn handle_event(event: AlbTargetGroupRequest) -> AlbTargetGroupResponse {
    let multi_value = uses_multi_value(&event);
    debug!(target_group = %target_group_arn(&event), multi_value, "Adapting event");

    let response = synthesize(CanonicalRequest::from(event));
    into_alb_response(response, multi_value)
}
