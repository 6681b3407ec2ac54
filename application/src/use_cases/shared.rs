//! Shared utilities for use cases.
//!
//! Provider calls from every use case go through [`call_provider`] so each
//! call emits exactly one usage event.

use crate::ports::llm_gateway::{Generation, GatewayError, GenerationRequest, LlmGateway};
use crate::ports::usage_recorder::{UsageEvent, UsagePurpose, UsageRecorder};
use tracing::debug;

/// Send `request` through `gateway`, recording token usage when reported.
pub(crate) async fn call_provider(
    gateway: &dyn LlmGateway,
    request: &GenerationRequest,
    purpose: UsagePurpose,
    recorder: &dyn UsageRecorder,
) -> Result<Generation, GatewayError> {
    let generation = gateway.generate(request).await?;

    match generation.usage {
        Some(usage) => {
            let cost = gateway.pricing().cost(&usage);
            recorder.record(&UsageEvent {
                provider: gateway.kind(),
                model: generation.model.clone(),
                purpose,
                usage,
                cost,
            });
        }
        None => debug!(provider = %gateway.kind(), "Provider reported no token usage"),
    }

    Ok(generation)
}
