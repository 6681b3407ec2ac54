//! Port for usage and cost telemetry.
//!
//! Every provider call produces one [`UsageEvent`]. Events are an
//! observability side effect: they are never stored with remedies and a
//! recorder must not disturb the request that produced them.

use remedy_domain::{CostBreakdown, ProviderKind, TokenUsage};
use serde::Serialize;

/// Which request kind a provider call served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsagePurpose {
    Remedy,
    ShoppingList,
}

/// Token counts and derived cost of one provider call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageEvent {
    pub provider: ProviderKind,
    pub model: String,
    pub purpose: UsagePurpose,
    pub usage: TokenUsage,
    pub cost: CostBreakdown,
}

/// Port for recording usage events.
///
/// `record` is synchronous and infallible; implementations swallow their
/// own I/O errors.
pub trait UsageRecorder: Send + Sync {
    fn record(&self, event: &UsageEvent);
}

/// No-op implementation for tests and when telemetry is disabled.
pub struct NoUsageRecorder;

impl UsageRecorder for NoUsageRecorder {
    fn record(&self, _event: &UsageEvent) {}
}

/// Fan out to several recorders
pub struct CompositeUsageRecorder {
    recorders: Vec<Box<dyn UsageRecorder>>,
}

impl CompositeUsageRecorder {
    pub fn new(recorders: Vec<Box<dyn UsageRecorder>>) -> Self {
        Self { recorders }
    }
}

impl UsageRecorder for CompositeUsageRecorder {
    fn record(&self, event: &UsageEvent) {
        for recorder in &self.recorders {
            recorder.record(event);
        }
    }
}
