//! Logging infrastructure: usage and cost telemetry.
//!
//! Provides [`JsonlUsageRecorder`], a JSONL file writer, and
//! [`TracingUsageRecorder`], a log-line emitter. Both implement the
//! [`UsageRecorder`](remedy_application::UsageRecorder) port.

mod usage_recorder;

pub use usage_recorder::{JsonlUsageRecorder, TracingUsageRecorder};
