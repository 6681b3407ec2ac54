//! Usage event recorders.
//!
//! Each [`UsageEvent`] becomes either a structured `tracing` line or a single
//! JSON line with a `type` field and `timestamp`, appended via a buffered writer.

use remedy_application::ports::usage_recorder::{UsageEvent, UsageRecorder};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

/// Emits one `info` line per provider call.
#[derive(Debug, Default)]
pub struct TracingUsageRecorder;

impl UsageRecorder for TracingUsageRecorder {
    fn record(&self, event: &UsageEvent) {
        info!(
            provider = %event.provider,
            model = %event.model,
            purpose = ?event.purpose,
            prompt_tokens = event.usage.prompt_tokens,
            completion_tokens = event.usage.completion_tokens,
            total_tokens = event.usage.total_tokens,
            input_cost = event.cost.input_cost,
            output_cost = event.cost.output_cost,
            total_cost = event.cost.total_cost,
            "Provider usage"
        );
    }
}

/// JSONL usage recorder that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlUsageRecorder {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlUsageRecorder {
    /// Create a recorder appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create usage log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open usage log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UsageRecorder for JsonlUsageRecorder {
    fn record(&self, event: &UsageEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match serde_json::to_value(event) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return,
        };
        record.insert("type".to_string(), serde_json::Value::from("provider_usage"));
        record.insert("timestamp".to_string(), serde_json::Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlUsageRecorder {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
