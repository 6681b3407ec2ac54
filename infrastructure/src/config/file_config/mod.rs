//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod providers;
mod server;
mod storage;

pub use generation::{FileGenerationConfig, FileGenerationParams};
pub use providers::{DEFAULT_TIMEOUT_SECS, FileProviderConfig, FileProvidersConfig};
pub use server::FileServerConfig;
pub use storage::{FileLoggingConfig, FileStorageConfig};

use remedy_domain::config::has_errors;
use remedy_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when validation finds at least one fatal issue
#[derive(Error, Debug)]
#[error("invalid configuration:\n{}", format_issues(.0))]
pub struct ConfigValidationError(pub Vec<ConfigIssue>);

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Provider credentials, endpoints and pricing
    pub providers: FileProvidersConfig,
    /// Sampling knobs per request kind
    pub generation: FileGenerationConfig,
    /// Snapshot persistence
    pub storage: FileStorageConfig,
    /// Usage log and rolling diagnostic log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Temperature range and token limits of every generation section
    /// 2. Provider timeouts and API key availability
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    /// [`validate`](Self::validate) with an explicit environment lookup.
    pub fn validate_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        let mut issues = self.generation.issues();
        issues.extend(self.providers.issues_with(lookup));
        issues
    }

    /// Split issues into a fatal error or the remaining warnings.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if has_errors(&issues) {
            Err(ConfigValidationError(issues))
        } else {
            Ok(issues)
        }
    }
}
