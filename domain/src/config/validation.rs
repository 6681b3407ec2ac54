//! Configuration validation issues.
//!
//! Loaders check settings after merging every source and report problems as
//! structured [`ConfigIssue`] values instead of failing on the first one.
//! Callers abort when [`has_errors`] is true and log warnings otherwise.
//!
//! # Examples
//!
//! ```
//! use remedy_domain::config::validation::{ConfigIssue, ConfigIssueCode, has_errors};
//!
//! let issues = vec![ConfigIssue::warning(
//!     ConfigIssueCode::MissingApiKey,
//!     "providers.groq has no API key",
//! )];
//! assert!(!has_errors(&issues));
//! ```

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Temperature outside `[0, 1]`.
    TemperatureOutOfRange,
    /// A token limit of zero would make every call useless.
    ZeroMaxTokens,
    /// A provider has no resolvable API key and will not be registered.
    MissingApiKey,
    /// No provider has a key, so every remedy request will fail.
    NoProviderConfigured,
    /// A provider timeout of zero seconds.
    ZeroTimeout,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

/// Whether any issue is fatal.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
