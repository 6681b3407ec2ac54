//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// One mebibyte, the default request body limit
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address to listen on (default: "127.0.0.1:8000")
    pub bind: String,
    /// Maximum accepted request body in bytes (default: 1 MiB)
    pub request_body_limit: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            request_body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}
