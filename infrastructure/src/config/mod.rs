//! Configuration file loading for kitchen-remedy
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `KITCHEN_REMEDY_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./kitchen-remedy.toml` or `./.kitchen-remedy.toml`
//! 4. Global: `$XDG_CONFIG_HOME/kitchen-remedy/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_TIMEOUT_SECS, FileConfig, FileGenerationConfig,
    FileGenerationParams, FileLoggingConfig, FileProviderConfig, FileProvidersConfig,
    FileServerConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
