//! Infrastructure layer for kitchen-remedy
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod auth;
pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use auth::{HmacCredentialHasher, InMemorySessionStore};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::{JsonlUsageRecorder, TracingUsageRecorder};
pub use providers::{
    ChatCompletionsGateway, GeminiGateway, ProviderRegistry, ProviderSettings,
};
pub use storage::MemoryStore;
