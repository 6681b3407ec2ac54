//! Presentation layer for kitchen-remedy
//!
//! This crate contains the CLI definition and the HTTP API surface.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, AppState, ErrorResponse, create_router};
