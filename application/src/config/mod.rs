//! Application-level configuration.
//!
//! - [`GenerationConfig`]: sampling knobs for remedy and shopping-list calls

pub mod generation_params;

pub use generation_params::{GenerationConfig, GenerationParams};
