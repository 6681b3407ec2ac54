//! Remedy domain
//!
//! - [`entities`]: remedy instructions and the tagged result of one request
//! - [`cache`]: order-independent lookup keys and persisted history records
//! - [`interpreter`]: normalization of raw provider text into a remedy

pub mod cache;
pub mod entities;
pub mod interpreter;
