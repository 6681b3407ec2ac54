//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderKind`]: the LLM backends a remedy can be requested from
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
