//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod credentials;
pub mod household_repository;
pub mod llm_gateway;
pub mod remedy_repository;
pub mod usage_recorder;
