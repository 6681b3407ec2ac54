//! Storage adapters for the repository ports.

mod memory_store;

pub use memory_store::MemoryStore;
