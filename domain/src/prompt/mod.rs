//! Prompt domain
//!
//! Templates for the remedy and shopping-list requests sent to providers.

mod template;

pub use template::{NO_REMEDY_SENTINEL, RemedyPromptTemplate};
