//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate_remedy;
pub mod manage_accounts;
pub mod manage_household;
pub(crate) mod shared;
pub mod suggest_groceries;

#[cfg(test)]
pub(crate) mod test_support;
