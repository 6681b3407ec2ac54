//! Household domain
//!
//! Accounts, the children they care for, and the account-wide pantry.

pub mod allergies;
pub mod entities;
