pub mod auth;
pub mod health;
pub mod ingredients;
pub mod kids;
pub mod remedies;
pub mod shopping_lists;
