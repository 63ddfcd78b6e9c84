//! Domain logic for child growth and nutrition tracking.
//!
//! Pure logic only: no database or network access. The `db` and `api`
//! crates fetch rows and pass them in.

pub mod error;
pub mod growth;
pub mod nutrition;
pub mod recipe;
pub mod types;
pub mod validation;
