//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod child;
pub mod growth_record;
pub mod nutrition_intake;
pub mod recipe;
pub mod session;
pub mod standard;
pub mod user;
