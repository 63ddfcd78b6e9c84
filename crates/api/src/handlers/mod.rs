pub mod auth;
pub mod children;
pub mod growth;
pub mod growth_records;
pub mod nutrition;
pub mod recipes;
pub mod standards;
