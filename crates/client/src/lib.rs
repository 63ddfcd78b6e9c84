//! Typed HTTP client for the Tumbuh REST API.
//!
//! - [`api`] -- [`TumbuhApi`], one method per endpoint, with bearer-token
//!   session handling.
//! - [`sync`] -- pull the growth standards into a local store.
//! - [`models`] -- response payloads as the client sees them.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod sync;

pub use api::TumbuhApi;
pub use config::ClientConfig;
pub use error::ClientError;
