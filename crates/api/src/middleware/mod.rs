//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated parent from a JWT Bearer token.

pub mod auth;
