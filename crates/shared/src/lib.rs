//! Shared utilities for the GeoSafe backend.
//!
//! - Password hashing with Argon2id
//! - Field validators for request payloads

pub mod password;
pub mod validation;
