//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request and response DTOs built from them.

/// Transaction (transfer) model
pub mod transaction;
/// Registered user model
pub mod user;
