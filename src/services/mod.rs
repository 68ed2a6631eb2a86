//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They own the business constants, the validation order, and the per-user
//! locking that keeps concurrent mutations serializable.

pub mod account_service;
pub mod payment_service;
