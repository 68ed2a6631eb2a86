//! Uniform success/failure response envelope.
//!
//! Every endpoint, on success or failure, answers with the same JSON shape:
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "User registered successfully.",
//!   "data": { "phone_number": "9000000001", "balance": 1000, "is_upi_enabled": true }
//! }
//! ```
//!
//! Failures carry `success: false`, a human-readable message, and `data: null`.

use serde::{Deserialize, Serialize};

/// Tagged result wrapper for every API operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable outcome description
    pub message: String,

    /// Operation payload, absent on failure
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build a successful envelope carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Build a failure envelope with no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
